use crate::console::Console;
use crate::core::{HotelError, Result};
use std::io::{BufRead, Write};
use tracing::{debug, warn};

/// Prompt shown under the menu
pub const CHOICE_PROMPT: &str = "Please make your choice: ";

/// Menu number that ends the session
pub const EXIT_CHOICE: i64 = 17;

/// The sixteen business operations, in menu order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    AddCustomer,
    AddRoom,
    AddMaintenanceCompany,
    AddRepair,
    BookRoom,
    AssignHouseCleaning,
    RaiseRepairRequest,
    AvailableRooms,
    BookedRooms,
    BookingsForWeek,
    TopRoomPrices,
    TopCustomerBookings,
    CustomerTotalCost,
    RepairsByCompany,
    TopMaintenanceCompanies,
    RepairsPerYear,
}

impl Operation {
    pub const ALL: [Operation; 16] = [
        Operation::AddCustomer,
        Operation::AddRoom,
        Operation::AddMaintenanceCompany,
        Operation::AddRepair,
        Operation::BookRoom,
        Operation::AssignHouseCleaning,
        Operation::RaiseRepairRequest,
        Operation::AvailableRooms,
        Operation::BookedRooms,
        Operation::BookingsForWeek,
        Operation::TopRoomPrices,
        Operation::TopCustomerBookings,
        Operation::CustomerTotalCost,
        Operation::RepairsByCompany,
        Operation::TopMaintenanceCompanies,
        Operation::RepairsPerYear,
    ];

    /// Position in the menu, starting at 1
    pub fn number(self) -> i64 {
        Operation::ALL
            .iter()
            .position(|op| *op == self)
            .map_or(0, |index| index as i64 + 1)
    }

    pub fn from_number(number: i64) -> Option<Operation> {
        let index = usize::try_from(number.checked_sub(1)?).ok()?;
        Operation::ALL.get(index).copied()
    }

    /// Menu label
    pub fn label(self) -> &'static str {
        match self {
            Operation::AddCustomer => "Add new customer",
            Operation::AddRoom => "Add new room",
            Operation::AddMaintenanceCompany => "Add new maintenance company",
            Operation::AddRepair => "Add new repair",
            Operation::BookRoom => "Add new Booking",
            Operation::AssignHouseCleaning => "Assign house cleaning staff to a room",
            Operation::RaiseRepairRequest => "Raise a repair request",
            Operation::AvailableRooms => "Get number of available rooms",
            Operation::BookedRooms => "Get number of booked rooms",
            Operation::BookingsForWeek => "Get hotel bookings for a week",
            Operation::TopRoomPrices => "Get top k rooms with highest price for a date range",
            Operation::TopCustomerBookings => "Get top k highest booking price for a customer",
            Operation::CustomerTotalCost => {
                "Get customer total cost occurred for a give date range"
            }
            Operation::RepairsByCompany => "List the repairs made by maintenance company",
            Operation::TopMaintenanceCompanies => {
                "Get top k maintenance companies based on repair count"
            }
            Operation::RepairsPerYear => {
                "Get number of repairs occurred per year for a given hotel room"
            }
        }
    }

    /// Printed when the operation's statement fails
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::AddCustomer => {
                "The customer couldn't be added.\nMake sure that name and last name are at most \
                 30 characters long, phone number contains only numbers, date of birth is a valid \
                 date and gender is Male, Female or Other."
            }
            Operation::AddRoom => "The room couldn't be added.\nMake sure the hotel exists.",
            Operation::AddMaintenanceCompany => {
                "The company couldn't be added.\nMake sure that the name is at most 30 characters."
            }
            Operation::AddRepair => {
                "The repair couldn't be added.\nMake sure the room and the maintenance company exist \
                 and the repair date is a valid date."
            }
            Operation::BookRoom => {
                "The booking couldn't be created.\nMake sure the room exists and is not already \
                 booked on that date."
            }
            Operation::AssignHouseCleaning => {
                "The staff member couldn't be assigned.\nMake sure the staff member and the room exist."
            }
            Operation::RaiseRepairRequest => "The request couldn't be created.",
            _ => "There was an error.",
        }
    }
}

/// What a number typed at the menu prompt means
#[derive(Debug, PartialEq, Eq)]
pub enum MenuChoice {
    Run(Operation),
    Exit,
    Unknown(i64),
}

pub fn parse_choice(number: i64) -> MenuChoice {
    if number == EXIT_CHOICE {
        return MenuChoice::Exit;
    }
    match Operation::from_number(number) {
        Some(op) => MenuChoice::Run(op),
        None => MenuChoice::Unknown(number),
    }
}

/// The menu text, ending with a newline
pub fn render_menu() -> String {
    let mut menu = String::from("MAIN MENU\n---------\n");
    for op in Operation::ALL {
        menu.push_str(&format!("{}. {}\n", op.number(), op.label()));
    }
    menu.push_str(&format!("{}. < EXIT\n", EXIT_CHOICE));
    menu
}

/// Runs one business operation on behalf of the menu
pub trait OperationHandler {
    fn handle<R: BufRead, W: Write>(
        &mut self,
        op: Operation,
        console: &mut Console<R, W>,
    ) -> Result<()>;
}

/// Shows the menu and dispatches choices to `handler` until the user picks
/// "Exit" or the input ends.
///
/// A failing operation prints its failure message and the error, then the
/// menu is shown again. Only terminal I/O errors end the loop early.
pub fn run_menu<R, W, H>(console: &mut Console<R, W>, handler: &mut H) -> Result<()>
where
    R: BufRead,
    W: Write,
    H: OperationHandler,
{
    loop {
        console.print(&render_menu())?;
        let number = match console.prompt_int(CHOICE_PROMPT) {
            Ok(number) => number,
            Err(HotelError::InputClosed) => return Ok(()),
            Err(e) => return Err(e),
        };

        let op = match parse_choice(number) {
            MenuChoice::Exit => return Ok(()),
            MenuChoice::Unknown(_) => {
                console.println("Unrecognized choice!")?;
                continue;
            }
            MenuChoice::Run(op) => op,
        };

        debug!("Running {:?}", op);
        match handler.handle(op, console) {
            Ok(()) => {}
            Err(HotelError::InputClosed) => return Ok(()),
            Err(e) if e.is_database() => {
                warn!("{:?} failed: {}", op, e);
                console.println(op.failure_message())?;
                console.println(&e.to_string())?;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Records every dispatched operation and reads one line per call
    #[derive(Default)]
    struct RecordingHandler {
        calls: Vec<Operation>,
        fail_with_database_error: bool,
    }

    impl OperationHandler for RecordingHandler {
        fn handle<R: BufRead, W: Write>(
            &mut self,
            op: Operation,
            console: &mut Console<R, W>,
        ) -> Result<()> {
            self.calls.push(op);
            console.prompt_text("value: ")?;
            if self.fail_with_database_error {
                return Err(HotelError::Query("no such table: Room".to_string()));
            }
            Ok(())
        }
    }

    fn run(input: &str, handler: &mut RecordingHandler) -> String {
        let mut console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        run_menu(&mut console, handler).unwrap();
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn test_every_choice_invokes_its_handler_once() {
        for op in Operation::ALL {
            let mut handler = RecordingHandler::default();
            run(&format!("{}\nx\n17\n", op.number()), &mut handler);
            assert_eq!(handler.calls, vec![op]);
        }
    }

    #[test]
    fn test_malformed_choice_is_reprompted() {
        let mut handler = RecordingHandler::default();
        let output = run("abc\n\n3.5\n9\nx\n17\n", &mut handler);

        assert_eq!(handler.calls, vec![Operation::BookedRooms]);
        assert_eq!(output.matches("Your input is invalid!").count(), 3);
    }

    #[test]
    fn test_unrecognized_choice() {
        let mut handler = RecordingHandler::default();
        let output = run("0\n18\n-4\n17\n", &mut handler);

        assert!(handler.calls.is_empty());
        assert_eq!(output.matches("Unrecognized choice!").count(), 3);
        assert_eq!(output.matches("MAIN MENU").count(), 4);
    }

    #[test]
    fn test_database_errors_do_not_end_the_session() {
        let mut handler = RecordingHandler {
            fail_with_database_error: true,
            ..Default::default()
        };
        let output = run("2\nx\n8\nx\n17\n", &mut handler);

        assert_eq!(handler.calls, vec![Operation::AddRoom, Operation::AvailableRooms]);
        assert!(output.contains("The room couldn't be added."));
        assert!(output.contains("There was an error."));
        assert!(output.contains("no such table: Room"));
    }

    #[test]
    fn test_end_of_input_ends_the_session() {
        let mut handler = RecordingHandler::default();
        run("1\n", &mut handler);
        assert_eq!(handler.calls, vec![Operation::AddCustomer]);

        let mut handler = RecordingHandler::default();
        run("", &mut handler);
        assert!(handler.calls.is_empty());
    }

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice(1), MenuChoice::Run(Operation::AddCustomer));
        assert_eq!(parse_choice(16), MenuChoice::Run(Operation::RepairsPerYear));
        assert_eq!(parse_choice(17), MenuChoice::Exit);
        assert_eq!(parse_choice(0), MenuChoice::Unknown(0));
        assert_eq!(parse_choice(i64::MIN), MenuChoice::Unknown(i64::MIN));
    }

    #[test]
    fn test_operation_numbers_round_trip() {
        for (index, op) in Operation::ALL.iter().enumerate() {
            assert_eq!(op.number(), index as i64 + 1);
            assert_eq!(Operation::from_number(op.number()), Some(*op));
        }
    }

    #[test]
    fn test_render_menu() {
        insta::assert_snapshot!(render_menu().trim_end(), @r"
        MAIN MENU
        ---------
        1. Add new customer
        2. Add new room
        3. Add new maintenance company
        4. Add new repair
        5. Add new Booking
        6. Assign house cleaning staff to a room
        7. Raise a repair request
        8. Get number of available rooms
        9. Get number of booked rooms
        10. Get hotel bookings for a week
        11. Get top k rooms with highest price for a date range
        12. Get top k highest booking price for a customer
        13. Get customer total cost occurred for a give date range
        14. List the repairs made by maintenance company
        15. Get top k maintenance companies based on repair count
        16. Get number of repairs occurred per year for a given hotel room
        17. < EXIT
        ");
    }
}
