//! The sixteen business operations behind the menu.
//!
//! Each operation reads its fields from the console, builds its statement
//! with [`crate::statements`] and runs it through the connection manager.
//! Database errors are returned to the menu, which prints the operation's
//! failure message.

use crate::console::Console;
use crate::core::db::ConnectionManager;
use crate::core::{HotelError, Result};
use crate::menu::{Operation, OperationHandler};
use crate::statements::{self, *};
use std::io::{BufRead, Write};
use tracing::info;

/// Dispatches menu operations to the functions in this module
pub struct HotelOperations<'a> {
    db: &'a mut ConnectionManager,
}

impl<'a> HotelOperations<'a> {
    pub fn new(db: &'a mut ConnectionManager) -> Self {
        HotelOperations { db }
    }
}

impl OperationHandler for HotelOperations<'_> {
    fn handle<R: BufRead, W: Write>(
        &mut self,
        op: Operation,
        console: &mut Console<R, W>,
    ) -> Result<()> {
        let db = &mut *self.db;
        match op {
            Operation::AddCustomer => add_customer(db, console),
            Operation::AddRoom => add_room(db, console),
            Operation::AddMaintenanceCompany => add_maintenance_company(db, console),
            Operation::AddRepair => add_repair(db, console),
            Operation::BookRoom => book_room(db, console),
            Operation::AssignHouseCleaning => assign_house_cleaning(db, console),
            Operation::RaiseRepairRequest => raise_repair_request(db, console),
            Operation::AvailableRooms => available_rooms(db, console),
            Operation::BookedRooms => booked_rooms(db, console),
            Operation::BookingsForWeek => bookings_for_week(db, console),
            Operation::TopRoomPrices => top_room_prices(db, console),
            Operation::TopCustomerBookings => top_customer_bookings(db, console),
            Operation::CustomerTotalCost => customer_total_cost(db, console),
            Operation::RepairsByCompany => repairs_by_company(db, console),
            Operation::TopMaintenanceCompanies => top_maintenance_companies(db, console),
            Operation::RepairsPerYear => repairs_per_year(db, console),
        }
    }
}

fn run_query<R: BufRead, W: Write>(
    db: &mut ConnectionManager,
    console: &mut Console<R, W>,
    sql: &str,
) -> Result<usize> {
    db.execute_query(sql, console.writer())
}

/// Looks up a customer id by name, telling the user when nobody matches
fn find_customer<R: BufRead, W: Write>(
    db: &mut ConnectionManager,
    console: &mut Console<R, W>,
    first_name: &str,
    last_name: &str,
) -> Result<Option<i64>> {
    let found = db.query_scalar(&statements::find_customer(first_name, last_name))?;
    match found {
        Some(id) => id
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| HotelError::Query(format!("customer id is not an integer: {}", id))),
        None => {
            console.println(&format!(
                "No customer named {} {} was found.",
                first_name, last_name
            ))?;
            Ok(None)
        }
    }
}

pub fn add_customer<R: BufRead, W: Write>(
    db: &mut ConnectionManager,
    console: &mut Console<R, W>,
) -> Result<()> {
    let customer = NewCustomer {
        first_name: console.prompt_text("Enter name: ")?,
        last_name: console.prompt_text("Enter last name: ")?,
        address: console.prompt_text("Enter Address: ")?,
        phone: console.prompt_int("Enter phone number: ")?,
        date_of_birth: console.prompt_date("Enter date of birth: ")?,
        gender: console.prompt_text("Enter Gender: ")?,
    };

    let id = db.next_id("customerID", "Customer")?;
    db.execute_update(&insert_customer(id, &customer))?;
    info!("Added customer {}", id);
    console.println("The customer was successfully added!")
}

pub fn add_room<R: BufRead, W: Write>(
    db: &mut ConnectionManager,
    console: &mut Console<R, W>,
) -> Result<()> {
    let room = NewRoom {
        hotel_id: console.prompt_int("\tEnter hotelID: ")?,
        room_type: console.prompt_text("\tEnter room type: ")?,
    };

    let room_no = db.next_id("roomNo", "Room")?;
    db.execute_update(&insert_room(room_no, &room))?;
    info!("Added room {} to hotel {}", room_no, room.hotel_id);
    console.println("The room was successfully added!")
}

pub fn add_maintenance_company<R: BufRead, W: Write>(
    db: &mut ConnectionManager,
    console: &mut Console<R, W>,
) -> Result<()> {
    let company = NewMaintenanceCompany {
        name: console.prompt_text("Name of the Company: ")?,
        address: console.prompt_text("Address: ")?,
        certified: console.prompt_yes_no("Is it certified? (yes/no): ")?,
    };

    let id = db.next_id("cmpID", "MaintenanceCompany")?;
    db.execute_update(&insert_maintenance_company(id, &company))?;
    info!("Added maintenance company {}", id);
    console.println(&format!("{} was successfully added!", company.name))
}

pub fn add_repair<R: BufRead, W: Write>(
    db: &mut ConnectionManager,
    console: &mut Console<R, W>,
) -> Result<()> {
    let repair = NewRepair {
        hotel_id: console.prompt_int("\tEnter hotelID: ")?,
        room_no: console.prompt_int("\tEnter room number: ")?,
        company_id: console.prompt_int("\tEnter maintenance company id: ")?,
        repair_date: console.prompt_date("\tEnter repair date: ")?,
        description: console.prompt_text("\tEnter repair description: ")?,
        repair_type: console.prompt_text("\tEnter repair type: ")?,
    };

    let id = db.next_id("rID", "Repair")?;
    db.execute_update(&insert_repair(id, &repair))?;
    info!("Added repair {}", id);
    console.println("The repair was successfully added!")
}

pub fn book_room<R: BufRead, W: Write>(
    db: &mut ConnectionManager,
    console: &mut Console<R, W>,
) -> Result<()> {
    let hotel_id = console.prompt_int("Enter hotel ID: ")?;
    let room_no = console.prompt_int("Enter room number: ")?;
    let first_name = console.prompt_text("Enter Customer first name: ")?;
    let last_name = console.prompt_text("Enter Customer last name: ")?;
    let booking_date = console.prompt_date("Enter booking date: ")?;
    let people = console.prompt_parsed("Enter number of people: ")?;
    let price = console.prompt_decimal("Enter price: ")?;

    let Some(customer_id) = find_customer(db, console, &first_name, &last_name)? else {
        return Ok(());
    };
    let booking = NewBooking {
        customer_id,
        hotel_id,
        room_no,
        booking_date,
        people,
        price,
    };

    let id = db.next_id("bID", "Booking")?;
    db.execute_update(&insert_booking(id, &booking))?;
    info!("Added booking {}", id);
    console.println("The booking was successfully created!")
}

pub fn assign_house_cleaning<R: BufRead, W: Write>(
    db: &mut ConnectionManager,
    console: &mut Console<R, W>,
) -> Result<()> {
    let assignment = NewAssignment {
        staff_id: console.prompt_int("\tEnter staff id: ")?,
        hotel_id: console.prompt_int("\tEnter hotelID: ")?,
        room_no: console.prompt_int("\tEnter room number: ")?,
    };

    let id = db.next_id("asgID", "Assigned")?;
    db.execute_update(&insert_assignment(id, &assignment))?;
    info!("Added assignment {}", id);
    console.println("The staff member was successfully assigned!")
}

pub fn raise_repair_request<R: BufRead, W: Write>(
    db: &mut ConnectionManager,
    console: &mut Console<R, W>,
) -> Result<()> {
    let request = NewRepairRequest {
        manager_id: console.prompt_int("Enter SSN: ")?,
        repair_id: console.prompt_int("Enter repair ID: ")?,
        request_date: console.prompt_date("Enter date: ")?,
        description: console.prompt_text("Enter description: ")?,
    };

    let id = db.next_id("reqID", "Request")?;
    db.execute_update(&insert_repair_request(id, &request))?;
    info!("Added repair request {}", id);
    console.println("The request was successfully created!")
}

pub fn available_rooms<R: BufRead, W: Write>(
    db: &mut ConnectionManager,
    console: &mut Console<R, W>,
) -> Result<()> {
    let hotel_id = console.prompt_int("\tEnter Hotel ID: ")?;
    run_query(db, console, &statements::available_rooms(hotel_id))?;
    Ok(())
}

pub fn booked_rooms<R: BufRead, W: Write>(
    db: &mut ConnectionManager,
    console: &mut Console<R, W>,
) -> Result<()> {
    let hotel_id = console.prompt_int("Enter hotel ID: ")?;
    run_query(db, console, &statements::booked_rooms(hotel_id))?;
    Ok(())
}

pub fn bookings_for_week<R: BufRead, W: Write>(
    db: &mut ConnectionManager,
    console: &mut Console<R, W>,
) -> Result<()> {
    let hotel_id = console.prompt_int("\tEnter hotelID: ")?;
    let start = console.prompt_date("\tEnter date(mm/dd/yyyy): ")?;
    let (from, to) = week_range(start)
        .ok_or_else(|| HotelError::Query(format!("{} is too far in the future", start)))?;
    run_query(db, console, &bookings_between(hotel_id, from, to))?;
    Ok(())
}

pub fn top_room_prices<R: BufRead, W: Write>(
    db: &mut ConnectionManager,
    console: &mut Console<R, W>,
) -> Result<()> {
    let k = console.prompt_parsed("Enter k: ")?;
    let from = console.prompt_date("Enter starting date: ")?;
    let to = console.prompt_date("Enter ending date: ")?;
    run_query(db, console, &statements::top_room_prices(k, from, to))?;
    Ok(())
}

pub fn top_customer_bookings<R: BufRead, W: Write>(
    db: &mut ConnectionManager,
    console: &mut Console<R, W>,
) -> Result<()> {
    let first_name = console.prompt_text("\tEnter customer's first name: ")?;
    let last_name = console.prompt_text("\tEnter customer's last name: ")?;
    let k = console.prompt_parsed("\tEnter k: ")?;
    run_query(
        db,
        console,
        &statements::top_customer_bookings(&first_name, &last_name, k),
    )?;
    Ok(())
}

pub fn customer_total_cost<R: BufRead, W: Write>(
    db: &mut ConnectionManager,
    console: &mut Console<R, W>,
) -> Result<()> {
    let hotel_id = console.prompt_int("Enter hotel ID: ")?;
    let first_name = console.prompt_text("Enter customer's first name: ")?;
    let last_name = console.prompt_text("Enter customer's last name: ")?;
    let start = console.prompt_date("Enter start date: ")?;
    let end = console.prompt_date("Enter end date: ")?;

    if let Some(customer_id) = find_customer(db, console, &first_name, &last_name)? {
        run_query(
            db,
            console,
            &statements::customer_total_cost(hotel_id, customer_id, start, end),
        )?;
    }
    Ok(())
}

pub fn repairs_by_company<R: BufRead, W: Write>(
    db: &mut ConnectionManager,
    console: &mut Console<R, W>,
) -> Result<()> {
    let company = console.prompt_text("\tEnter Maintenance company name: ")?;
    run_query(db, console, &statements::repairs_by_company(&company))?;
    Ok(())
}

pub fn top_maintenance_companies<R: BufRead, W: Write>(
    db: &mut ConnectionManager,
    console: &mut Console<R, W>,
) -> Result<()> {
    let k = console.prompt_parsed("Enter k: ")?;
    run_query(db, console, &statements::top_maintenance_companies(k))?;
    Ok(())
}

pub fn repairs_per_year<R: BufRead, W: Write>(
    db: &mut ConnectionManager,
    console: &mut Console<R, W>,
) -> Result<()> {
    let hotel_id = console.prompt_int("\tEnter Hotel ID: ")?;
    let room_no = console.prompt_int("\tEnter room number: ")?;
    let dialect = db.dialect()?;
    run_query(
        db,
        console,
        &statements::repairs_per_year(dialect, hotel_id, room_no),
    )?;
    Ok(())
}
