//! SQL text for every menu operation.
//!
//! Each builder takes typed input and returns the statement to run. Text
//! values are embedded as quoted literals with embedded quotes doubled, so a
//! name like `O'Brien` reaches the database intact instead of ending the
//! literal early.

use crate::core::db::Dialect;
use chrono::{Days, NaiveDate};

/// Date formats accepted from the keyboard, tried in order
pub const DATE_FORMATS: [&str; 2] = ["%m/%d/%Y", "%Y-%m-%d"];

/// Length of the "bookings for a week" window, in days
pub const WEEK_DAYS: u64 = 7;

/// Quotes `value` as a SQL string literal.
pub fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Parses a date typed as `MM/DD/YYYY` or `YYYY-MM-DD`.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text.trim(), format).ok())
}

/// A date as an ISO-8601 literal, which both backends compare correctly.
pub fn date_literal(date: NaiveDate) -> String {
    quote(&date.format("%Y-%m-%d").to_string())
}

/// First and last day of the week starting at `start`, both inclusive.
pub fn week_range(start: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    Some((start, start.checked_add_days(Days::new(WEEK_DAYS))?))
}

/// `SELECT MAX(field) FROM table`, the basis of manual id generation
pub fn max_id(field: &str, table: &str) -> String {
    format!("SELECT MAX({}) FROM {}", field, table)
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub phone: i64,
    pub date_of_birth: NaiveDate,
    pub gender: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewRoom {
    pub hotel_id: i64,
    pub room_type: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMaintenanceCompany {
    pub name: String,
    pub address: String,
    pub certified: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewRepair {
    pub hotel_id: i64,
    pub room_no: i64,
    pub company_id: i64,
    pub repair_date: NaiveDate,
    pub description: String,
    pub repair_type: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub customer_id: i64,
    pub hotel_id: i64,
    pub room_no: i64,
    pub booking_date: NaiveDate,
    pub people: u32,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAssignment {
    pub staff_id: i64,
    pub hotel_id: i64,
    pub room_no: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewRepairRequest {
    pub manager_id: i64,
    pub repair_id: i64,
    pub request_date: NaiveDate,
    pub description: String,
}

pub fn insert_customer(id: i64, customer: &NewCustomer) -> String {
    format!(
        "INSERT INTO Customer (customerID, fName, lName, Address, phNo, DOB, gender) \
         VALUES ({}, {}, {}, {}, {}, {}, {})",
        id,
        quote(&customer.first_name),
        quote(&customer.last_name),
        quote(&customer.address),
        customer.phone,
        date_literal(customer.date_of_birth),
        quote(&customer.gender)
    )
}

pub fn insert_room(room_no: i64, room: &NewRoom) -> String {
    format!(
        "INSERT INTO Room (hotelID, roomNo, roomType) VALUES ({}, {}, {})",
        room.hotel_id,
        room_no,
        quote(&room.room_type)
    )
}

pub fn insert_maintenance_company(id: i64, company: &NewMaintenanceCompany) -> String {
    format!(
        "INSERT INTO MaintenanceCompany (cmpID, name, address, isCertified) VALUES ({}, {}, {}, {})",
        id,
        quote(&company.name),
        quote(&company.address),
        if company.certified { "TRUE" } else { "FALSE" }
    )
}

pub fn insert_repair(id: i64, repair: &NewRepair) -> String {
    format!(
        "INSERT INTO Repair (rID, hotelID, roomNo, mCompany, repairDate, description, repairType) \
         VALUES ({}, {}, {}, {}, {}, {}, {})",
        id,
        repair.hotel_id,
        repair.room_no,
        repair.company_id,
        date_literal(repair.repair_date),
        quote(&repair.description),
        quote(&repair.repair_type)
    )
}

pub fn insert_booking(id: i64, booking: &NewBooking) -> String {
    format!(
        "INSERT INTO Booking (bID, customer, hotelID, roomNo, bookingDate, noOfPeople, price) \
         VALUES ({}, {}, {}, {}, {}, {}, {:.2})",
        id,
        booking.customer_id,
        booking.hotel_id,
        booking.room_no,
        date_literal(booking.booking_date),
        booking.people,
        booking.price
    )
}

pub fn insert_assignment(id: i64, assignment: &NewAssignment) -> String {
    format!(
        "INSERT INTO Assigned (asgID, staffID, hotelID, roomNo) VALUES ({}, {}, {}, {})",
        id, assignment.staff_id, assignment.hotel_id, assignment.room_no
    )
}

pub fn insert_repair_request(id: i64, request: &NewRepairRequest) -> String {
    format!(
        "INSERT INTO Request (reqID, managerID, repairID, requestDate, description) \
         VALUES ({}, {}, {}, {}, {})",
        id,
        request.manager_id,
        request.repair_id,
        date_literal(request.request_date),
        quote(&request.description)
    )
}

/// Id of the first customer with the given name
pub fn find_customer(first_name: &str, last_name: &str) -> String {
    format!(
        "SELECT customerID FROM Customer WHERE fName = {} AND lName = {} ORDER BY customerID LIMIT 1",
        quote(first_name),
        quote(last_name)
    )
}

/// Rooms of a hotel that appear in none of its bookings
pub fn available_rooms(hotel_id: i64) -> String {
    format!(
        "SELECT COUNT(*) AS AvailableRooms FROM Room R WHERE R.hotelID = {0} \
         AND R.roomNo NOT IN (SELECT B.roomNo FROM Booking B WHERE B.hotelID = {0})",
        hotel_id
    )
}

pub fn booked_rooms(hotel_id: i64) -> String {
    format!(
        "SELECT COUNT(*) AS TotalBookings FROM Booking WHERE hotelID = {}",
        hotel_id
    )
}

/// Bookings of a hotel dated between `from` and `to`, both inclusive
pub fn bookings_between(hotel_id: i64, from: NaiveDate, to: NaiveDate) -> String {
    format!(
        "SELECT * FROM Booking WHERE hotelID = {} AND bookingDate BETWEEN {} AND {} \
         ORDER BY bookingDate, roomNo",
        hotel_id,
        date_literal(from),
        date_literal(to)
    )
}

pub fn top_room_prices(k: u32, from: NaiveDate, to: NaiveDate) -> String {
    format!(
        "SELECT hotelID, roomNo, price, bookingDate FROM Booking \
         WHERE bookingDate BETWEEN {} AND {} ORDER BY price DESC LIMIT {}",
        date_literal(from),
        date_literal(to),
        k
    )
}

pub fn top_customer_bookings(first_name: &str, last_name: &str, k: u32) -> String {
    format!(
        "SELECT B.price FROM Booking B, Customer C \
         WHERE C.customerID = B.customer AND C.fName = {} AND C.lName = {} \
         ORDER BY B.price DESC LIMIT {}",
        quote(first_name),
        quote(last_name),
        k
    )
}

pub fn customer_total_cost(
    hotel_id: i64,
    customer_id: i64,
    start: NaiveDate,
    end: NaiveDate,
) -> String {
    format!(
        "SELECT ROUND(COALESCE(SUM(price), 0), 2) AS TotalIncurred FROM Booking \
         WHERE hotelID = {} AND customer = {} AND bookingDate BETWEEN {} AND {}",
        hotel_id,
        customer_id,
        date_literal(start),
        date_literal(end)
    )
}

pub fn repairs_by_company(company_name: &str) -> String {
    format!(
        "SELECT r.rID, r.hotelID, r.roomNo, r.repairType FROM MaintenanceCompany mc, Repair r \
         WHERE mc.name = {} AND mc.cmpID = r.mCompany ORDER BY r.rID",
        quote(company_name)
    )
}

pub fn top_maintenance_companies(k: u32) -> String {
    format!(
        "SELECT m.name, COUNT(r.rID) AS RepairCount FROM MaintenanceCompany m, Repair r \
         WHERE m.cmpID = r.mCompany GROUP BY m.cmpID, m.name \
         ORDER BY RepairCount DESC, m.name LIMIT {}",
        k
    )
}

pub fn repairs_per_year(dialect: Dialect, hotel_id: i64, room_no: i64) -> String {
    let year = dialect.year_of("r.repairDate");
    format!(
        "SELECT COUNT(*) AS number_of_repairs, {0} AS year FROM Repair r \
         WHERE r.hotelID = {1} AND r.roomNo = {2} GROUP BY {0} ORDER BY {0}",
        year, hotel_id, room_no
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_quote_doubles_single_quotes() {
        assert_eq!(quote("Suite"), "'Suite'");
        assert_eq!(quote("O'Brien"), "'O''Brien'");
        assert_eq!(quote("'; DROP TABLE Room; --"), "'''; DROP TABLE Room; --'");
        assert_eq!(quote(""), "''");
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("02/28/2024"), Some(date(2024, 2, 28)));
        assert_eq!(parse_date(" 2024-02-28 "), Some(date(2024, 2, 28)));
        assert_eq!(parse_date("28/02/2024"), None);
        assert_eq!(parse_date("tomorrow"), None);
    }

    #[test]
    fn test_week_range_crosses_month_and_year() {
        assert_eq!(
            week_range(date(2023, 12, 28)),
            Some((date(2023, 12, 28), date(2024, 1, 4)))
        );
        assert_eq!(
            week_range(date(2024, 2, 25)),
            Some((date(2024, 2, 25), date(2024, 3, 3)))
        );
    }

    #[test]
    fn test_bookings_between_uses_iso_literals() {
        let sql = bookings_between(3, date(2024, 5, 1), date(2024, 5, 8));
        assert!(sql.contains("hotelID = 3"));
        assert!(sql.contains("BETWEEN '2024-05-01' AND '2024-05-08'"));
    }

    #[test]
    fn test_insert_customer() {
        let customer = NewCustomer {
            first_name: "Ann".to_string(),
            last_name: "O'Neil".to_string(),
            address: "12 Main St".to_string(),
            phone: 9515550100,
            date_of_birth: date(1990, 4, 1),
            gender: "Female".to_string(),
        };
        assert_eq!(
            insert_customer(8, &customer),
            "INSERT INTO Customer (customerID, fName, lName, Address, phNo, DOB, gender) \
             VALUES (8, 'Ann', 'O''Neil', '12 Main St', 9515550100, '1990-04-01', 'Female')"
        );
    }

    #[test]
    fn test_insert_booking_formats_price() {
        let booking = NewBooking {
            customer_id: 2,
            hotel_id: 1,
            room_no: 4,
            booking_date: date(2024, 5, 2),
            people: 2,
            price: 120.5,
        };
        assert!(insert_booking(10, &booking).ends_with("VALUES (10, 2, 1, 4, '2024-05-02', 2, 120.50)"));
    }

    #[test]
    fn test_insert_maintenance_company_boolean() {
        let mut company = NewMaintenanceCompany {
            name: "FixIt".to_string(),
            address: "1 Tool Rd".to_string(),
            certified: true,
        };
        assert!(insert_maintenance_company(1, &company).ends_with("'1 Tool Rd', TRUE)"));
        company.certified = false;
        assert!(insert_maintenance_company(1, &company).ends_with("'1 Tool Rd', FALSE)"));
    }

    #[test]
    fn test_date_ranges_use_iso_literals() {
        let sql = top_room_prices(2, date(2024, 5, 1), date(2024, 5, 31));
        assert!(sql.contains("BETWEEN '2024-05-01' AND '2024-05-31' ORDER BY price DESC LIMIT 2"));

        let sql = customer_total_cost(1, 7, date(2024, 5, 1), date(2024, 5, 31));
        assert!(sql.contains("customer = 7 AND bookingDate BETWEEN '2024-05-01' AND '2024-05-31'"));
    }

    #[test]
    fn test_top_maintenance_companies_honours_k() {
        assert!(top_maintenance_companies(3).ends_with("LIMIT 3"));
    }

    #[test]
    fn test_repairs_per_year_dialects() {
        let pg = repairs_per_year(Dialect::Postgres, 1, 2);
        assert!(pg.contains("DATE_PART('year', r.repairDate) AS year"));
        assert!(pg.contains("GROUP BY DATE_PART('year', r.repairDate)"));

        let lite = repairs_per_year(Dialect::Sqlite, 1, 2);
        assert!(lite.contains("strftime('%Y', r.repairDate)"));
        assert!(lite.contains("r.hotelID = 1 AND r.roomNo = 2"));
    }

    #[test]
    fn test_max_id() {
        assert_eq!(max_id("cmpID", "MaintenanceCompany"), "SELECT MAX(cmpID) FROM MaintenanceCompany");
    }
}
