/// Hotel Schema Module
///
/// DDL for the tables the menu operations address. The statements only use
/// types and constraints that PostgreSQL and SQLite both accept, and every
/// table is created with `IF NOT EXISTS` so applying the schema twice is
/// harmless.

use crate::core::db::connection::ConnectionManager;
use crate::core::Result;
use tracing::info;

/// Tables in creation order (referenced tables first)
pub const TABLES: [&str; 9] = [
    "Hotel",
    "Staff",
    "Room",
    "Customer",
    "MaintenanceCompany",
    "Booking",
    "Assigned",
    "Repair",
    "Request",
];

pub const HOTEL_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS Hotel (
    hotelID INTEGER NOT NULL,
    address TEXT NOT NULL,
    manager INTEGER NOT NULL,
    PRIMARY KEY (hotelID)
);

CREATE TABLE IF NOT EXISTS Staff (
    SSN INTEGER NOT NULL,
    fName VARCHAR(30) NOT NULL,
    lName VARCHAR(30) NOT NULL,
    address TEXT,
    role VARCHAR(30) NOT NULL,
    employerID INTEGER NOT NULL,
    PRIMARY KEY (SSN),
    FOREIGN KEY (employerID) REFERENCES Hotel (hotelID)
);

CREATE TABLE IF NOT EXISTS Room (
    hotelID INTEGER NOT NULL,
    roomNo INTEGER NOT NULL,
    roomType VARCHAR(30) NOT NULL,
    PRIMARY KEY (hotelID, roomNo),
    FOREIGN KEY (hotelID) REFERENCES Hotel (hotelID)
);

CREATE TABLE IF NOT EXISTS Customer (
    customerID INTEGER NOT NULL,
    fName VARCHAR(30) NOT NULL,
    lName VARCHAR(30) NOT NULL,
    Address TEXT,
    phNo BIGINT,
    DOB DATE,
    gender VARCHAR(10),
    PRIMARY KEY (customerID)
);

CREATE TABLE IF NOT EXISTS MaintenanceCompany (
    cmpID INTEGER NOT NULL,
    name VARCHAR(30) NOT NULL,
    address TEXT,
    isCertified BOOLEAN NOT NULL,
    PRIMARY KEY (cmpID)
);

CREATE TABLE IF NOT EXISTS Booking (
    bID INTEGER NOT NULL,
    customer INTEGER NOT NULL,
    hotelID INTEGER NOT NULL,
    roomNo INTEGER NOT NULL,
    bookingDate DATE NOT NULL,
    noOfPeople INTEGER,
    price NUMERIC(8,2) NOT NULL,
    PRIMARY KEY (bID),
    FOREIGN KEY (customer) REFERENCES Customer (customerID),
    FOREIGN KEY (hotelID, roomNo) REFERENCES Room (hotelID, roomNo),
    UNIQUE (hotelID, roomNo, bookingDate)
);

CREATE TABLE IF NOT EXISTS Assigned (
    asgID INTEGER NOT NULL,
    staffID INTEGER NOT NULL,
    hotelID INTEGER NOT NULL,
    roomNo INTEGER NOT NULL,
    PRIMARY KEY (asgID),
    FOREIGN KEY (staffID) REFERENCES Staff (SSN),
    FOREIGN KEY (hotelID, roomNo) REFERENCES Room (hotelID, roomNo)
);

CREATE TABLE IF NOT EXISTS Repair (
    rID INTEGER NOT NULL,
    hotelID INTEGER NOT NULL,
    roomNo INTEGER NOT NULL,
    mCompany INTEGER NOT NULL,
    repairDate DATE NOT NULL,
    description TEXT,
    repairType VARCHAR(30),
    PRIMARY KEY (rID),
    FOREIGN KEY (hotelID, roomNo) REFERENCES Room (hotelID, roomNo),
    FOREIGN KEY (mCompany) REFERENCES MaintenanceCompany (cmpID)
);

CREATE TABLE IF NOT EXISTS Request (
    reqID INTEGER NOT NULL,
    managerID INTEGER NOT NULL,
    repairID INTEGER NOT NULL,
    requestDate DATE NOT NULL,
    description TEXT,
    PRIMARY KEY (reqID),
    FOREIGN KEY (managerID) REFERENCES Staff (SSN),
    FOREIGN KEY (repairID) REFERENCES Repair (rID)
);
"#;

/// Creates any missing hotel tables on the open connection.
pub fn apply_schema(db: &mut ConnectionManager) -> Result<()> {
    db.execute_update(HOTEL_SCHEMA)?;
    info!("Hotel schema applied ({} tables)", TABLES.len());
    Ok(())
}
