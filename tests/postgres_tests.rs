//! PostgreSQL backend tests against a live server
//!
//! These tests only run when HOTELSQL_TEST_DBNAME is set. HOTELSQL_TEST_HOST,
//! HOTELSQL_TEST_PORT, HOTELSQL_TEST_USER and HOTELSQL_PASSWORD override the
//! defaults. Everything is created as temporary tables, so the target
//! database is left untouched.

#[cfg(all(test, feature = "postgres"))]
mod postgres_tests {
    use hotelsql::core::db::{ConnectionManager, ConnectionSettings, Dialect};
    use hotelsql::statements;
    use std::env;

    fn live_settings() -> Option<ConnectionSettings> {
        let dbname = env::var("HOTELSQL_TEST_DBNAME").ok()?;
        let port = env::var("HOTELSQL_TEST_PORT")
            .ok()
            .and_then(|port| port.parse().ok())
            .unwrap_or(5432);
        let user = env::var("HOTELSQL_TEST_USER").unwrap_or_else(|_| "postgres".to_string());

        let mut settings = ConnectionSettings::new(&dbname, port, &user);
        if let Ok(host) = env::var("HOTELSQL_TEST_HOST") {
            settings.host = host;
        }
        if let Ok(password) = env::var("HOTELSQL_PASSWORD") {
            settings.password = password;
        }
        Some(settings)
    }

    fn query_text(db: &mut ConnectionManager, sql: &str) -> String {
        let mut out = Vec::new();
        db.execute_query(sql, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_statements_round_trip() {
        let Some(settings) = live_settings() else {
            println!("Skipping PostgreSQL test: HOTELSQL_TEST_DBNAME is not set");
            return;
        };

        let mut db = ConnectionManager::connect(&settings).unwrap();
        assert_eq!(db.dialect().unwrap(), Dialect::Postgres);

        db.execute_update(
            "CREATE TEMP TABLE Booking (bID INTEGER, bookingDate DATE, price NUMERIC(8,2), note TEXT)",
        )
        .unwrap();
        assert_eq!(db.next_id("bID", "Booking").unwrap(), 1);

        db.execute_update(
            "INSERT INTO Booking VALUES (1, '2024-06-02', 100, NULL), (2, '2024-06-20', 99.5, 'late')",
        )
        .unwrap();
        assert_eq!(db.next_id("bID", "Booking").unwrap(), 3);
        assert_eq!(
            db.query_scalar("SELECT note FROM Booking WHERE bID = 2").unwrap().as_deref(),
            Some("late")
        );

        assert_eq!(
            query_text(&mut db, "SELECT bID, bookingDate, price, note FROM Booking ORDER BY bID"),
            "bid\tbookingdate\tprice\tnote\t\n\
             1\t2024-06-02\t100.00\tNULL\t\n\
             2\t2024-06-20\t99.50\tlate\t\n"
        );
        assert_eq!(query_text(&mut db, "SELECT * FROM Booking WHERE bID = 9"), "");

        db.cleanup();
        assert!(!db.is_connected());
    }

    #[test]
    fn test_repairs_per_year_on_server() {
        let Some(settings) = live_settings() else {
            println!("Skipping PostgreSQL test: HOTELSQL_TEST_DBNAME is not set");
            return;
        };

        let mut db = ConnectionManager::connect(&settings).unwrap();
        db.execute_update(
            "CREATE TEMP TABLE Repair (rID INTEGER, hotelID INTEGER, roomNo INTEGER, repairDate DATE);
             INSERT INTO Repair VALUES (1, 1, 1, '2022-03-01'), (2, 1, 1, '2023-07-11'),
                                       (3, 1, 1, '2023-09-02'), (4, 1, 2, '2023-01-05');",
        )
        .unwrap();

        let dialect = db.dialect().unwrap();
        assert_eq!(
            query_text(&mut db, &statements::repairs_per_year(dialect, 1, 1)),
            "number_of_repairs\tyear\t\n1\t2022\t\n2\t2023\t\n"
        );
    }
}
