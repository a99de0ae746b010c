/// Statement Execution Module
///
/// The pass-through layer every menu operation goes through: mutations are
/// applied and forgotten, queries are printed as tab-separated rows.

use crate::core::db::connection::Database;
use crate::core::{HotelError, Result};
use crate::results_grid::ResultsGrid;
use crate::statements;
use std::io::Write;
use tracing::debug;

/// Represents the result of a SQL query execution
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    /// Column names from the query result
    pub columns: Vec<String>,
    /// Rows of data as text, `None` for SQL NULL
    pub rows: Vec<Vec<Option<String>>>,
    /// Number of rows returned
    pub row_count: usize,
}

impl QueryResult {
    /// Creates a new QueryResult from column names and row data
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        let row_count = rows.len();
        QueryResult {
            columns,
            rows,
            row_count,
        }
    }

    /// First column of the first row, if there is one and it is not NULL
    pub fn first_value(&self) -> Option<&str> {
        self.rows.first()?.first()?.as_deref()
    }
}

/// Applies a mutation statement (INSERT, UPDATE, DELETE, DDL).
///
/// # Errors
///
/// Propagates the backend's error unchanged.
pub fn execute_update(db: &mut dyn Database, sql: &str) -> Result<()> {
    debug!("execute_update: {}", sql);
    db.execute(sql)
}

/// Runs a query and prints the result to `out`.
///
/// The header row is written together with the first data row, so a query
/// with no matching rows prints nothing. Every cell is followed by a tab.
///
/// # Returns
///
/// The number of rows returned.
pub fn execute_query<W: Write + ?Sized>(
    db: &mut dyn Database,
    sql: &str,
    out: &mut W,
) -> Result<usize> {
    debug!("execute_query: {}", sql);
    let result = db.query(sql)?;
    let grid = ResultsGrid::from(&result);
    out.write_all(grid.render().as_bytes())?;
    out.flush()?;
    debug!("{} rows", result.row_count);
    Ok(result.row_count)
}

/// Runs a query and returns the first column of its first row.
pub fn query_scalar(db: &mut dyn Database, sql: &str) -> Result<Option<String>> {
    debug!("query_scalar: {}", sql);
    let result = db.query(sql)?;
    Ok(result.first_value().map(str::to_string))
}

/// Computes the next id for `table` as `MAX(field) + 1`.
///
/// An empty table yields 1. The value is read before the insert that uses
/// it, so concurrent clients can be handed the same id.
///
/// # Errors
///
/// Returns `HotelError::Query` when the maximum is not an integer.
pub fn next_id(db: &mut dyn Database, field: &str, table: &str) -> Result<i64> {
    match query_scalar(db, &statements::max_id(field, table))? {
        None => Ok(1),
        Some(max) => parse_id(&max).map(|id| id + 1).ok_or_else(|| {
            HotelError::Query(format!("MAX({}) of {} is not an integer: {}", field, table, max))
        }),
    }
}

// Postgres NUMERIC columns come back as "12" or "12.0" depending on scale.
fn parse_id(text: &str) -> Option<i64> {
    let text = text.trim();
    text.parse::<i64>().ok().or_else(|| {
        let (whole, fraction) = text.split_once('.')?;
        if fraction.chars().all(|c| c == '0') {
            whole.parse::<i64>().ok()
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::db::sqlite::SqliteDatabase;

    fn room_database() -> SqliteDatabase {
        let mut db = SqliteDatabase::open_in_memory().unwrap();
        db.execute(
            "CREATE TABLE Room (hotelID INTEGER, roomNo INTEGER, roomType TEXT);
             INSERT INTO Room VALUES (1, 1, 'Suite');
             INSERT INTO Room VALUES (1, 2, NULL);",
        )
        .unwrap();
        db
    }

    #[test]
    fn test_execute_query_prints_tab_separated_rows() {
        let mut db = room_database();
        let mut out = Vec::new();

        let count =
            execute_query(&mut db, "SELECT roomNo, roomType FROM Room ORDER BY roomNo", &mut out)
                .unwrap();

        assert_eq!(count, 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "roomNo\troomType\t\n1\tSuite\t\n2\tNULL\t\n"
        );
    }

    #[test]
    fn test_execute_query_zero_rows_prints_nothing() {
        let mut db = room_database();
        let mut out = Vec::new();

        let count = execute_query(&mut db, "SELECT * FROM Room WHERE hotelID = 99", &mut out).unwrap();

        assert_eq!(count, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_execute_update_propagates_errors() {
        let mut db = room_database();
        assert!(execute_update(&mut db, "INSERT INTO Nowhere VALUES (1)").is_err());
        assert!(execute_update(&mut db, "DELETE FROM Room WHERE roomNo = 2").is_ok());
        assert_eq!(
            query_scalar(&mut db, "SELECT COUNT(*) FROM Room").unwrap(),
            Some("1".to_string())
        );
    }

    #[test]
    fn test_next_id_is_max_plus_one() {
        let mut db = room_database();
        assert_eq!(next_id(&mut db, "roomNo", "Room").unwrap(), 3);

        execute_update(&mut db, "INSERT INTO Room VALUES (2, 41, 'Single')").unwrap();
        assert_eq!(next_id(&mut db, "roomNo", "Room").unwrap(), 42);
    }

    #[test]
    fn test_next_id_empty_table() {
        let mut db = room_database();
        execute_update(&mut db, "DELETE FROM Room").unwrap();
        assert_eq!(next_id(&mut db, "roomNo", "Room").unwrap(), 1);
    }

    #[test]
    fn test_next_id_rejects_non_integer_max() {
        let mut db = room_database();
        match next_id(&mut db, "roomType", "Room") {
            Err(HotelError::Query(msg)) => assert!(msg.contains("Suite")),
            other => panic!("Expected Query error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("7"), Some(7));
        assert_eq!(parse_id(" 12.000 "), Some(12));
        assert_eq!(parse_id("12.5"), None);
        assert_eq!(parse_id("abc"), None);
    }
}
