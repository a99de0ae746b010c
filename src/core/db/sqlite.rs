//! SQLite backend, used for local databases and by the test suite.

use crate::core::db::connection::Database;
use crate::core::db::dialect::Dialect;
use crate::core::db::query::QueryResult;
use crate::core::{HotelError, Result};
use rusqlite::{types::ValueRef, Connection};
use tracing::debug;

/// A SQLite database file opened through rusqlite
#[derive(Debug)]
pub struct SqliteDatabase {
    conn: Connection,
}

impl SqliteDatabase {
    /// Opens (creating if needed) the database file at `path`.
    ///
    /// `":memory:"` opens a private in-memory database.
    pub fn open(path: &str) -> Result<Self> {
        debug!("Opening SQLite database at {}", path);
        Self::init(Connection::open(path)?)
    }

    /// Opens a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(SqliteDatabase { conn })
    }

    /// The underlying rusqlite connection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl Database for SqliteDatabase {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    fn execute(&mut self, sql: &str) -> Result<()> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    fn query(&mut self, sql: &str) -> Result<QueryResult> {
        let mut stmt = self.conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let scales: Vec<Option<usize>> = stmt
            .columns()
            .iter()
            .map(|column| declared_scale(column.decl_type()))
            .collect();

        let rows = stmt
            .query_map([], |row| {
                scales
                    .iter()
                    .enumerate()
                    .map(|(i, scale)| row.get_ref(i).map(|value| format_value(value, *scale)))
                    .collect::<rusqlite::Result<Vec<_>>>()
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(QueryResult::new(columns, rows))
    }

    fn close(self: Box<Self>) -> Result<()> {
        self.conn.close().map_err(|(_, e)| HotelError::Sqlite(e))
    }
}

/// Decimal places fixed by a `NUMERIC(p, s)` or `DECIMAL(p, s)` column
fn declared_scale(decl_type: Option<&str>) -> Option<usize> {
    let decl_type = decl_type?.trim().to_ascii_uppercase();
    if !decl_type.starts_with("NUMERIC") && !decl_type.starts_with("DECIMAL") {
        return None;
    }
    let args = decl_type.split_once('(')?.1.strip_suffix(')')?;
    args.split_once(',')?.1.trim().parse().ok()
}

/// Formats a SQLite value as text, `None` for NULL.
///
/// SQLite stores whole NUMERIC values as integers and keeps no scale, so
/// values of a column declared with a scale are padded to it. Other reals get
/// two decimals when that is lossless.
fn format_value(value: ValueRef, scale: Option<usize>) -> Option<String> {
    match value {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(match scale {
            Some(places) if places > 0 => format!("{}.{}", i, "0".repeat(places)),
            _ => i.to_string(),
        }),
        ValueRef::Real(f) => Some(match scale {
            Some(places) => format!("{:.*}", places, f),
            None => format_real(f),
        }),
        ValueRef::Text(t) => Some(String::from_utf8_lossy(t).to_string()),
        ValueRef::Blob(b) => Some(format!("<BLOB: {} bytes>", b.len())),
    }
}

fn format_real(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    if fixed.parse::<f64>() == Ok(value) {
        fixed
    } else {
        value.to_string()
    }
}
