/// Hotelsql Error Module
///
/// This module defines the error type shared by every layer of the
/// application, from reading the keyboard to talking to the database.
use thiserror::Error;

/// Error type for hotelsql.
///
/// Database errors carry the driver's own error so the menu can print it
/// verbatim after an operation's canned failure message.
#[derive(Error, Debug)]
pub enum HotelError {
    /// Errors raised by the SQLite backend
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Errors raised by the PostgreSQL backend
    #[cfg(feature = "postgres")]
    #[error("Database error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    /// A statement ran but its result could not be interpreted
    #[error("Query error: {0}")]
    Query(String),

    /// A statement was issued without an open connection
    #[error("Not connected to a database")]
    NotConnected,

    /// Configuration loading and validation errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed configuration file
    #[error("Configuration error: {0}")]
    Toml(#[from] toml::de::Error),

    /// File system and terminal I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Standard input reached end of file while a value was expected
    #[error("Input stream closed")]
    InputClosed,
}

impl HotelError {
    /// Returns true for errors that come from executing SQL, as opposed to
    /// errors that end the session.
    pub fn is_database(&self) -> bool {
        match self {
            HotelError::Sqlite(_) | HotelError::Query(_) | HotelError::NotConnected => true,
            #[cfg(feature = "postgres")]
            HotelError::Postgres(_) => true,
            _ => false,
        }
    }
}

/// Type alias for Result to use HotelError as the error type.
pub type Result<T> = std::result::Result<T, HotelError>;
