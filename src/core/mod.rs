/// Core Module for hotelsql
///
/// Shared infrastructure for the menu front end: the database layer and the
/// error type every other module reports through.

pub mod db;
pub mod error;

// Re-export commonly used types for convenience
pub use error::{HotelError, Result};
