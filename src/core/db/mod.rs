/// Database Module
///
/// The database layer is split into a few focused concerns:
/// - **Connection Management** (`connection.rs`): the `Database` trait, connection
///   settings and the `ConnectionManager` that owns the single live connection
/// - **Statement Execution** (`query.rs`): execute-update, execute-query with
///   tab-separated printing, scalar lookups and "max id + 1"
/// - **Backends** (`sqlite.rs`, `postgres.rs`): the two `Database` implementations
/// - **Dialect** (`dialect.rs`): the few expressions the backends spell differently
/// - **Schema** (`schema.rs`): DDL for the hotel tables
///
/// All operations report failures through `HotelError`.
pub mod connection;
pub mod dialect;
#[cfg(feature = "postgres")]
pub mod postgres;
pub mod query;
pub mod schema;
pub mod sqlite;

pub use connection::*;
pub use dialect::Dialect;
pub use query::*;
