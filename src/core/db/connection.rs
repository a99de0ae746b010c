/// Connection Management Module
///
/// This module defines the `Database` trait the backends implement, the
/// settings needed to open a connection, and the `ConnectionManager` that owns
/// the one connection shared by every menu operation.

use crate::core::db::dialect::Dialect;
use crate::core::db::query::{self, QueryResult};
use crate::core::db::sqlite::SqliteDatabase;
use crate::core::{HotelError, Result};
use serde::Deserialize;
use std::io::Write;
use tracing::{debug, info};

/// Password used when none is configured.
pub const DEFAULT_PASSWORD: &str = "12345";

/// Host used when none is configured.
pub const DEFAULT_HOST: &str = "localhost";

/// A live connection to one of the supported database servers.
///
/// Implementations run one statement at a time and never retry.
pub trait Database {
    /// The SQL dialect spoken by this backend
    fn dialect(&self) -> Dialect;

    /// Runs a statement that returns no rows
    fn execute(&mut self, sql: &str) -> Result<()>;

    /// Runs a statement and collects its full result set
    fn query(&mut self, sql: &str) -> Result<QueryResult>;

    /// Closes the connection
    fn close(self: Box<Self>) -> Result<()>;
}

/// Which database server to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// PostgreSQL server reached over TCP
    #[default]
    Postgres,
    /// SQLite database file; the database name is its path
    Sqlite,
}

/// Everything needed to open a connection
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionSettings {
    pub backend: BackendKind,
    pub host: String,
    pub port: u16,
    pub dbname: String,
    pub user: String,
    pub password: String,
}

impl ConnectionSettings {
    /// Builds settings for the default backend with the default host and password
    pub fn new(dbname: &str, port: u16, user: &str) -> Self {
        ConnectionSettings {
            backend: BackendKind::default(),
            host: DEFAULT_HOST.to_string(),
            port,
            dbname: dbname.to_string(),
            user: user.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
        }
    }

    /// Connection URL shown to the user. Never includes the password.
    pub fn url(&self) -> String {
        match self.backend {
            BackendKind::Postgres => {
                format!("postgresql://{}:{}/{}", self.host, self.port, self.dbname)
            }
            BackendKind::Sqlite => format!("sqlite://{}", self.dbname),
        }
    }
}

/// Owns the single database connection for the lifetime of the program
pub struct ConnectionManager {
    connection: Option<Box<dyn Database>>,
}

impl ConnectionManager {
    /// Creates a manager with no connection
    pub fn disconnected() -> Self {
        ConnectionManager { connection: None }
    }

    /// Wraps an already opened connection
    pub fn from_database(database: Box<dyn Database>) -> Self {
        ConnectionManager {
            connection: Some(database),
        }
    }

    /// Opens a connection using the given settings
    ///
    /// # Errors
    ///
    /// Returns the backend's error when the server cannot be reached or the
    /// database file cannot be opened, and `HotelError::Config` when the
    /// requested backend was not compiled in.
    pub fn connect(settings: &ConnectionSettings) -> Result<Self> {
        info!("Connecting to {}", settings.url());
        let database: Box<dyn Database> = match settings.backend {
            BackendKind::Sqlite => Box::new(SqliteDatabase::open(&settings.dbname)?),
            #[cfg(feature = "postgres")]
            BackendKind::Postgres => {
                Box::new(crate::core::db::postgres::PostgresDatabase::connect(settings)?)
            }
            #[cfg(not(feature = "postgres"))]
            BackendKind::Postgres => {
                return Err(HotelError::Config(
                    "this build has no PostgreSQL support; use --backend sqlite".to_string(),
                ))
            }
        };
        Ok(Self::from_database(database))
    }

    /// Checks if there's an active database connection
    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Dialect of the open connection
    pub fn dialect(&mut self) -> Result<Dialect> {
        Ok(self.database()?.dialect())
    }

    /// Runs a mutation statement. See [`query::execute_update`].
    pub fn execute_update(&mut self, sql: &str) -> Result<()> {
        query::execute_update(self.database()?, sql)
    }

    /// Runs a query and prints its rows to `out`. See [`query::execute_query`].
    pub fn execute_query<W: Write + ?Sized>(&mut self, sql: &str, out: &mut W) -> Result<usize> {
        query::execute_query(self.database()?, sql, out)
    }

    /// First column of the first row. See [`query::query_scalar`].
    pub fn query_scalar(&mut self, sql: &str) -> Result<Option<String>> {
        query::query_scalar(self.database()?, sql)
    }

    /// Next free id for `table`. See [`query::next_id`].
    pub fn next_id(&mut self, field: &str, table: &str) -> Result<i64> {
        query::next_id(self.database()?, field, table)
    }

    /// Closes the connection if one is open.
    ///
    /// Errors raised while closing are logged and dropped. Calling this on a
    /// manager that never connected, or calling it twice, does nothing.
    pub fn cleanup(&mut self) {
        if let Some(database) = self.connection.take() {
            match database.close() {
                Ok(()) => info!("Connection closed"),
                Err(e) => debug!("Ignoring error while closing connection: {}", e),
            }
        }
    }

    fn database(&mut self) -> Result<&mut dyn Database> {
        match self.connection.as_mut() {
            Some(database) => Ok(database.as_mut()),
            None => Err(HotelError::NotConnected),
        }
    }
}

impl Drop for ConnectionManager {
    fn drop(&mut self) {
        self.cleanup();
    }
}
