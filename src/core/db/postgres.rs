//! PostgreSQL backend.
//!
//! tokio-postgres is async; this backend owns a current-thread runtime and
//! blocks on every call so the rest of the program stays synchronous. All
//! statements go through the simple-query protocol, so every value arrives
//! already rendered as text by the server.

use crate::core::db::connection::{ConnectionSettings, Database};
use crate::core::db::dialect::Dialect;
use crate::core::db::query::QueryResult;
use crate::core::Result;
use tokio::runtime::{Builder, Runtime};
use tokio_postgres::{Client, NoTls, SimpleQueryMessage};
use tracing::{debug, error};

/// A connection to a PostgreSQL server
pub struct PostgresDatabase {
    runtime: Runtime,
    client: Client,
}

impl PostgresDatabase {
    /// Connects to the server described by `settings`.
    pub fn connect(settings: &ConnectionSettings) -> Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;

        let mut config = tokio_postgres::Config::new();
        config
            .host(&settings.host)
            .port(settings.port)
            .dbname(&settings.dbname)
            .user(&settings.user)
            .password(&settings.password);

        let (client, connection) = runtime.block_on(config.connect(NoTls))?;

        // Only polled while a call blocks on the runtime.
        runtime.spawn(async move {
            if let Err(e) = connection.await {
                error!("PostgreSQL connection error: {}", e);
            }
        });

        debug!("Connected to PostgreSQL at {}:{}", settings.host, settings.port);
        Ok(PostgresDatabase { runtime, client })
    }
}

impl Database for PostgresDatabase {
    fn dialect(&self) -> Dialect {
        Dialect::Postgres
    }

    fn execute(&mut self, sql: &str) -> Result<()> {
        self.runtime.block_on(self.client.batch_execute(sql))?;
        Ok(())
    }

    fn query(&mut self, sql: &str) -> Result<QueryResult> {
        let messages = self.runtime.block_on(self.client.simple_query(sql))?;

        let mut columns = Vec::new();
        let mut rows = Vec::new();
        for message in messages {
            if let SimpleQueryMessage::Row(row) = message {
                if columns.is_empty() {
                    columns = row
                        .columns()
                        .iter()
                        .map(|column| column.name().to_string())
                        .collect();
                }
                rows.push((0..row.len()).map(|i| row.get(i).map(str::to_string)).collect());
            }
        }

        Ok(QueryResult::new(columns, rows))
    }

    fn close(self: Box<Self>) -> Result<()> {
        let PostgresDatabase { runtime, client } = *self;
        // Dropping the client queues Terminate; poll once so it is sent.
        drop(client);
        runtime.block_on(tokio::task::yield_now());
        Ok(())
    }
}
