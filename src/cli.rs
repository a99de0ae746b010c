use crate::config::Config;
use crate::core::db::{BackendKind, ConnectionSettings, DEFAULT_HOST, DEFAULT_PASSWORD};
use crate::core::Result;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use tracing::Level;

/// Menu-driven front end for the hotel-management database
#[derive(Debug, Parser)]
#[command(name = "hotelsql", version, about)]
pub struct Args {
    /// Database name (the database file with the sqlite backend)
    pub dbname: String,

    /// Server port
    pub port: u16,

    /// Database user
    pub user: String,

    /// Server host [default: localhost]
    #[arg(long)]
    pub host: Option<String>,

    /// Login password [default: 12345]
    #[arg(long, env = "HOTELSQL_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Database backend [default: postgres]
    #[arg(long, value_enum)]
    pub backend: Option<BackendKind>,

    /// Configuration file [default: <config dir>/hotelsql/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Create the hotel tables before showing the menu
    #[arg(long)]
    pub init_schema: bool,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Merges flags over the configuration file over built-in defaults
    pub fn settings(&self, config: &Config) -> ConnectionSettings {
        let database = &config.database;
        ConnectionSettings {
            backend: self.backend.or(database.backend).unwrap_or_default(),
            host: self
                .host
                .clone()
                .or_else(|| database.host.clone())
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: self.port,
            dbname: self.dbname.clone(),
            user: self.user.clone(),
            password: self
                .password
                .clone()
                .or_else(|| database.password.clone())
                .unwrap_or_else(|| DEFAULT_PASSWORD.to_string()),
        }
    }

    /// The configured log level raised by one step per `-v`
    pub fn log_level(&self, config: &Config) -> Result<Level> {
        let base = config.logging.level()?;
        Ok(raise_level(base, self.verbose))
    }
}

const LEVELS: [Level; 5] = [Level::ERROR, Level::WARN, Level::INFO, Level::DEBUG, Level::TRACE];

fn raise_level(base: Level, steps: u8) -> Level {
    let start = LEVELS.iter().position(|level| *level == base).unwrap_or(1);
    LEVELS[(start + steps as usize).min(LEVELS.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("hotelsql").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_positional_arguments() {
        let args = parse(&["hotel", "5432", "admin"]);
        let settings = args.settings(&Config::default());

        assert_eq!(settings.dbname, "hotel");
        assert_eq!(settings.port, 5432);
        assert_eq!(settings.user, "admin");
        assert_eq!(settings.host, DEFAULT_HOST);
        assert_eq!(settings.backend, BackendKind::Postgres);
    }

    #[test]
    fn test_wrong_arity_is_rejected() {
        assert!(Args::try_parse_from(["hotelsql", "hotel", "5432"]).is_err());
        assert!(Args::try_parse_from(["hotelsql", "hotel", "not-a-port", "admin"]).is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let config = Config {
            database: DatabaseConfig {
                backend: Some(BackendKind::Sqlite),
                host: Some("config-host".to_string()),
                password: Some("from-config".to_string()),
            },
            ..Default::default()
        };

        let args = parse(&["hotel.db", "0", "admin"]);
        let settings = args.settings(&config);
        assert_eq!(settings.backend, BackendKind::Sqlite);
        assert_eq!(settings.host, "config-host");

        let args = parse(&[
            "hotel", "5432", "admin", "--backend", "postgres", "--host", "flag-host",
            "--password", "from-flag",
        ]);
        let settings = args.settings(&config);
        assert_eq!(settings.backend, BackendKind::Postgres);
        assert_eq!(settings.host, "flag-host");
        assert_eq!(settings.password, "from-flag");
    }

    #[test]
    fn test_log_level() {
        let config = Config::default();
        assert_eq!(parse(&["h", "1", "u"]).log_level(&config).unwrap(), Level::WARN);
        assert_eq!(parse(&["h", "1", "u", "-vv"]).log_level(&config).unwrap(), Level::DEBUG);
        assert_eq!(parse(&["h", "1", "u", "-vvvvv"]).log_level(&config).unwrap(), Level::TRACE);
    }
}
