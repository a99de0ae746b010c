use crate::core::db::BackendKind;
use crate::core::{HotelError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::Level;

/// Top-level configuration structure parsed from a TOML file.
///
/// Every field is optional; command-line flags override whatever is set here.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Database connection defaults.
#[derive(Debug, Default, Deserialize)]
pub struct DatabaseConfig {
    pub backend: Option<BackendKind>,
    pub host: Option<String>,
    pub password: Option<String>,
}

/// Logging configuration.
#[derive(Debug, Default, Deserialize)]
pub struct LoggingConfig {
    /// One of error, warn, info, debug, trace
    pub level: Option<String>,
}

impl LoggingConfig {
    /// The configured level, `WARN` when unset.
    pub fn level(&self) -> Result<Level> {
        match &self.level {
            None => Ok(Level::WARN),
            Some(name) => name
                .parse::<Level>()
                .map_err(|_| HotelError::Config(format!("unknown log level '{}'", name))),
        }
    }
}

/// Loads configuration from a TOML file at the given path.
///
/// # Example
///
/// ```no_run
/// let config = hotelsql::config::load_config("hotelsql.toml").expect("Failed to load config");
/// println!("{:?}", config);
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// `<config dir>/hotelsql/config.toml`, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hotelsql").join("config.toml"))
}

/// Loads the explicitly requested file, else the default file when it
/// exists, else an empty configuration.
pub fn resolve_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    match default_config_path() {
        Some(path) if path.is_file() => load_config(path),
        _ => Ok(Config::default()),
    }
}
