//! Application settings loaded from config.toml and environment variables.
//!
//! Every section of config.toml is optional. Values from the environment (and
//! from a `.env` file, loaded by the binary) win over the file.

use crate::config::{database::DEFAULT_DATABASE_URL, seasons::SeasonTable, seed::SeedConfig};
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Environment variable naming the config file to load.
pub const CONFIG_PATH_VAR: &str = "AGRI_CONFIG";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Listener and database settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Rows written into empty tables at startup
    #[serde(default)]
    pub seed: SeedConfig,
    /// Crop recommendations per season
    #[serde(default)]
    pub seasons: SeasonTable,
}

/// `[server]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
    /// `SeaORM` connection string
    pub database_url: String,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Returns the `host:port` pair to bind.
    #[must_use]
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AppConfig {
    /// Applies overrides looked up by variable name.
    ///
    /// Recognised names: `DATABASE_URL`, `AGRI_HOST`, `AGRI_PORT`, `AGRI_LOG_LEVEL`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(url) = lookup("DATABASE_URL") {
            self.server.database_url = url;
        }
        if let Some(host) = lookup("AGRI_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("AGRI_PORT") {
            self.server.port = port.parse().map_err(|e| Error::Config {
                message: format!("AGRI_PORT must be a port number, got '{port}': {e}"),
            })?;
        }
        if let Some(level) = lookup("AGRI_LOG_LEVEL") {
            self.server.log_level = level;
        }
        Ok(())
    }
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A field has the wrong type
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })
}

/// Loads the application configuration for the server binary.
///
/// Reads the file named by `AGRI_CONFIG` (default `./config.toml`). A missing
/// file is not an error: built-in defaults are used instead. Environment
/// overrides are applied last.
pub fn load_app_config() -> Result<AppConfig> {
    let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| "config.toml".to_string());
    let mut config = if Path::new(&path).exists() {
        load_config(&path)?
    } else {
        info!("No config file at {}, using built-in defaults", path);
        AppConfig::default()
    };
    config.apply_overrides(|name| std::env::var(name).ok())?;
    Ok(config)
}
