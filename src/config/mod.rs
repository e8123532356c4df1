/// Database connection and table creation
pub mod database;

/// Season reference table used for planting recommendations
pub mod seasons;

/// Initial data written into empty tables at startup
pub mod seed;

/// Application settings loaded from config.toml and the environment
pub mod settings;

pub use settings::{AppConfig, ServerConfig, load_app_config, load_config};
