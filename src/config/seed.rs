//! Seed data configuration.
//!
//! Each list is written into its table only when that table is empty, so a
//! restarted server never duplicates rows (see [`crate::core::seed`]).

use chrono::{DateTime, Utc};
use serde::Deserialize;
use indexmap::IndexMap;

/// `[seed]` section of config.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedConfig {
    /// Initial products
    #[serde(default)]
    pub products: Vec<SeedProduct>,
    /// Initial planting schedules
    #[serde(default)]
    pub schedules: Vec<SeedSchedule>,
    /// Initial monthly price snapshots, oldest first
    #[serde(default)]
    pub price_history: Vec<SeedPriceSnapshot>,
}

/// One `[[seed.products]]` entry
#[derive(Debug, Clone, Deserialize)]
pub struct SeedProduct {
    /// Display name
    pub name: String,
    /// Category label
    pub category: String,
    /// Units on hand
    pub quantity: u32,
    /// Unit label
    pub unit: String,
    /// Low-stock threshold
    pub min_stock: u32,
    /// Harvest date
    #[serde(default)]
    pub harvest_date: Option<DateTime<Utc>>,
}

/// One `[[seed.schedules]]` entry
#[derive(Debug, Clone, Deserialize)]
pub struct SeedSchedule {
    /// Crop being planted
    pub crop_name: String,
    /// Category label
    pub category: String,
    /// Planting date
    pub planting_date: DateTime<Utc>,
    /// Harvest date
    pub harvest_date: DateTime<Utc>,
    /// Area in rai
    pub area: f64,
    /// Estimated yield
    #[serde(default)]
    pub estimated_yield: Option<f64>,
    /// Status label
    pub status: String,
    /// Notes
    #[serde(default)]
    pub notes: String,
}

/// One `[[seed.price_history]]` entry
#[derive(Debug, Clone, Deserialize)]
pub struct SeedPriceSnapshot {
    /// Month label
    pub month: String,
    /// Price per crop
    pub prices: IndexMap<String, f64>,
}
