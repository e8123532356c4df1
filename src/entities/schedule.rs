//! Planting schedule entity - One planned, growing, or harvested plot.
//!
//! `status` holds the lowercase label of [`crate::models::ScheduleStatus`].

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Planting schedule database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "schedules")]
pub struct Model {
    /// Opaque identity assigned by the store
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Crop being planted
    pub crop_name: String,
    /// Free-text category label
    pub category: String,
    /// When planting starts
    pub planting_date: DateTimeUtc,
    /// When harvest is expected
    pub harvest_date: DateTimeUtc,
    /// Planted area in rai
    pub area: f64,
    /// Estimated yield in kilograms
    pub estimated_yield: Option<f64>,
    /// `"planned"`, `"planted"` or `"harvested"`
    pub status: String,
    /// Free-text notes
    pub notes: Option<String>,
}

/// Schedules have no relationships
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
