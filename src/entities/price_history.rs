//! Price history entity - One month's unit price per crop.
//!
//! Prices are kept as a JSON object in `crop_data` so the set of crops can grow
//! without schema changes. Rows are read back in insertion order.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Price snapshot database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "price_history")]
pub struct Model {
    /// Insertion-ordered identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Month label, e.g. `"2026-02"`
    #[sea_orm(unique)]
    pub month: String,
    /// JSON object mapping crop name to unit price
    pub crop_data: String,
}

/// Price history has no relationships
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
