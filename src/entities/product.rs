//! Product entity - A stocked agricultural product.
//!
//! Each product tracks its on-hand quantity against a minimum stock threshold.
//! `last_updated` is assigned by the store on every write, never by the caller.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Opaque identity assigned by the store
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Display name (e.g. "Jasmine rice")
    pub name: String,
    /// Free-text category label, matched case-sensitively
    pub category: String,
    /// Units currently on hand
    pub quantity: i64,
    /// Unit label (e.g. "kg", "crate")
    pub unit: String,
    /// Threshold at or below which the product counts as low stock
    pub min_stock: i64,
    /// Expected or actual harvest date
    pub harvest_date: Option<DateTimeUtc>,
    /// When the record was last written
    pub last_updated: DateTimeUtc,
}

/// Products have no relationships
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
