//! Activity log entity - Append-only audit trail of product and schedule writes.
//!
//! `item_name` is denormalized at write time so entries survive deletion of the
//! record they describe.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Activity log database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "activity_logs")]
pub struct Model {
    /// Opaque identity assigned by the store
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// `"add"`, `"update"` or `"delete"`
    pub action: String,
    /// `"product"` or `"schedule"`
    pub entity_type: String,
    /// Display label of the affected record
    pub item_name: String,
    /// Free-text actor identifier
    pub user: String,
    /// When the action happened
    pub timestamp: DateTimeUtc,
    /// Human-readable description
    pub details: String,
}

/// Activity log entries have no relationships
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
