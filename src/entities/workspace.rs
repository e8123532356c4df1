//! Workspace entity - A tenant boundary with one owner and any number of employees.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Workspace database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "workspaces")]
pub struct Model {
    /// Opaque identity assigned by the store
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Display name
    pub name: String,
    /// Human-shareable join code, stored uppercase
    #[sea_orm(unique)]
    pub code: String,
    /// User id of the creator
    pub owner_id: String,
    /// When the workspace was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Workspace and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One workspace has many members
    #[sea_orm(has_many = "super::workspace_member::Entity")]
    Members,
}

impl Related<super::workspace_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Members.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
