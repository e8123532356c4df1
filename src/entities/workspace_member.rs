//! Workspace member entity - Membership of one user in one workspace.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Workspace member database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "workspace_members")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Workspace this membership belongs to
    pub workspace_id: String,
    /// Member's user id
    pub user_id: String,
    /// Member's display name at join time
    pub user_name: String,
    /// `"owner"` or `"employee"`
    pub role: String,
    /// When the user joined
    pub joined_at: DateTimeUtc,
}

/// Defines relationships between `WorkspaceMember` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each membership belongs to one workspace
    #[sea_orm(
        belongs_to = "super::workspace::Entity",
        from = "Column::WorkspaceId",
        to = "super::workspace::Column::Id"
    )]
    Workspace,
}

impl Related<super::workspace::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Workspace.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
