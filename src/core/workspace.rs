//! Workspace store logic.
//!
//! Workspaces and their membership live on the server. A creator becomes the
//! owner; anyone holding the join code becomes an employee. Roles are never
//! changed after they are granted.

use crate::{
    core::{new_id, require_text},
    entities::{Workspace, WorkspaceMember, workspace, workspace_member},
    errors::{Error, Result},
    models::Role,
};
use chrono::Utc;
use sea_orm::{ConnectionTrait, DbErr, QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{debug, info};
use uuid::Uuid;

const CODE_LENGTH: usize = 6;
const CODE_ATTEMPTS: usize = 8;

/// A workspace together with its members in join order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceWithMembers {
    /// The workspace row
    pub workspace: workspace::Model,
    /// Membership rows, oldest first
    pub members: Vec<workspace_member::Model>,
}

impl WorkspaceWithMembers {
    /// Whether `user_id` belongs to this workspace.
    #[must_use]
    pub fn has_member(&self, user_id: &str) -> bool {
        self.members.iter().any(|m| m.user_id == user_id)
    }
}

fn generate_code() -> String {
    Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(CODE_LENGTH)
        .collect::<String>()
        .to_ascii_uppercase()
}

async fn unused_code<C: ConnectionTrait>(db: &C) -> Result<String> {
    for _ in 0..CODE_ATTEMPTS {
        let code = generate_code();
        let taken = Workspace::find()
            .filter(workspace::Column::Code.eq(code.as_str()))
            .one(db)
            .await?
            .is_some();
        if !taken {
            return Ok(code);
        }
        debug!("Join code {} already taken, retrying", code);
    }
    Err(DbErr::Custom("could not allocate a unique join code".to_string()).into())
}

async fn load_members<C: ConnectionTrait>(
    db: &C,
    workspace_id: &str,
) -> Result<Vec<workspace_member::Model>> {
    WorkspaceMember::find()
        .filter(workspace_member::Column::WorkspaceId.eq(workspace_id))
        .order_by_asc(workspace_member::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

fn member(
    workspace_id: &str,
    user_id: &str,
    user_name: &str,
    role: Role,
) -> workspace_member::ActiveModel {
    workspace_member::ActiveModel {
        workspace_id: Set(workspace_id.to_string()),
        user_id: Set(user_id.to_string()),
        user_name: Set(user_name.to_string()),
        role: Set(role.as_str().to_string()),
        joined_at: Set(Utc::now()),
        ..Default::default()
    }
}

/// Creates a workspace with a fresh join code and its creator as owner.
///
/// # Errors
/// Returns an error if the name or owner is empty, or the inserts fail.
pub async fn create_workspace(
    db: &DatabaseConnection,
    name: &str,
    owner_id: &str,
    owner_name: &str,
) -> Result<WorkspaceWithMembers> {
    let name = require_text("name", name)?;
    let owner_id = require_text("ownerId", owner_id)?;
    let owner_name = require_text("ownerName", owner_name)?;

    let txn = db.begin().await?;

    let workspace = workspace::ActiveModel {
        id: Set(new_id()),
        name: Set(name),
        code: Set(unused_code(&txn).await?),
        owner_id: Set(owner_id.clone()),
        created_at: Set(Utc::now()),
    }
    .insert(&txn)
    .await?;
    let owner = member(&workspace.id, &owner_id, &owner_name, Role::Owner)
        .insert(&txn)
        .await?;

    txn.commit().await?;

    info!("Created workspace {} with code {}", workspace.id, workspace.code);
    Ok(WorkspaceWithMembers {
        workspace,
        members: vec![owner],
    })
}

/// Adds a user to the workspace holding `code` as an employee.
///
/// The code is matched case-insensitively. Joining a workspace the user
/// already belongs to changes nothing.
///
/// # Errors
/// Returns [`Error::NotFound`] when no workspace has this code.
pub async fn join_workspace(
    db: &DatabaseConnection,
    code: &str,
    user_id: &str,
    user_name: &str,
) -> Result<WorkspaceWithMembers> {
    let code = require_text("code", code)?.to_ascii_uppercase();
    let user_id = require_text("userId", user_id)?;
    let user_name = require_text("userName", user_name)?;

    let workspace = Workspace::find()
        .filter(workspace::Column::Code.eq(code.as_str()))
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("workspace", code.as_str()))?;

    let mut members = load_members(db, &workspace.id).await?;
    if !members.iter().any(|m| m.user_id == user_id) {
        let joined = member(&workspace.id, &user_id, &user_name, Role::Employee)
            .insert(db)
            .await?;
        info!("User {} joined workspace {}", user_id, workspace.id);
        members.push(joined);
    }

    Ok(WorkspaceWithMembers { workspace, members })
}

/// Lists the workspaces `user_id` belongs to, oldest first.
pub async fn workspaces_for_user(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Vec<WorkspaceWithMembers>> {
    let workspace_ids: Vec<String> = WorkspaceMember::find()
        .filter(workspace_member::Column::UserId.eq(user_id))
        .all(db)
        .await?
        .into_iter()
        .map(|m| m.workspace_id)
        .collect();

    let workspaces = Workspace::find()
        .filter(workspace::Column::Id.is_in(workspace_ids))
        .order_by_asc(workspace::Column::CreatedAt)
        .all(db)
        .await?;

    let mut result = Vec::with_capacity(workspaces.len());
    for workspace in workspaces {
        let members = load_members(db, &workspace.id).await?;
        result.push(WorkspaceWithMembers { workspace, members });
    }
    Ok(result)
}

/// Fetches one workspace on behalf of `user_id`.
///
/// # Errors
/// Returns [`Error::NotFound`] if the workspace does not exist and
/// [`Error::PermissionDenied`] if the user is not a member.
pub async fn get_workspace_for_member(
    db: &DatabaseConnection,
    id: &str,
    user_id: &str,
) -> Result<WorkspaceWithMembers> {
    let workspace = Workspace::find_by_id(id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("workspace", id))?;
    let members = load_members(db, &workspace.id).await?;
    let found = WorkspaceWithMembers { workspace, members };
    if !found.has_member(user_id) {
        return Err(Error::PermissionDenied {
            message: format!("user {user_id} is not a member of workspace {id}"),
        });
    }
    Ok(found)
}
