//! `/api/workspaces` handlers.
//!
//! Membership is checked here on every read: a user only ever sees the
//! workspaces they belong to.

use crate::{
    api::{AppState, error::ApiResult},
    core::workspace,
    wire::{CreateWorkspaceBody, JoinWorkspaceBody, MembershipQuery, WorkspaceRecord},
};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use std::sync::Arc;
use tracing::info;

/// `POST /api/workspaces`
pub async fn create_workspace(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateWorkspaceBody>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<WorkspaceRecord>)> {
    let Json(body) = payload?;
    let created =
        workspace::create_workspace(&state.db, &body.name, &body.owner_id, &body.owner_name)
            .await?;

    info!(workspace_id = %created.workspace.id, "Workspace created");

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// `POST /api/workspaces/join`
pub async fn join_workspace(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<JoinWorkspaceBody>, JsonRejection>,
) -> ApiResult<Json<WorkspaceRecord>> {
    let Json(body) = payload?;
    let joined =
        workspace::join_workspace(&state.db, &body.code, &body.user_id, &body.user_name).await?;
    Ok(Json(joined.into()))
}

/// `GET /api/workspaces?userId=`
pub async fn list_workspaces(
    State(state): State<Arc<AppState>>,
    query: Result<Query<MembershipQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<WorkspaceRecord>>> {
    let Query(query) = query?;
    let workspaces = workspace::workspaces_for_user(&state.db, &query.user_id).await?;
    Ok(Json(workspaces.into_iter().map(WorkspaceRecord::from).collect()))
}

/// `GET /api/workspaces/{id}?userId=`
pub async fn get_workspace(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    query: Result<Query<MembershipQuery>, QueryRejection>,
) -> ApiResult<Json<WorkspaceRecord>> {
    let Query(query) = query?;
    let found = workspace::get_workspace_for_member(&state.db, &id, &query.user_id).await?;
    Ok(Json(found.into()))
}
