//! `/api/activity-logs` handlers.

use crate::{
    api::{AppState, error::ApiResult},
    core::activity_log,
    models::ACTIVITY_LOG_CAP,
    wire::{ActivityLogBody, ActivityLogRecord},
};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::debug;

/// `GET /api/activity-logs`: the newest entries, at most [`ACTIVITY_LOG_CAP`].
pub async fn list_activity_logs(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ActivityLogRecord>>> {
    let entries = activity_log::list_recent(&state.db, ACTIVITY_LOG_CAP as u64).await?;
    Ok(Json(entries.into_iter().map(ActivityLogRecord::from).collect()))
}

/// `POST /api/activity-logs`
pub async fn create_activity_log(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ActivityLogBody>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ActivityLogRecord>)> {
    let Json(body) = payload?;
    let entry = activity_log::append(&state.db, &body).await?;

    debug!(entry_id = %entry.id, action = %entry.action, "Activity recorded");

    Ok((StatusCode::CREATED, Json(entry.into())))
}
