//! `/api/schedules` handlers.

use crate::{
    api::{AppState, error::ApiResult},
    core::schedule,
    wire::{DeleteResponse, ScheduleBody, ScheduleRecord},
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::info;

/// `GET /api/schedules`
pub async fn list_schedules(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ScheduleRecord>>> {
    let schedules = schedule::list_schedules(&state.db).await?;
    Ok(Json(schedules.into_iter().map(ScheduleRecord::from).collect()))
}

/// `POST /api/schedules`
pub async fn create_schedule(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ScheduleBody>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ScheduleRecord>)> {
    let Json(body) = payload?;
    let created = schedule::create_schedule(&state.db, &body).await?;

    info!(schedule_id = %created.id, "Schedule created");

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// `PUT /api/schedules/{id}`
pub async fn update_schedule(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<ScheduleBody>, JsonRejection>,
) -> ApiResult<Json<ScheduleRecord>> {
    let Json(body) = payload?;
    let updated = schedule::update_schedule(&state.db, &id, &body).await?;

    info!(schedule_id = %id, "Schedule updated");

    Ok(Json(updated.into()))
}

/// `DELETE /api/schedules/{id}`
pub async fn delete_schedule(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let changes = schedule::delete_schedule(&state.db, &id).await?;

    info!(schedule_id = %id, changes, "Schedule deleted");

    Ok(Json(DeleteResponse::deleted(changes)))
}
