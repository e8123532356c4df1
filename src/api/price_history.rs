//! `/api/price-history` handler. Price history is read-only over REST.

use crate::{
    api::{AppState, error::ApiResult},
    core::price_history,
    errors::Result,
    wire::PriceSnapshotRecord,
};
use axum::{Json, extract::State};
use std::sync::Arc;

/// `GET /api/price-history`, oldest month first.
pub async fn list_price_history(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<PriceSnapshotRecord>>> {
    let snapshots = price_history::list_snapshots(&state.db)
        .await?
        .into_iter()
        .map(PriceSnapshotRecord::try_from)
        .collect::<Result<Vec<_>>>()?;
    Ok(Json(snapshots))
}
