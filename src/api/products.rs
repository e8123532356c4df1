//! `/api/products` handlers.

use crate::{
    api::{
        AppState,
        error::ApiResult,
    },
    core::product,
    wire::{DeleteResponse, ProductBody, ProductRecord},
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::info;

/// `GET /api/products`
pub async fn list_products(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ProductRecord>>> {
    let products = product::list_products(&state.db).await?;
    Ok(Json(products.into_iter().map(ProductRecord::from).collect()))
}

/// `POST /api/products`
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ProductBody>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ProductRecord>)> {
    let Json(body) = payload?;
    let created = product::create_product(&state.db, &body).await?;

    info!(product_id = %created.id, "Product created");

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// `PUT /api/products/{id}`
pub async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<ProductBody>, JsonRejection>,
) -> ApiResult<Json<ProductRecord>> {
    let Json(body) = payload?;
    let updated = product::update_product(&state.db, &id, &body).await?;

    info!(product_id = %id, "Product updated");

    Ok(Json(updated.into()))
}

/// `DELETE /api/products/{id}`
pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let changes = product::delete_product(&state.db, &id).await?;

    info!(product_id = %id, changes, "Product deleted");

    Ok(Json(DeleteResponse::deleted(changes)))
}
