//! REST surface of the remote store.
//!
//! Routes mirror the tables one-to-one. Handlers only decode the request, call
//! into [`crate::core`], and encode the result; every failure becomes an
//! [`error::ApiError`].

pub mod activity_logs;
pub mod error;
pub mod price_history;
pub mod products;
pub mod schedules;
pub mod workspaces;

use axum::{
    Json, Router,
    routing::{get, post, put},
};
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// State shared by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: DatabaseConnection,
}

/// Builds the API router over `db`, without middleware.
pub fn router(db: DatabaseConnection) -> Router {
    let state = Arc::new(AppState { db });

    Router::new()
        // Products
        .route(
            "/api/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/api/products/{id}",
            put(products::update_product).delete(products::delete_product),
        )
        // Schedules
        .route(
            "/api/schedules",
            get(schedules::list_schedules).post(schedules::create_schedule),
        )
        .route(
            "/api/schedules/{id}",
            put(schedules::update_schedule).delete(schedules::delete_schedule),
        )
        // Price history
        .route("/api/price-history", get(price_history::list_price_history))
        // Activity log
        .route(
            "/api/activity-logs",
            get(activity_logs::list_activity_logs).post(activity_logs::create_activity_log),
        )
        // Workspaces
        .route(
            "/api/workspaces",
            get(workspaces::list_workspaces).post(workspaces::create_workspace),
        )
        .route("/api/workspaces/join", post(workspaces::join_workspace))
        .route("/api/workspaces/{id}", get(workspaces::get_workspace))
        // Health check
        .route("/health", get(health_check))
        .with_state(state)
}

/// Builds the full application: the API router plus tracing and permissive CORS.
pub fn create_app(db: DatabaseConnection) -> Router {
    router(db)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Health check endpoint.
async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{config::seed::SeedConfig, core::seed, errors::Result, test_utils::*};
    use axum::{
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode},
    };
    use chrono::{Duration, Utc};
    use tower::ServiceExt;

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn test_app() -> Result<Router> {
        Ok(create_app(setup_test_db().await?))
    }

    #[tokio::test]
    async fn test_health_check() -> Result<()> {
        let app = test_app().await?;
        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        Ok(())
    }

    #[tokio::test]
    async fn test_product_lifecycle() -> Result<()> {
        let app = test_app().await?;
        let body = serde_json::to_value(rice_body())?;

        let (status, created) = send(&app, Method::POST, "/api/products", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_str().unwrap().to_string();
        assert_eq!(created["minStock"], 200);
        assert!(created["lastUpdated"].is_string());

        let mut changed = rice_body();
        changed.quantity = 150;
        let uri = format!("/api/products/{id}");
        let (status, updated) = send(
            &app,
            Method::PUT,
            &uri,
            Some(serde_json::to_value(&changed)?),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["quantity"], 150);

        let (_, listed) = send(&app, Method::GET, "/api/products", None).await;
        assert_eq!(listed.as_array().unwrap().len(), 1);

        let (status, first) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["message"], "Deleted");
        assert_eq!(first["changes"], 1);

        let (status, second) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(second["changes"], 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_product_payloads_are_400() -> Result<()> {
        let app = test_app().await?;

        let mut negative = serde_json::to_value(rice_body())?;
        negative["quantity"] = json!(-1);
        let (status, body) = send(&app, Method::POST, "/api/products", Some(negative)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let missing = json!({ "name": "ข้าว" });
        let (status, _) = send(&app, Method::POST, "/api/products", Some(missing)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_product_is_404() -> Result<()> {
        let app = test_app().await?;
        let body = serde_json::to_value(rice_body())?;
        let (status, _) = send(&app, Method::PUT, "/api/products/missing", Some(body)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        Ok(())
    }

    #[tokio::test]
    async fn test_planted_schedule_round_trips_dates() -> Result<()> {
        let app = test_app().await?;
        let body = mango_schedule_body();

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/schedules",
            Some(serde_json::to_value(&body)?),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, listed) = send(&app, Method::GET, "/api/schedules", None).await;
        assert_eq!(status, StatusCode::OK);
        let listed = listed.as_array().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["status"], "planted");
        assert_eq!(
            crate::wire::parse_date(listed[0]["plantingDate"].as_str().unwrap()),
            crate::wire::parse_date(&body.planting_date)
        );
        assert_eq!(
            crate::wire::parse_date(listed[0]["harvestDate"].as_str().unwrap()),
            crate::wire::parse_date(&body.harvest_date)
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_price_history_is_flat_and_ascending() -> Result<()> {
        let db = setup_test_db().await?;
        let seed_config: SeedConfig = sample_seed();
        seed::seed_if_empty(&db, &seed_config).await?;
        let app = create_app(db);

        let (status, body) = send(&app, Method::GET, "/api/price-history", None).await;
        assert_eq!(status, StatusCode::OK);
        let months: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["date"].as_str().unwrap())
            .collect();
        let expected: Vec<&str> = seed_config
            .price_history
            .iter()
            .map(|s| s.month.as_str())
            .collect();
        assert_eq!(months, expected);
        assert!(body[0]["ข้าวหอมมะลิ"].is_number());
        Ok(())
    }

    #[tokio::test]
    async fn test_activity_log_is_capped_and_newest_first() -> Result<()> {
        let app = test_app().await?;
        let start = Utc::now();
        for offset in 0..52 {
            let stamp = start + Duration::seconds(offset);
            let entry = activity_body("update", "product", &format!("item {offset}"), stamp);
            let (status, _) = send(
                &app,
                Method::POST,
                "/api/activity-logs",
                Some(serde_json::to_value(&entry)?),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (_, body) = send(&app, Method::GET, "/api/activity-logs", None).await;
        let entries = body.as_array().unwrap();
        assert_eq!(entries.len(), 50);
        assert_eq!(entries[0]["itemName"], "item 51");
        assert_eq!(entries[49]["itemName"], "item 2");
        assert_eq!(entries[0]["type"], "product");
        Ok(())
    }

    #[tokio::test]
    async fn test_workspace_routes_enforce_membership() -> Result<()> {
        let app = test_app().await?;
        let create = json!({ "name": "Green Farm", "ownerId": "u-1", "ownerName": "Somchai" });
        let (status, created) = send(&app, Method::POST, "/api/workspaces", Some(create)).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_str().unwrap().to_string();
        let code = created["code"].as_str().unwrap().to_ascii_lowercase();

        let join = json!({ "code": code, "userId": "u-2", "userName": "Malee" });
        let (status, joined) = send(&app, Method::POST, "/api/workspaces/join", Some(join)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(joined["members"][1]["role"], "employee");

        let (_, listed) = send(&app, Method::GET, "/api/workspaces?userId=u-2", None).await;
        assert_eq!(listed.as_array().unwrap().len(), 1);

        let (status, _) = send(
            &app,
            Method::GET,
            &format!("/api/workspaces/{id}?userId=u-9"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(&app, Method::GET, "/api/workspaces/nope?userId=u-1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let bad_join = json!({ "code": "ZZZZZZ", "userId": "u-2", "userName": "Malee" });
        let (status, _) = send(&app, Method::POST, "/api/workspaces/join", Some(bad_join)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        Ok(())
    }
}
