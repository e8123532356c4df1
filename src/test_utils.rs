//! Shared test utilities for agri-ledger.
//!
//! This module provides in-memory databases, routers and clients, sample
//! payloads with sensible defaults, and transports that fake or inject
//! failures.

#![allow(clippy::expect_used)]

use crate::{
    api,
    client::{ApiRequest, ApiResponse, LocalTransport, RecordClient, Transport},
    config::{AppConfig, seed::SeedConfig},
    core::seed,
    errors::Result,
    models::{
        ActivityAction, ActivityLogDraft, EntityKind, ProductDraft, ScheduleDraft, ScheduleStatus,
    },
    wire::{ActivityLogBody, ProductBody, ScheduleBody, format_date, parse_date},
};
use async_trait::async_trait;
use axum::Router;
use chrono::{DateTime, Utc};
use reqwest::{Method, StatusCode};
use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

/// Routes test logs through the test harness. Safe to call repeatedly.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// The seed section of the repository's config.toml.
pub fn sample_seed() -> SeedConfig {
    let config: AppConfig =
        toml::from_str(include_str!("../config.toml")).expect("config.toml should parse");
    config.seed
}

/// A jasmine rice product body.
///
/// # Defaults
/// * quantity: 1500, `min_stock`: 200
/// * `harvest_date`: 2026-10-30
pub fn rice_body() -> ProductBody {
    ProductBody {
        name: "ข้าวหอมมะลิ".to_string(),
        category: "ข้าว".to_string(),
        quantity: 1500,
        unit: "กิโลกรัม".to_string(),
        min_stock: 200,
        harvest_date: Some("2026-10-30T00:00:00.000Z".to_string()),
    }
}

/// [`rice_body`] as a domain draft.
pub fn rice_draft() -> ProductDraft {
    ProductDraft {
        name: "ข้าวหอมมะลิ".to_string(),
        category: "ข้าว".to_string(),
        quantity: 1500,
        unit: "กิโลกรัม".to_string(),
        min_stock: 200,
        harvest_date: parse_date("2026-10-30"),
    }
}

/// A planted mango schedule body.
pub fn mango_schedule_body() -> ScheduleBody {
    ScheduleBody {
        crop_name: "มะม่วงน้ำดอกไม้".to_string(),
        category: "ผลไม้".to_string(),
        planting_date: "2026-01-15T00:00:00.000Z".to_string(),
        harvest_date: "2026-04-30T00:00:00.000Z".to_string(),
        area: 5.0,
        estimated_yield: Some(800.0),
        status: "planted".to_string(),
        notes: Some("ดูแลรักษาและให้น้ำสม่ำเสมอ".to_string()),
    }
}

/// [`mango_schedule_body`] as a domain draft.
pub fn mango_schedule_draft() -> ScheduleDraft {
    ScheduleDraft {
        crop_name: "มะม่วงน้ำดอกไม้".to_string(),
        category: "ผลไม้".to_string(),
        planting_date: parse_date("2026-01-15").expect("valid date"),
        harvest_date: parse_date("2026-04-30").expect("valid date"),
        area: 5.0,
        estimated_yield: Some(800.0),
        status: ScheduleStatus::Planted,
        notes: "ดูแลรักษาและให้น้ำสม่ำเสมอ".to_string(),
    }
}

/// An activity body with free-form labels, so tests can send invalid ones.
pub fn activity_body(
    action: &str,
    entity_type: &str,
    item_name: &str,
    timestamp: DateTime<Utc>,
) -> ActivityLogBody {
    ActivityLogBody {
        action: action.to_string(),
        entity_type: entity_type.to_string(),
        item_name: item_name.to_string(),
        user: "admin".to_string(),
        timestamp: format_date(&timestamp),
        details: format!("{action} {item_name}"),
    }
}

/// An "add product" activity draft stamped now.
pub fn activity_draft(item_name: &str) -> ActivityLogDraft {
    ActivityLogDraft {
        action: ActivityAction::Add,
        entity_type: EntityKind::Product,
        item_name: item_name.to_string(),
        user: "admin".to_string(),
        timestamp: Utc::now(),
        details: format!("Added {item_name}"),
    }
}

/// Router over a fresh, empty database.
pub async fn local_router() -> Result<Router> {
    init_test_tracing();
    Ok(api::router(setup_test_db().await?))
}

/// Router over a fresh database holding [`sample_seed`].
pub async fn seeded_router() -> Result<Router> {
    init_test_tracing();
    let db = setup_test_db().await?;
    seed::seed_if_empty(&db, &sample_seed()).await?;
    Ok(api::router(db))
}

/// In-process client over an empty store.
pub async fn local_client() -> Result<RecordClient> {
    Ok(RecordClient::local(local_router().await?))
}

/// In-process client over a seeded store.
pub async fn seeded_client() -> Result<RecordClient> {
    Ok(RecordClient::local(seeded_router().await?))
}

/// Answers every request with the same status and body.
#[derive(Debug, Clone)]
pub struct CannedTransport {
    status: StatusCode,
    body: String,
}

impl CannedTransport {
    /// Replies with `status` and `body` to everything.
    pub fn new(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

#[async_trait]
impl Transport for CannedTransport {
    async fn send(&self, _request: ApiRequest) -> Result<ApiResponse> {
        Ok(ApiResponse {
            status: self.status,
            body: self.body.clone().into_bytes(),
        })
    }
}

/// Forwards to a router except for requests matching an injected failure.
#[derive(Debug, Clone)]
pub struct FaultyTransport {
    inner: LocalTransport,
    failures: Vec<(Method, String, StatusCode)>,
}

impl FaultyTransport {
    /// Passes everything through to `router` until failures are added.
    pub fn new(router: Router) -> Self {
        Self {
            inner: LocalTransport::new(router),
            failures: Vec::new(),
        }
    }

    /// Fails every `method` request whose path starts with `path_prefix`.
    #[must_use]
    pub fn fail(mut self, method: Method, path_prefix: &str, status: StatusCode) -> Self {
        self.failures.push((method, path_prefix.to_string(), status));
        self
    }
}

#[async_trait]
impl Transport for FaultyTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let path = request.display_path();
        let injected = self
            .failures
            .iter()
            .find(|(method, prefix, _)| *method == request.method && path.starts_with(prefix));
        if let Some((_, _, status)) = injected {
            return Ok(ApiResponse {
                status: *status,
                body: br#"{"error":"injected failure"}"#.to_vec(),
            });
        }
        self.inner.send(request).await
    }
}
