//! Core store logic - framework-agnostic operations over the persisted tables.
//!
//! These functions back the REST handlers in [`crate::api`]. Each one validates
//! its input, talks to the database through `SeaORM`, and returns entity models.

/// Activity-log append and bounded listing
pub mod activity_log;
/// Monthly price snapshots
pub mod price_history;
/// Product CRUD
pub mod product;
/// Planting schedule CRUD
pub mod schedule;
/// Startup seeding of empty tables
pub mod seed;
/// Workspace creation, joining, and membership reads
pub mod workspace;

use crate::errors::{Error, Result};
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// Generates a fresh record identity.
pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Timestamp for a write that must sort strictly after `previous`.
pub(crate) fn next_write_stamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::milliseconds(1)
    }
}

/// Trims `value` and rejects it when nothing is left.
pub(crate) fn require_text(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}
