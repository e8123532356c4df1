//! Price history store logic.
//!
//! Snapshots are read in insertion order, which is the order charts plot them
//! in. There is exactly one snapshot per month label. Snapshots are only ever
//! written by seeding; the REST surface exposes reads only.

use crate::{
    core::require_text,
    entities::{PriceHistory, price_history},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use indexmap::IndexMap;

/// Retrieves every snapshot in insertion order.
pub async fn list_snapshots(db: &DatabaseConnection) -> Result<Vec<price_history::Model>> {
    PriceHistory::find()
        .order_by_asc(price_history::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Records the prices for a month that has no snapshot yet.
///
/// # Errors
/// Returns an error if the month label is empty or already recorded, a price
/// is negative or not finite, or the insert fails.
pub async fn record_snapshot(
    db: &DatabaseConnection,
    month: &str,
    prices: &IndexMap<String, f64>,
) -> Result<price_history::Model> {
    let month = require_text("month", month)?;
    if let Some((crop, price)) = prices.iter().find(|(_, p)| !p.is_finite() || **p < 0.0) {
        return Err(Error::validation(format!(
            "price for {crop} must be a non-negative number, got {price}"
        )));
    }

    let existing = PriceHistory::find()
        .filter(price_history::Column::Month.eq(month.as_str()))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(Error::validation(format!(
            "a price snapshot for {month} already exists"
        )));
    }

    let snapshot = price_history::ActiveModel {
        month: Set(month),
        crop_data: Set(serde_json::to_string(prices)?),
        ..Default::default()
    };
    snapshot.insert(db).await.map_err(Into::into)
}
