//! Startup seeding.
//!
//! Each table is checked on its own: a table with any rows is left alone, an
//! empty one receives the configured rows. Running the seed twice is a no-op.

use crate::{
    config::seed::SeedConfig,
    core::{price_history, product, schedule},
    entities::{PriceHistory, Product, Schedule},
    errors::Result,
    wire::{ProductBody, ScheduleBody, format_date},
};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use tracing::info;

/// How many rows each table received.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Products inserted
    pub products: usize,
    /// Schedules inserted
    pub schedules: usize,
    /// Price snapshots inserted
    pub price_snapshots: usize,
}

/// Seeds every empty table from `seed`.
///
/// # Errors
/// Returns an error if a seed row fails validation or an insert fails.
pub async fn seed_if_empty(db: &DatabaseConnection, seed: &SeedConfig) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    if Product::find().count(db).await? == 0 {
        for entry in &seed.products {
            let body = ProductBody {
                name: entry.name.clone(),
                category: entry.category.clone(),
                quantity: i64::from(entry.quantity),
                unit: entry.unit.clone(),
                min_stock: i64::from(entry.min_stock),
                harvest_date: entry.harvest_date.as_ref().map(format_date),
            };
            product::create_product(db, &body).await?;
            report.products += 1;
        }
        info!("Seeded {} products", report.products);
    }

    if Schedule::find().count(db).await? == 0 {
        for entry in &seed.schedules {
            let body = ScheduleBody {
                crop_name: entry.crop_name.clone(),
                category: entry.category.clone(),
                planting_date: format_date(&entry.planting_date),
                harvest_date: format_date(&entry.harvest_date),
                area: entry.area,
                estimated_yield: entry.estimated_yield,
                status: entry.status.clone(),
                notes: Some(entry.notes.clone()),
            };
            schedule::create_schedule(db, &body).await?;
            report.schedules += 1;
        }
        info!("Seeded {} schedules", report.schedules);
    }

    if PriceHistory::find().count(db).await? == 0 {
        for entry in &seed.price_history {
            price_history::record_snapshot(db, &entry.month, &entry.prices).await?;
            report.price_snapshots += 1;
        }
        info!("Seeded {} price snapshots", report.price_snapshots);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_seed_fills_empty_tables_once() -> Result<()> {
        let db = setup_test_db().await?;
        let seed = sample_seed();

        let first = seed_if_empty(&db, &seed).await?;
        assert_eq!(first.products, seed.products.len());
        assert_eq!(first.schedules, seed.schedules.len());
        assert_eq!(first.price_snapshots, seed.price_history.len());

        let second = seed_if_empty(&db, &seed).await?;
        assert_eq!(second, SeedReport::default());
        assert_eq!(
            product::list_products(&db).await?.len(),
            seed.products.len()
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_skips_tables_with_rows() -> Result<()> {
        let db = setup_test_db().await?;
        product::create_product(&db, &rice_body()).await?;

        let report = seed_if_empty(&db, &sample_seed()).await?;
        assert_eq!(report.products, 0);
        assert!(report.schedules > 0);
        assert_eq!(product::list_products(&db).await?.len(), 1);
        Ok(())
    }
}
