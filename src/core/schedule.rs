//! Planting schedule store logic.
//!
//! Same lifecycle as products: store-assigned identity, full-replace updates,
//! idempotent deletes. Status may be set to any value on any write; no
//! transition order is enforced. Planting and harvest dates are not checked
//! against each other.

use crate::{
    core::{new_id, require_text},
    entities::{Schedule, schedule},
    errors::{Error, Result},
    models::ScheduleStatus,
    wire::{ScheduleBody, require_date},
};
use chrono::{DateTime, Utc};
use sea_orm::{QueryOrder, Set, prelude::*};

struct ValidSchedule {
    crop_name: String,
    category: String,
    planting_date: DateTime<Utc>,
    harvest_date: DateTime<Utc>,
    area: f64,
    estimated_yield: Option<f64>,
    status: ScheduleStatus,
    notes: Option<String>,
}

fn validate(body: &ScheduleBody) -> Result<ValidSchedule> {
    if !body.area.is_finite() || body.area <= 0.0 {
        return Err(Error::validation(format!(
            "area must be a positive number, got {}",
            body.area
        )));
    }
    if let Some(estimate) = body
        .estimated_yield
        .filter(|e| !e.is_finite() || *e < 0.0)
    {
        return Err(Error::validation(format!(
            "estimatedYield must be non-negative, got {estimate}"
        )));
    }
    Ok(ValidSchedule {
        crop_name: require_text("cropName", &body.crop_name)?,
        category: require_text("category", &body.category)?,
        planting_date: require_date("plantingDate", &body.planting_date)?,
        harvest_date: require_date("harvestDate", &body.harvest_date)?,
        area: body.area,
        estimated_yield: body.estimated_yield,
        status: body.status.parse()?,
        notes: body.notes.clone(),
    })
}

/// Retrieves every schedule, earliest planting first.
pub async fn list_schedules(db: &DatabaseConnection) -> Result<Vec<schedule::Model>> {
    Schedule::find()
        .order_by_asc(schedule::Column::PlantingDate)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific schedule by its identity.
pub async fn get_schedule(db: &DatabaseConnection, id: &str) -> Result<Option<schedule::Model>> {
    Schedule::find_by_id(id.to_string())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a schedule with a fresh identity.
///
/// # Errors
/// Returns an error if:
/// - The crop name or category is empty
/// - Either date is missing or unparseable
/// - The area is not positive, or the estimated yield is negative
/// - The status label is unknown
/// - The database insert operation fails
pub async fn create_schedule(
    db: &DatabaseConnection,
    body: &ScheduleBody,
) -> Result<schedule::Model> {
    let valid = validate(body)?;

    let schedule = schedule::ActiveModel {
        id: Set(new_id()),
        crop_name: Set(valid.crop_name),
        category: Set(valid.category),
        planting_date: Set(valid.planting_date),
        harvest_date: Set(valid.harvest_date),
        area: Set(valid.area),
        estimated_yield: Set(valid.estimated_yield),
        status: Set(valid.status.as_str().to_string()),
        notes: Set(valid.notes),
    };
    schedule.insert(db).await.map_err(Into::into)
}

/// Replaces every field of an existing schedule.
///
/// # Errors
/// Returns an error if the body fails validation, no schedule has this
/// identity, or the database update fails.
pub async fn update_schedule(
    db: &DatabaseConnection,
    id: &str,
    body: &ScheduleBody,
) -> Result<schedule::Model> {
    let valid = validate(body)?;

    let mut schedule: schedule::ActiveModel = Schedule::find_by_id(id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("schedule", id))?
        .into();

    schedule.crop_name = Set(valid.crop_name);
    schedule.category = Set(valid.category);
    schedule.planting_date = Set(valid.planting_date);
    schedule.harvest_date = Set(valid.harvest_date);
    schedule.area = Set(valid.area);
    schedule.estimated_yield = Set(valid.estimated_yield);
    schedule.status = Set(valid.status.as_str().to_string());
    schedule.notes = Set(valid.notes);

    schedule.update(db).await.map_err(Into::into)
}

/// Deletes a schedule, returning the number of rows removed (0 when already gone).
pub async fn delete_schedule(db: &DatabaseConnection, id: &str) -> Result<u64> {
    let result = Schedule::delete_by_id(id.to_string()).exec(db).await?;
    Ok(result.rows_affected)
}
