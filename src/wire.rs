//! JSON wire shapes shared by the REST handlers and the record client.
//!
//! Field names are camelCase and every date travels as an RFC 3339 string. The
//! `TryFrom` impls are the client's schema check: they turn a record into its
//! domain type or reject it with [`Error::Validation`]. Optional dates that do
//! not parse are dropped rather than rejected.

use crate::{
    core::workspace::WorkspaceWithMembers,
    entities::{activity_log, price_history, product, schedule},
    errors::{Error, Result},
    models::{
        ActivityLogDraft, ActivityLogEntry, PlantingSchedule, PriceSnapshot, Product,
        ProductDraft, ScheduleDraft, Workspace, WorkspaceMember,
    },
};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use indexmap::IndexMap;

/// Formats a timestamp the way the wire expects it (`Z` suffix, fractional
/// seconds only when present).
#[must_use]
pub fn format_date(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parses an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC).
#[must_use]
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Parses a date that must be present and valid.
pub fn require_date(field: &str, raw: &str) -> Result<DateTime<Utc>> {
    parse_date(raw).ok_or_else(|| Error::validation(format!("{field} is not a valid date: '{raw}'")))
}

fn non_negative(field: &str, value: i64) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| Error::validation(format!("{field} must be a non-negative integer, got {value}")))
}

/// Product as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    /// Identity
    pub id: String,
    /// Display name
    pub name: String,
    /// Category label
    pub category: String,
    /// Units on hand
    pub quantity: i64,
    /// Unit label
    pub unit: String,
    /// Low-stock threshold
    pub min_stock: i64,
    /// Harvest date
    #[serde(default)]
    pub harvest_date: Option<String>,
    /// Last write time
    pub last_updated: String,
}

/// Body of `POST /api/products` and `PUT /api/products/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductBody {
    /// Display name
    pub name: String,
    /// Category label
    pub category: String,
    /// Units on hand
    pub quantity: i64,
    /// Unit label
    pub unit: String,
    /// Low-stock threshold
    pub min_stock: i64,
    /// Harvest date
    #[serde(default)]
    pub harvest_date: Option<String>,
}

impl From<product::Model> for ProductRecord {
    fn from(model: product::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            category: model.category,
            quantity: model.quantity,
            unit: model.unit,
            min_stock: model.min_stock,
            harvest_date: model.harvest_date.as_ref().map(format_date),
            last_updated: format_date(&model.last_updated),
        }
    }
}

impl TryFrom<ProductRecord> for Product {
    type Error = Error;

    fn try_from(record: ProductRecord) -> Result<Self> {
        Ok(Self {
            quantity: non_negative("quantity", record.quantity)?,
            min_stock: non_negative("minStock", record.min_stock)?,
            harvest_date: record.harvest_date.as_deref().and_then(parse_date),
            last_updated: require_date("lastUpdated", &record.last_updated)?,
            id: record.id,
            name: record.name,
            category: record.category,
            unit: record.unit,
        })
    }
}

impl From<&ProductDraft> for ProductBody {
    fn from(draft: &ProductDraft) -> Self {
        Self {
            name: draft.name.clone(),
            category: draft.category.clone(),
            quantity: i64::from(draft.quantity),
            unit: draft.unit.clone(),
            min_stock: i64::from(draft.min_stock),
            harvest_date: draft.harvest_date.as_ref().map(format_date),
        }
    }
}

/// Planting schedule as returned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRecord {
    /// Identity
    pub id: String,
    /// Crop being planted
    pub crop_name: String,
    /// Category label
    pub category: String,
    /// Planting date
    pub planting_date: String,
    /// Harvest date
    pub harvest_date: String,
    /// Area in rai
    pub area: f64,
    /// Estimated yield
    #[serde(default)]
    pub estimated_yield: Option<f64>,
    /// Status label
    pub status: String,
    /// Notes
    #[serde(default)]
    pub notes: Option<String>,
}

/// Body of `POST /api/schedules` and `PUT /api/schedules/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleBody {
    /// Crop being planted
    pub crop_name: String,
    /// Category label
    pub category: String,
    /// Planting date
    pub planting_date: String,
    /// Harvest date
    pub harvest_date: String,
    /// Area in rai
    pub area: f64,
    /// Estimated yield
    #[serde(default)]
    pub estimated_yield: Option<f64>,
    /// Status label
    pub status: String,
    /// Notes
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<schedule::Model> for ScheduleRecord {
    fn from(model: schedule::Model) -> Self {
        Self {
            id: model.id,
            crop_name: model.crop_name,
            category: model.category,
            planting_date: format_date(&model.planting_date),
            harvest_date: format_date(&model.harvest_date),
            area: model.area,
            estimated_yield: model.estimated_yield,
            status: model.status,
            notes: model.notes,
        }
    }
}

impl TryFrom<ScheduleRecord> for PlantingSchedule {
    type Error = Error;

    fn try_from(record: ScheduleRecord) -> Result<Self> {
        if !record.area.is_finite() || record.area <= 0.0 {
            return Err(Error::validation(format!(
                "area must be positive, got {}",
                record.area
            )));
        }
        Ok(Self {
            planting_date: require_date("plantingDate", &record.planting_date)?,
            harvest_date: require_date("harvestDate", &record.harvest_date)?,
            status: record.status.parse()?,
            id: record.id,
            crop_name: record.crop_name,
            category: record.category,
            area: record.area,
            estimated_yield: record.estimated_yield,
            notes: record.notes.unwrap_or_default(),
        })
    }
}

impl From<&ScheduleDraft> for ScheduleBody {
    fn from(draft: &ScheduleDraft) -> Self {
        Self {
            crop_name: draft.crop_name.clone(),
            category: draft.category.clone(),
            planting_date: format_date(&draft.planting_date),
            harvest_date: format_date(&draft.harvest_date),
            area: draft.area,
            estimated_yield: draft.estimated_yield,
            status: draft.status.as_str().to_string(),
            notes: Some(draft.notes.clone()),
        }
    }
}

/// One month of prices: `{"date": "2026-01", "<crop>": <price>, ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSnapshotRecord {
    /// Month label
    pub date: String,
    /// Price per crop
    #[serde(flatten)]
    pub prices: IndexMap<String, f64>,
}

impl TryFrom<price_history::Model> for PriceSnapshotRecord {
    type Error = Error;

    fn try_from(model: price_history::Model) -> Result<Self> {
        Ok(Self {
            prices: serde_json::from_str(&model.crop_data)?,
            date: model.month,
        })
    }
}

impl From<PriceSnapshotRecord> for PriceSnapshot {
    fn from(record: PriceSnapshotRecord) -> Self {
        Self {
            month: record.date,
            prices: record.prices,
        }
    }
}

/// Activity-log entry as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogRecord {
    /// Identity
    pub id: String,
    /// Action label
    pub action: String,
    /// Entity type label
    #[serde(rename = "type")]
    pub entity_type: String,
    /// Display label
    pub item_name: String,
    /// Actor
    pub user: String,
    /// Timestamp
    pub timestamp: String,
    /// Description
    pub details: String,
}

/// Body of `POST /api/activity-logs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogBody {
    /// Action label
    pub action: String,
    /// Entity type label
    #[serde(rename = "type")]
    pub entity_type: String,
    /// Display label
    pub item_name: String,
    /// Actor
    pub user: String,
    /// Timestamp
    pub timestamp: String,
    /// Description
    pub details: String,
}

impl From<activity_log::Model> for ActivityLogRecord {
    fn from(model: activity_log::Model) -> Self {
        Self {
            id: model.id,
            action: model.action,
            entity_type: model.entity_type,
            item_name: model.item_name,
            user: model.user,
            timestamp: format_date(&model.timestamp),
            details: model.details,
        }
    }
}

impl TryFrom<ActivityLogRecord> for ActivityLogEntry {
    type Error = Error;

    fn try_from(record: ActivityLogRecord) -> Result<Self> {
        Ok(Self {
            action: record.action.parse()?,
            entity_type: record.entity_type.parse()?,
            timestamp: require_date("timestamp", &record.timestamp)?,
            id: record.id,
            item_name: record.item_name,
            user: record.user,
            details: record.details,
        })
    }
}

impl From<&ActivityLogDraft> for ActivityLogBody {
    fn from(draft: &ActivityLogDraft) -> Self {
        Self {
            action: draft.action.as_str().to_string(),
            entity_type: draft.entity_type.as_str().to_string(),
            item_name: draft.item_name.clone(),
            user: draft.user.clone(),
            timestamp: format_date(&draft.timestamp),
            details: draft.details.clone(),
        }
    }
}

/// Body of a `DELETE` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// Always `"Deleted"`
    pub message: String,
    /// Rows removed: 1, or 0 when the id was already gone
    pub changes: u64,
}

impl DeleteResponse {
    /// Response for a delete that removed `changes` rows.
    #[must_use]
    pub fn deleted(changes: u64) -> Self {
        Self {
            message: "Deleted".to_string(),
            changes,
        }
    }
}

/// Workspace member on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRecord {
    /// User id
    pub user_id: String,
    /// Display name
    pub name: String,
    /// Role label
    pub role: String,
    /// Join time
    pub joined_at: String,
}

/// Workspace on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceRecord {
    /// Identity
    pub id: String,
    /// Display name
    pub name: String,
    /// Join code
    pub code: String,
    /// Owner's user id
    pub owner_id: String,
    /// Creation time
    pub created_at: String,
    /// Members in join order
    pub members: Vec<MemberRecord>,
}

/// Body of `POST /api/workspaces`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkspaceBody {
    /// Display name of the new workspace
    pub name: String,
    /// Creator's user id
    pub owner_id: String,
    /// Creator's display name
    pub owner_name: String,
}

/// Body of `POST /api/workspaces/join`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinWorkspaceBody {
    /// Join code, any case
    pub code: String,
    /// Joining user's id
    pub user_id: String,
    /// Joining user's display name
    pub user_name: String,
}

/// `?userId=` query on workspace reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipQuery {
    /// Requesting user's id
    pub user_id: String,
}

impl From<WorkspaceWithMembers> for WorkspaceRecord {
    fn from(value: WorkspaceWithMembers) -> Self {
        let WorkspaceWithMembers { workspace, members } = value;
        Self {
            id: workspace.id,
            name: workspace.name,
            code: workspace.code,
            owner_id: workspace.owner_id,
            created_at: format_date(&workspace.created_at),
            members: members
                .into_iter()
                .map(|m| MemberRecord {
                    user_id: m.user_id,
                    name: m.user_name,
                    role: m.role,
                    joined_at: format_date(&m.joined_at),
                })
                .collect(),
        }
    }
}

impl TryFrom<WorkspaceRecord> for Workspace {
    type Error = Error;

    fn try_from(record: WorkspaceRecord) -> Result<Self> {
        let members = record
            .members
            .into_iter()
            .map(|m| {
                Ok(WorkspaceMember {
                    role: m.role.parse()?,
                    joined_at: require_date("joinedAt", &m.joined_at)?,
                    user_id: m.user_id,
                    name: m.name,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            created_at: require_date("createdAt", &record.created_at)?,
            id: record.id,
            name: record.name,
            code: record.code,
            owner_id: record.owner_id,
            members,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::models::ScheduleStatus;
    use chrono::TimeZone;

    fn rice_record() -> ProductRecord {
        ProductRecord {
            id: "p-1".to_string(),
            name: "ข้าวหอมมะลิ".to_string(),
            category: "ข้าว".to_string(),
            quantity: 1500,
            unit: "กิโลกรัม".to_string(),
            min_stock: 200,
            harvest_date: Some("2026-10-30T00:00:00.000Z".to_string()),
            last_updated: "2026-02-20T00:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn test_parse_date_accepts_iso_and_bare_dates() {
        let expected = Utc.with_ymd_and_hms(2026, 10, 30, 0, 0, 0).unwrap();
        assert_eq!(parse_date("2026-10-30T00:00:00.000Z"), Some(expected));
        assert_eq!(parse_date("2026-10-30T07:00:00+07:00"), Some(expected));
        assert_eq!(parse_date("2026-10-30"), Some(expected));
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_format_date_round_trips() {
        let value = Utc.with_ymd_and_hms(2026, 5, 1, 0, 0, 0).unwrap();
        assert_eq!(format_date(&value), "2026-05-01T00:00:00Z");
        assert_eq!(parse_date(&format_date(&value)), Some(value));

        let precise = Utc::now();
        assert_eq!(parse_date(&format_date(&precise)), Some(precise));
    }

    #[test]
    fn test_product_record_decodes() {
        let product = Product::try_from(rice_record()).unwrap();
        assert_eq!(product.quantity, 1500);
        assert_eq!(product.min_stock, 200);
        assert_eq!(
            product.harvest_date,
            Some(Utc.with_ymd_and_hms(2026, 10, 30, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_unparseable_harvest_date_is_dropped() {
        let mut record = rice_record();
        record.harvest_date = Some("sometime in autumn".to_string());
        let product = Product::try_from(record).unwrap();
        assert!(product.harvest_date.is_none());
    }

    #[test]
    fn test_malformed_product_is_rejected() {
        let mut record = rice_record();
        record.quantity = -3;
        assert!(matches!(
            Product::try_from(record),
            Err(Error::Validation { .. })
        ));

        let mut record = rice_record();
        record.last_updated = "yesterday".to_string();
        assert!(matches!(
            Product::try_from(record),
            Err(Error::Validation { .. })
        ));
    }

    #[test]
    fn test_product_json_uses_camel_case() {
        let json = serde_json::to_value(rice_record()).unwrap();
        assert_eq!(json["minStock"], 200);
        assert_eq!(json["lastUpdated"], "2026-02-20T00:00:00.000Z");

        let missing_field = serde_json::json!({"id": "1", "name": "x"});
        assert!(serde_json::from_value::<ProductRecord>(missing_field).is_err());
    }

    #[test]
    fn test_schedule_record_validation() {
        let record = ScheduleRecord {
            id: "s-1".to_string(),
            crop_name: "มะม่วงน้ำดอกไม้".to_string(),
            category: "ผลไม้".to_string(),
            planting_date: "2026-01-15T00:00:00.000Z".to_string(),
            harvest_date: "2026-04-30T00:00:00.000Z".to_string(),
            area: 5.0,
            estimated_yield: Some(800.0),
            status: "planted".to_string(),
            notes: None,
        };
        let schedule = PlantingSchedule::try_from(record.clone()).unwrap();
        assert_eq!(schedule.status, ScheduleStatus::Planted);
        assert_eq!(schedule.notes, "");

        let mut bad_status = record.clone();
        bad_status.status = "growing".to_string();
        assert!(PlantingSchedule::try_from(bad_status).is_err());

        let mut bad_area = record;
        bad_area.area = 0.0;
        assert!(PlantingSchedule::try_from(bad_area).is_err());
    }

    #[test]
    fn test_price_snapshot_flattens_crops() {
        let json = serde_json::json!({"date": "2026-01", "ข้าวหอมมะลิ": 25, "กล้วยหอม": 22.5});
        let record: PriceSnapshotRecord = serde_json::from_value(json).unwrap();
        assert_eq!(record.date, "2026-01");
        assert_eq!(record.prices["ข้าวหอมมะลิ"], 25.0);
        assert_eq!(record.prices["กล้วยหอม"], 22.5);

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["date"], "2026-01");
        assert_eq!(back["กล้วยหอม"], 22.5);
    }

    #[test]
    fn test_activity_record_uses_type_key() {
        let json = serde_json::json!({
            "id": "a-1",
            "action": "delete",
            "type": "schedule",
            "itemName": "ข้าวโพด",
            "user": "admin",
            "timestamp": "2026-02-20T10:00:00Z",
            "details": "removed"
        });
        let record: ActivityLogRecord = serde_json::from_value(json).unwrap();
        let entry = ActivityLogEntry::try_from(record).unwrap();
        assert_eq!(entry.entity_type, crate::models::EntityKind::Schedule);
        assert_eq!(entry.action, crate::models::ActivityAction::Delete);
    }
}
