//! Domain types held in memory by the session.
//!
//! These are the shapes UI code reads and passes back into the
//! [`crate::store::DataStore`]. Dates are real `DateTime<Utc>` values here; the
//! string forms only exist on the wire (see [`crate::wire`]).

use crate::errors::{Error, Result};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::fmt;
use std::str::FromStr;

/// Maximum number of activity-log entries kept by the server query and the local view.
pub const ACTIVITY_LOG_CAP: usize = 50;

/// Category labels offered by the product form. Categories stay free text.
pub const SUGGESTED_CATEGORIES: &[&str] = &[
    "ข้าว",
    "ผักสด",
    "ผลไม้",
    "พืชผล",
    "ถั่ว-งา",
    "เครื่องเทศ",
    "สมุนไพร",
    "อื่นๆ",
];

/// Unit labels offered by the product form.
pub const SUGGESTED_UNITS: &[&str] = &["กิโลกรัม", "ลูก", "หวี", "กำ", "ลัง", "ตัน", "ถัง"];

/// A stocked product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Store-assigned identity
    pub id: String,
    /// Display name
    pub name: String,
    /// Category label
    pub category: String,
    /// Units on hand
    pub quantity: u32,
    /// Unit label
    pub unit: String,
    /// Low-stock threshold
    pub min_stock: u32,
    /// Harvest date, if known
    pub harvest_date: Option<DateTime<Utc>>,
    /// Last write time as recorded by the store
    pub last_updated: DateTime<Utc>,
}

/// Fields a caller supplies when adding a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    /// Display name
    pub name: String,
    /// Category label
    pub category: String,
    /// Units on hand
    pub quantity: u32,
    /// Unit label
    pub unit: String,
    /// Low-stock threshold
    pub min_stock: u32,
    /// Harvest date, if known
    pub harvest_date: Option<DateTime<Utc>>,
}

impl From<&Product> for ProductDraft {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            category: product.category.clone(),
            quantity: product.quantity,
            unit: product.unit.clone(),
            min_stock: product.min_stock,
            harvest_date: product.harvest_date,
        }
    }
}

/// Lifecycle of a planting schedule. Any value may be set directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScheduleStatus {
    /// Not yet planted
    Planned,
    /// In the ground
    Planted,
    /// Harvest done
    Harvested,
}

impl ScheduleStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 3] = [Self::Planned, Self::Planted, Self::Harvested];

    /// Lowercase label used on the wire and in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Planted => "planted",
            Self::Harvested => "harvested",
        }
    }
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScheduleStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "planned" => Ok(Self::Planned),
            "planted" => Ok(Self::Planted),
            "harvested" => Ok(Self::Harvested),
            other => Err(Error::validation(format!(
                "unknown schedule status '{other}'"
            ))),
        }
    }
}

/// A planting schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct PlantingSchedule {
    /// Store-assigned identity
    pub id: String,
    /// Crop being planted
    pub crop_name: String,
    /// Category label
    pub category: String,
    /// Planting date
    pub planting_date: DateTime<Utc>,
    /// Expected harvest date. Not required to follow `planting_date`.
    pub harvest_date: DateTime<Utc>,
    /// Area in rai, always positive
    pub area: f64,
    /// Estimated yield in kilograms
    pub estimated_yield: Option<f64>,
    /// Current status
    pub status: ScheduleStatus,
    /// Free-text notes
    pub notes: String,
}

/// Fields a caller supplies when adding a schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleDraft {
    /// Crop being planted
    pub crop_name: String,
    /// Category label
    pub category: String,
    /// Planting date
    pub planting_date: DateTime<Utc>,
    /// Expected harvest date
    pub harvest_date: DateTime<Utc>,
    /// Area in rai
    pub area: f64,
    /// Estimated yield in kilograms
    pub estimated_yield: Option<f64>,
    /// Initial status
    pub status: ScheduleStatus,
    /// Free-text notes
    pub notes: String,
}

impl From<&PlantingSchedule> for ScheduleDraft {
    fn from(schedule: &PlantingSchedule) -> Self {
        Self {
            crop_name: schedule.crop_name.clone(),
            category: schedule.category.clone(),
            planting_date: schedule.planting_date,
            harvest_date: schedule.harvest_date,
            area: schedule.area,
            estimated_yield: schedule.estimated_yield,
            status: schedule.status,
            notes: schedule.notes.clone(),
        }
    }
}

/// One month of crop prices. Identity is the month label.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSnapshot {
    /// Month label, e.g. `"2026-02"`
    pub month: String,
    /// Unit price per crop name, in the order the snapshot lists them
    pub prices: IndexMap<String, f64>,
}

impl PriceSnapshot {
    /// Price of `crop` in this snapshot, if recorded.
    #[must_use]
    pub fn price_of(&self, crop: &str) -> Option<f64> {
        self.prices.get(crop).copied()
    }
}

/// What happened to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityAction {
    /// Record created
    Add,
    /// Record replaced
    Update,
    /// Record removed
    Delete,
}

impl ActivityAction {
    /// Lowercase label used on the wire and in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl FromStr for ActivityAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "add" => Ok(Self::Add),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            other => Err(Error::validation(format!("unknown activity action '{other}'"))),
        }
    }
}

/// Which collection an activity entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A product
    Product,
    /// A planting schedule
    Schedule,
}

impl EntityKind {
    /// Lowercase label used on the wire and in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Schedule => "schedule",
        }
    }
}

impl FromStr for EntityKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "product" => Ok(Self::Product),
            "schedule" => Ok(Self::Schedule),
            other => Err(Error::validation(format!("unknown entity type '{other}'"))),
        }
    }
}

/// One audit-trail entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityLogEntry {
    /// Store-assigned identity
    pub id: String,
    /// What happened
    pub action: ActivityAction,
    /// Which collection
    pub entity_type: EntityKind,
    /// Display label captured at write time
    pub item_name: String,
    /// Actor identifier
    pub user: String,
    /// When it happened
    pub timestamp: DateTime<Utc>,
    /// Human-readable description
    pub details: String,
}

/// Fields supplied when appending an activity entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityLogDraft {
    /// What happened
    pub action: ActivityAction,
    /// Which collection
    pub entity_type: EntityKind,
    /// Display label
    pub item_name: String,
    /// Actor identifier
    pub user: String,
    /// When it happened
    pub timestamp: DateTime<Utc>,
    /// Human-readable description
    pub details: String,
}

/// Membership role inside a workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Created the workspace
    Owner,
    /// Joined with a code
    Employee,
}

impl Role {
    /// Lowercase label used on the wire and in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Employee => "employee",
        }
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "owner" => Ok(Self::Owner),
            "employee" => Ok(Self::Employee),
            other => Err(Error::validation(format!("unknown role '{other}'"))),
        }
    }
}

/// A workspace member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceMember {
    /// User id
    pub user_id: String,
    /// Display name
    pub name: String,
    /// Role inside the workspace
    pub role: Role,
    /// When the user joined
    pub joined_at: DateTime<Utc>,
}

/// A workspace and its members, oldest member first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    /// Store-assigned identity
    pub id: String,
    /// Display name
    pub name: String,
    /// Join code
    pub code: String,
    /// User id of the owner
    pub owner_id: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Members in join order
    pub members: Vec<WorkspaceMember>,
}

impl Workspace {
    /// Role of `user_id` in this workspace, if they are a member.
    #[must_use]
    pub fn role_of(&self, user_id: &str) -> Option<Role> {
        self.members
            .iter()
            .find(|m| m.user_id == user_id)
            .map(|m| m.role)
    }
}

/// The person using a session. Identity is supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    /// Stable user id
    pub id: String,
    /// Display name, recorded as the actor in activity entries
    pub name: String,
}
