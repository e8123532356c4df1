//! The in-memory view held by [`super::DataStore`].

use crate::models::{ACTIVITY_LOG_CAP, ActivityLogEntry, PlantingSchedule, PriceSnapshot, Product};

/// The four collections a session loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Products
    Products,
    /// Planting schedules
    Schedules,
    /// Monthly price snapshots
    PriceHistory,
    /// Activity log
    ActivityLogs,
}

impl Collection {
    /// Every collection, in load order.
    pub const ALL: [Self; 4] = [
        Self::Products,
        Self::Schedules,
        Self::PriceHistory,
        Self::ActivityLogs,
    ];

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Schedules => "planting schedules",
            Self::PriceHistory => "price history",
            Self::ActivityLogs => "activity log",
        }
    }
}

/// Per-collection load progress. A failed load still ends in `Ready`, with the
/// collection left empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing requested yet
    #[default]
    Uninitialized,
    /// Request in flight
    Loading,
    /// Request resolved
    Ready,
}

/// A point-in-time copy of every collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// Products in store order
    pub products: Vec<Product>,
    /// Planting schedules in store order
    pub schedules: Vec<PlantingSchedule>,
    /// Price snapshots, oldest month first
    pub price_history: Vec<PriceSnapshot>,
    /// Activity entries, newest first, at most [`ACTIVITY_LOG_CAP`]
    pub activity_logs: Vec<ActivityLogEntry>,
}

impl Snapshot {
    /// Inserts `entry` keeping the log newest-first and bounded.
    pub(crate) fn push_activity(&mut self, entry: ActivityLogEntry) {
        self.activity_logs.push(entry);
        self.normalize_activity();
    }

    /// Re-sorts the log newest-first and drops entries beyond the cap.
    pub(crate) fn normalize_activity(&mut self) {
        self.activity_logs
            .sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        self.activity_logs.truncate(ACTIVITY_LOG_CAP);
    }
}

#[derive(Debug, Default)]
pub(crate) struct LoadStates {
    products: LoadState,
    schedules: LoadState,
    price_history: LoadState,
    activity_logs: LoadState,
}

impl LoadStates {
    pub(crate) const fn get(&self, collection: Collection) -> LoadState {
        match collection {
            Collection::Products => self.products,
            Collection::Schedules => self.schedules,
            Collection::PriceHistory => self.price_history,
            Collection::ActivityLogs => self.activity_logs,
        }
    }

    pub(crate) fn set(&mut self, collection: Collection, state: LoadState) {
        match collection {
            Collection::Products => self.products = state,
            Collection::Schedules => self.schedules = state,
            Collection::PriceHistory => self.price_history = state,
            Collection::ActivityLogs => self.activity_logs = state,
        }
    }

    pub(crate) fn all_ready(&self) -> bool {
        Collection::ALL
            .iter()
            .all(|c| self.get(*c) == LoadState::Ready)
    }
}
