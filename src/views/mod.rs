//! Derived views over a [`crate::store::Snapshot`].
//!
//! Everything here is a pure function of data already in memory. Nothing is
//! cached; callers recompute whenever they render.

/// Activity-log tallies
pub mod activity;
/// Stock levels, categories, and search
pub mod inventory;
/// Price statistics and selling signals
pub mod prices;
/// Planting schedule filters and counts
pub mod schedules;
/// Seasonal crop recommendations
pub mod seasons;
