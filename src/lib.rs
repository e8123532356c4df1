//! agri-ledger - Farm inventory and planting records for a small agricultural business
//!
//! This crate provides the REST store for products, planting schedules, market
//! price history, the activity log and workspaces, plus the client side: a typed
//! record client, a session-scoped data store that keeps a local snapshot in
//! sync with the remote store, and pure views (low stock, price analytics,
//! seasonal recommendations) computed from that snapshot.

// Deny the most critical lints that could lead to bugs or security issues
#![deny(
    // Security and correctness
    unsafe_code,
    unsafe_op_in_unsafe_fn,

    // Code quality - things that are almost always bugs
    unreachable_code,
    unreachable_patterns,
    unused_must_use,

    // Documentation - broken links are bugs
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
// Warn on things that should be fixed but aren't necessarily bugs
#![warn(
    // Documentation - missing docs should be added gradually
    missing_docs,

    // Clippy categories for overall code quality
    clippy::all,
    clippy::pedantic,
    clippy::nursery,

    // Performance
    clippy::inefficient_to_string,
    clippy::large_types_passed_by_value,
    clippy::needless_pass_by_value,
    clippy::unnecessary_wraps,

    // Correctness
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::exit,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,

    // Complexity and readability
    clippy::cognitive_complexity,
    clippy::large_enum_variant,
    clippy::match_same_arms,
    clippy::too_many_lines,

    // Style consistency
    clippy::enum_glob_use,
    clippy::inconsistent_struct_constructor,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::redundant_closure_for_method_calls,
    clippy::semicolon_if_nothing_returned,
    clippy::wildcard_imports,

    // Future compatibility
    future_incompatible,
    rust_2018_idioms,
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,  // Common pattern in Rust
    clippy::missing_errors_doc,        // Will add gradually
    clippy::missing_panics_doc,        // Will add gradually
)]

/// REST handlers, router, and HTTP error mapping
pub mod api;
/// Typed client for the REST surface and its transports
pub mod client;
/// Configuration management for database, seed data, seasons, and server settings
pub mod config;
/// Core business logic - framework-agnostic record, price, and workspace operations
pub mod core;
/// SeaORM entity definitions for database tables
pub mod entities;
/// Unified error types and result handling
pub mod errors;
/// Domain types held by a session
pub mod models;
/// Authenticated user session and workspace selection
pub mod session;
/// Session-scoped data store: snapshot, mutations, and notifications
pub mod store;
/// Derived read-only views over the snapshot
pub mod views;
/// JSON wire shapes and conversions
pub mod wire;

#[cfg(test)]
pub mod test_utils;
