//! Moneta Core Business Logic Layer
//!
//! This crate provides the category tree engine for the Moneta personal
//! finance tracker: per-user hierarchical spending/income categories with
//! denormalized depth and ancestry, kept consistent under insert, rename,
//! reparent, soft delete, and restore.
//!
//! # Architecture
//!
//! - **Denormalized ancestry**: every record carries `level` and `path`,
//!   recomputed by explicit cascade on structural writes
//! - **Store abstraction**: persistence sits behind the `CategoryStore` trait;
//!   an embedded in-memory backend ships with the crate
//! - **Domain events**: mutations broadcast over a tokio channel for sync and
//!   budget-recalculation consumers
//!
//! # Modules
//!
//! - [`models`] - Data structures (Category, update/filter/page/tree types)
//! - [`services`] - Business services (CategoryService and its errors)
//! - [`db`] - Persistence boundary (CategoryStore, MemoryStore, events)

pub mod db;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use db::*;
pub use models::*;
pub use services::*;

/// Initialize a global tracing subscriber for binaries and ad-hoc tooling
///
/// Respects `RUST_LOG`; defaults to `info` when unset. Safe to call more than
/// once - subsequent calls are ignored.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}
