//! CategoryStore Trait - Persistence Abstraction Layer
//!
//! This module defines the `CategoryStore` trait that abstracts record
//! persistence for categories. The trait enables multiple backend
//! implementations (embedded in-memory, document stores, SQL) without changing
//! business logic in `CategoryService`.
//!
//! # Architecture
//!
//! - **Abstraction Point**: Between CategoryService (business logic) and the
//!   record store implementation
//! - **Contract**: a key-indexed record store with point lookups, predicate
//!   queries, and atomic single-record replacement; no multi-record
//!   transactions are assumed
//! - **Async-First**: all methods are async to support both embedded and
//!   network backends
//! - **Error Handling**: uses `anyhow::Result` for flexible error context;
//!   backend failures surface to the service layer unchanged and are never
//!   retried here
//!
//! # Indexing expectations
//!
//! Backends should index records by `id` for point lookups, by
//! `(owner_id, parent_id, name)` for sibling probes, and by
//! `(owner_id, level)` for filtered listings.

use crate::models::{Category, CategoryFilter};
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Abstraction layer for category persistence operations
///
/// Implementations must be `Send + Sync` to allow usage in async contexts
/// where futures may be moved between threads. Reads and writes of a single
/// record are expected to be linearizable; nothing stronger is assumed.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// Insert a new category record
    ///
    /// Takes ownership of the record to avoid unnecessary cloning and returns
    /// the stored value.
    ///
    /// # Errors
    ///
    /// Returns an error if a record with the same id already exists or the
    /// backend fails.
    async fn insert(&self, category: Category) -> Result<Category>;

    /// Get a category by id
    ///
    /// - `Ok(Some(category))` if the record exists
    /// - `Ok(None)` if it doesn't (absence is not an error)
    /// - `Err(_)` on backend failure
    async fn fetch(&self, id: Uuid) -> Result<Option<Category>>;

    /// Atomically replace an existing record
    ///
    /// The whole record is written in one step; there is no partial update.
    ///
    /// # Errors
    ///
    /// Returns an error if no record with the id exists or the backend fails.
    async fn replace(&self, category: Category) -> Result<Category>;

    /// All direct children of one parent group, active and inactive
    ///
    /// `parent_id = None` selects the owner's root group.
    async fn children_of(&self, owner_id: Uuid, parent_id: Option<Uuid>)
        -> Result<Vec<Category>>;

    /// Probe the `(owner_id, parent_id, name)` index for a sibling
    ///
    /// Exact, case-sensitive name match over active and inactive records.
    async fn find_sibling(
        &self,
        owner_id: Uuid,
        parent_id: Option<Uuid>,
        name: &str,
    ) -> Result<Option<Category>>;

    /// Every category of one owner, in unspecified order
    ///
    /// Used for whole-tree assembly; callers sort as needed.
    async fn list_owner(&self, owner_id: Uuid) -> Result<Vec<Category>>;

    /// Filtered, sorted, paginated listing
    ///
    /// Returns one page sorted `(level ascending, name ascending)` together
    /// with the total match count before pagination.
    async fn query(
        &self,
        owner_id: Uuid,
        filter: CategoryFilter,
    ) -> Result<(Vec<Category>, usize)>;
}
