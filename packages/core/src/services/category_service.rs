//! CategoryService - Category Tree Business Logic
//!
//! This module implements the category tree engine: every structural
//! operation on a user's category hierarchy, and the invariants that keep the
//! denormalized `level`/`path` fields consistent under insert, rename,
//! reparent, soft delete, and restore.
//!
//! # Architecture
//!
//! - **Store abstraction**: all persistence goes through the `CategoryStore`
//!   trait; the service holds no state beyond the store handle and the event
//!   channel
//! - **Cascade propagation**: a rename or reparent rewrites the target first,
//!   then walks the whole subtree with an explicit worklist, recomputing each
//!   descendant's depth and ancestor path exactly once
//! - **Cycle prevention**: every reparent walks the new parent's ancestor
//!   chain before any write; a target appearing in that chain (the new parent
//!   included) rejects the move
//! - **Weak cross-request consistency**: checks are check-then-act over
//!   linearizable single-record operations; no subtree lock is held. Callers
//!   that need conflict detection use the `_with_occ` variant, which validates
//!   the record version before applying. See DESIGN.md for the full
//!   consistency discussion.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::db::{CategoryStore, DomainEvent};
use crate::models::{
    Category, CategoryFilter, CategoryKind, CategoryPage, CategoryTreeNode, CategoryUpdate,
    DEFAULT_PAGE_SIZE,
};
use crate::services::CategoryServiceError;

/// Capacity of the domain event broadcast channel
const DOMAIN_EVENT_CHANNEL_CAPACITY: usize = 128;

/// Upper bound on ancestor-chain walks (prevents infinite loops on data that
/// somehow violates acyclicity)
const MAX_ANCESTOR_WALK: usize = 1000;

/// Starter tree provisioned for new owners, as `(root, kind, children)`
const SYSTEM_CATEGORY_SEED: &[(&str, CategoryKind, &[&str])] = &[
    ("Income", CategoryKind::Income, &["Salary", "Interest"]),
    ("Food", CategoryKind::Expense, &["Groceries", "Restaurants"]),
    ("Housing", CategoryKind::Expense, &["Rent", "Utilities"]),
    ("Transport", CategoryKind::Expense, &["Fuel", "Public Transport"]),
];

/// Parameters for creating a category
///
/// `parent_id`, when set, must reference an existing category of the same
/// owner. Display fields pass through untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    /// Display name (trimmed; unique among siblings)
    pub name: String,

    /// Optional parent; `None` creates a root category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Uuid>,

    /// Optional free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Expense or income classification
    #[serde(default)]
    pub kind: CategoryKind,

    /// Optional icon hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Optional display color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// One failed item of a bulk create
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkCreateFailure {
    /// Position of the item in the request
    pub index: usize,

    /// Name the item carried
    pub name: String,

    /// Stable error message for the failure
    pub error: String,
}

/// Outcome of a bulk create
///
/// Each item is attempted independently; failures never abort the batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkCreateReport {
    /// Number of items in the request
    pub requested: usize,

    /// Categories created, in request order
    pub created: Vec<Category>,

    /// Items that failed, with their positions and error messages
    pub failures: Vec<BulkCreateFailure>,
}

impl BulkCreateReport {
    /// Number of items actually created
    pub fn created_count(&self) -> usize {
        self.created.len()
    }

    /// True when every requested item was created
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Category tree engine over an abstract record store
///
/// One instance serves many concurrent callers; the only shared state is the
/// store handle and the event channel, both `Arc`-cloneable.
///
/// # Examples
///
/// ```no_run
/// use moneta_core::db::MemoryStore;
/// use moneta_core::services::{CategoryService, NewCategory};
/// use std::sync::Arc;
/// use uuid::Uuid;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let service = CategoryService::new(Arc::new(MemoryStore::new()));
/// let owner = Uuid::new_v4();
/// let food = service
///     .create_category(
///         owner,
///         NewCategory {
///             name: "Food".to_string(),
///             ..Default::default()
///         },
///     )
///     .await?;
/// assert_eq!(food.level, 0);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CategoryService {
    store: Arc<dyn CategoryStore>,
    event_tx: broadcast::Sender<DomainEvent>,
    client_id: Option<String>,
}

impl CategoryService {
    /// Create a new CategoryService over the given store
    pub fn new(store: Arc<dyn CategoryStore>) -> Self {
        let (event_tx, _) = broadcast::channel(DOMAIN_EVENT_CHANNEL_CAPACITY);
        Self {
            store,
            event_tx,
            client_id: None,
        }
    }

    /// Get access to the underlying store
    pub fn store(&self) -> &Arc<dyn CategoryStore> {
        &self.store
    }

    /// Create a scoped service that tags emitted events with a client id
    ///
    /// Returns a clone of this service with `client_id` set; all mutations
    /// performed through the returned service carry it as
    /// `source_client_id` in their events.
    pub fn with_client(&self, client_id: impl Into<String>) -> Self {
        let mut cloned = self.clone();
        cloned.client_id = Some(client_id.into());
        cloned
    }

    /// Subscribe to domain events
    ///
    /// Returns a broadcast receiver that receives every mutation event
    /// (created, updated, deleted, restored).
    pub fn subscribe_to_events(&self) -> broadcast::Receiver<DomainEvent> {
        self.event_tx.subscribe()
    }

    /// Emit a domain event to all subscribers
    ///
    /// Ignores errors if no subscribers (expected in some tests).
    fn emit_event(&self, event: DomainEvent) {
        let _ = self.event_tx.send(event);
    }

    /// Create a category for the given owner
    ///
    /// Roots get `level = 0` and an empty path; children inherit
    /// `parent.level + 1` and `parent.path + [parent.name]`.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` - empty or oversized name/description
    /// - `ParentNotFound` - parent missing or owned by a different user
    /// - `DuplicateName` - sibling (active or inactive) already carries the name
    pub async fn create_category(
        &self,
        owner_id: Uuid,
        new: NewCategory,
    ) -> Result<Category, CategoryServiceError> {
        let name = Category::validate_name(&new.name)?;
        let description = Category::validate_description(new.description)?;

        let (parent_id, level, path) = match new.parent_id {
            Some(parent_id) => {
                let parent = self.resolve_parent(owner_id, parent_id).await?;
                (Some(parent.id), parent.level + 1, parent.child_path())
            }
            None => (None, 0, Vec::new()),
        };

        if self
            .store
            .find_sibling(owner_id, parent_id, &name)
            .await
            .map_err(|e| CategoryServiceError::query_failed(e.to_string()))?
            .is_some()
        {
            return Err(CategoryServiceError::duplicate_name(name));
        }

        let mut category = Category::new(owner_id, name, new.kind);
        category.parent_id = parent_id;
        category.level = level;
        category.path = path;
        category.description = description;
        category.icon = new.icon;
        category.color = new.color;

        let created = self
            .store
            .insert(category)
            .await
            .map_err(|e| CategoryServiceError::query_failed(e.to_string()))?;

        tracing::debug!(category_id = %created.id, level = created.level, "created category");
        self.emit_event(DomainEvent::CategoryCreated {
            category: created.clone(),
            source_client_id: self.client_id.clone(),
        });

        Ok(created)
    }

    /// Create many categories, tolerating per-item failures
    ///
    /// Every item runs through the full create path independently; a failure
    /// is recorded and the loop continues. Later items may legitimately fail
    /// `DuplicateName` against earlier successes of the same batch.
    pub async fn bulk_create_categories(
        &self,
        owner_id: Uuid,
        items: Vec<NewCategory>,
    ) -> BulkCreateReport {
        let requested = items.len();
        let mut created = Vec::new();
        let mut failures = Vec::new();

        for (index, item) in items.into_iter().enumerate() {
            let name = item.name.clone();
            match self.create_category(owner_id, item).await {
                Ok(category) => created.push(category),
                Err(error) => failures.push(BulkCreateFailure {
                    index,
                    name,
                    error: error.to_string(),
                }),
            }
        }

        if !failures.is_empty() {
            tracing::debug!(
                requested,
                created = created.len(),
                failed = failures.len(),
                "bulk create finished with failures"
            );
        }

        BulkCreateReport {
            requested,
            created,
            failures,
        }
    }

    /// Get a category by id, enforcing ownership
    ///
    /// This load-and-check is the building block every mutation uses before
    /// touching a record.
    ///
    /// # Errors
    ///
    /// - `NotFound` - no record with the id
    /// - `AccessDenied` - record belongs to a different owner
    pub async fn get_category(
        &self,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<Category, CategoryServiceError> {
        let category = self
            .store
            .fetch(id)
            .await
            .map_err(|e| CategoryServiceError::query_failed(e.to_string()))?
            .ok_or_else(|| CategoryServiceError::not_found(id))?;

        if category.owner_id != owner_id {
            return Err(CategoryServiceError::access_denied(id));
        }

        Ok(category)
    }

    /// Rename, reparent, and/or patch display fields of a category
    ///
    /// Renames and reparents cascade: every descendant's `level` and `path`
    /// are recomputed and persisted, target first. Display-field changes on
    /// their own touch only the target record.
    ///
    /// # Errors
    ///
    /// - `InvalidUpdate` - empty patch
    /// - `SystemCategoryImmutable` - name/parent change on a system category
    /// - `ParentNotFound` - new parent missing or cross-owner
    /// - `CircularReference` - target appears in the new parent's ancestor
    ///   chain (the new parent itself included)
    /// - `DuplicateName` - effective name collides under the effective parent
    pub async fn update_category(
        &self,
        id: Uuid,
        owner_id: Uuid,
        update: CategoryUpdate,
    ) -> Result<Category, CategoryServiceError> {
        let existing = self.get_category(id, owner_id).await?;
        self.apply_update(existing, update).await
    }

    /// Update with optimistic concurrency control
    ///
    /// Validates `expected_version` against the stored record before applying
    /// the patch, so a concurrent writer is detected instead of silently
    /// overwritten. The check-then-write window is narrowed, not eliminated;
    /// see DESIGN.md.
    ///
    /// # Errors
    ///
    /// `VersionConflict` when the stored version differs from
    /// `expected_version`; otherwise as [`update_category`].
    ///
    /// [`update_category`]: CategoryService::update_category
    pub async fn update_category_with_occ(
        &self,
        id: Uuid,
        owner_id: Uuid,
        expected_version: i64,
        update: CategoryUpdate,
    ) -> Result<Category, CategoryServiceError> {
        let existing = self.get_category(id, owner_id).await?;
        if existing.version != expected_version {
            return Err(CategoryServiceError::version_conflict(
                id,
                expected_version,
                existing.version,
            ));
        }
        self.apply_update(existing, update).await
    }

    /// Shared update path: validate, rewrite the target, cascade
    async fn apply_update(
        &self,
        existing: Category,
        update: CategoryUpdate,
    ) -> Result<Category, CategoryServiceError> {
        if update.is_empty() {
            return Err(CategoryServiceError::invalid_update(
                "update contains no changes",
            ));
        }

        let new_name = match update.name {
            Some(ref raw) => Category::validate_name(raw)?,
            None => existing.name.clone(),
        };
        let name_changed = new_name != existing.name;

        let parent_changed = matches!(update.parent_id, Some(p) if p != existing.parent_id);
        let new_parent_id = update.parent_id.unwrap_or(existing.parent_id);

        if existing.is_system && (name_changed || parent_changed) {
            return Err(CategoryServiceError::system_category_immutable(existing.id));
        }

        let mut updated = existing.clone();
        updated.name = new_name.clone();

        if parent_changed {
            match new_parent_id {
                Some(parent_id) => {
                    let parent = self.resolve_parent(existing.owner_id, parent_id).await?;
                    self.assert_no_cycle(existing.id, &parent).await?;
                    updated.parent_id = Some(parent.id);
                    updated.level = parent.level + 1;
                    updated.path = parent.child_path();
                }
                None => {
                    updated.parent_id = None;
                    updated.level = 0;
                    updated.path = Vec::new();
                }
            }
        }

        if name_changed || parent_changed {
            if let Some(conflict) = self
                .store
                .find_sibling(existing.owner_id, new_parent_id, &new_name)
                .await
                .map_err(|e| CategoryServiceError::query_failed(e.to_string()))?
            {
                if conflict.id != existing.id {
                    return Err(CategoryServiceError::duplicate_name(new_name));
                }
            }
        }

        if let Some(description) = update.description {
            updated.description = Category::validate_description(description)?;
        }
        if let Some(kind) = update.kind {
            updated.kind = kind;
        }
        if let Some(icon) = update.icon {
            updated.icon = icon;
        }
        if let Some(color) = update.color {
            updated.color = color;
        }

        let now = Utc::now();
        updated.version += 1;
        updated.updated_at = now;

        // The target is persisted before any descendant; the cascade rewrites
        // the subtree top-down so each child reads its parent's final state.
        let stored = self
            .store
            .replace(updated)
            .await
            .map_err(|e| CategoryServiceError::query_failed(e.to_string()))?;

        if name_changed || parent_changed {
            let refreshed = self.cascade_refresh(&stored, now).await?;
            tracing::debug!(
                category_id = %stored.id,
                descendants = refreshed,
                "cascaded level/path recomputation"
            );
        }

        self.emit_event(DomainEvent::CategoryUpdated {
            category: stored.clone(),
            source_client_id: self.client_id.clone(),
        });

        Ok(stored)
    }

    /// Soft-delete a category
    ///
    /// The record keeps its tree position: children still reference it and it
    /// stays visible to queries that opt into inactive records.
    ///
    /// # Errors
    ///
    /// - `SystemCategoryImmutable` - system categories are never deleted
    /// - `HasActiveChildren` - at least one active child still references the
    ///   category
    pub async fn delete_category(
        &self,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<(), CategoryServiceError> {
        let existing = self.get_category(id, owner_id).await?;
        if existing.is_system {
            return Err(CategoryServiceError::system_category_immutable(id));
        }

        let children = self
            .store
            .children_of(owner_id, Some(id))
            .await
            .map_err(|e| CategoryServiceError::query_failed(e.to_string()))?;
        if children.iter().any(|child| child.is_active) {
            return Err(CategoryServiceError::has_active_children(id));
        }

        let now = Utc::now();
        let mut deleted = existing;
        deleted.is_active = false;
        deleted.deleted_at = Some(now);
        deleted.updated_at = now;
        deleted.version += 1;

        self.store
            .replace(deleted)
            .await
            .map_err(|e| CategoryServiceError::query_failed(e.to_string()))?;

        tracing::debug!(category_id = %id, "soft-deleted category");
        self.emit_event(DomainEvent::CategoryDeleted {
            id,
            source_client_id: self.client_id.clone(),
        });

        Ok(())
    }

    /// Restore a soft-deleted category
    ///
    /// Already-active records are returned unchanged.
    pub async fn restore_category(
        &self,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<Category, CategoryServiceError> {
        let existing = self.get_category(id, owner_id).await?;
        if existing.is_active {
            return Ok(existing);
        }

        let now = Utc::now();
        let mut restored = existing;
        restored.is_active = true;
        restored.deleted_at = None;
        restored.updated_at = now;
        restored.version += 1;

        let stored = self
            .store
            .replace(restored)
            .await
            .map_err(|e| CategoryServiceError::query_failed(e.to_string()))?;

        self.emit_event(DomainEvent::CategoryRestored {
            category: stored.clone(),
            source_client_id: self.client_id.clone(),
        });

        Ok(stored)
    }

    /// Filtered, paginated category listing
    ///
    /// Items come back sorted `(level ascending, name ascending)`, which keeps
    /// a flattened listing directly renderable as an indented tree.
    pub async fn list_categories(
        &self,
        owner_id: Uuid,
        filter: CategoryFilter,
    ) -> Result<CategoryPage, CategoryServiceError> {
        let page = filter.page.unwrap_or(1).max(1);
        let limit = filter.limit.unwrap_or(DEFAULT_PAGE_SIZE).max(1);
        let filter = CategoryFilter {
            page: Some(page),
            limit: Some(limit),
            ..filter
        };

        let (items, total) = self
            .store
            .query(owner_id, filter)
            .await
            .map_err(|e| CategoryServiceError::query_failed(e.to_string()))?;

        Ok(CategoryPage {
            items,
            total,
            page,
            limit,
            total_pages: total.div_ceil(limit),
        })
    }

    /// Assemble the owner's full nested category tree
    ///
    /// Single store scan, then an in-memory linking pass: an id→record map, a
    /// parent→children adjacency, and a recursive assembly rooted at
    /// parentless categories. Soft-deleted records are included - they retain
    /// their tree position and their children still hang off them. Records
    /// whose parent is missing from the scan fall back to the root list, and
    /// a visited set keeps assembly terminating even on (never-expected)
    /// cyclic data.
    pub async fn get_category_tree(
        &self,
        owner_id: Uuid,
    ) -> Result<Vec<CategoryTreeNode>, CategoryServiceError> {
        let records = self
            .store
            .list_owner(owner_id)
            .await
            .map_err(|e| CategoryServiceError::query_failed(e.to_string()))?;

        Ok(build_tree(records))
    }

    /// Seed the standard starter categories for a new owner
    ///
    /// Creates the default expense/income tree as immutable system records.
    /// Idempotent per root: a root name already present in the owner's root
    /// group is skipped together with its children. Returns only the records
    /// created by this call.
    pub async fn provision_system_categories(
        &self,
        owner_id: Uuid,
    ) -> Result<Vec<Category>, CategoryServiceError> {
        let mut created = Vec::new();

        for (root_name, kind, children) in SYSTEM_CATEGORY_SEED {
            let existing = self
                .store
                .find_sibling(owner_id, None, root_name)
                .await
                .map_err(|e| CategoryServiceError::query_failed(e.to_string()))?;
            if existing.is_some() {
                continue;
            }

            let mut root = Category::new(owner_id, *root_name, *kind);
            root.is_system = true;
            let root = self
                .store
                .insert(root)
                .await
                .map_err(|e| CategoryServiceError::query_failed(e.to_string()))?;
            self.emit_event(DomainEvent::CategoryCreated {
                category: root.clone(),
                source_client_id: self.client_id.clone(),
            });

            for child_name in children.iter() {
                let mut child = Category::new(owner_id, *child_name, *kind);
                child.is_system = true;
                child.parent_id = Some(root.id);
                child.level = root.level + 1;
                child.path = root.child_path();
                let child = self
                    .store
                    .insert(child)
                    .await
                    .map_err(|e| CategoryServiceError::query_failed(e.to_string()))?;
                self.emit_event(DomainEvent::CategoryCreated {
                    category: child.clone(),
                    source_client_id: self.client_id.clone(),
                });
                created.push(child);
            }

            created.push(root);
        }

        if !created.is_empty() {
            tracing::info!(owner_id = %owner_id, count = created.len(), "provisioned system categories");
        }

        Ok(created)
    }

    // Helper methods

    /// Resolve a parent reference, enforcing existence and ownership
    async fn resolve_parent(
        &self,
        owner_id: Uuid,
        parent_id: Uuid,
    ) -> Result<Category, CategoryServiceError> {
        match self
            .store
            .fetch(parent_id)
            .await
            .map_err(|e| CategoryServiceError::query_failed(e.to_string()))?
        {
            Some(parent) if parent.owner_id == owner_id => Ok(parent),
            _ => Err(CategoryServiceError::parent_not_found(parent_id)),
        }
    }

    /// Reject a reparent that would make `target_id` its own descendant
    ///
    /// Walks the ancestor chain starting at the new parent itself; finding
    /// `target_id` anywhere in the chain means the new parent sits inside the
    /// target's subtree. The walk is bounded to stay safe on corrupt data.
    async fn assert_no_cycle(
        &self,
        target_id: Uuid,
        new_parent: &Category,
    ) -> Result<(), CategoryServiceError> {
        let mut current = Some(new_parent.clone());

        for _ in 0..MAX_ANCESTOR_WALK {
            let node = match current {
                Some(node) => node,
                None => return Ok(()),
            };
            if node.id == target_id {
                return Err(CategoryServiceError::circular_reference(format!(
                    "cannot move category {} under its descendant {}",
                    target_id, new_parent.id
                )));
            }
            current = match node.parent_id {
                Some(parent_id) => self
                    .store
                    .fetch(parent_id)
                    .await
                    .map_err(|e| CategoryServiceError::query_failed(e.to_string()))?,
                None => None,
            };
        }

        Ok(())
    }

    /// Recompute `level`/`path` for every descendant of `root`
    ///
    /// Depth-first worklist over parent→children links; each descendant is
    /// read once, rewritten from its parent's final state, and persisted with
    /// a version bump. Returns the number of records rewritten.
    async fn cascade_refresh(
        &self,
        root: &Category,
        now: DateTime<Utc>,
    ) -> Result<usize, CategoryServiceError> {
        let mut refreshed = 0;
        let mut stack = vec![root.clone()];

        while let Some(parent) = stack.pop() {
            let children = self
                .store
                .children_of(parent.owner_id, Some(parent.id))
                .await
                .map_err(|e| CategoryServiceError::query_failed(e.to_string()))?;

            for mut child in children {
                child.level = parent.level + 1;
                child.path = parent.child_path();
                child.updated_at = now;
                child.version += 1;

                let stored = self
                    .store
                    .replace(child)
                    .await
                    .map_err(|e| CategoryServiceError::query_failed(e.to_string()))?;
                refreshed += 1;
                stack.push(stored);
            }
        }

        Ok(refreshed)
    }
}

/// Build a nested tree from a flat owner scan
///
/// Two passes: an id→record map, then a linking pass that attaches each
/// record to its parent's children list (or to the root list when the parent
/// is absent). Children sort by name; roots by `(level, name)` so adopted
/// orphans keep a stable position.
fn build_tree(records: Vec<Category>) -> Vec<CategoryTreeNode> {
    let mut nodes: HashMap<Uuid, Category> = HashMap::with_capacity(records.len());
    for record in records {
        nodes.insert(record.id, record);
    }

    let mut children_of: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    let mut roots: Vec<Uuid> = Vec::new();
    for record in nodes.values() {
        match record.parent_id {
            Some(parent_id) if nodes.contains_key(&parent_id) => {
                children_of.entry(parent_id).or_default().push(record.id);
            }
            _ => roots.push(record.id),
        }
    }

    roots.sort_by(|a, b| {
        let (a, b) = (&nodes[a], &nodes[b]);
        a.level.cmp(&b.level).then_with(|| a.name.cmp(&b.name))
    });
    for ids in children_of.values_mut() {
        ids.sort_by(|a, b| nodes[a].name.cmp(&nodes[b].name));
    }

    let mut visited = HashSet::new();
    roots
        .iter()
        .filter_map(|id| assemble_subtree(*id, &nodes, &children_of, &mut visited))
        .collect()
}

/// Recursively attach children to one tree node
///
/// The visited set guarantees termination and visits each record at most
/// once, even if the flat data were cyclic.
fn assemble_subtree(
    id: Uuid,
    nodes: &HashMap<Uuid, Category>,
    children_of: &HashMap<Uuid, Vec<Uuid>>,
    visited: &mut HashSet<Uuid>,
) -> Option<CategoryTreeNode> {
    if !visited.insert(id) {
        return None;
    }
    let category = nodes.get(&id)?.clone();
    let children = children_of
        .get(&id)
        .map(|ids| {
            ids.iter()
                .filter_map(|child_id| assemble_subtree(*child_id, nodes, children_of, visited))
                .collect()
        })
        .unwrap_or_default();

    Some(CategoryTreeNode { category, children })
}


#[cfg(test)]
#[path = "category_service_tree_test.rs"]
mod category_service_tree_test;
