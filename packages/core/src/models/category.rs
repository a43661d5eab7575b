//! Category Data Structures
//!
//! This module defines the `Category` record and related types for Moneta's
//! per-user hierarchical category tree.
//!
//! # Architecture
//!
//! - **Denormalized ancestry**: every record carries its tree depth (`level`)
//!   and the ordered list of ancestor names (`path`) so listings and
//!   breadcrumbs never need recursive joins
//! - **Soft delete**: `is_active = false` + `deleted_at`; records are never
//!   physically removed and keep their position in the tree
//! - **Owner scoping**: every record belongs to exactly one user; categories
//!   are never shared or visible across owners
//!
//! # Examples
//!
//! ```rust
//! use moneta_core::models::{Category, CategoryKind};
//! use uuid::Uuid;
//!
//! let owner = Uuid::new_v4();
//! let food = Category::new(owner, "Food", CategoryKind::Expense);
//! assert_eq!(food.level, 0);
//! assert!(food.path.is_empty());
//! assert!(food.is_active);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Maximum accepted length for a category name.
pub const MAX_NAME_LEN: usize = 100;

/// Maximum accepted length for a category description.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Default page size for category listings.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Default version value for serde deserialization (version 1)
fn default_version() -> i64 {
    1
}

/// Validation errors for category fields
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Category name must not be empty")]
    EmptyName,

    #[error("Category name exceeds {max} characters")]
    NameTooLong { max: usize },

    #[error("Category description exceeds {max} characters")]
    DescriptionTooLong { max: usize },
}

/// Classifies a category for budgeting and reporting.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    #[default]
    Expense,
    Income,
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CategoryKind::Expense => "Expense",
            CategoryKind::Income => "Income",
        };
        f.write_str(label)
    }
}

/// A node in a per-user hierarchical category tree.
///
/// # Fields
///
/// - `id`: Unique identifier, assigned at creation, immutable
/// - `owner_id`: Owning user; every operation is scoped to one owner
/// - `parent_id`: Optional same-owner parent; `None` for root categories
/// - `level`: Denormalized tree depth; roots are 0, a child is always
///   `parent.level + 1`
/// - `path`: Ordered ancestor names from root to immediate parent, exclusive
///   of the category's own name; empty for roots
/// - `is_system`: System-provisioned categories cannot be renamed, reparented,
///   or deleted
/// - `version`: Optimistic concurrency control version, incremented on each
///   persisted mutation
///
/// # Invariants
///
/// `level` and `path` are maintained by the service layer: any rename or
/// reparent of an ancestor cascades a recomputation through the whole subtree.
/// Sibling names are unique within one `(owner_id, parent_id)` group, counting
/// soft-deleted records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique identifier
    pub id: Uuid,

    /// Owning user
    pub owner_id: Uuid,

    /// Display name, unique among siblings
    pub name: String,

    /// Optional free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Expense or income classification
    #[serde(default)]
    pub kind: CategoryKind,

    /// Optional icon hint for clients
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Optional display color for clients
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Parent category ID (`None` for roots)
    pub parent_id: Option<Uuid>,

    /// Denormalized tree depth (root = 0)
    pub level: u32,

    /// Denormalized ancestor names, root to immediate parent
    #[serde(default)]
    pub path: Vec<String>,

    /// False once soft-deleted
    pub is_active: bool,

    /// System-provisioned categories are immutable
    pub is_system: bool,

    /// Set on soft delete, cleared on restore
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,

    /// Optimistic concurrency control version
    #[serde(default = "default_version")]
    pub version: i64,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Create a new active root category with a fresh id and timestamps.
    ///
    /// The service layer adjusts `parent_id`, `level`, and `path` when the
    /// category is created under a parent.
    pub fn new(owner_id: Uuid, name: impl Into<String>, kind: CategoryKind) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            name: name.into(),
            description: None,
            kind,
            icon: None,
            color: None,
            parent_id: None,
            level: 0,
            path: Vec::new(),
            is_active: true,
            is_system: false,
            deleted_at: None,
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }

    /// True for categories with no parent.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// The `path` value a direct child of this category must carry.
    pub fn child_path(&self) -> Vec<String> {
        let mut path = self.path.clone();
        path.push(self.name.clone());
        path
    }

    /// Validate and normalize a raw category name.
    ///
    /// Names are trimmed; an empty or whitespace-only name is rejected, as is
    /// anything longer than [`MAX_NAME_LEN`].
    pub fn validate_name(raw: &str) -> Result<String, ValidationError> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::NameTooLong { max: MAX_NAME_LEN });
        }
        Ok(name.to_string())
    }

    /// Validate an optional description against [`MAX_DESCRIPTION_LEN`].
    pub fn validate_description(
        raw: Option<String>,
    ) -> Result<Option<String>, ValidationError> {
        if let Some(ref description) = raw {
            if description.chars().count() > MAX_DESCRIPTION_LEN {
                return Err(ValidationError::DescriptionTooLong {
                    max: MAX_DESCRIPTION_LEN,
                });
            }
        }
        Ok(raw)
    }
}

/// Deserializer for double-Option fields.
///
/// Maps three input formats to the double-Option pattern:
/// - Missing field → None (don't update)
/// - null → Some(None) (set to NULL)
/// - "value" → Some(Some("value")) (set to value)
fn deserialize_optional_field<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    // Missing field is handled by #[serde(default)] on the struct field
    Ok(Some(Option::<T>::deserialize(deserializer)?))
}

/// Partial category update for PATCH-style operations
///
/// All fields are optional to support partial updates. Only provided fields
/// are applied.
///
/// # Double-Option Pattern for Nullable Fields
///
/// `parent_id`, `description`, `icon`, and `color` use a double-`Option`:
///
/// - `None`: Don't change this field
/// - `Some(None)`: Clear the field (for `parent_id`: move to root)
/// - `Some(Some(value))`: Set the field to the value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
    /// Rename the category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Reparent the category
    ///
    /// - `Some(None)`: Move to the root group
    /// - `Some(Some(id))`: Move under the given parent
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_field"
    )]
    pub parent_id: Option<Option<Uuid>>,

    /// Replace or clear the description
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_field"
    )]
    pub description: Option<Option<String>>,

    /// Change the expense/income classification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<CategoryKind>,

    /// Replace or clear the icon hint
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_field"
    )]
    pub icon: Option<Option<String>>,

    /// Replace or clear the display color
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_field"
    )]
    pub color: Option<Option<String>>,
}

impl CategoryUpdate {
    /// Create a new empty update
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a new name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set a new parent (`None` moves the category to the root group)
    pub fn with_parent(mut self, parent_id: Option<Uuid>) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Replace the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    /// Change the classification
    pub fn with_kind(mut self, kind: CategoryKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Check if the update contains any changes
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.parent_id.is_none()
            && self.description.is_none()
            && self.kind.is_none()
            && self.icon.is_none()
            && self.color.is_none()
    }
}

/// Filter and pagination parameters for category listings
///
/// All filters are optional and combined with AND semantics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryFilter {
    /// Filter by parent group
    ///
    /// - `Some(None)`: root categories only
    /// - `Some(Some(id))`: direct children of the given category
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_field"
    )]
    pub parent_id: Option<Option<Uuid>>,

    /// Filter by exact tree depth
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,

    /// Filter by active flag (soft-delete visibility)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,

    /// Case-insensitive substring search over name and description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    /// 1-based page number (default 1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,

    /// Page size (default [`DEFAULT_PAGE_SIZE`])
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl CategoryFilter {
    /// Create a new empty filter (matches every category of the owner)
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to root categories
    pub fn roots_only(mut self) -> Self {
        self.parent_id = Some(None);
        self
    }

    /// Restrict to direct children of the given category
    pub fn with_parent(mut self, parent_id: Uuid) -> Self {
        self.parent_id = Some(Some(parent_id));
        self
    }

    /// Restrict to one tree depth
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = Some(level);
        self
    }

    /// Restrict by active flag
    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    /// Set the search term
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Set pagination
    pub fn with_page(mut self, page: usize, limit: usize) -> Self {
        self.page = Some(page);
        self.limit = Some(limit);
        self
    }
}

/// One page of a category listing
///
/// Items are sorted `(level ascending, name ascending)` so a flattened page
/// renders as an indented list without client-side sorting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPage {
    /// Categories on this page
    pub items: Vec<Category>,

    /// Total matching categories before pagination
    pub total: usize,

    /// 1-based page number
    pub page: usize,

    /// Page size used
    pub limit: usize,

    /// `ceil(total / limit)`
    pub total_pages: usize,
}

/// A category with its nested children, as returned by tree assembly
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTreeNode {
    /// The category record
    pub category: Category,

    /// Direct children, sorted by name
    pub children: Vec<CategoryTreeNode>,
}
