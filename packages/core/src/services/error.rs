//! Service Layer Error Types
//!
//! This module defines error types for service-layer operations, providing
//! detailed error handling for business logic failures.
//!
//! Every variant is a value-level outcome surfaced to the immediate caller;
//! nothing here is process-fatal and nothing is retried. The transport layer
//! maps variants to status codes (`NotFound`/`ParentNotFound` → 404,
//! `AccessDenied`/`SystemCategoryImmutable` → 403, conflict variants → 4xx,
//! `QueryFailed` → 500).

use crate::models::ValidationError;
use thiserror::Error;
use uuid::Uuid;

/// Service operation errors
///
/// Provides high-level error types for all category operations, with detailed
/// context and proper error chaining.
#[derive(Error, Debug)]
pub enum CategoryServiceError {
    /// Category not found by ID
    #[error("Category not found: {id}")]
    NotFound { id: Uuid },

    /// Category exists but belongs to a different owner
    #[error("Access denied for category: {id}")]
    AccessDenied { id: Uuid },

    /// Supplied parent id missing or owned by a different user
    #[error("Parent category not found: {parent_id}")]
    ParentNotFound { parent_id: Uuid },

    /// Sibling name collision at the target parent
    #[error("Category name already exists in this group: {name}")]
    DuplicateName { name: String },

    /// Reparent would make a category its own descendant
    #[error("Circular reference detected: {context}")]
    CircularReference { context: String },

    /// Attempted rename/reparent/delete of a system category
    #[error("System category cannot be modified: {id}")]
    SystemCategoryImmutable { id: Uuid },

    /// Delete blocked by active children
    #[error("Category has active child categories: {id}")]
    HasActiveChildren { id: Uuid },

    /// Version conflict (optimistic concurrency control)
    #[error("Version conflict for category {id}: expected version {expected_version}, found {actual_version}")]
    VersionConflict {
        id: Uuid,
        expected_version: i64,
        actual_version: i64,
    },

    /// Invalid update operation
    #[error("Invalid update: {0}")]
    InvalidUpdate(String),

    /// Field validation failed
    #[error("Category validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    /// Opaque persistence failure, surfaced unchanged from the record store
    #[error("Query failed: {0}")]
    QueryFailed(String),
}

impl CategoryServiceError {
    /// Create a not found error
    pub fn not_found(id: Uuid) -> Self {
        Self::NotFound { id }
    }

    /// Create an access denied error
    pub fn access_denied(id: Uuid) -> Self {
        Self::AccessDenied { id }
    }

    /// Create a parent not found error
    pub fn parent_not_found(parent_id: Uuid) -> Self {
        Self::ParentNotFound { parent_id }
    }

    /// Create a duplicate name error
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName { name: name.into() }
    }

    /// Create a circular reference error
    pub fn circular_reference(context: impl Into<String>) -> Self {
        Self::CircularReference {
            context: context.into(),
        }
    }

    /// Create a system category immutable error
    pub fn system_category_immutable(id: Uuid) -> Self {
        Self::SystemCategoryImmutable { id }
    }

    /// Create a has active children error
    pub fn has_active_children(id: Uuid) -> Self {
        Self::HasActiveChildren { id }
    }

    /// Create a version conflict error
    pub fn version_conflict(id: Uuid, expected_version: i64, actual_version: i64) -> Self {
        Self::VersionConflict {
            id,
            expected_version,
            actual_version,
        }
    }

    /// Create an invalid update error
    pub fn invalid_update(msg: impl Into<String>) -> Self {
        Self::InvalidUpdate(msg.into())
    }

    /// Create a query failed error
    pub fn query_failed(msg: impl Into<String>) -> Self {
        Self::QueryFailed(msg.into())
    }
}
