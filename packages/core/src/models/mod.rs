//! Data Models
//!
//! This module contains the core data structures used throughout Moneta:
//!
//! - `Category` - a node in the per-user hierarchical category tree
//! - `CategoryUpdate` - sparse patch for rename/reparent/display changes
//! - `CategoryFilter` / `CategoryPage` - listing queries and their results
//! - `CategoryTreeNode` - nested tree assembly output

mod category;

pub use category::{
    Category, CategoryFilter, CategoryKind, CategoryPage, CategoryTreeNode, CategoryUpdate,
    ValidationError, DEFAULT_PAGE_SIZE, MAX_DESCRIPTION_LEN, MAX_NAME_LEN,
};
