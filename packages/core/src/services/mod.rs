//! Business Services
//!
//! This module contains the core business logic:
//!
//! - `CategoryService` - category tree operations and hierarchy invariants
//! - `CategoryServiceError` - the operation error taxonomy
//!
//! Services coordinate between the persistence layer and application logic,
//! implementing business rules and orchestrating cascading operations.

pub mod category_service;
pub mod error;

pub use category_service::{BulkCreateFailure, BulkCreateReport, CategoryService, NewCategory};
pub use error::CategoryServiceError;
