//! Domain Events for Category Mutations
//!
//! This module defines the domain events emitted by `CategoryService` when
//! category data changes. These events follow the observer pattern, allowing
//! other parts of the system (budget recalculation, client sync layers) to
//! react to data changes without coupling to the category engine.
//!
//! # Architecture
//!
//! Events are emitted using tokio's broadcast channel, allowing multiple
//! subscribers to receive notifications asynchronously. Emission is
//! fire-and-forget: an event without subscribers is dropped.
//!
//! # Event Flow
//!
//! 1. CategoryService completes a mutation (create, update, delete, restore)
//! 2. A domain event is emitted via the broadcast channel
//! 3. All subscribers receive the event asynchronously
//! 4. `source_client_id` identifies the originating client when the service
//!    was scoped with `with_client`

use crate::models::Category;
use uuid::Uuid;

/// Domain events emitted by CategoryService
///
/// These represent domain-level changes, not store operations: one successful
/// service mutation emits exactly one event, even when a cascade rewrote an
/// entire subtree.
#[derive(Debug, Clone)]
pub enum DomainEvent {
    /// A new category was created
    CategoryCreated {
        category: Category,
        source_client_id: Option<String>,
    },

    /// An existing category was renamed, reparented, or otherwise updated
    CategoryUpdated {
        category: Category,
        source_client_id: Option<String>,
    },

    /// A category was soft-deleted
    CategoryDeleted {
        id: Uuid,
        source_client_id: Option<String>,
    },

    /// A soft-deleted category was restored
    CategoryRestored {
        category: Category,
        source_client_id: Option<String>,
    },
}

impl DomainEvent {
    /// Get a string representation of the event type
    pub fn event_type(&self) -> &str {
        match self {
            DomainEvent::CategoryCreated { .. } => "category:created",
            DomainEvent::CategoryUpdated { .. } => "category:updated",
            DomainEvent::CategoryDeleted { .. } => "category:deleted",
            DomainEvent::CategoryRestored { .. } => "category:restored",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryKind;

    #[test]
    fn event_type_labels_are_stable() {
        let owner = Uuid::new_v4();
        let category = Category::new(owner, "Food", CategoryKind::Expense);

        let created = DomainEvent::CategoryCreated {
            category: category.clone(),
            source_client_id: None,
        };
        assert_eq!(created.event_type(), "category:created");

        let deleted = DomainEvent::CategoryDeleted {
            id: category.id,
            source_client_id: Some("web-session-1".to_string()),
        };
        assert_eq!(deleted.event_type(), "category:deleted");
    }
}
