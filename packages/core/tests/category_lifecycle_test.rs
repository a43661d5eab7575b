//! Category Lifecycle Integration Tests
//!
//! End-to-end walks through the public API: building a household category
//! tree, renaming and reparenting with cascades, soft deleting bottom-up, and
//! auditing the denormalized invariants against the raw store contents after
//! every structural mutation.

#[cfg(test)]
mod lifecycle_tests {
    use moneta_core::db::{CategoryStore, MemoryStore};
    use moneta_core::models::{Category, CategoryFilter, CategoryUpdate};
    use moneta_core::services::{CategoryService, CategoryServiceError, NewCategory};
    use std::collections::{HashMap, HashSet};
    use std::sync::Arc;
    use uuid::Uuid;

    fn create_test_service() -> CategoryService {
        CategoryService::new(Arc::new(MemoryStore::new()))
    }

    fn root(name: &str) -> NewCategory {
        NewCategory {
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn child_of(name: &str, parent_id: Uuid) -> NewCategory {
        NewCategory {
            name: name.to_string(),
            parent_id: Some(parent_id),
            ..Default::default()
        }
    }

    /// Audit the denormalized tree invariants over a raw owner scan:
    /// depth, path, acyclicity, and sibling name uniqueness.
    async fn audit_invariants(service: &CategoryService, owner: Uuid) {
        let records = service.store().list_owner(owner).await.unwrap();
        let by_id: HashMap<Uuid, &Category> =
            records.iter().map(|record| (record.id, record)).collect();

        let mut sibling_names = HashSet::new();
        for record in &records {
            // sibling uniqueness counts active and inactive records
            assert!(
                sibling_names.insert((record.parent_id, record.name.clone())),
                "duplicate sibling name: {}",
                record.name
            );

            match record.parent_id {
                None => {
                    assert_eq!(record.level, 0, "root {} must be level 0", record.name);
                    assert!(record.path.is_empty());
                }
                Some(parent_id) => {
                    let parent = by_id[&parent_id];
                    assert_eq!(record.owner_id, parent.owner_id);
                    assert_eq!(record.level, parent.level + 1);
                    assert_eq!(record.path, parent.child_path());
                }
            }

            // following parent links terminates within the record count
            let mut current = record;
            let mut hops = 0;
            while let Some(parent_id) = current.parent_id {
                current = by_id[&parent_id];
                hops += 1;
                assert!(hops <= records.len(), "cycle reached from {}", record.name);
            }
        }
    }

    #[tokio::test]
    async fn full_lifecycle_keeps_invariants() {
        let service = create_test_service();
        let owner = Uuid::new_v4();

        // build: Food -> {Groceries -> Vegetables, Restaurants}, Travel
        let food = service.create_category(owner, root("Food")).await.unwrap();
        assert_eq!(food.level, 0);
        assert!(food.path.is_empty());

        let groceries = service
            .create_category(owner, child_of("Groceries", food.id))
            .await
            .unwrap();
        assert_eq!(groceries.level, 1);
        assert_eq!(groceries.path, vec!["Food".to_string()]);

        let vegetables = service
            .create_category(owner, child_of("Vegetables", groceries.id))
            .await
            .unwrap();
        service
            .create_category(owner, child_of("Restaurants", food.id))
            .await
            .unwrap();
        let travel = service.create_category(owner, root("Travel")).await.unwrap();
        audit_invariants(&service, owner).await;

        // duplicate sibling is refused
        assert!(matches!(
            service
                .create_category(owner, child_of("Groceries", food.id))
                .await,
            Err(CategoryServiceError::DuplicateName { .. })
        ));

        // rename cascades through both descendant levels
        service
            .update_category(food.id, owner, CategoryUpdate::new().with_name("Nutrition"))
            .await
            .unwrap();
        let vegetables = service.get_category(vegetables.id, owner).await.unwrap();
        assert_eq!(
            vegetables.path,
            vec!["Nutrition".to_string(), "Groceries".to_string()]
        );
        audit_invariants(&service, owner).await;

        // reparent the Groceries subtree under Travel
        service
            .update_category(
                groceries.id,
                owner,
                CategoryUpdate::new().with_parent(Some(travel.id)),
            )
            .await
            .unwrap();
        let vegetables = service.get_category(vegetables.id, owner).await.unwrap();
        assert_eq!(
            vegetables.path,
            vec!["Travel".to_string(), "Groceries".to_string()]
        );
        audit_invariants(&service, owner).await;

        // reparenting under a descendant is refused, tree untouched
        assert!(matches!(
            service
                .update_category(
                    travel.id,
                    owner,
                    CategoryUpdate::new().with_parent(Some(vegetables.id))
                )
                .await,
            Err(CategoryServiceError::CircularReference { .. })
        ));
        audit_invariants(&service, owner).await;

        // deleting with active children is refused; bottom-up succeeds
        assert!(matches!(
            service.delete_category(groceries.id, owner).await,
            Err(CategoryServiceError::HasActiveChildren { .. })
        ));
        service.delete_category(vegetables.id, owner).await.unwrap();
        service.delete_category(groceries.id, owner).await.unwrap();

        let groceries = service.get_category(groceries.id, owner).await.unwrap();
        assert!(!groceries.is_active);
        assert!(groceries.deleted_at.is_some());
        // still parented under Travel
        assert_eq!(groceries.parent_id, Some(travel.id));
        audit_invariants(&service, owner).await;

        // the active listing hides them, the tree keeps them
        let active = service
            .list_categories(owner, CategoryFilter::new().active(true))
            .await
            .unwrap();
        assert!(active.items.iter().all(|c| c.name != "Groceries"));

        let tree = service.get_category_tree(owner).await.unwrap();
        let travel_node = tree
            .iter()
            .find(|node| node.category.name == "Travel")
            .unwrap();
        assert_eq!(travel_node.children.len(), 1);
        assert_eq!(travel_node.children[0].category.name, "Groceries");
    }

    #[tokio::test]
    async fn owners_are_fully_isolated() {
        let service = create_test_service();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let alice_food = service.create_category(alice, root("Food")).await.unwrap();
        // same name, different owner: no conflict
        let bob_food = service.create_category(bob, root("Food")).await.unwrap();

        assert!(matches!(
            service.get_category(alice_food.id, bob).await,
            Err(CategoryServiceError::AccessDenied { .. })
        ));
        assert!(matches!(
            service.delete_category(bob_food.id, alice).await,
            Err(CategoryServiceError::AccessDenied { .. })
        ));
        // cross-owner parent reference is treated as absent
        assert!(matches!(
            service
                .create_category(bob, child_of("Groceries", alice_food.id))
                .await,
            Err(CategoryServiceError::ParentNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn bulk_create_builds_a_starter_tree_with_partial_failures() {
        let service = create_test_service();
        let owner = Uuid::new_v4();

        let seeded = service.provision_system_categories(owner).await.unwrap();
        assert!(!seeded.is_empty());
        audit_invariants(&service, owner).await;

        // "Food" collides with the provisioned system root
        let report = service
            .bulk_create_categories(
                owner,
                vec![root("Savings"), root("Food"), root("Gifts")],
            )
            .await;
        assert_eq!(report.requested, 3);
        assert_eq!(report.created_count(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].name, "Food");
        audit_invariants(&service, owner).await;
    }
}
