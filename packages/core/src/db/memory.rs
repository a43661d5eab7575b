//! MemoryStore - Embedded CategoryStore Backend
//!
//! In-memory implementation of the `CategoryStore` trait, backed by a
//! `tokio::sync::RwLock<HashMap>`. This is the embedded backend used by tests
//! and by callers that do not attach an external record store; production
//! deployments plug a document or SQL backend in behind the same trait.
//!
//! Single-record reads and writes are linearizable through the lock. There are
//! no multi-record transactions, matching the trait contract.

use crate::models::{Category, CategoryFilter, DEFAULT_PAGE_SIZE};
use anyhow::{bail, Result};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Embedded in-memory category store
///
/// # Examples
///
/// ```rust
/// use moneta_core::db::{CategoryStore, MemoryStore};
/// use moneta_core::models::{Category, CategoryKind};
/// use uuid::Uuid;
///
/// # #[tokio::main]
/// # async fn main() -> anyhow::Result<()> {
/// let store = MemoryStore::new();
/// let category = Category::new(Uuid::new_v4(), "Food", CategoryKind::Expense);
/// let created = store.insert(category).await?;
/// assert!(store.fetch(created.id).await?.is_some());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<Uuid, Category>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records held, across all owners
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// True when the store holds no records
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

/// Case-insensitive substring match over name and description.
fn matches_search(category: &Category, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    if category.name.to_lowercase().contains(&needle) {
        return true;
    }
    category
        .description
        .as_deref()
        .map(|description| description.to_lowercase().contains(&needle))
        .unwrap_or(false)
}

#[async_trait::async_trait]
impl super::CategoryStore for MemoryStore {
    async fn insert(&self, category: Category) -> Result<Category> {
        let mut records = self.records.write().await;
        if records.contains_key(&category.id) {
            bail!("duplicate record id: {}", category.id);
        }
        records.insert(category.id, category.clone());
        Ok(category)
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Category>> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn replace(&self, category: Category) -> Result<Category> {
        let mut records = self.records.write().await;
        if !records.contains_key(&category.id) {
            bail!("record not found: {}", category.id);
        }
        records.insert(category.id, category.clone());
        Ok(category)
    }

    async fn children_of(
        &self,
        owner_id: Uuid,
        parent_id: Option<Uuid>,
    ) -> Result<Vec<Category>> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .filter(|record| record.owner_id == owner_id && record.parent_id == parent_id)
            .cloned()
            .collect())
    }

    async fn find_sibling(
        &self,
        owner_id: Uuid,
        parent_id: Option<Uuid>,
        name: &str,
    ) -> Result<Option<Category>> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .find(|record| {
                record.owner_id == owner_id
                    && record.parent_id == parent_id
                    && record.name == name
            })
            .cloned())
    }

    async fn list_owner(&self, owner_id: Uuid) -> Result<Vec<Category>> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .filter(|record| record.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn query(
        &self,
        owner_id: Uuid,
        filter: CategoryFilter,
    ) -> Result<(Vec<Category>, usize)> {
        let records = self.records.read().await;
        let mut matches: Vec<Category> = records
            .values()
            .filter(|record| record.owner_id == owner_id)
            .filter(|record| match filter.parent_id {
                Some(parent_id) => record.parent_id == parent_id,
                None => true,
            })
            .filter(|record| match filter.level {
                Some(level) => record.level == level,
                None => true,
            })
            .filter(|record| match filter.is_active {
                Some(is_active) => record.is_active == is_active,
                None => true,
            })
            .filter(|record| match filter.search {
                Some(ref needle) => matches_search(record, needle),
                None => true,
            })
            .cloned()
            .collect();

        matches.sort_by(|a, b| a.level.cmp(&b.level).then_with(|| a.name.cmp(&b.name)));

        let total = matches.len();
        let limit = filter.limit.unwrap_or(DEFAULT_PAGE_SIZE).max(1);
        let page = filter.page.unwrap_or(1).max(1);
        let items = matches
            .into_iter()
            .skip((page - 1) * limit)
            .take(limit)
            .collect();

        Ok((items, total))
    }
}

#[cfg(test)]
mod tests {
    use super::super::CategoryStore;
    use super::*;
    use crate::models::CategoryKind;

    fn category(owner: Uuid, name: &str) -> Category {
        Category::new(owner, name, CategoryKind::Expense)
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_id() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let record = category(owner, "Food");

        store.insert(record.clone()).await.unwrap();
        assert!(store.insert(record).await.is_err());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn replace_requires_existing_record() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let record = category(owner, "Food");

        assert!(store.replace(record.clone()).await.is_err());

        store.insert(record.clone()).await.unwrap();
        let mut renamed = record;
        renamed.name = "Groceries".to_string();
        let stored = store.replace(renamed).await.unwrap();
        assert_eq!(stored.name, "Groceries");
        assert_eq!(
            store.fetch(stored.id).await.unwrap().unwrap().name,
            "Groceries"
        );
    }

    #[tokio::test]
    async fn find_sibling_matches_exact_name_in_parent_group() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let food = store.insert(category(owner, "Food")).await.unwrap();

        let mut child = category(owner, "Groceries");
        child.parent_id = Some(food.id);
        store.insert(child).await.unwrap();

        assert!(store
            .find_sibling(owner, Some(food.id), "Groceries")
            .await
            .unwrap()
            .is_some());
        // case-sensitive
        assert!(store
            .find_sibling(owner, Some(food.id), "groceries")
            .await
            .unwrap()
            .is_none());
        // wrong group
        assert!(store
            .find_sibling(owner, None, "Groceries")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn query_sorts_by_level_then_name_and_paginates() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();

        let food = store.insert(category(owner, "Food")).await.unwrap();
        store.insert(category(owner, "Travel")).await.unwrap();
        let mut child = category(owner, "Groceries");
        child.parent_id = Some(food.id);
        child.level = 1;
        store.insert(child).await.unwrap();

        let (items, total) = store
            .query(owner, CategoryFilter::new())
            .await
            .unwrap();
        assert_eq!(total, 3);
        let names: Vec<&str> = items.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Food", "Travel", "Groceries"]);

        let (page, total) = store
            .query(owner, CategoryFilter::new().with_page(2, 2))
            .await
            .unwrap();
        assert_eq!(total, 3);
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].name, "Groceries");
    }

    #[tokio::test]
    async fn query_search_covers_name_and_description() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();

        let mut rent = category(owner, "Rent");
        rent.description = Some("Monthly housing payment".to_string());
        store.insert(rent).await.unwrap();
        store.insert(category(owner, "Food")).await.unwrap();

        let (by_name, _) = store
            .query(owner, CategoryFilter::new().with_search("ren"))
            .await
            .unwrap();
        assert_eq!(by_name.len(), 1);

        let (by_description, _) = store
            .query(owner, CategoryFilter::new().with_search("HOUSING"))
            .await
            .unwrap();
        assert_eq!(by_description.len(), 1);
        assert_eq!(by_description[0].name, "Rent");
    }

    #[tokio::test]
    async fn query_is_owner_scoped() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();

        store.insert(category(owner, "Food")).await.unwrap();
        store.insert(category(other, "Food")).await.unwrap();

        let (items, total) = store.query(owner, CategoryFilter::new()).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(items[0].owner_id, owner);
    }
}
