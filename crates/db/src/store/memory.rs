//! In-process [`Store`] used by tests and by `STORE_BACKEND=memory`.
//!
//! Mirrors the PostgreSQL schema's observable rules: ids come from
//! per-table sequences that never reuse a value, and the
//! `items.category_id` foreign key is enforced on insert, update and
//! category delete.

use std::collections::BTreeMap;

use async_trait::async_trait;
use stockroom_core::types::DbId;
use tokio::sync::RwLock;

use super::{CategoryStore, ItemStore, Store, StoreError, StoreResult};
use crate::models::category::{Category, CategoryView, CreateCategory, UpdateCategory};
use crate::models::item::{CreateItem, Item, ItemView, UpdateItem};

#[derive(Debug, Default)]
struct Tables {
    items: BTreeMap<DbId, Item>,
    categories: BTreeMap<DbId, Category>,
    item_seq: DbId,
    category_seq: DbId,
}

impl Tables {
    fn check_category_ref(&self, category_id: Option<DbId>) -> StoreResult<()> {
        match category_id {
            Some(id) if !self.categories.contains_key(&id) => Err(StoreError::ForeignKeyViolation(
                format!("Key (category_id)=({id}) is not present in table \"categories\""),
            )),
            _ => Ok(()),
        }
    }

    fn view(&self, item: &Item) -> ItemView {
        let category = item
            .category_id
            .and_then(|id| self.categories.get(&id))
            .map(|c| CategoryView::from(c.clone()));
        ItemView {
            name: item.name.clone(),
            price: item.price,
            description: item.description.clone(),
            category,
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn list_items(&self) -> StoreResult<Vec<ItemView>> {
        let tables = self.tables.read().await;
        Ok(tables.items.values().map(|i| tables.view(i)).collect())
    }

    async fn find_item_view(&self, id: DbId) -> StoreResult<Option<ItemView>> {
        let tables = self.tables.read().await;
        Ok(tables.items.get(&id).map(|i| tables.view(i)))
    }

    async fn find_item(&self, id: DbId) -> StoreResult<Option<Item>> {
        Ok(self.tables.read().await.items.get(&id).cloned())
    }

    async fn find_items_by_id(&self, id: DbId) -> StoreResult<Vec<Item>> {
        Ok(self.find_item(id).await?.into_iter().collect())
    }

    async fn create_item(&self, input: &CreateItem) -> StoreResult<Item> {
        let mut tables = self.tables.write().await;
        tables.check_category_ref(input.category_id)?;

        tables.item_seq += 1;
        let item = Item {
            id: tables.item_seq,
            name: input.name.clone(),
            price: input.price,
            description: input.description.clone(),
            category_id: input.category_id,
        };
        tables.items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn update_item(&self, id: DbId, input: &UpdateItem) -> StoreResult<u64> {
        let mut tables = self.tables.write().await;
        if !tables.items.contains_key(&id) {
            return Ok(0);
        }
        if let Some(category_id) = input.category_id {
            tables.check_category_ref(category_id)?;
        }

        if let Some(item) = tables.items.get_mut(&id) {
            if let Some(name) = &input.name {
                item.name = name.clone();
            }
            if let Some(price) = input.price {
                item.price = price;
            }
            if let Some(description) = &input.description {
                item.description = description.clone();
            }
            if let Some(category_id) = input.category_id {
                item.category_id = category_id;
            }
        }
        Ok(1)
    }

    async fn delete_item(&self, id: DbId) -> StoreResult<u64> {
        let removed = self.tables.write().await.items.remove(&id);
        Ok(u64::from(removed.is_some()))
    }
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn list_categories(&self) -> StoreResult<Vec<CategoryView>> {
        let tables = self.tables.read().await;
        Ok(tables
            .categories
            .values()
            .cloned()
            .map(CategoryView::from)
            .collect())
    }

    async fn find_category(&self, id: DbId) -> StoreResult<Option<Category>> {
        Ok(self.tables.read().await.categories.get(&id).cloned())
    }

    async fn find_categories_by_id(&self, id: DbId) -> StoreResult<Vec<Category>> {
        Ok(self.find_category(id).await?.into_iter().collect())
    }

    async fn create_category(&self, input: &CreateCategory) -> StoreResult<Category> {
        let mut tables = self.tables.write().await;
        tables.category_seq += 1;
        let category = Category {
            id: tables.category_seq,
            name: input.name.clone(),
        };
        tables.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn update_category(&self, id: DbId, input: &UpdateCategory) -> StoreResult<u64> {
        let mut tables = self.tables.write().await;
        match tables.categories.get_mut(&id) {
            Some(category) => {
                if let Some(name) = &input.name {
                    category.name = name.clone();
                }
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_category(&self, id: DbId) -> StoreResult<u64> {
        let mut tables = self.tables.write().await;
        if tables.items.values().any(|i| i.category_id == Some(id)) {
            return Err(StoreError::ForeignKeyViolation(format!(
                "Key (id)=({id}) is still referenced from table \"items\""
            )));
        }
        Ok(u64::from(tables.categories.remove(&id).is_some()))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
