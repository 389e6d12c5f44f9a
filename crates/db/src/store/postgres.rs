//! [`Store`] backed by PostgreSQL through the repository layer.

use async_trait::async_trait;
use stockroom_core::types::DbId;

use super::{CategoryStore, ItemStore, Store, StoreResult};
use crate::models::category::{Category, CategoryView, CreateCategory, UpdateCategory};
use crate::models::item::{CreateItem, Item, ItemView, UpdateItem};
use crate::repositories::{CategoryRepo, ItemRepo};
use crate::DbPool;

#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemStore for PgStore {
    async fn list_items(&self) -> StoreResult<Vec<ItemView>> {
        let rows = ItemRepo::list_with_category(&self.pool).await?;
        Ok(rows.into_iter().map(ItemView::from).collect())
    }

    async fn find_item_view(&self, id: DbId) -> StoreResult<Option<ItemView>> {
        let row = ItemRepo::find_with_category(&self.pool, id).await?;
        Ok(row.map(ItemView::from))
    }

    async fn find_item(&self, id: DbId) -> StoreResult<Option<Item>> {
        Ok(ItemRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_items_by_id(&self, id: DbId) -> StoreResult<Vec<Item>> {
        Ok(ItemRepo::find_all_by_id(&self.pool, id).await?)
    }

    async fn create_item(&self, input: &CreateItem) -> StoreResult<Item> {
        Ok(ItemRepo::create(&self.pool, input).await?)
    }

    async fn update_item(&self, id: DbId, input: &UpdateItem) -> StoreResult<u64> {
        Ok(ItemRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_item(&self, id: DbId) -> StoreResult<u64> {
        Ok(ItemRepo::delete(&self.pool, id).await?)
    }
}

#[async_trait]
impl CategoryStore for PgStore {
    async fn list_categories(&self) -> StoreResult<Vec<CategoryView>> {
        let rows = CategoryRepo::list(&self.pool).await?;
        Ok(rows.into_iter().map(CategoryView::from).collect())
    }

    async fn find_category(&self, id: DbId) -> StoreResult<Option<Category>> {
        Ok(CategoryRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_categories_by_id(&self, id: DbId) -> StoreResult<Vec<Category>> {
        Ok(CategoryRepo::find_all_by_id(&self.pool, id).await?)
    }

    async fn create_category(&self, input: &CreateCategory) -> StoreResult<Category> {
        Ok(CategoryRepo::create(&self.pool, input).await?)
    }

    async fn update_category(&self, id: DbId, input: &UpdateCategory) -> StoreResult<u64> {
        Ok(CategoryRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_category(&self, id: DbId) -> StoreResult<u64> {
        Ok(CategoryRepo::delete(&self.pool, id).await?)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(crate::health_check(&self.pool).await?)
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
