//! Store abstraction the HTTP handlers are written against.
//!
//! [`ItemStore`] and [`CategoryStore`] expose the find-all / find-by-key /
//! create / update-by-key / delete-by-key operations per resource, plus the
//! category-joined item projection. [`Store`] bundles both with a liveness
//! probe so application state can hold a single `Arc<dyn Store>`.

use async_trait::async_trait;
use stockroom_core::types::{parse_db_id, DbId};

use crate::models::category::{Category, CategoryView, CreateCategory, UpdateCategory};
use crate::models::item::{CreateItem, Item, ItemView, UpdateItem};

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// PostgreSQL SQLSTATE for `foreign_key_violation`.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Failure reported by a store operation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    #[error("Invalid identifier: {0:?}")]
    InvalidIdentifier(String),
}

impl StoreError {
    /// Stable name of the failure class, reported to clients alongside the message.
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::Database(_) => "DatabaseError",
            StoreError::ForeignKeyViolation(_) => "ForeignKeyConstraintError",
            StoreError::InvalidIdentifier(_) => "InvalidIdentifier",
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) {
                return StoreError::ForeignKeyViolation(db_err.message().to_string());
            }
        }
        StoreError::Database(err)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Parse a raw path segment into an id, failing like a store lookup would.
pub fn parse_id(raw: &str) -> StoreResult<DbId> {
    parse_db_id(raw).ok_or_else(|| StoreError::InvalidIdentifier(raw.to_string()))
}

#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Every item joined with its category name, ordered by id.
    async fn list_items(&self) -> StoreResult<Vec<ItemView>>;

    /// One item joined with its category name.
    async fn find_item_view(&self, id: DbId) -> StoreResult<Option<ItemView>>;

    /// One unprojected item row.
    async fn find_item(&self, id: DbId) -> StoreResult<Option<Item>>;

    /// All unprojected rows matching `id`, possibly empty.
    async fn find_items_by_id(&self, id: DbId) -> StoreResult<Vec<Item>>;

    async fn create_item(&self, input: &CreateItem) -> StoreResult<Item>;

    /// Apply the non-`None` fields of `input`. Returns rows affected.
    async fn update_item(&self, id: DbId, input: &UpdateItem) -> StoreResult<u64>;

    /// Returns rows removed.
    async fn delete_item(&self, id: DbId) -> StoreResult<u64>;
}

#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// Every category projected to its name, ordered by id.
    async fn list_categories(&self) -> StoreResult<Vec<CategoryView>>;

    async fn find_category(&self, id: DbId) -> StoreResult<Option<Category>>;

    async fn find_categories_by_id(&self, id: DbId) -> StoreResult<Vec<Category>>;

    async fn create_category(&self, input: &CreateCategory) -> StoreResult<Category>;

    async fn update_category(&self, id: DbId, input: &UpdateCategory) -> StoreResult<u64>;

    /// Fails with [`StoreError::ForeignKeyViolation`] while items reference the category.
    async fn delete_category(&self, id: DbId) -> StoreResult<u64>;
}

/// Full store surface used by the API.
#[async_trait]
pub trait Store: ItemStore + CategoryStore {
    /// Verify the backing storage is reachable.
    async fn ping(&self) -> StoreResult<()>;

    /// Short backend name for logs.
    fn backend(&self) -> &'static str;
}
