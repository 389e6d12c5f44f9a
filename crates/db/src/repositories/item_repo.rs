//! Repository for the `items` table.

use sqlx::{PgPool, Postgres, QueryBuilder};
use stockroom_core::types::DbId;

use crate::models::item::{CreateItem, Item, ItemCategoryRow, UpdateItem};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, price, description, category_id";

/// Projection joined with the owning category's name.
const JOINED_SELECT: &str = "SELECT i.name, i.price, i.description,
        c.id AS category_ref, c.name AS category_name
     FROM items i
     LEFT JOIN categories c ON c.id = i.category_id";

/// Provides CRUD operations for items.
pub struct ItemRepo;

impl ItemRepo {
    /// List every item with its category name, ordered by id.
    pub async fn list_with_category(pool: &PgPool) -> Result<Vec<ItemCategoryRow>, sqlx::Error> {
        let query = format!("{JOINED_SELECT} ORDER BY i.id ASC");
        sqlx::query_as::<_, ItemCategoryRow>(&query)
            .fetch_all(pool)
            .await
    }

    /// Find one item with its category name.
    pub async fn find_with_category(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ItemCategoryRow>, sqlx::Error> {
        let query = format!("{JOINED_SELECT} WHERE i.id = $1");
        sqlx::query_as::<_, ItemCategoryRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an item row by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Item>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM items WHERE id = $1");
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All rows whose ID matches. At most one in practice.
    pub async fn find_all_by_id(pool: &PgPool, id: DbId) -> Result<Vec<Item>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM items WHERE id = $1");
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .fetch_all(pool)
            .await
    }

    /// Insert a new item, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateItem) -> Result<Item, sqlx::Error> {
        let query = format!(
            "INSERT INTO items (name, price, description, category_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(&input.name)
            .bind(input.price)
            .bind(&input.description)
            .bind(input.category_id)
            .fetch_one(pool)
            .await
    }

    /// Update an item, writing only the fields present in `input`.
    ///
    /// An empty update still matches the row. Returns the number of rows
    /// affected.
    pub async fn update(pool: &PgPool, id: DbId, input: &UpdateItem) -> Result<u64, sqlx::Error> {
        let mut builder = QueryBuilder::<Postgres>::new("UPDATE items SET ");
        {
            let mut set = builder.separated(", ");
            if let Some(name) = &input.name {
                set.push("name = ").push_bind_unseparated(name.clone());
            }
            if let Some(price) = input.price {
                set.push("price = ").push_bind_unseparated(price);
            }
            if let Some(description) = &input.description {
                set.push("description = ")
                    .push_bind_unseparated(description.clone());
            }
            if let Some(category_id) = input.category_id {
                set.push("category_id = ").push_bind_unseparated(category_id);
            }
            if input.is_empty() {
                set.push("id = id");
            }
        }
        builder.push(" WHERE id = ").push_bind(id);

        let result = builder.build().execute(pool).await?;
        Ok(result.rows_affected())
    }

    /// Permanently delete an item by ID. Returns the number of rows removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
