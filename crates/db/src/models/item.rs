//! Item entity model, its category-joined projection, and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stockroom_core::types::DbId;

use crate::models::category::CategoryView;

/// A row from the `items` table.
///
/// Returned as-is by create and update, so it carries `id` and `category_id`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Item {
    pub id: DbId,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
}

/// An item as listed or fetched: no identifiers, category reduced to its name.
///
/// Serializes to exactly `{name, price, description, Category}`, where
/// `Category` is `{name}` or `null` when the item has no category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemView {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    #[serde(rename = "Category")]
    pub category: Option<CategoryView>,
}

/// Result row of the `items LEFT JOIN categories` query.
#[derive(Debug, Clone, FromRow)]
pub struct ItemCategoryRow {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    /// `categories.id`; NULL when the join found no category.
    pub category_ref: Option<DbId>,
    pub category_name: Option<String>,
}

impl From<ItemCategoryRow> for ItemView {
    fn from(row: ItemCategoryRow) -> Self {
        Self {
            name: row.name,
            price: row.price,
            description: row.description,
            category: row.category_ref.map(|_| CategoryView {
                name: row.category_name,
            }),
        }
    }
}

/// DTO for creating an item. Fields are taken verbatim; missing ones become NULL
/// and unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateItem {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
}

/// DTO for a partial item update.
///
/// The outer `Option` records whether the key was sent at all. Sent fields
/// are written as given, so `null` clears a column (`"category_id": null`
/// detaches the item from its category). Absent fields keep their value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateItem {
    #[serde(default, deserialize_with = "super::present")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::present")]
    pub price: Option<Option<f64>>,
    #[serde(default, deserialize_with = "super::present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::present")]
    pub category_id: Option<Option<DbId>>,
}

impl UpdateItem {
    /// True when the body named no known field.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.description.is_none()
            && self.category_id.is_none()
    }
}
