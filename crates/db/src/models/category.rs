//! Category entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stockroom_core::types::DbId;

/// A row from the `categories` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: Option<String>,
}

/// Public projection of a category: the surrogate id is never exposed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryView {
    pub name: Option<String>,
}

impl From<Category> for CategoryView {
    fn from(category: Category) -> Self {
        Self {
            name: category.name,
        }
    }
}

/// DTO for creating a category. Missing fields are stored as NULL.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCategory {
    pub name: Option<String>,
}

/// DTO for updating a category. An absent `name` keeps the stored value;
/// `null` clears it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCategory {
    #[serde(default, deserialize_with = "super::present")]
    pub name: Option<Option<String>>,
}
