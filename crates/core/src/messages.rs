//! Plain-text bodies returned to clients in legacy response mode.
//!
//! These strings are part of the wire contract; existing clients match on
//! them verbatim, trailing punctuation included.

/// Body for a missing item on `GET /items/{id}` and `PUT /items/{id}`.
pub const ITEM_NOT_FOUND: &str = "Item not found!";

/// Body for a missing category on `GET /categories/{id}` and `PUT /categories/{id}`.
pub const CATEGORY_NOT_FOUND: &str = "Category not found!";

/// Update reported zero affected rows for an item that was just found.
pub const ITEM_UPDATE_FAILED: &str = "error while updating item.";

/// The updated item could not be read back.
pub const ITEM_REFETCH_FAILED: &str = "error while fetching updated item.";

pub const CATEGORY_UPDATE_FAILED: &str = "error while updating category.";

pub const CATEGORY_REFETCH_FAILED: &str = "error while fetching updated category.";
