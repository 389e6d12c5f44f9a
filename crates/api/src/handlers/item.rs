//! Handlers for the `/items` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use stockroom_core::messages::{ITEM_NOT_FOUND, ITEM_REFETCH_FAILED, ITEM_UPDATE_FAILED};
use stockroom_db::models::item::{CreateItem, UpdateItem};
use stockroom_db::store::parse_id;
use stockroom_db::ItemStore;

use crate::mode::ResponseMode;
use crate::reply::Reply;
use crate::state::AppState;

const ENTITY: &str = "Item";

/// GET /items
///
/// Every item with its category name; ids and `category_id` are not exposed.
pub async fn list(State(state): State<AppState>) -> Reply {
    match state.store.list_items().await {
        Ok(items) => Reply::ok(&items),
        Err(err) => state
            .mode()
            .store_failure(err, StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// GET /items/{id}
///
/// Legacy mode answers 200 on failure as well as on not-found.
pub async fn get_by_id(State(state): State<AppState>, Path(raw_id): Path<String>) -> Reply {
    let mode = state.mode();
    let id = match parse_id(&raw_id) {
        Ok(id) => id,
        Err(err) => return mode.store_failure(err, StatusCode::OK),
    };

    match state.store.find_item_view(id).await {
        Ok(Some(item)) => Reply::ok(&item),
        Ok(None) => mode.not_found(ENTITY, id, ITEM_NOT_FOUND),
        Err(err) => mode.store_failure(err, StatusCode::OK),
    }
}

/// POST /items
///
/// Returns the created row including its id.
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreateItem>, JsonRejection>,
) -> Reply {
    let mode = state.mode();
    let Json(input) = match body {
        Ok(body) => body,
        Err(rejection) => return mode.invalid_body(rejection, StatusCode::INTERNAL_SERVER_ERROR),
    };

    match state.store.create_item(&input).await {
        Ok(item) => {
            tracing::info!(id = item.id, "Item created");
            Reply::ok(&item)
        }
        Err(err) => mode.store_failure(err, StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// PUT /items/{id}
///
/// Look up, apply the partial update, then read the row back. Legacy mode
/// answers 200 on every failure path.
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<UpdateItem>, JsonRejection>,
) -> Reply {
    let mode = state.mode();
    let id = match parse_id(&raw_id) {
        Ok(id) => id,
        Err(err) => return mode.store_failure(err, StatusCode::OK),
    };

    match state.store.find_item(id).await {
        Ok(Some(_)) => {}
        Ok(None) => return mode.not_found(ENTITY, id, ITEM_NOT_FOUND),
        Err(err) => return mode.store_failure(err, StatusCode::OK),
    }

    let Json(input) = match body {
        Ok(body) => body,
        Err(rejection) => return mode.invalid_body(rejection, StatusCode::OK),
    };
    tracing::debug!(?input, "Update item request");

    match state.store.update_item(id, &input).await {
        Ok(0) => return mode.update_failure(ITEM_UPDATE_FAILED),
        Ok(_) => {}
        Err(err) => return mode.store_failure(err, StatusCode::OK),
    }

    match state.store.find_item(id).await {
        Ok(Some(item)) => Reply::ok(&item),
        Ok(None) => mode.update_failure(ITEM_REFETCH_FAILED),
        Err(err) => mode.store_failure(err, StatusCode::OK),
    }
}

/// DELETE /items/{id}
///
/// Reads the matching rows, deletes them, and returns what was read. Legacy
/// mode returns an empty array when nothing matched.
pub async fn delete(State(state): State<AppState>, Path(raw_id): Path<String>) -> Reply {
    let mode = state.mode();
    let id = match parse_id(&raw_id) {
        Ok(id) => id,
        Err(err) => return mode.store_failure(err, StatusCode::INTERNAL_SERVER_ERROR),
    };

    let snapshot = match state.store.find_items_by_id(id).await {
        Ok(rows) => rows,
        Err(err) => return mode.store_failure(err, StatusCode::INTERNAL_SERVER_ERROR),
    };

    if snapshot.is_empty() && mode == ResponseMode::Rest {
        return mode.not_found(ENTITY, id, ITEM_NOT_FOUND);
    }

    match state.store.delete_item(id).await {
        Ok(removed) => {
            tracing::info!(id, removed, "Item deleted");
            Reply::ok(&snapshot)
        }
        Err(err) => mode.store_failure(err, StatusCode::INTERNAL_SERVER_ERROR),
    }
}
