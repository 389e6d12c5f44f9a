//! Handlers for the `/categories` resource.
//!
//! Same shape as the item handlers, without the join.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use stockroom_core::messages::{
    CATEGORY_NOT_FOUND, CATEGORY_REFETCH_FAILED, CATEGORY_UPDATE_FAILED,
};
use stockroom_db::models::category::{CategoryView, CreateCategory, UpdateCategory};
use stockroom_db::store::parse_id;
use stockroom_db::CategoryStore;

use crate::mode::ResponseMode;
use crate::reply::Reply;
use crate::state::AppState;

const ENTITY: &str = "Category";

/// GET /categories
pub async fn list(State(state): State<AppState>) -> Reply {
    match state.store.list_categories().await {
        Ok(categories) => Reply::ok(&categories),
        Err(err) => state
            .mode()
            .store_failure(err, StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// GET /categories/{id}
pub async fn get_by_id(State(state): State<AppState>, Path(raw_id): Path<String>) -> Reply {
    let mode = state.mode();
    let id = match parse_id(&raw_id) {
        Ok(id) => id,
        Err(err) => return mode.store_failure(err, StatusCode::OK),
    };

    match state.store.find_category(id).await {
        Ok(Some(category)) => Reply::ok(&CategoryView::from(category)),
        Ok(None) => mode.not_found(ENTITY, id, CATEGORY_NOT_FOUND),
        Err(err) => mode.store_failure(err, StatusCode::OK),
    }
}

/// POST /categories
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreateCategory>, JsonRejection>,
) -> Reply {
    let mode = state.mode();
    let Json(input) = match body {
        Ok(body) => body,
        Err(rejection) => return mode.invalid_body(rejection, StatusCode::INTERNAL_SERVER_ERROR),
    };

    match state.store.create_category(&input).await {
        Ok(category) => {
            tracing::info!(id = category.id, "Category created");
            Reply::ok(&category)
        }
        Err(err) => mode.store_failure(err, StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// PUT /categories/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<UpdateCategory>, JsonRejection>,
) -> Reply {
    let mode = state.mode();
    let id = match parse_id(&raw_id) {
        Ok(id) => id,
        Err(err) => return mode.store_failure(err, StatusCode::OK),
    };

    match state.store.find_category(id).await {
        Ok(Some(_)) => {}
        Ok(None) => return mode.not_found(ENTITY, id, CATEGORY_NOT_FOUND),
        Err(err) => return mode.store_failure(err, StatusCode::OK),
    }

    let Json(input) = match body {
        Ok(body) => body,
        Err(rejection) => return mode.invalid_body(rejection, StatusCode::OK),
    };
    tracing::debug!(?input, "Update category request");

    match state.store.update_category(id, &input).await {
        Ok(0) => return mode.update_failure(CATEGORY_UPDATE_FAILED),
        Ok(_) => {}
        Err(err) => return mode.store_failure(err, StatusCode::OK),
    }

    match state.store.find_category(id).await {
        Ok(Some(category)) => Reply::ok(&category),
        Ok(None) => mode.update_failure(CATEGORY_REFETCH_FAILED),
        Err(err) => mode.store_failure(err, StatusCode::OK),
    }
}

/// DELETE /categories/{id}
///
/// Fails while items still reference the category.
pub async fn delete(State(state): State<AppState>, Path(raw_id): Path<String>) -> Reply {
    let mode = state.mode();
    let id = match parse_id(&raw_id) {
        Ok(id) => id,
        Err(err) => return mode.store_failure(err, StatusCode::INTERNAL_SERVER_ERROR),
    };

    let snapshot = match state.store.find_categories_by_id(id).await {
        Ok(rows) => rows,
        Err(err) => return mode.store_failure(err, StatusCode::INTERNAL_SERVER_ERROR),
    };

    if snapshot.is_empty() && mode == ResponseMode::Rest {
        return mode.not_found(ENTITY, id, CATEGORY_NOT_FOUND);
    }

    match state.store.delete_category(id).await {
        Ok(removed) => {
            tracing::info!(id, removed, "Category deleted");
            Reply::ok(&snapshot)
        }
        Err(err) => mode.store_failure(err, StatusCode::INTERNAL_SERVER_ERROR),
    }
}
