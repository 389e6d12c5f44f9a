pub mod category;
pub mod health;
pub mod item;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree.
///
/// Route hierarchy:
///
/// ```text
/// /items                  list, create
/// /items/{id}             get, update, delete
///
/// /categories             list, create
/// /categories/{id}        get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/items", item::router())
        .nest("/categories", category::router())
}
