#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use stockroom_api::config::{LogFormat, ServerConfig, StoreBackend};
use stockroom_api::mode::ResponseMode;
use stockroom_api::router::build_app_router;
use stockroom_api::state::AppState;
use stockroom_core::types::DbId;
use stockroom_db::models::category::{Category, CategoryView, CreateCategory, UpdateCategory};
use stockroom_db::models::item::{CreateItem, Item, ItemView, UpdateItem};
use stockroom_db::{CategoryStore, ItemStore, MemoryStore, Store, StoreError, StoreResult};
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(mode: ResponseMode) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        response_mode: mode,
        store_backend: StoreBackend::Memory,
        database_url: None,
        db_max_connections: 1,
        log_format: LogFormat::Text,
    }
}

/// Build the full application router over `store`, with the same middleware
/// stack production uses.
pub fn build_test_app(store: Arc<dyn Store>, mode: ResponseMode) -> Router {
    let config = test_config(mode);
    let state = AppState::new(store, config.clone());
    build_app_router(state, &config)
}

/// Legacy-mode app over a fresh in-memory store.
pub fn legacy_app() -> Router {
    build_test_app(Arc::new(MemoryStore::new()), ResponseMode::Legacy)
}

/// REST-mode app over a fresh in-memory store.
pub fn rest_app() -> Router {
    build_test_app(Arc::new(MemoryStore::new()), ResponseMode::Rest)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

/// Send `body` verbatim, with `content_type` if given.
pub async fn send_raw(
    app: Router,
    method: Method,
    uri: &str,
    content_type: Option<&str>,
    body: &str,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    app.oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

/// Create a category through the API and return its id.
pub async fn create_category(app: &Router, name: &str) -> DbId {
    let response = post_json(app.clone(), "/categories", serde_json::json!({"name": name})).await;
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create an item through the API and return the created row.
pub async fn create_item(app: &Router, body: serde_json::Value) -> serde_json::Value {
    body_json(post_json(app.clone(), "/items", body).await).await
}

// ---------------------------------------------------------------------------
// A store whose every call fails
// ---------------------------------------------------------------------------

pub struct FailingStore;

fn unavailable<T>() -> StoreResult<T> {
    Err(StoreError::Database(sqlx::Error::PoolTimedOut))
}

#[async_trait]
impl ItemStore for FailingStore {
    async fn list_items(&self) -> StoreResult<Vec<ItemView>> {
        unavailable()
    }
    async fn find_item_view(&self, _id: DbId) -> StoreResult<Option<ItemView>> {
        unavailable()
    }
    async fn find_item(&self, _id: DbId) -> StoreResult<Option<Item>> {
        unavailable()
    }
    async fn find_items_by_id(&self, _id: DbId) -> StoreResult<Vec<Item>> {
        unavailable()
    }
    async fn create_item(&self, _input: &CreateItem) -> StoreResult<Item> {
        unavailable()
    }
    async fn update_item(&self, _id: DbId, _input: &UpdateItem) -> StoreResult<u64> {
        unavailable()
    }
    async fn delete_item(&self, _id: DbId) -> StoreResult<u64> {
        unavailable()
    }
}

#[async_trait]
impl CategoryStore for FailingStore {
    async fn list_categories(&self) -> StoreResult<Vec<CategoryView>> {
        unavailable()
    }
    async fn find_category(&self, _id: DbId) -> StoreResult<Option<Category>> {
        unavailable()
    }
    async fn find_categories_by_id(&self, _id: DbId) -> StoreResult<Vec<Category>> {
        unavailable()
    }
    async fn create_category(&self, _input: &CreateCategory) -> StoreResult<Category> {
        unavailable()
    }
    async fn update_category(&self, _id: DbId, _input: &UpdateCategory) -> StoreResult<u64> {
        unavailable()
    }
    async fn delete_category(&self, _id: DbId) -> StoreResult<u64> {
        unavailable()
    }
}

#[async_trait]
impl Store for FailingStore {
    async fn ping(&self) -> StoreResult<()> {
        unavailable()
    }

    fn backend(&self) -> &'static str {
        "failing"
    }
}

pub fn failing_app(mode: ResponseMode) -> Router {
    build_test_app(Arc::new(FailingStore), mode)
}

// ---------------------------------------------------------------------------
// A store that passes the update lookup and then misbehaves
// ---------------------------------------------------------------------------

/// Which step of an update goes wrong after the initial lookup succeeds.
#[derive(Debug, Clone, Copy)]
pub enum UpdateScript {
    /// The write matches no rows.
    WriteAffectsNothing,
    /// The write fails in the database.
    WriteFails,
    /// The read-back finds no row.
    ReadBackMissing,
    /// The read-back fails in the database.
    ReadBackFails,
}

/// Wraps a [`MemoryStore`] seeded with category 1 and item 1. The first
/// `find_item` / `find_category` call is answered normally; the write and
/// any later lookups follow the script.
pub struct ScriptedStore {
    inner: MemoryStore,
    script: UpdateScript,
    item_lookups: AtomicUsize,
    category_lookups: AtomicUsize,
}

impl ScriptedStore {
    pub async fn seeded(script: UpdateScript) -> Self {
        let inner = MemoryStore::new();
        let category = inner
            .create_category(&CreateCategory {
                name: Some("Tools".to_string()),
            })
            .await
            .unwrap();
        inner
            .create_item(&CreateItem {
                name: Some("Hammer".to_string()),
                price: Some(9.5),
                description: None,
                category_id: Some(category.id),
            })
            .await
            .unwrap();

        Self {
            inner,
            script,
            item_lookups: AtomicUsize::new(0),
            category_lookups: AtomicUsize::new(0),
        }
    }

    fn write_outcome(&self) -> Option<StoreResult<u64>> {
        match self.script {
            UpdateScript::WriteAffectsNothing => Some(Ok(0)),
            UpdateScript::WriteFails => Some(unavailable()),
            _ => None,
        }
    }

    fn read_back<T>(&self, lookups: &AtomicUsize) -> Option<StoreResult<Option<T>>> {
        if lookups.fetch_add(1, Ordering::SeqCst) == 0 {
            return None;
        }
        match self.script {
            UpdateScript::ReadBackMissing => Some(Ok(None)),
            UpdateScript::ReadBackFails => Some(unavailable()),
            _ => None,
        }
    }
}

#[async_trait]
impl ItemStore for ScriptedStore {
    async fn list_items(&self) -> StoreResult<Vec<ItemView>> {
        self.inner.list_items().await
    }
    async fn find_item_view(&self, id: DbId) -> StoreResult<Option<ItemView>> {
        self.inner.find_item_view(id).await
    }
    async fn find_item(&self, id: DbId) -> StoreResult<Option<Item>> {
        match self.read_back(&self.item_lookups) {
            Some(outcome) => outcome,
            None => self.inner.find_item(id).await,
        }
    }
    async fn find_items_by_id(&self, id: DbId) -> StoreResult<Vec<Item>> {
        self.inner.find_items_by_id(id).await
    }
    async fn create_item(&self, input: &CreateItem) -> StoreResult<Item> {
        self.inner.create_item(input).await
    }
    async fn update_item(&self, id: DbId, input: &UpdateItem) -> StoreResult<u64> {
        match self.write_outcome() {
            Some(outcome) => outcome,
            None => self.inner.update_item(id, input).await,
        }
    }
    async fn delete_item(&self, id: DbId) -> StoreResult<u64> {
        self.inner.delete_item(id).await
    }
}

#[async_trait]
impl CategoryStore for ScriptedStore {
    async fn list_categories(&self) -> StoreResult<Vec<CategoryView>> {
        self.inner.list_categories().await
    }
    async fn find_category(&self, id: DbId) -> StoreResult<Option<Category>> {
        match self.read_back(&self.category_lookups) {
            Some(outcome) => outcome,
            None => self.inner.find_category(id).await,
        }
    }
    async fn find_categories_by_id(&self, id: DbId) -> StoreResult<Vec<Category>> {
        self.inner.find_categories_by_id(id).await
    }
    async fn create_category(&self, input: &CreateCategory) -> StoreResult<Category> {
        self.inner.create_category(input).await
    }
    async fn update_category(&self, id: DbId, input: &UpdateCategory) -> StoreResult<u64> {
        match self.write_outcome() {
            Some(outcome) => outcome,
            None => self.inner.update_category(id, input).await,
        }
    }
    async fn delete_category(&self, id: DbId) -> StoreResult<u64> {
        self.inner.delete_category(id).await
    }
}

#[async_trait]
impl Store for ScriptedStore {
    async fn ping(&self) -> StoreResult<()> {
        self.inner.ping().await
    }

    fn backend(&self) -> &'static str {
        "scripted"
    }
}

pub async fn scripted_app(script: UpdateScript, mode: ResponseMode) -> Router {
    build_test_app(Arc::new(ScriptedStore::seeded(script).await), mode)
}
