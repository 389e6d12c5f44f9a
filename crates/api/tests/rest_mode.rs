//! HTTP-level tests for the normalized REST response mode.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_category, create_item, delete, get, post_json, put_json, rest_app,
};
use serde_json::json;

#[tokio::test]
async fn missing_item_is_404_envelope() {
    let app = rest_app();
    let response = get(app, "/items/5").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Item with id 5 not found", "code": "NOT_FOUND"})
    );
}

#[tokio::test]
async fn update_missing_item_is_404() {
    let app = rest_app();
    let response = put_json(app, "/items/5", json!({"price": 1.0})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_missing_item_is_404() {
    let app = rest_app();
    let response = delete(app, "/items/5").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_identifier_is_400() {
    let app = rest_app();
    let response = get(app, "/items/abc").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn foreign_key_violation_is_409() {
    let app = rest_app();
    let response = post_json(app, "/items", json!({"name": "Orphan", "category_id": 3})).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[tokio::test]
async fn referenced_category_delete_is_409() {
    let app = rest_app();
    let id = create_category(&app, "Tools").await;
    create_item(&app, json!({"name": "Hammer", "category_id": id})).await;

    let response = delete(app, &format!("/categories/{id}")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn success_paths_match_legacy_shapes() {
    let app = rest_app();
    let created = create_item(&app, json!({"name": "Widget", "price": 2.0})).await;
    let id = created["id"].as_i64().unwrap();

    let response = get(app.clone(), &format!("/items/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"name": "Widget", "price": 2.0, "description": null, "Category": null})
    );

    let response = delete(app, &format!("/items/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([created]));
}
