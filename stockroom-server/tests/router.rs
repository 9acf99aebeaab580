//! Router tests that never reach the database
//!
//! Every request here is answered (or rejected) before a repository runs.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{offline_router, send, send_raw};

#[tokio::test]
async fn liveness_probes() {
    let app = offline_router();

    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("running"));

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn create_item_negative_quantity_is_422() {
    let app = offline_router();
    let (status, body) = send(
        &app,
        "POST",
        "/items/",
        Some(json!({"name": "Invalid Item", "quantity": -1, "price": "10.00"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["message"], "quantity must be >= 0");
}

#[tokio::test]
async fn create_item_negative_price_is_422() {
    let app = offline_router();
    let (status, body) = send(
        &app,
        "POST",
        "/items/",
        Some(json!({"name": "Invalid Item", "quantity": 10, "price": "-5.00"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "price must be >= 0");
}

#[tokio::test]
async fn create_item_empty_name_and_missing_fields_are_422() {
    let app = offline_router();

    let (status, _) = send(
        &app,
        "POST",
        "/items/",
        Some(json!({"name": "", "quantity": 10, "price": "19.99"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = send(&app, "POST", "/items", Some(json!({"name": "Test Item"}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn malformed_json_is_422() {
    let app = offline_router();
    let status = send_raw(&app, "POST", "/items/", "{not json").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn update_item_with_null_quantity_is_422() {
    let app = offline_router();
    let (status, body) = send(&app, "PUT", "/items/1", Some(json!({"quantity": null}))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "quantity cannot be null");
}

#[tokio::test]
async fn non_integer_id_is_422() {
    let app = offline_router();

    let (status, _) = send(&app, "GET", "/items/abc", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, "DELETE", "/users/1.5", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn negative_pagination_is_422() {
    let app = offline_router();
    let (status, body) = send(&app, "GET", "/items/?skip=-1", None).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn create_user_validation_is_422() {
    let app = offline_router();

    let long_name = "x".repeat(101);
    let (status, body) = send(
        &app,
        "POST",
        "/users/",
        Some(json!({"name": long_name, "email": "test@example.com", "password": "pw"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "name exceeds maximum length of 100 characters");

    let (status, _) = send(
        &app,
        "POST",
        "/users/",
        Some(json!({"name": "Test User", "email": "test@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(
        &app,
        "POST",
        "/users/",
        Some(json!({"name": "Test User", "email": null, "password": "pw"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn unreachable_store_is_opaque_500() {
    let app = offline_router();
    let (status, body) = send(&app, "GET", "/items/1", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "an internal error occurred");
}
