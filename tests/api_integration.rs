//! End-to-end API integration tests
//!
//! These tests verify the complete HTTP API flows including:
//! - Listing, fetching, creating, updating and deleting users
//! - The success envelope and error body shapes
//! - Required-field validation and not-found handling

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::util::ServiceExt; // for oneshot
use user_directory_api::api;
use user_directory_api::infrastructure::repositories::InMemoryUserRepository;

/// Setup test application around an empty repository
fn setup_app() -> Router {
    api::router(Arc::new(InMemoryUserRepository::new()))
}

/// Setup test application around the default directory entries
fn setup_seeded_app() -> Router {
    api::router(Arc::new(
        InMemoryUserRepository::seeded().expect("seed users"),
    ))
}

/// Send a request and return the status with the parsed JSON body
async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();

    (status, json)
}

fn user_payload(name: &str) -> Value {
    json!({
        "name": name,
        "email": "a@x.com",
        "city": "C",
        "role": "developer"
    })
}

#[tokio::test]
async fn test_health_check() {
    let app = setup_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn test_list_seeded_users() {
    let app = setup_seeded_app();

    let (status, json) = send(&app, "GET", "/users/get", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], 200);
    assert!(json.get("message").is_none());

    let users = json["data"].as_array().unwrap();
    assert_eq!(users.len(), 3);
    assert_eq!(users[0]["id"], "1");
    assert_eq!(users[0]["name"], "Amit Kumar");
    assert_eq!(users[0]["createdAt"], "2025-01-10T09:00:00Z");
    assert_eq!(users[2]["role"], "manager");
}

#[tokio::test]
async fn test_create_list_delete_scenario() {
    let app = setup_app();

    // Step 1: First user on an empty directory gets ID 1
    let (status, json) = send(&app, "POST", "/users/create", Some(user_payload("A"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["status"], 201);
    assert_eq!(json["message"], "User created successfully");
    assert_eq!(json["data"]["id"], "1");
    assert!(json["data"]["createdAt"].is_string());

    // Step 2: Same fields again get ID 2
    let (status, json) = send(&app, "POST", "/users/create", Some(user_payload("A"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["id"], "2");

    // Step 3: Delete the first user; response holds the remaining list
    let (status, json) = send(&app, "DELETE", "/users/delete/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], 200);
    assert_eq!(json["message"], "User deleted successfully");
    let remaining = json["data"].as_array().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0]["id"], "2");

    // Step 4: List returns only the second user
    let (_, json) = send(&app, "GET", "/users/get", None).await;
    let users = json["data"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["id"], "2");
}

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let app = setup_app();

    let payload = json!({
        "name": "Priya Sharma",
        "email": "priya@example.com",
        "city": "Mumbai",
        "role": "designer"
    });
    let (_, created) = send(&app, "POST", "/users/create", Some(payload.clone())).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, json) = send(&app, "GET", &format!("/users/getbyid/{}", id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], 200);
    assert!(json.get("message").is_none());
    assert_eq!(json["data"], created["data"]);
    for field in ["name", "email", "city", "role"] {
        assert_eq!(json["data"][field], payload[field]);
    }
}

#[tokio::test]
async fn test_create_with_empty_field_is_rejected() {
    let app = setup_app();

    let payload = json!({
        "name": "",
        "email": "a@x.com",
        "city": "C",
        "role": "developer"
    });
    let (status, json) = send(&app, "POST", "/users/create", Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({ "status": 400, "message": "All fields are required" }));

    // No record was added
    let (_, json) = send(&app, "GET", "/users/get", None).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_with_missing_field_is_rejected() {
    let app = setup_app();

    let payload = json!({ "name": "A", "email": "a@x.com", "city": "C" });
    let (status, json) = send(&app, "POST", "/users/create", Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "All fields are required");
}

#[tokio::test]
async fn test_create_with_malformed_body_is_bad_request() {
    let app = setup_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/users/create")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], 400);
    assert!(json["message"].is_string());
}

#[tokio::test]
async fn test_get_unknown_user_is_not_found() {
    let app = setup_seeded_app();

    let (status, json) = send(&app, "GET", "/users/getbyid/999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({ "status": 404, "message": "User not found" }));
}

#[tokio::test]
async fn test_update_single_field() {
    let app = setup_seeded_app();

    let (status, json) = send(
        &app,
        "PUT",
        "/users/update/2",
        Some(json!({ "city": "Pune" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], 200);
    assert!(json.get("message").is_none());
    assert_eq!(json["data"]["id"], "2");
    assert_eq!(json["data"]["city"], "Pune");
    assert_eq!(json["data"]["name"], "Priya Sharma");
    assert_eq!(json["data"]["email"], "priya@example.com");
    assert_eq!(json["data"]["role"], "designer");
    assert_eq!(json["data"]["createdAt"], "2025-01-12T14:30:00Z");

    // The change is visible to later reads
    let (_, json) = send(&app, "GET", "/users/getbyid/2", None).await;
    assert_eq!(json["data"]["city"], "Pune");
}

#[tokio::test]
async fn test_update_ignores_empty_strings() {
    let app = setup_seeded_app();

    let (status, json) = send(
        &app,
        "PUT",
        "/users/update/1",
        Some(json!({ "name": "", "role": "manager" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["name"], "Amit Kumar");
    assert_eq!(json["data"]["role"], "manager");
}

#[tokio::test]
async fn test_update_unknown_user_is_not_found() {
    let app = setup_app();

    let (status, json) = send(
        &app,
        "PUT",
        "/users/update/999",
        Some(json!({ "name": "X" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({ "status": 404, "message": "User not found" }));
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let app = setup_seeded_app();

    let (status, json) = send(&app, "DELETE", "/users/delete/3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let (status, _) = send(&app, "GET", "/users/getbyid/3", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, json) = send(&app, "DELETE", "/users/delete/3", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "User not found");
}

#[tokio::test]
async fn test_create_after_delete_gets_fresh_id() {
    let app = setup_seeded_app();

    send(&app, "DELETE", "/users/delete/2", None).await;
    let (status, json) = send(&app, "POST", "/users/create", Some(user_payload("New"))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["id"], "4");

    let (_, json) = send(&app, "GET", "/users/get", None).await;
    let ids: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["1", "3", "4"]);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = setup_app();

    let (status, json) = send(&app, "GET", "/users/nope", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({ "status": 404, "message": "Route not found" }));
}

#[tokio::test]
async fn test_update_without_body_on_unknown_user_is_not_found() {
    let app = setup_seeded_app();

    let (status, json) = send(&app, "PUT", "/users/update/999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({ "status": 404, "message": "User not found" }));
}

#[tokio::test]
async fn test_update_without_body_leaves_user_unchanged() {
    let app = setup_seeded_app();
    let (_, before) = send(&app, "GET", "/users/getbyid/1", None).await;

    let (status, json) = send(&app, "PUT", "/users/update/1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"], before["data"]);
}

#[tokio::test]
async fn test_create_without_body_requires_all_fields() {
    let app = setup_seeded_app();

    let (status, json) = send(&app, "POST", "/users/create", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({ "status": 400, "message": "All fields are required" }));

    let (_, json) = send(&app, "GET", "/users/get", None).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_create_with_empty_json_body_requires_all_fields() {
    let app = setup_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/users/create")
                .header("content-type", "application/json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["message"], "All fields are required");
}

#[tokio::test]
async fn test_create_with_non_string_field_requires_all_fields() {
    let app = setup_app();

    let payload = json!({
        "name": 5,
        "email": "a@x.com",
        "city": "C",
        "role": "developer"
    });
    let (status, json) = send(&app, "POST", "/users/create", Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({ "status": 400, "message": "All fields are required" }));

    let (_, json) = send(&app, "GET", "/users/get", None).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_update_ignores_non_string_fields() {
    let app = setup_seeded_app();

    let (status, json) = send(
        &app,
        "PUT",
        "/users/update/3",
        Some(json!({ "name": 42, "city": "Chennai" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["name"], "Rahul Verma");
    assert_eq!(json["data"]["city"], "Chennai");
}
