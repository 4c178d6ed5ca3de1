// crates/backend-lib/tests/api.rs
//! End-to-end tests driving the full router with in-process requests.
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use stockroom_backend_lib::{
    auth::TokenService, config::Settings, router::create_router, store::MemoryStore, AppState,
};

fn test_settings() -> Settings {
    // low bcrypt cost keeps the suite fast
    Settings {
        bcrypt_cost: 4,
        ..Settings::default()
    }
}

fn test_app() -> Router {
    let state = Arc::new(AppState::new(MemoryStore::new(), test_settings()));
    create_router(state)
}

async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn product_body(series_id: &str) -> Value {
    json!({
        "name": "Alpha 12",
        "capacity": "128GB",
        "color": "black",
        "code": "A12-128",
        "battery": "92%",
        "condition": "used",
        "sellingPrice": 450.0,
        "purchasePrice": 380.0,
        "source": "trade-in",
        "seriesId": series_id,
    })
}

async fn create_series(app: &Router, name: &str) -> String {
    let (status, body) = request(
        app,
        "POST",
        "/api/series",
        Some(json!({ "name": name })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["_id"].as_str().unwrap().to_string()
}

async fn register_and_login(app: &Router, username: &str, password: &str) -> String {
    let credentials = json!({ "username": username, "password": password });
    let (status, _) = request(app, "POST", "/api/register", Some(credentials.clone()), None).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = request(app, "POST", "/api/login", Some(credentials), None).await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn register_twice_second_fails() {
    let app = test_app();
    let credentials = json!({ "username": "alice", "password": "hunter22" });

    let (status, _) = request(&app, "POST", "/api/register", Some(credentials.clone()), None).await;
    assert_eq!(status, StatusCode::CREATED);

    // duplicate username surfaces as a store error
    let (status, body) = request(&app, "POST", "/api/register", Some(credentials), None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn login_token_carries_the_username() {
    let app = test_app();
    let token = register_and_login(&app, "alice", "hunter22").await;

    let settings = test_settings();
    let verifier = TokenService::new(&settings.token_secret, settings.token_ttl_secs);
    let claims = verifier.verify(&token).unwrap();
    assert_eq!(claims.username, "alice");
    assert!(!claims.id.is_empty());
}

#[tokio::test]
async fn login_failures_are_client_errors() {
    let app = test_app();
    register_and_login(&app, "alice", "hunter22").await;

    let (status, _) = request(
        &app,
        "POST",
        "/api/login",
        Some(json!({ "username": "alice", "password": "wrong" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = request(
        &app,
        "POST",
        "/api/login",
        Some(json!({ "username": "nobody", "password": "hunter22" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn product_with_dangling_series_persists_nothing() {
    let app = test_app();

    let (status, _) = request(
        &app,
        "POST",
        "/api/products",
        Some(product_body("does-not-exist")),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = request(&app, "GET", "/api/products", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn public_listing_hides_cost_fields() {
    let app = test_app();
    let series_id = create_series(&app, "Alpha").await;
    let (status, _) = request(
        &app,
        "POST",
        "/api/products",
        Some(product_body(&series_id)),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = request(&app, "GET", "/api/products", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let listed = &body.as_array().unwrap()[0];
    assert!(listed.get("purchasePrice").is_none());
    assert!(listed.get("source").is_none());
    assert_eq!(listed["sellingPrice"], 450.0);
    assert_eq!(listed["series"]["name"], "Alpha");

    let token = register_and_login(&app, "alice", "hunter22").await;
    let (status, body) = request(&app, "GET", "/api/products/full", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let listed = &body.as_array().unwrap()[0];
    assert_eq!(listed["purchasePrice"], 380.0);
    assert_eq!(listed["source"], "trade-in");
}

#[tokio::test]
async fn full_listing_token_handling() {
    let app = test_app();

    // absent token is a client error
    let (status, _) = request(&app, "GET", "/api/products/full", None, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // malformed token is a server error, not 401
    let (status, _) = request(&app, "GET", "/api/products/full", None, Some("garbage")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    // so is an expired one
    let settings = test_settings();
    let expired = TokenService::new(&settings.token_secret, -120)
        .issue("u1", "alice")
        .unwrap();
    let (status, _) = request(&app, "GET", "/api/products/full", None, Some(&expired)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn filtered_listing_returns_exactly_the_series_products() {
    let app = test_app();
    let alpha = create_series(&app, "Alpha").await;
    let beta = create_series(&app, "Beta").await;

    for _ in 0..3 {
        let (status, _) = request(
            &app,
            "POST",
            "/api/products",
            Some(product_body(&alpha)),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    let (status, _) = request(&app, "POST", "/api/products", Some(product_body(&beta)), None).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = request(
        &app,
        "GET",
        &format!("/api/products/series/{alpha}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let listed = body.as_array().unwrap();
    assert_eq!(listed.len(), 3);
    assert!(listed.iter().all(|p| p["series"]["name"] == "Alpha"));

    let (status, _) = request(&app, "GET", "/api/products/series/unknown", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn product_round_trip_expands_series_name() {
    let app = test_app();
    let series_id = create_series(&app, "S1").await;

    let (status, created) = request(
        &app,
        "POST",
        "/api/products",
        Some(product_body(&series_id)),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let product_id = created["_id"].as_str().unwrap();

    let (status, body) = request(
        &app,
        "GET",
        &format!("/api/products/{product_id}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["series"]["name"], "S1");
    assert_eq!(body["purchasePrice"], 380.0);
}

#[tokio::test]
async fn unknown_product_is_not_found() {
    let app = test_app();
    let (status, _) = request(&app, "GET", "/api/products/missing", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn series_endpoints() {
    let app = test_app();
    let id = create_series(&app, "Alpha").await;

    let (status, body) = request(&app, "GET", "/api/series", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let listed = body.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["_id"], id.as_str());
    assert_eq!(listed[0]["name"], "Alpha");

    let (status, body) = request(&app, "GET", &format!("/api/series/{id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Alpha");

    let (status, _) = request(&app, "GET", "/api/series/missing", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // duplicate name surfaces as a store error
    let (status, _) = request(
        &app,
        "POST",
        "/api/series",
        Some(json!({ "name": "Alpha" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
