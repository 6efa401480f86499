//! End-to-end tests for the HTTP surface over an in-memory SQLite database.

mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tower::ServiceExt;

use restaurant_api::api::{create_router, AppState};
use restaurant_api::domain::{group_by_category, MenuCategory, MenuItem};
use restaurant_api::errors::AppResult;
use restaurant_api::services::{MenuService, ServiceContainer, Services};

use common::{count_rows, test_app, test_config, test_database};

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

    (status, json)
}

async fn register(app: &Router, email: &str, password: &str, name: &str) -> StatusCode {
    let (status, _) = send(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({"email": email, "password": password, "name": name})),
    )
    .await;
    status
}

async fn login(app: &Router, email: &str, password: &str) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"email": email, "password": password})),
    )
    .await
}

async fn token_for(app: &Router, email: &str, name: &str) -> String {
    assert_eq!(register(app, email, "pw", name).await, StatusCode::CREATED);
    let (status, body) = login(app, email, "pw").await;
    assert_eq!(status, StatusCode::OK);
    body["access_token"].as_str().unwrap().to_string()
}

fn assert_money(value: &Value, expected: f64) {
    let actual = value.as_f64().expect("money is a JSON number");
    assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
}

#[tokio::test]
async fn test_root_and_health() {
    let (app, _db) = test_app(false).await;

    let (status, body) = send(&app, Method::GET, "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_str().unwrap().contains("Welcome"));

    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"]["status"], "healthy");
}

#[tokio::test]
async fn test_register_then_duplicate_conflicts() {
    let (app, _db) = test_app(false).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({"email": "a@x.com", "password": "pw", "name": "Alice"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["message"].is_string());
    assert!(body.get("access_token").is_none());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({"email": "a@x.com", "password": "other", "name": "Alicia"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
}

#[tokio::test]
async fn test_register_rejects_missing_fields() {
    let (app, _db) = test_app(false).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({"email": "a@x.com", "password": "", "name": "Alice"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({"email": "a@x.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_returns_token_and_profile() {
    let (app, _db) = test_app(false).await;
    register(&app, "a@x.com", "pw", "Alice").await;

    let (status, body) = login(&app, "a@x.com", "pw").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["access_token"].as_str().unwrap().is_empty());
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["expires_in"], 30 * 86_400);
    assert_eq!(body["user"]["name"], "Alice");
    assert_eq!(body["user"]["email"], "a@x.com");
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_login_failures_share_one_response() {
    let (app, _db) = test_app(false).await;
    register(&app, "a@x.com", "pw", "Alice").await;

    let (wrong_status, wrong_body) = login(&app, "a@x.com", "nope").await;
    let (unknown_status, unknown_body) = login(&app, "ghost@x.com", "pw").await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body, unknown_body);
}

#[tokio::test]
async fn test_email_lookup_is_case_sensitive() {
    let (app, _db) = test_app(false).await;
    register(&app, "a@x.com", "pw", "Alice").await;

    let (status, _) = login(&app, "A@X.COM", "pw").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_menu_is_grouped_by_category() {
    let (app, _db) = test_app(true).await;

    let (status, body) = send(&app, Method::GET, "/api/menu", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let groups = body.as_array().unwrap();
    assert!(!groups.is_empty());
    assert_eq!(groups[0]["title"], "Platos de fondo");
    assert_eq!(groups[0]["data"][0]["name"], "Lomo Saltado");
    assert_money(&groups[0]["data"][0]["price"], 18.0);

    let titles: Vec<&str> = groups.iter().map(|g| g["title"].as_str().unwrap()).collect();
    let mut unique = titles.clone();
    unique.dedup();
    assert_eq!(titles.len(), unique.len());
}

#[tokio::test]
async fn test_empty_menu_is_not_found() {
    let (app, _db) = test_app(false).await;

    let (status, body) = send(&app, Method::GET, "/api/menu", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_orders_require_bearer_token() {
    let (app, _db) = test_app(true).await;

    let (status, body) = send(&app, Method::GET, "/api/orders", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let (status, _) = send(&app, Method::GET, "/api/orders", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/orders",
        None,
        Some(json!({"items": [{"id": 1, "price": 18.0, "quantity": 1}]})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_place_order_and_read_history() {
    let (app, _db) = test_app(true).await;
    let token = token_for(&app, "a@x.com", "Alice").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/orders",
        Some(&token),
        Some(json!({
            "items": [{"id": 1, "name": "Lomo Saltado", "price": 18.0, "quantity": 2}],
            "pabellon": "B",
            "mensaje": "sin cebolla"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["message"].is_string());

    let (status, body) = send(&app, Method::GET, "/api/orders", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let orders = body.as_array().unwrap();
    assert_eq!(orders.len(), 1);
    assert_money(&orders[0]["total_price"], 36.0);
    assert_eq!(orders[0]["item_count"], 1);
    assert_eq!(orders[0]["user_name"], "Alice");
    assert_eq!(orders[0]["status"], "Received");
    assert_eq!(orders[0]["pabellon"], "B");
    assert_eq!(orders[0]["mensaje"], "sin cebolla");
    assert!(orders[0].get("items").is_none());

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/orders?include_items=true",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let line = &body[0]["items"][0];
    assert_eq!(line["menu_item_id"], 1);
    assert_eq!(line["menu_item_name"], "Lomo Saltado");
    assert_eq!(line["category"], "Platos de fondo");
    assert_eq!(line["quantity"], 2);
    assert_money(&line["price"], 18.0);

    let order_id = body[0]["id"].as_i64().unwrap();
    let (status, detail) = send(
        &app,
        Method::GET,
        &format!("/api/orders/{order_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["id"], order_id);
    assert_eq!(detail["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_client_price_is_stored_as_submitted() {
    let (app, _db) = test_app(true).await;
    let token = token_for(&app, "a@x.com", "Alice").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/orders",
        Some(&token),
        Some(json!({"items": [{"id": 1, "price": 1.5, "quantity": 3}]})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = send(&app, Method::GET, "/api/orders", Some(&token), None).await;
    assert_money(&body[0]["total_price"], 4.5);
}

#[tokio::test]
async fn test_rejected_orders_write_nothing() {
    let (app, db) = test_app(true).await;
    let token = token_for(&app, "a@x.com", "Alice").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/orders",
        Some(&token),
        Some(json!({"items": []})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/orders",
        Some(&token),
        Some(json!({"items": [
            {"id": 1, "price": 18.0, "quantity": 1},
            {"id": 999, "price": 5.0, "quantity": 1}
        ]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/orders",
        Some(&token),
        Some(json!({"items": [{"id": 1, "price": 18.0, "quantity": 0}]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(count_rows(&db, "orders").await, 0);
    assert_eq!(count_rows(&db, "order_items").await, 0);
}

#[tokio::test]
async fn test_oversized_amounts_are_bad_requests() {
    let (app, db) = test_app(true).await;
    let token = token_for(&app, "a@x.com", "Alice").await;

    for item in [
        json!({"id": 1, "price": 1e28, "quantity": 10}),
        json!({"id": 1, "price": 1e9, "quantity": 1}),
        json!({"id": 1, "price": 99_999_999.0, "quantity": 2}),
    ] {
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/orders",
            Some(&token),
            Some(json!({"items": [item]})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    assert_eq!(count_rows(&db, "orders").await, 0);
}

#[tokio::test]
async fn test_users_only_see_their_own_orders() {
    let (app, _db) = test_app(true).await;
    let alice = token_for(&app, "a@x.com", "Alice").await;
    let bob = token_for(&app, "b@x.com", "Bob").await;

    send(
        &app,
        Method::POST,
        "/api/orders",
        Some(&alice),
        Some(json!({"items": [{"id": 1, "price": 18.0, "quantity": 1}]})),
    )
    .await;

    let (_, alice_orders) = send(&app, Method::GET, "/api/orders", Some(&alice), None).await;
    let alice_order_id = alice_orders[0]["id"].as_i64().unwrap();

    let (status, bob_orders) = send(&app, Method::GET, "/api/orders", Some(&bob), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bob_orders, json!([]));

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/api/orders/{alice_order_id}"),
        Some(&bob),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_order_history_is_newest_first() {
    let (app, _db) = test_app(true).await;
    let token = token_for(&app, "a@x.com", "Alice").await;

    for quantity in 1..=3 {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/orders",
            Some(&token),
            Some(json!({"items": [{"id": 1, "price": 10.0, "quantity": quantity}]})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, body) = send(&app, Method::GET, "/api/orders", Some(&token), None).await;
    let totals: Vec<f64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["total_price"].as_f64().unwrap())
        .collect();
    assert_eq!(totals, vec![30.0, 20.0, 10.0]);
}

#[tokio::test]
async fn test_profile_update_requires_current_password() {
    let (app, _db) = test_app(false).await;
    let token = token_for(&app, "a@x.com", "Alice").await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/user/update",
        Some(&token),
        Some(json!({"current_password": "wrong", "name": "Mallory"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "INCORRECT_PASSWORD");

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/auth/update",
        Some(&token),
        Some(json!({"password_actual": "pw", "name": "Alice B.", "new_password": "pw2"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["name"], "Alice B.");
    assert_eq!(body["user"]["email"], "a@x.com");

    let (status, _) = login(&app, "a@x.com", "pw").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, body) = login(&app, "a@x.com", "pw2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["name"], "Alice B.");
}

#[tokio::test]
async fn test_profile_update_without_token_is_unauthorized() {
    let (app, _db) = test_app(false).await;

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/user/update",
        None,
        Some(json!({"current_password": "pw", "name": "X"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let (app, _db) = test_app(false).await;

    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"].get("/api/orders").is_some());
}

struct FixedMenu;

#[async_trait]
impl MenuService for FixedMenu {
    async fn list_menu(&self) -> AppResult<Vec<MenuCategory>> {
        Ok(group_by_category(vec![MenuItem {
            id: 42,
            name: "Chicha Morada".to_string(),
            description: None,
            price: Decimal::new(500, 2),
            image_url: None,
            category: "Bebidas".to_string(),
        }]))
    }

    async fn seed_if_empty(&self) -> AppResult<usize> {
        Ok(0)
    }
}

#[tokio::test]
async fn test_router_uses_injected_services() {
    let db = test_database().await;
    let wired = Services::from_connection(db.get_connection(), test_config());
    let container = Services::new(wired.auth(), Arc::new(FixedMenu), wired.orders());
    let app = create_router(AppState::from_container(&container, db));

    let (status, body) = send(&app, Method::GET, "/api/menu", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["title"], "Bebidas");
    assert_eq!(body[0]["data"][0]["id"], 42);
}
