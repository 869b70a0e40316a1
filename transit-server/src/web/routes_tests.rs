//! End-to-end tests for the HTTP router.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use crate::accounts::{Accounts, MemoryUserStore};
use crate::cache::{CacheConfig, CachedRouteService};
use crate::network::{EdgePolicy, StationGraph, StationRecord};
use crate::planner::RouteService;

use super::{AppState, create_router};

struct TestApp {
    router: Router,
    _static_dir: TempDir,
}

fn app() -> TestApp {
    let graph = StationGraph::from_records(
        vec![
            StationRecord::new("LUZ", "Luz", -23.5365, -46.6333, &["SB"]),
            StationRecord::new("SB", "São Bento", -23.5446, -46.6340, &["LUZ", "SE"]),
            StationRecord::new("SE", "Sé", -23.5503, -46.6339, &["SB", "LIB"]),
            StationRecord::new("LIB", "Liberdade", -23.5556, -46.6356, &["SE"]),
            StationRecord::new("ISO", "Ilha", -23.6000, -46.7000, &[]),
        ],
        EdgePolicy::AsStored,
    )
    .unwrap();

    let routes = CachedRouteService::new(
        RouteService::new(Arc::new(graph)),
        &CacheConfig::default(),
    );
    let state = AppState::new(routes, Accounts::new(MemoryUserStore::new()), "5511900000000");

    let static_dir = tempfile::tempdir().unwrap();
    std::fs::write(static_dir.path().join("index.html"), "<h1>Mapa</h1>").unwrap();

    TestApp {
        router: create_router(state, static_dir.path()),
        _static_dir: static_dir,
    }
}

async fn send(app: &TestApp, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send_raw(app, method, uri, body.map(|b| b.to_string())).await;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn send_raw(
    app: &TestApp,
    method: Method,
    uri: &str,
    body: Option<String>,
) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
    }
    let request = builder
        .body(body.map(Body::from).unwrap_or_else(Body::empty))
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

async fn get(app: &TestApp, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

#[tokio::test]
async fn health() {
    let app = app();
    let (status, body) = send_raw(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");
}

#[tokio::test]
async fn route_by_accent_free_names() {
    let app = app();
    let (status, body) = get(&app, "/route?orig=luz&dest=se").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["origin"], "Luz");
    assert_eq!(body["destination"], "Sé");
    assert_eq!(body["stationCount"], 3);

    let ids: Vec<_> = body["path"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["LUZ", "SB", "SE"]);
    assert_eq!(body["path"][1]["name"], "São Bento");
    assert_eq!(body["path"][1]["lat"], -23.5446);
}

#[tokio::test]
async fn route_accepts_long_parameter_names_and_encoded_accents() {
    let app = app();
    let (status, body) = get(&app, "/route?origin=S%C3%A3o%20Bento&destination=LIB").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["origin"], "São Bento");
    assert_eq!(body["stationCount"], 3);
}

#[tokio::test]
async fn route_missing_parameter_is_bad_request() {
    let app = app();
    let (status, body) = get(&app, "/route?orig=Luz").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "parameters orig and dest are required");

    let (status, _) = get(&app, "/route?orig=Luz&dest=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn route_unknown_station_is_not_found() {
    let app = app();
    let (status, body) = get(&app, "/route?orig=Luz&dest=Paulista").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "destination station not found: Paulista");
}

#[tokio::test]
async fn route_disconnected_is_not_found() {
    let app = app();
    let (status, body) = get(&app, "/route?orig=Luz&dest=Ilha").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "no route from Luz to Ilha");
}

#[tokio::test]
async fn station_listing_search_and_lookup() {
    let app = app();

    let (status, body) = get(&app, "/api/stations").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stations"].as_array().unwrap().len(), 5);
    assert_eq!(body["stations"][1]["neighbors"], json!(["LUZ", "SE"]));

    let (status, body) = get(&app, "/api/stations/search?q=sao").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stations"][0]["id"], "SB");

    let (status, body) = get(&app, "/api/stations/search?q=l&limit=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stations"].as_array().unwrap().len(), 1);

    let (status, body) = get(&app, "/api/stations/SE").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Sé");

    let (status, _) = get(&app, "/api/stations/XX").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn sign_up_and_fetch_user() {
    let app = app();

    let (status, body) = get(&app, "/users/next-id").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nextId"], 1);

    let (status, body) = send(
        &app,
        Method::POST,
        "/users",
        Some(json!({"name": "Ana", "email": "ana@example.com", "password": "secret1"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 1);
    assert!(body.get("password").is_none());

    let (status, body) = get(&app, "/users/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "ana@example.com");
    assert_eq!(body["balance"], 0.0);

    let (status, body) = get(&app, "/users/next-id").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nextId"], 2);
}

#[tokio::test]
async fn sign_up_errors() {
    let app = app();

    let (status, _) = send(
        &app,
        Method::POST,
        "/users",
        Some(json!({"name": "Ana", "email": "ana@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        Method::POST,
        "/users",
        Some(json!({"name": "Ana", "email": "ana", "password": "secret1"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid email address");

    let (status, _) = send_raw(&app, Method::POST, "/users", Some("{oops".to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let user = json!({"nome": "Ana", "email": "ana@example.com", "senha": "secret1"});
    let (status, _) = send(&app, Method::POST, "/users", Some(user.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send(&app, Method::POST, "/users", Some(user)).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn login() {
    let app = app();
    send(
        &app,
        Method::POST,
        "/users",
        Some(json!({"name": "Ana", "email": "ana@example.com", "password": "secret1"})),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/login",
        Some(json!({"email": "ana@example.com", "password": "secret1"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Ana");

    let (status, _) = send(
        &app,
        Method::POST,
        "/login",
        Some(json!({"email": "ana@example.com", "password": "wrong!"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wallet_top_up_and_charge() {
    let app = app();
    send(
        &app,
        Method::POST,
        "/users",
        Some(json!({"name": "Ana", "email": "ana@example.com", "password": "secret1"})),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/users/1/balance",
        Some(json!({"amount": 10.0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["balance"], 10.0);
    assert_eq!(body["history"][0]["description"], "Balance top-up (+R$ 10.00)");

    let (status, body) = send(
        &app,
        Method::POST,
        "/users/1/charges",
        Some(json!({"amount": 4.0, "description": "Metro Luz - Sé"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["balance"], 6.0);
    assert_eq!(body["history"][1]["amount"], -4.0);

    let (status, _) = send(
        &app,
        Method::POST,
        "/users/1/charges",
        Some(json!({"amount": 100.0})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn wallet_errors() {
    let app = app();
    send(
        &app,
        Method::POST,
        "/users",
        Some(json!({"name": "Ana", "email": "ana@example.com", "password": "secret1"})),
    )
    .await;

    let (status, _) = send(&app, Method::PUT, "/users/abc/balance", Some(json!({"amount": 5}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::PUT, "/users/1/balance", Some(json!({"amount": -5}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::PUT, "/users/1/balance", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::PUT, "/users/1/balance", Some(json!({"amount": "5"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::PUT, "/users/9/balance", Some(json!({"amount": 5}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn favorites() {
    let app = app();
    send(
        &app,
        Method::POST,
        "/users",
        Some(json!({"name": "Ana", "email": "ana@example.com", "password": "secret1"})),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/users/1/favorites",
        Some(json!({"stationId": "SE", "line": "Azul"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["favorites"][0]["name"], "Sé");

    let (status, _) = send(
        &app,
        Method::POST,
        "/users/1/favorites",
        Some(json!({"stationId": "SE", "line": "Azul"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        Method::POST,
        "/users/1/favorites",
        Some(json!({"stationId": "XX"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn contact_redirects_to_chat() {
    let app = app();
    let request = Request::builder().uri("/contact").body(Body::empty()).unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response.headers()[header::LOCATION].to_str().unwrap();
    assert!(location.starts_with("https://wa.me/5511900000000?text=Hello!"));
}

#[tokio::test]
async fn static_files_are_served() {
    let app = app();
    let (status, body) = send_raw(&app, Method::GET, "/index.html", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"<h1>Mapa</h1>");

    let (status, _) = send_raw(&app, Method::GET, "/missing.css", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
