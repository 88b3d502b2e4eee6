//! Shared utilities for integration tests.
//!
//! Runs an in-memory stand-in for the hosted store that speaks the same
//! PostgREST dialect as the real one, plus the service wired against it.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use product_service::config::ServiceConfig;
use product_service::http::HttpServer;
use product_service::lifecycle::Shutdown;

pub const TEST_KEY: &str = "test-service-key";
pub const TABLE: &str = "products";

type StoreReply = Result<Json<Value>, (StatusCode, Json<Value>)>;

#[derive(Default)]
struct StoreState {
    rows: Vec<Value>,
    next_id: i64,
    failing: bool,
}

/// In-memory table store.
#[derive(Clone, Default)]
pub struct MockStore {
    state: Arc<Mutex<StoreState>>,
}

impl MockStore {
    /// Replace the table contents; ids continue after the highest seeded id.
    pub fn seed(&self, rows: Vec<Value>) {
        let mut state = self.state.lock().unwrap();
        state.next_id = rows.iter().filter_map(|r| r["id"].as_i64()).max().unwrap_or(0);
        state.rows = rows;
    }

    pub fn rows(&self) -> Vec<Value> {
        self.state.lock().unwrap().rows.clone()
    }

    /// Make every subsequent call fail with 503.
    pub fn set_failing(&self, failing: bool) {
        self.state.lock().unwrap().failing = failing;
    }
}

/// Serve `store` on an ephemeral port.
pub async fn start_mock_store(store: MockStore) -> SocketAddr {
    let app = Router::new()
        .route(
            "/rest/v1/{table}",
            get(select_rows)
                .post(insert_row)
                .patch(update_rows)
                .delete(delete_rows),
        )
        .with_state(store);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn store_error(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "message": message })))
}

fn check_request(store: &MockStore, headers: &HeaderMap, table: &str) -> Result<(), (StatusCode, Json<Value>)> {
    let apikey = headers.get("apikey").and_then(|v| v.to_str().ok());
    let bearer = headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok());
    let expected_bearer = format!("Bearer {}", TEST_KEY);
    if apikey != Some(TEST_KEY) || bearer != Some(expected_bearer.as_str()) {
        return Err(store_error(StatusCode::UNAUTHORIZED, "Invalid API key"));
    }
    if table != TABLE {
        return Err(store_error(StatusCode::NOT_FOUND, "relation does not exist"));
    }
    if store.state.lock().unwrap().failing {
        return Err(store_error(StatusCode::SERVICE_UNAVAILABLE, "store unavailable"));
    }
    Ok(())
}

fn id_filter(query: &HashMap<String, String>) -> Result<i64, (StatusCode, Json<Value>)> {
    query
        .get("id")
        .and_then(|v| v.strip_prefix("eq."))
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| store_error(StatusCode::BAD_REQUEST, "missing id filter"))
}

async fn select_rows(
    State(store): State<MockStore>,
    Path(table): Path<String>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> StoreReply {
    check_request(&store, &headers, &table)?;
    if query.get("select").map(String::as_str) != Some("*") {
        return Err(store_error(StatusCode::BAD_REQUEST, "expected select=*"));
    }
    Ok(Json(Value::Array(store.rows())))
}

async fn insert_row(
    State(store): State<MockStore>,
    Path(table): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> StoreReply {
    check_request(&store, &headers, &table)?;
    let mut row = body;
    let mut state = store.state.lock().unwrap();
    state.next_id += 1;
    row["id"] = json!(state.next_id);
    state.rows.push(row.clone());
    Ok(Json(json!([row])))
}

async fn update_rows(
    State(store): State<MockStore>,
    Path(table): Path<String>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> StoreReply {
    check_request(&store, &headers, &table)?;
    let id = id_filter(&query)?;
    let fields = body.as_object().cloned().unwrap_or_default();

    let mut state = store.state.lock().unwrap();
    let mut updated = Vec::new();
    for row in state.rows.iter_mut().filter(|r| r["id"].as_i64() == Some(id)) {
        for (key, value) in &fields {
            row[key.as_str()] = value.clone();
        }
        updated.push(row.clone());
    }
    Ok(Json(Value::Array(updated)))
}

async fn delete_rows(
    State(store): State<MockStore>,
    Path(table): Path<String>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> StoreReply {
    check_request(&store, &headers, &table)?;
    let id = id_filter(&query)?;

    let mut state = store.state.lock().unwrap();
    let (removed, kept): (Vec<Value>, Vec<Value>) = state
        .rows
        .drain(..)
        .partition(|r| r["id"].as_i64() == Some(id));
    state.rows = kept;
    Ok(Json(Value::Array(removed)))
}

/// A running service backed by a [`MockStore`].
pub struct TestApp {
    pub addr: SocketAddr,
    pub store: MockStore,
    pub client: reqwest::Client,
    // Dropping the sender would stop the server.
    _shutdown: Shutdown,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start a mock store and the service pointed at it.
pub async fn spawn_app() -> TestApp {
    spawn_app_with_key(TEST_KEY).await
}

/// Like [`spawn_app`] but the service presents `key` to the store.
pub async fn spawn_app_with_key(key: &str) -> TestApp {
    let store = MockStore::default();
    let store_addr = start_mock_store(store.clone()).await;

    let mut config = ServiceConfig::default();
    config.store.url = format!("http://{}", store_addr);
    config.store.key = key.to_string();

    let server = HttpServer::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    let client = reqwest::Client::builder().no_proxy().build().unwrap();

    TestApp {
        addr,
        store,
        client,
        _shutdown: shutdown,
    }
}

/// A stored row as the store would hold it.
pub fn product_row(id: i64, name: &str, description: &str, price: f64) -> Value {
    json!({ "id": id, "name": name, "description": description, "price": price })
}
