//! Common test utilities for client integration tests.
//!
//! Spawns an in-process stub backend on a random local port. The stub speaks
//! the `{ "data": ... }` envelope and records every request it receives.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use client::{ApiClient, HttpConfig, MemoryTokenStore, TokenStore};
use serde_json::{json, Value};

/// One request seen by the stub.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Debug, Default)]
pub struct Recorder {
    requests: Mutex<Vec<RecordedRequest>>,
}

impl Recorder {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> RecordedRequest {
        self.requests().last().cloned().expect("no request recorded")
    }

    fn record(&self, method: Method, uri: &Uri, headers: &HeaderMap, body: Option<Value>) {
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            path: uri.path().to_string(),
            query: uri.query().map(str::to_string),
            authorization: headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            body,
        });
    }
}

type Shared = Arc<Recorder>;

fn customer_groups() -> Value {
    json!([
        {
            "id": 4,
            "group_name": "VIP Customers",
            "customer_ids": [1, 2, 3],
            "created_at": "2024-01-10T09:00:00Z",
            "updated_at": "2024-02-01T12:30:00Z"
        },
        {
            "id": 5,
            "group_name": "Regional",
            "customer_ids": [],
            "created_at": null,
            "updated_at": null
        }
    ])
}

async fn list_customer_groups(
    State(recorder): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Json<Value> {
    recorder.record(method, &uri, &headers, None);
    Json(json!({ "data": customer_groups() }))
}

async fn search_customer_groups(
    State(recorder): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    recorder.record(method, &uri, &headers, None);
    let needle = params.get("query").cloned().unwrap_or_default().to_lowercase();
    let matches: Vec<Value> = customer_groups()
        .as_array()
        .cloned()
        .unwrap_or_default()
        .into_iter()
        .filter(|g| {
            g["group_name"]
                .as_str()
                .map(|n| n.to_lowercase().contains(&needle))
                .unwrap_or(false)
        })
        .collect();
    Json(json!({ "data": matches }))
}

async fn create_customer_group(
    State(recorder): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    recorder.record(method, &uri, &headers, Some(body.clone()));
    let mut created = body;
    created["id"] = json!(99);
    created["created_at"] = json!("2024-03-01T08:00:00Z");
    (StatusCode::CREATED, Json(json!({ "data": created })))
}

async fn update_customer_group(
    State(recorder): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Json<Value> {
    recorder.record(method, &uri, &headers, Some(body.clone()));
    let mut updated = body;
    updated["id"] = json!(id);
    Json(json!({ "data": updated }))
}

async fn delete_customer_group(
    State(recorder): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> StatusCode {
    recorder.record(method, &uri, &headers, None);
    StatusCode::NO_CONTENT
}

async fn create_user(
    State(recorder): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    recorder.record(method, &uri, &headers, Some(body));
    (
        StatusCode::CONFLICT,
        Json(json!({
            "message": "duplicate key value violates unique constraint \"users_username_key\""
        })),
    )
        .into_response()
}

async fn list_alarms(
    State(recorder): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let authorized = headers.contains_key("authorization");
    recorder.record(method, &uri, &headers, None);
    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Unauthorized" })),
        )
            .into_response();
    }
    Json(json!({
        "data": [{
            "id": 1,
            "type": "overspeed",
            "severity": "high",
            "threshold": 90.0,
            "status": true,
            "vehicle_group_ids": [2]
        }]
    }))
    .into_response()
}

async fn list_vehicle_groups(
    State(recorder): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    recorder.record(method, &uri, &headers, None);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "database unavailable" })),
    )
        .into_response()
}

async fn list_customers(
    State(recorder): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Json<Value> {
    recorder.record(method, &uri, &headers, None);
    Json(json!({ "data": [{ "id": 1, "name": "Acme" }, { "id": 2, "name": "Globex" }] }))
}

async fn list_vehicles(
    State(recorder): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Json<Value> {
    recorder.record(method, &uri, &headers, None);
    Json(json!({ "data": [{ "id": 7, "name": "Truck 7", "plate_number": "XY-77" }] }))
}

async fn list_garbage(
    State(recorder): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> &'static str {
    recorder.record(method, &uri, &headers, None);
    "not json"
}

fn stub_router(recorder: Shared) -> Router {
    Router::new()
        .route(
            "/customer-group",
            get(list_customer_groups).post(create_customer_group),
        )
        .route("/customer-group/search", get(search_customer_groups))
        .route(
            "/customer-group/:id",
            put(update_customer_group).delete(delete_customer_group),
        )
        .route("/user", axum::routing::post(create_user))
        .route("/alarm", get(list_alarms))
        .route("/groups", get(list_vehicle_groups))
        .route("/customer", get(list_customers))
        .route("/vehicle", get(list_vehicles))
        .route("/geofence-group", get(list_garbage))
        .with_state(recorder)
}

/// A running stub backend.
pub struct StubBackend {
    pub base_url: String,
    pub recorder: Shared,
}

impl StubBackend {
    pub async fn spawn() -> Self {
        let recorder: Shared = Arc::new(Recorder::default());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub backend");
        let addr = listener.local_addr().expect("stub backend address");
        let app = stub_router(recorder.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub backend crashed");
        });
        Self {
            base_url: format!("http://{}", addr),
            recorder,
        }
    }

    /// Client bound to this backend using `tokens`.
    pub fn client(&self, tokens: Arc<dyn TokenStore>) -> ApiClient {
        ApiClient::new(
            &HttpConfig {
                base_url: self.base_url.clone(),
                request_timeout_secs: 5,
            },
            tokens,
        )
        .expect("Failed to build client")
    }

    /// Client carrying a fixed test token.
    pub fn authed_client(&self) -> ApiClient {
        self.client(Arc::new(MemoryTokenStore::with_token("test-token")))
    }
}
