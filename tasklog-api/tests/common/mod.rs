/// Common test utilities for integration tests
///
/// Builds the full router over an in-memory store so the HTTP surface can be
/// exercised without a database.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tasklog_api::app::{build_router, AppState};
use tasklog_api::config::Config;
use tasklog_shared::store::MemoryStore;
use tower::Service as _;

/// Test context holding a router and the store behind it
pub struct TestContext {
    pub app: axum::Router,
    pub store: MemoryStore,
}

impl TestContext {
    /// Creates a context with an empty store
    pub fn new() -> Self {
        Self::with_store(MemoryStore::new())
    }

    /// Creates a context seeded with the sample users
    pub fn with_sample_users() -> Self {
        Self::with_store(MemoryStore::with_sample_users())
    }

    fn with_store(store: MemoryStore) -> Self {
        let vars: HashMap<&str, &str> = [("STORAGE_BACKEND", "memory")].into_iter().collect();
        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
            .expect("memory config should load");

        let state = AppState::new(Arc::new(store.clone()), config);
        let app = build_router(state);

        Self { app, store }
    }

    /// Sends a request with an optional JSON body and returns status plus parsed body
    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        self.call(request).await
    }

    /// Sends a raw body with a JSON content type
    pub async fn send_raw(&self, method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        self.call(request).await
    }

    async fn call(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                panic!(
                    "Expected JSON body, got {}: {}",
                    status,
                    String::from_utf8_lossy(&bytes)
                )
            })
        };

        (status, body)
    }
}
