/// Common test utilities for integration tests
///
/// Builds the full router (middleware included) over a fresh in-memory store
/// and offers small helpers for sending JSON requests to it.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use tower::Service as _;
use userbook_api::app::{build_router, AppState};
use userbook_api::config::Config;
use userbook_shared::store::InMemoryUserStore;

/// Test context containing the app and direct access to its store
pub struct TestContext {
    pub app: axum::Router,
    pub store: Arc<InMemoryUserStore>,
}

/// Status and parsed body of a response; `body` is `None` when empty
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Option<Value>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let store = Arc::new(InMemoryUserStore::with_shards(config.store.shards));
        let app = build_router(AppState::new(store.clone(), config));
        TestContext { app, store }
    }

    /// Sends a request with an optional JSON body
    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        self.send_request(builder.body(body).unwrap()).await
    }

    /// Sends a prepared request
    pub async fn send_request(&self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            None
        } else {
            Some(serde_json::from_slice(&bytes).unwrap())
        };

        TestResponse { status, body }
    }
}
