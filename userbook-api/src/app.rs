/// Application state and router builder
///
/// This module defines the shared application state and builds the Axum
/// router from the route tables in [`crate::routes`].
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use userbook_api::{app::{build_router, AppState}, config::Config};
/// use userbook_shared::store::InMemoryUserStore;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let store = Arc::new(InMemoryUserStore::with_shards(config.store.shards));
/// let app = build_router(AppState::new(store, config));
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, middleware::security::SecurityHeadersLayer, routes};
use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use userbook_shared::store::UserStore;

/// Path the OpenAPI document is served from
pub const DOCS_PATH: &str = "/api-docs";

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// User store, injected so tests and alternative backends can swap it
    pub store: Arc<dyn UserStore>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// ```text
/// /
/// ├── GET    /health
/// ├── GET    /api-docs          # only when docs are enabled
/// └── /users
///     ├── POST   /
///     ├── GET    /:email
///     ├── PUT    /:email
///     └── DELETE /:email
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Security headers
pub fn build_router(state: AppState) -> Router {
    let mut router = routes::register(Router::new(), routes::all());

    if state.config.docs.enabled {
        router = router.route(DOCS_PATH, get(routes::docs::openapi));
    }

    router
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_layer(&state.config))
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.allows_any_origin() {
        // Development mode: permissive CORS
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .api
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::Service as _;
    use userbook_shared::store::InMemoryUserStore;

    fn state(config: Config) -> AppState {
        AppState::new(Arc::new(InMemoryUserStore::new()), config)
    }

    async fn status_of(app: &mut Router, uri: &str) -> StatusCode {
        app.call(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_docs_mounted_when_enabled() {
        let mut app = build_router(state(Config::default()));
        assert_eq!(status_of(&mut app, DOCS_PATH).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_docs_absent_when_disabled() {
        let mut config = Config::default();
        config.docs.enabled = false;

        let mut app = build_router(state(config));
        assert_eq!(status_of(&mut app, DOCS_PATH).await, StatusCode::NOT_FOUND);
        assert_eq!(status_of(&mut app, "/health").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_restricted_cors_builds() {
        let mut config = Config::default();
        config.api.cors_origins = vec!["https://app.example".to_string()];

        let mut app = build_router(state(config));
        assert_eq!(status_of(&mut app, "/health").await, StatusCode::OK);
    }
}
