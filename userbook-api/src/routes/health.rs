/// Health check endpoint
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "users": 3
/// }
/// ```

use crate::{
    app::AppState,
    routes::{HttpMethod, ResponseSpec, RouteSpec},
};
use axum::{
    extract::State,
    routing::{get, MethodRouter},
    Json,
};
use serde::{Deserialize, Serialize};

/// Route table for the health check
pub const ROUTES: &[RouteSpec] = &[RouteSpec {
    method: HttpMethod::Get,
    path: "/health",
    operation_id: "healthCheck",
    summary: "Service health",
    tag: "health",
    accepts_user: false,
    responses: &[ResponseSpec {
        status: 200,
        description: "Service status",
        returns_user: false,
    }],
    handler: health_route,
}];

fn health_route() -> MethodRouter<AppState> {
    get(health_check)
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `healthy`, or `degraded` if the store is failing
    pub status: String,

    /// Application version
    pub version: String,

    /// Number of stored users, absent when the store is failing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<usize>,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let users = match state.store.len() {
        Ok(count) => Some(count),
        Err(err) => {
            tracing::error!("Store health check failed: {}", err);
            None
        }
    };

    Json(HealthResponse {
        status: if users.is_some() { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        users,
    })
}
