/// User management endpoints
///
/// # Endpoints
///
/// - `POST /users` - Create user
/// - `GET /users/{email}` - Fetch user
/// - `PUT /users/{email}` - Replace user
/// - `DELETE /users/{email}` - Delete user
///
/// Store outcomes map to status codes: created → 201, found → 200,
/// deleted → 204, not found → 404, email taken → 409.

use crate::{
    app::AppState,
    error::ApiResult,
    routes::{HttpMethod, ResponseSpec, RouteSpec},
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{delete, get, post, put, MethodRouter},
    Json,
};
use tracing::{debug, warn};
use userbook_shared::{models::User, store::StoreError};
use validator::Validate;

const TAG: &str = "users";

/// Route table for user management
pub const ROUTES: &[RouteSpec] = &[
    RouteSpec {
        method: HttpMethod::Post,
        path: "/users",
        operation_id: "createUser",
        summary: "create new User",
        tag: TAG,
        accepts_user: true,
        responses: &[
            ResponseSpec {
                status: 201,
                description: "User created properly",
                returns_user: true,
            },
            ResponseSpec {
                status: 400,
                description: "Fields are with validation errors",
                returns_user: false,
            },
            ResponseSpec {
                status: 409,
                description: "A user with this email already exists",
                returns_user: false,
            },
        ],
        handler: create_route,
    },
    RouteSpec {
        method: HttpMethod::Get,
        path: "/users/{email}",
        operation_id: "getUser",
        summary: "Fetches User",
        tag: TAG,
        accepts_user: false,
        responses: &[
            ResponseSpec {
                status: 200,
                description: "User found",
                returns_user: true,
            },
            ResponseSpec {
                status: 404,
                description: "User not found",
                returns_user: false,
            },
        ],
        handler: get_route,
    },
    RouteSpec {
        method: HttpMethod::Put,
        path: "/users/{email}",
        operation_id: "updateUser",
        summary: "Updates User",
        tag: TAG,
        accepts_user: true,
        responses: &[
            ResponseSpec {
                status: 200,
                description: "User replaced",
                returns_user: true,
            },
            ResponseSpec {
                status: 400,
                description: "Malformed request body",
                returns_user: false,
            },
            ResponseSpec {
                status: 404,
                description: "User not found",
                returns_user: false,
            },
        ],
        handler: update_route,
    },
    RouteSpec {
        method: HttpMethod::Delete,
        path: "/users/{email}",
        operation_id: "deleteUser",
        summary: "Delete User",
        tag: TAG,
        accepts_user: false,
        responses: &[
            ResponseSpec {
                status: 204,
                description: "User deleted",
                returns_user: false,
            },
            ResponseSpec {
                status: 404,
                description: "User not found",
                returns_user: false,
            },
        ],
        handler: delete_route,
    },
];

fn create_route() -> MethodRouter<AppState> {
    post(create_user)
}

fn get_route() -> MethodRouter<AppState> {
    get(get_user)
}

fn update_route() -> MethodRouter<AppState> {
    put(update_user)
}

fn delete_route() -> MethodRouter<AppState> {
    delete(delete_user)
}

fn warn_if_missing(email: &str) -> impl Fn(&StoreError) + '_ {
    move |err| {
        if matches!(err, StoreError::NotFound { .. }) {
            warn!(email = %email, "User not found");
        }
    }
}

/// Create user
///
/// ```text
/// POST /users
/// Content-Type: application/json
///
/// { "email": "a@x.com", "name": "A" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Malformed JSON, missing email, or invalid fields
/// - `409 Conflict`: Email already exists (stored user is left unchanged)
pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<User>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let Json(user) = body?;
    debug!(email = %user.email, "Create user");

    user.validate()?;

    let created = state.store.insert(user)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Fetch user by email
///
/// # Errors
///
/// - `404 Not Found`: No user with this email
pub async fn get_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> ApiResult<Json<User>> {
    debug!(email = %email, "Get user by email");

    let user = state
        .store
        .get(&email)
        .inspect_err(warn_if_missing(&email))?;

    Ok(Json(user))
}

/// Replace user
///
/// The body replaces the stored user in full. The record stays keyed by the
/// path email even if the body carries a different one.
///
/// # Errors
///
/// - `400 Bad Request`: Malformed JSON or missing email
/// - `404 Not Found`: No user with this email (nothing is created)
pub async fn update_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
    body: Result<Json<User>, JsonRejection>,
) -> ApiResult<Json<User>> {
    let Json(user) = body?;
    debug!(email = %email, "Update user with email");

    if !user.is_keyed_by(&email) {
        warn!(
            email = %email,
            body_email = %user.email,
            "Body email differs from path email; record stays keyed by path"
        );
    }

    let updated = state
        .store
        .replace(&email, user)
        .inspect_err(warn_if_missing(&email))?;

    Ok(Json(updated))
}

/// Delete user
///
/// # Errors
///
/// - `404 Not Found`: No user with this email
pub async fn delete_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> ApiResult<StatusCode> {
    debug!(email = %email, "Delete user with email");

    state
        .store
        .remove(&email)
        .inspect_err(warn_if_missing(&email))?;

    Ok(StatusCode::NO_CONTENT)
}
