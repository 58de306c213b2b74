/// API route handlers
///
/// Every route is declared once in a `RouteSpec` table next to its handler.
/// The table drives both router registration and the generated API
/// documentation, so the two cannot drift apart.
///
/// - `health`: Health check endpoint
/// - `users`: User CRUD endpoints
/// - `docs`: OpenAPI document endpoint

pub mod docs;
pub mod health;
pub mod users;

use crate::app::AppState;
use axum::{routing::MethodRouter, Router};

/// HTTP method of a documented route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// Lowercase name, as used for OpenAPI operation keys
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
        }
    }

    pub fn to_method(self) -> axum::http::Method {
        match self {
            HttpMethod::Get => axum::http::Method::GET,
            HttpMethod::Post => axum::http::Method::POST,
            HttpMethod::Put => axum::http::Method::PUT,
            HttpMethod::Delete => axum::http::Method::DELETE,
        }
    }
}

/// One documented response of a route
#[derive(Debug, Clone, Copy)]
pub struct ResponseSpec {
    pub status: u16,
    pub description: &'static str,

    /// Whether the response carries a `User` body
    pub returns_user: bool,
}

/// A route: where it lives, what serves it, and how it is documented
#[derive(Debug, Clone, Copy)]
pub struct RouteSpec {
    pub method: HttpMethod,

    /// Path template in `{param}` form, e.g. `/users/{email}`
    pub path: &'static str,

    pub operation_id: &'static str,
    pub summary: &'static str,
    pub tag: &'static str,

    /// Whether the route takes a `User` JSON body
    pub accepts_user: bool,

    pub responses: &'static [ResponseSpec],

    /// Builds the method router serving this route
    pub handler: fn() -> MethodRouter<AppState>,
}

impl RouteSpec {
    /// Path in axum's `:param` syntax
    pub fn router_path(&self) -> String {
        self.path
            .split('/')
            .map(|segment| match path_param(segment) {
                Some(name) => format!(":{}", name),
                None => segment.to_string(),
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Names of the path parameters, in order
    pub fn path_params(&self) -> Vec<&'static str> {
        self.path.split('/').filter_map(path_param).collect()
    }
}

fn path_param(segment: &str) -> Option<&str> {
    segment.strip_prefix('{')?.strip_suffix('}')
}

/// Every route the API serves, except the documentation endpoint itself
pub fn all() -> impl Iterator<Item = &'static RouteSpec> {
    health::ROUTES.iter().chain(users::ROUTES.iter())
}

/// Registers a table of routes on a router
///
/// Routes sharing a path are merged into one method router.
pub fn register<'a>(
    router: Router<AppState>,
    routes: impl IntoIterator<Item = &'a RouteSpec>,
) -> Router<AppState> {
    routes.into_iter().fold(router, |router, route| {
        router.route(&route.router_path(), (route.handler)())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_path_conversion() {
        let route = users::ROUTES
            .iter()
            .find(|r| r.operation_id == "getUser")
            .unwrap();
        assert_eq!(route.path, "/users/{email}");
        assert_eq!(route.router_path(), "/users/:email");
        assert_eq!(route.path_params(), vec!["email"]);
    }

    #[test]
    fn test_paths_without_params_unchanged() {
        let route = users::ROUTES
            .iter()
            .find(|r| r.operation_id == "createUser")
            .unwrap();
        assert_eq!(route.router_path(), "/users");
        assert!(route.path_params().is_empty());
    }

    #[test]
    fn test_operation_ids_unique() {
        let mut ids: Vec<&str> = all().map(|r| r.operation_id).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn test_method_names() {
        assert_eq!(HttpMethod::Put.as_str(), "put");
        assert_eq!(HttpMethod::Delete.to_method(), axum::http::Method::DELETE);
    }
}
