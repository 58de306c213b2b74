/// OpenAPI document endpoint
///
/// Builds an OpenAPI 3.0 description of the API from the route tables. Only
/// routes under the configured include prefix are described, and each
/// operation lists exactly the responses its `RouteSpec` declares.
///
/// # Endpoint
///
/// ```text
/// GET /api-docs
/// ```

use crate::{
    app::AppState,
    config::DocsConfig,
    routes::{self, RouteSpec},
};
use axum::{extract::State, Json};
use serde_json::{json, Map, Value};

const OPENAPI_VERSION: &str = "3.0.3";

/// Serves the OpenAPI document
pub async fn openapi(State(state): State<AppState>) -> Json<Value> {
    Json(build_document(&state.config.docs, routes::all()))
}

/// Builds the OpenAPI document for `routes`
pub fn build_document<'a>(
    docs: &DocsConfig,
    routes: impl IntoIterator<Item = &'a RouteSpec>,
) -> Value {
    let mut paths = Map::new();
    let mut tags: Vec<&str> = Vec::new();

    for route in routes
        .into_iter()
        .filter(|r| r.path.starts_with(&docs.include_prefix))
    {
        if !tags.contains(&route.tag) {
            tags.push(route.tag);
        }

        let item = paths
            .entry(route.path.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(item) = item {
            item.insert(route.method.as_str().to_string(), operation(route));
        }
    }

    let tags: Vec<Value> = tags.iter().map(|name| json!({ "name": name })).collect();

    json!({
        "openapi": OPENAPI_VERSION,
        "info": info(docs),
        "tags": tags,
        "paths": paths,
        "components": {
            "schemas": {
                "User": user_schema(),
            }
        }
    })
}

fn info(docs: &DocsConfig) -> Value {
    let mut info = json!({
        "title": docs.title,
        "description": docs.description,
        "termsOfService": docs.terms_of_service,
        "version": env!("CARGO_PKG_VERSION"),
        "license": { "name": docs.license_name },
    });

    if let Some(url) = &docs.license_url {
        info["license"]["url"] = json!(url);
    }
    if let Some(email) = &docs.contact_email {
        info["contact"] = json!({ "email": email });
    }

    info
}

fn operation(route: &RouteSpec) -> Value {
    let mut responses = Map::new();
    for response in route.responses {
        let mut entry = json!({ "description": response.description });
        if response.returns_user {
            entry["content"] = user_content();
        }
        responses.insert(response.status.to_string(), entry);
    }

    let mut op = json!({
        "operationId": route.operation_id,
        "summary": route.summary,
        "tags": [route.tag],
        "responses": responses,
    });

    let params = route.path_params();
    if !params.is_empty() {
        op["parameters"] = params
            .into_iter()
            .map(|name| {
                json!({
                    "name": name,
                    "in": "path",
                    "required": true,
                    "schema": { "type": "string" },
                })
            })
            .collect();
    }

    if route.accepts_user {
        op["requestBody"] = json!({
            "required": true,
            "content": user_content(),
        });
    }

    op
}

fn user_content() -> Value {
    json!({
        "application/json": {
            "schema": { "$ref": "#/components/schemas/User" }
        }
    })
}

fn user_schema() -> Value {
    json!({
        "type": "object",
        "required": ["email"],
        "properties": {
            "email": { "type": "string", "format": "email" },
            "name": { "type": "string" },
        },
        "additionalProperties": true,
    })
}
