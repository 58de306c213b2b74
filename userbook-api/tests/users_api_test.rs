/// Integration tests for the user endpoints
///
/// These drive the complete router, middleware included, and check the
/// status code each store outcome maps to.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::TestContext;
use serde_json::json;
use tower::Service as _;
use userbook_shared::store::UserStore;

/// Walks one user through its whole lifecycle
#[tokio::test]
async fn test_user_lifecycle() {
    let ctx = TestContext::new();

    let created = ctx
        .send("POST", "/users", Some(json!({ "email": "a@x.com", "name": "A" })))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body, Some(json!({ "email": "a@x.com", "name": "A" })));

    let duplicate = ctx
        .send("POST", "/users", Some(json!({ "email": "a@x.com", "name": "A" })))
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
    assert_eq!(duplicate.body, None);

    let fetched = ctx.send("GET", "/users/a@x.com", None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body, Some(json!({ "email": "a@x.com", "name": "A" })));

    let updated = ctx
        .send(
            "PUT",
            "/users/a@x.com",
            Some(json!({ "email": "a@x.com", "name": "B" })),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body.unwrap()["name"], "B");

    let deleted = ctx.send("DELETE", "/users/a@x.com", None).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    assert_eq!(deleted.body, None);

    let gone = ctx.send("GET", "/users/a@x.com", None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert_eq!(gone.body, None);
}

#[tokio::test]
async fn test_conflict_leaves_original_unchanged() {
    let ctx = TestContext::new();

    ctx.send("POST", "/users", Some(json!({ "email": "a@x.com", "name": "First" })))
        .await;
    let second = ctx
        .send("POST", "/users", Some(json!({ "email": "a@x.com", "name": "Second" })))
        .await;
    assert_eq!(second.status, StatusCode::CONFLICT);

    let fetched = ctx.send("GET", "/users/a@x.com", None).await;
    assert_eq!(fetched.body.unwrap()["name"], "First");
}

#[tokio::test]
async fn test_get_unknown_email() {
    let ctx = TestContext::new();
    let response = ctx.send("GET", "/users/nobody@x.com", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_twice() {
    let ctx = TestContext::new();
    ctx.send("POST", "/users", Some(json!({ "email": "a@x.com" })))
        .await;

    let first = ctx.send("DELETE", "/users/a@x.com", None).await;
    assert_eq!(first.status, StatusCode::NO_CONTENT);

    let second = ctx.send("DELETE", "/users/a@x.com", None).await;
    assert_eq!(second.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_unknown_email_creates_nothing() {
    let ctx = TestContext::new();

    let response = ctx
        .send(
            "PUT",
            "/users/ghost@x.com",
            Some(json!({ "email": "ghost@x.com", "name": "G" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(ctx.store.is_empty().unwrap());
}

#[tokio::test]
async fn test_update_replaces_whole_record() {
    let ctx = TestContext::new();
    ctx.send(
        "POST",
        "/users",
        Some(json!({ "email": "a@x.com", "name": "A", "team": "platform" })),
    )
    .await;

    let response = ctx
        .send("PUT", "/users/a@x.com", Some(json!({ "email": "a@x.com" })))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // Full replace: name and team are gone
    let fetched = ctx.send("GET", "/users/a@x.com", None).await;
    assert_eq!(fetched.body, Some(json!({ "email": "a@x.com" })));
}

#[tokio::test]
async fn test_extra_profile_fields_round_trip() {
    let ctx = TestContext::new();
    let user = json!({ "email": "a@x.com", "name": "A", "team": "platform", "age": 41 });

    let created = ctx.send("POST", "/users", Some(user.clone())).await;
    assert_eq!(created.body, Some(user.clone()));

    let fetched = ctx.send("GET", "/users/a@x.com", None).await;
    assert_eq!(fetched.body, Some(user));
}

#[tokio::test]
async fn test_create_validation_failures() {
    let ctx = TestContext::new();

    let missing_email = ctx.send("POST", "/users", Some(json!({ "name": "A" }))).await;
    assert_eq!(missing_email.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing_email.body.unwrap()["error"], "bad_request");

    let bad_email = ctx
        .send("POST", "/users", Some(json!({ "email": "nope", "name": "A" })))
        .await;
    assert_eq!(bad_email.status, StatusCode::BAD_REQUEST);
    let body = bad_email.body.unwrap();
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["details"][0]["field"], "email");

    let wrong_type = ctx.send("POST", "/users", Some(json!({ "email": 42 }))).await;
    assert_eq!(wrong_type.status, StatusCode::BAD_REQUEST);

    assert!(ctx.store.is_empty().unwrap());
}

#[tokio::test]
async fn test_create_accepts_any_name() {
    let ctx = TestContext::new();

    let empty = ctx
        .send("POST", "/users", Some(json!({ "email": "a@x.com", "name": "" })))
        .await;
    assert_eq!(empty.status, StatusCode::CREATED);
    assert_eq!(empty.body.unwrap()["name"], "");

    let long = "n".repeat(300);
    let long_name = ctx
        .send("POST", "/users", Some(json!({ "email": "b@x.com", "name": long })))
        .await;
    assert_eq!(long_name.status, StatusCode::CREATED);

    assert_eq!(ctx.store.len().unwrap(), 2);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let ctx = TestContext::new();

    let request = Request::builder()
        .method("POST")
        .uri("/users")
        .header("content-type", "application/json")
        .body(Body::from("{\"email\": "))
        .unwrap();
    let response = ctx.send_request(request).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    ctx.send("POST", "/users", Some(json!({ "email": "a@x.com" })))
        .await;
    let request = Request::builder()
        .method("PUT")
        .uri("/users/a@x.com")
        .header("content-type", "application/json")
        .body(Body::from("not json"))
        .unwrap();
    let response = ctx.send_request(request).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_content_type_is_bad_request() {
    let ctx = TestContext::new();

    let request = Request::builder()
        .method("POST")
        .uri("/users")
        .body(Body::from(json!({ "email": "a@x.com" }).to_string()))
        .unwrap();
    let response = ctx.send_request(request).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_email_with_dots_and_plus_in_path() {
    let ctx = TestContext::new();
    ctx.send(
        "POST",
        "/users",
        Some(json!({ "email": "first.last+tag@mail.example.com" })),
    )
    .await;

    let fetched = ctx
        .send("GET", "/users/first.last+tag@mail.example.com", None)
        .await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(
        fetched.body.unwrap()["email"],
        "first.last+tag@mail.example.com"
    );
}

#[tokio::test]
async fn test_unsupported_method() {
    let ctx = TestContext::new();
    let response = ctx.send("PATCH", "/users/a@x.com", None).await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_single_winner() {
    let ctx = std::sync::Arc::new(TestContext::new());

    let tasks: Vec<_> = (0..16)
        .map(|i| {
            let ctx = ctx.clone();
            tokio::spawn(async move {
                ctx.send(
                    "POST",
                    "/users",
                    Some(json!({ "email": "race@x.com", "name": format!("writer-{}", i) })),
                )
                .await
                .status
            })
        })
        .collect();

    let mut created = 0;
    let mut conflicts = 0;
    for task in tasks {
        match task.await.unwrap() {
            StatusCode::CREATED => created += 1,
            StatusCode::CONFLICT => conflicts += 1,
            other => panic!("unexpected status {}", other),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(conflicts, 15);
}

#[tokio::test]
async fn test_security_headers_on_user_routes() {
    let ctx = TestContext::new();
    let request = Request::builder()
        .uri("/users/nobody@x.com")
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    let headers = response.headers();
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get("cache-control").unwrap(), "no-store");
}
