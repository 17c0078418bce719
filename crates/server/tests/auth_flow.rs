//! Registration, login and note scenario driven through the router.

mod common;

use axum::http::{Method, StatusCode};
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn test_register_login_and_notes_scenario() {
    let app = TestApp::new().await;

    let (status, body) = app.register("alice", "pw1").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({ "message": "User created successfully", "login": "alice" })
    );

    let (status, _) = app.register("alice", "pw1").await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = app.login("alice", "pw1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    let token = body["token"].as_str().unwrap().to_string();
    let auth = format!("Bearer {}", token);

    let (status, body) = app.request(Method::GET, "/notes", Some(&auth), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, created) = app
        .request(
            Method::POST,
            "/notes",
            Some(&auth),
            Some(json!({ "name": "shopping" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created, json!({ "id": 1, "name": "shopping", "user_id": 1 }));

    let (status, body) = app.request(Method::GET, "/notes", Some(&auth), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{ "id": 1, "name": "shopping", "user_id": 1 }]));
}

#[tokio::test]
async fn test_register_never_echoes_password() {
    let app = TestApp::new().await;

    let (status, body) = app.register("dave", "hunter2").await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(!body.to_string().contains("hunter2"));
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_wrong_password_and_unknown_login_look_identical() {
    let app = TestApp::new().await;
    app.register("alice", "pw1").await;

    let wrong_password = app.login("alice", "nope").await;
    let unknown_login = app.login("mallory", "pw1").await;

    assert_eq!(wrong_password.0, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password, unknown_login);
    assert_eq!(
        wrong_password.1,
        json!({ "error": { "message": "Invalid credentials" } })
    );
}

#[tokio::test]
async fn test_login_succeeds_only_with_registered_password() {
    let app = TestApp::new().await;
    app.register("erin", "correct horse").await;

    assert_eq!(app.login("erin", "correct horse").await.0, StatusCode::OK);
    assert_eq!(
        app.login("erin", "correct horse ").await.0,
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(app.login("erin", "").await.0, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_password_sharing_a_long_prefix_does_not_log_in() {
    let app = TestApp::new().await;
    let prefix = "a".repeat(72);

    // Past the hashing limit the password is refused, not silently cut.
    let (status, _) = app
        .register("dave", &format!("{prefix}REAL-SUFFIX"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.register("dave", &prefix).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .login("dave", &format!("{prefix}totally-different"))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["message"], "Invalid credentials");

    let (status, _) = app.login("dave", &prefix).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_bad_bodies_are_rejected() {
    let app = TestApp::new().await;

    let (status, body) = app
        .request(Method::POST, "/register", None, Some(json!({ "login": "x" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Invalid request body");

    let (status, _) = app.register("", "pw").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.register("frank", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .request(Method::POST, "/login", None, Some(json!(["not", "an", "object"])))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let auth = app.bearer_for("grace", "pw").await;
    let (status, _) = app
        .request(Method::POST, "/notes", Some(&auth), Some(json!({ "title": "x" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new().await;
    let (status, body) = app.request(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("OK"));
}
