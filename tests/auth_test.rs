//! Integration tests for registration, login, and lockout.

mod helpers;

use chrono::Duration;
use http::StatusCode;

use helpers::TestApp;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/auth/register",
            Some(serde_json::json!({
                "username": "omkar",
                "email": "omkar@example.com",
                "password": "Password123!",
                "firstName": "Omkar",
                "lastName": "B",
                "mobile": "1234567890",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(
        response.body.get("message").unwrap().as_str().unwrap(),
        "User registered successfully"
    );
}

#[tokio::test]
async fn test_register_missing_fields() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/auth/register",
            Some(serde_json::json!({
                "username": "omkar",
                "password": "Password123!",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body.get("error").unwrap().as_str().unwrap(),
        "VALIDATION_ERROR"
    );
}

#[tokio::test]
async fn test_register_weak_password() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/auth/register",
            Some(serde_json::json!({
                "username": "omkar",
                "email": "omkar@example.com",
                "password": "password",
                "firstName": "Omkar",
                "lastName": "B",
                "mobile": "1234567890",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::new();
    app.register("omkar", "omkar@example.com").await;

    let response = app
        .request(
            "POST",
            "/auth/register",
            Some(serde_json::json!({
                "username": "omkar",
                "email": "other@example.com",
                "password": "Password123!",
                "firstName": "Omkar",
                "lastName": "B",
                "mobile": "1234567890",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(
        response.body.get("error").unwrap().as_str().unwrap(),
        "CONFLICT"
    );
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new();
    app.register("omkar", "omkar@example.com").await;

    let response = app
        .request(
            "POST",
            "/auth/login",
            Some(serde_json::json!({
                "username": "omkar",
                "password": "Password123!",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body.get("message").unwrap().as_str().unwrap(),
        "Login successful"
    );
    assert!(response.body.get("token").unwrap().as_str().is_some());
}

#[tokio::test]
async fn test_login_invalid_password() {
    let app = TestApp::new();
    app.register("omkar", "omkar@example.com").await;

    let response = app
        .request(
            "POST",
            "/auth/login",
            Some(serde_json::json!({
                "username": "omkar",
                "password": "WrongPass1!",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_nonexistent_user() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/auth/login",
            Some(serde_json::json!({
                "username": "nobody",
                "password": "Password123!",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_lockout_after_five_failures() {
    let app = TestApp::new();
    app.register("omkar", "omkar@example.com").await;

    let wrong = serde_json::json!({
        "username": "omkar",
        "password": "WrongPass1!",
    });

    for _ in 0..4 {
        let response = app
            .request("POST", "/auth/login", Some(wrong.clone()), None)
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }

    // The fifth failure opens the lockout and is answered as locked.
    let response = app
        .request("POST", "/auth/login", Some(wrong), None)
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    // The correct password does not get through while locked.
    let response = app
        .request(
            "POST",
            "/auth/login",
            Some(serde_json::json!({
                "username": "omkar",
                "password": "Password123!",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_lockout_expires() {
    let app = TestApp::new();
    app.register("omkar", "omkar@example.com").await;

    for _ in 0..5 {
        app.request(
            "POST",
            "/auth/login",
            Some(serde_json::json!({
                "username": "omkar",
                "password": "WrongPass1!",
            })),
            None,
        )
        .await;
    }

    app.clock.advance(Duration::minutes(10));
    app.login("omkar", "Password123!").await;
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();

    let response = app.request("GET", "/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.get("status").unwrap().as_str().unwrap(), "ok");
    assert!(response.body.get("version").unwrap().as_str().is_some());
}
