//! Integration tests for session validation, logout, and the protected
//! route.

mod helpers;

use chrono::Duration;
use http::StatusCode;

use helpers::TestApp;

#[tokio::test]
async fn test_protected_route_with_valid_token() {
    let app = TestApp::new();
    app.register("omkar", "omkar@example.com").await;
    let token = app.login("omkar", "Password123!").await;

    let response = app
        .request("GET", "/auth/protected-route", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let user = response.body.get("user").unwrap();
    assert_eq!(user.get("username").unwrap().as_str().unwrap(), "omkar");
    assert_eq!(
        user.get("firstName").unwrap().as_str().unwrap(),
        "Omkar"
    );
    assert!(user.get("passwordHash").is_none());
    assert!(user.get("password_hash").is_none());
}

#[tokio::test]
async fn test_protected_route_without_token() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/auth/protected-route", None, None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_with_garbage_token() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/auth/protected-route", None, Some("not-a-token"))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_protected_route_after_logout() {
    let app = TestApp::new();
    app.register("omkar", "omkar@example.com").await;
    let token = app.login("omkar", "Password123!").await;

    let response = app.request("POST", "/auth/logout", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body.get("message").unwrap().as_str().unwrap(),
        "Logout successful"
    );

    let response = app
        .request("GET", "/auth/protected-route", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_protected_route_with_expired_session() {
    let app = TestApp::new();
    app.register("omkar", "omkar@example.com").await;
    let token = app.login("omkar", "Password123!").await;

    app.clock.advance(Duration::minutes(61));

    let response = app
        .request("GET", "/auth/protected-route", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_logout_without_token() {
    let app = TestApp::new();

    let response = app.request("POST", "/auth/logout", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_with_unknown_token() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/auth/logout", None, Some("unknown-token"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_sessions_are_independent() {
    let app = TestApp::new();
    app.register("omkar", "omkar@example.com").await;

    let first = app.login("omkar", "Password123!").await;
    let second = app.login("omkar", "Password123!").await;

    app.request("POST", "/auth/logout", None, Some(&first)).await;

    // Revoking one session leaves the other usable.
    let response = app
        .request("GET", "/auth/protected-route", None, Some(&second))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}
