//! Integration tests for the password-reset flow.

mod helpers;

use chrono::Duration;
use http::StatusCode;

use helpers::TestApp;

#[tokio::test]
async fn test_forgot_password_sends_reset_link() {
    let app = TestApp::new();
    app.register("omkar", "omkar@example.com").await;

    let response = app
        .request(
            "POST",
            "/auth/forgot-password",
            Some(serde_json::json!({"email": "omkar@example.com"})),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body.get("message").unwrap().as_str().unwrap(),
        "Password reset email sent"
    );

    let token = app.reset_token_for("omkar@example.com").await;
    let sent = app.mailer.sent.lock().await;
    assert_eq!(sent.len(), 1);
    let (to, subject, body) = &sent[0];
    assert_eq!(to, "omkar@example.com");
    assert_eq!(subject, "Password Reset Request");
    assert!(body.contains(&format!("?token={token}")));
}

#[tokio::test]
async fn test_forgot_password_unknown_email() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/auth/forgot-password",
            Some(serde_json::json!({"email": "nobody@example.com"})),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reset_password_success() {
    let app = TestApp::new();
    app.register("omkar", "omkar@example.com").await;
    app.request(
        "POST",
        "/auth/forgot-password",
        Some(serde_json::json!({"email": "omkar@example.com"})),
        None,
    )
    .await;
    let token = app.reset_token_for("omkar@example.com").await;

    let response = app
        .request(
            "POST",
            "/auth/reset-password",
            Some(serde_json::json!({
                "token": token,
                "newPassword": "NewPw1!",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body.get("message").unwrap().as_str().unwrap(),
        "Password has been reset successfully"
    );

    // New password works, old one does not.
    app.login("omkar", "NewPw1!").await;
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
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_reset_token_is_single_use() {
    let app = TestApp::new();
    app.register("omkar", "omkar@example.com").await;
    app.request(
        "POST",
        "/auth/forgot-password",
        Some(serde_json::json!({"email": "omkar@example.com"})),
        None,
    )
    .await;
    let token = app.reset_token_for("omkar@example.com").await;

    let body = serde_json::json!({"token": token, "newPassword": "NewPw1!"});
    let response = app
        .request("POST", "/auth/reset-password", Some(body.clone()), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("POST", "/auth/reset-password", Some(body), None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reset_token_expires() {
    let app = TestApp::new();
    app.register("omkar", "omkar@example.com").await;
    app.request(
        "POST",
        "/auth/forgot-password",
        Some(serde_json::json!({"email": "omkar@example.com"})),
        None,
    )
    .await;
    let token = app.reset_token_for("omkar@example.com").await;

    app.clock.advance(Duration::minutes(61));

    let response = app
        .request(
            "POST",
            "/auth/reset-password",
            Some(serde_json::json!({"token": token, "newPassword": "NewPw1!"})),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_reset_token() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/auth/reset-password",
            Some(serde_json::json!({
                "token": "0000000000000000000000000000000000000000",
                "newPassword": "NewPw1!",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_mail_failure_reports_external_service_but_keeps_token() {
    let app = TestApp::with_failing_mailer();
    app.register("omkar", "omkar@example.com").await;

    let response = app
        .request(
            "POST",
            "/auth/forgot-password",
            Some(serde_json::json!({"email": "omkar@example.com"})),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.body.get("error").unwrap().as_str().unwrap(),
        "EXTERNAL_SERVICE"
    );

    // The token was persisted before the send and is still redeemable.
    let token = app.reset_token_for("omkar@example.com").await;
    let response = app
        .request(
            "POST",
            "/auth/reset-password",
            Some(serde_json::json!({"token": token, "newPassword": "NewPw1!"})),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}
