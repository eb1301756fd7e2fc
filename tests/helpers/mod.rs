//! Shared test helpers for integration tests.
//!
//! Builds the full router over the in-memory stores, a manual clock,
//! and a recording mailer, so every test runs hermetically.

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use authhub_auth::{AuthService, SessionAuthority, TokenDecoder, TokenEncoder};
use authhub_core::config::{AppConfig, DatabaseConfig};
use authhub_core::error::AppError;
use authhub_core::result::AppResult;
use authhub_core::traits::{Clock, Mailer, ManualClock};
use authhub_database::memory::{MemoryCredentialStore, MemorySessionStore};
use authhub_entity::user::CredentialStore;

/// Captures outgoing mail for assertions.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    /// Sent messages as (to, subject, body).
    pub sent: tokio::sync::Mutex<Vec<(String, String, String)>>,
    /// When true, every send fails like an unreachable relay.
    pub fail: bool,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        if self.fail {
            return Err(AppError::external_service("SMTP relay unreachable"));
        }
        self.sent
            .lock()
            .await
            .push((to.to_string(), subject.to_string(), body.to_string()));
        Ok(())
    }
}

/// A parsed test response.
pub struct TestResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// Parsed JSON body (Null when empty or non-JSON).
    pub body: Value,
}

/// Test application context.
pub struct TestApp {
    /// The Axum router for making test requests.
    pub router: Router,
    /// Credential store for direct state assertions.
    pub users: Arc<MemoryCredentialStore>,
    /// The manual clock driving lockout and expiry.
    pub clock: Arc<ManualClock>,
    /// The recording mailer outbox.
    pub mailer: Arc<RecordingMailer>,
}

impl TestApp {
    /// Create a new test application over in-memory stores.
    pub fn new() -> Self {
        Self::build(false)
    }

    /// Create a test application whose mailer always fails.
    pub fn with_failing_mailer() -> Self {
        Self::build(true)
    }

    fn build(mail_fails: bool) -> Self {
        let config = test_config();
        let users = Arc::new(MemoryCredentialStore::new());
        let session_store = Arc::new(MemorySessionStore::new());
        let clock = Arc::new(ManualClock::new());
        let mailer = Arc::new(RecordingMailer {
            fail: mail_fails,
            ..RecordingMailer::default()
        });

        let sessions = Arc::new(SessionAuthority::new(
            TokenEncoder::new(&config.auth),
            TokenDecoder::new(&config.auth),
            session_store,
            clock.clone() as Arc<dyn Clock>,
        ));

        let auth = Arc::new(AuthService::new(
            users.clone(),
            sessions,
            mailer.clone(),
            clock.clone(),
            &config.auth,
            config.mail.clone(),
        ));

        let state = authhub_api::AppState::new(Arc::new(config), auth, users.clone());
        let router = authhub_api::build_app(state);

        Self {
            router,
            users,
            clock,
            mailer,
        }
    }

    /// Make an HTTP request to the test app.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }

        let body = match body {
            Some(value) => Body::from(value.to_string()),
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).expect("Failed to build request"))
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Register a user with the standard test profile.
    pub async fn register(&self, username: &str, email: &str) {
        let response = self
            .request(
                "POST",
                "/auth/register",
                Some(serde_json::json!({
                    "username": username,
                    "email": email,
                    "password": "Password123!",
                    "firstName": "Omkar",
                    "lastName": "B",
                    "mobile": "1234567890",
                })),
                None,
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Registration failed: {:?}",
            response.body
        );
    }

    /// Login and return the bearer token.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/auth/login",
                Some(serde_json::json!({
                    "username": username,
                    "password": password,
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response
            .body
            .get("token")
            .and_then(|v| v.as_str())
            .expect("No token in login response")
            .to_string()
    }

    /// Fetch the stored reset token for the given email.
    pub async fn reset_token_for(&self, email: &str) -> String {
        self.users
            .find_by_email(email)
            .await
            .expect("store lookup failed")
            .expect("user not found")
            .reset_token
            .expect("no reset token stored")
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        server: Default::default(),
        database: DatabaseConfig {
            url: "postgres://unused.invalid/authhub_test".to_string(),
            max_connections: 1,
            min_connections: 0,
            connect_timeout_seconds: 1,
            idle_timeout_seconds: 1,
        },
        auth: Default::default(),
        mail: Default::default(),
        logging: Default::default(),
    }
}
