//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use authhub_auth::{AuthService, SessionAuthority};
use authhub_core::config::AppConfig;
use authhub_entity::user::CredentialStore;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// The auth facade behind every account flow.
    pub auth: Arc<AuthService>,
    /// Session authority, used directly by the bearer-token extractor.
    pub sessions: Arc<SessionAuthority>,
    /// Credential store, used to resolve the authenticated user.
    pub users: Arc<dyn CredentialStore>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish()
    }
}

impl AppState {
    /// Bundles the shared dependencies into a state value.
    pub fn new(
        config: Arc<AppConfig>,
        auth: Arc<AuthService>,
        users: Arc<dyn CredentialStore>,
    ) -> Self {
        Self {
            sessions: auth.sessions().clone(),
            config,
            auth,
            users,
        }
    }
}
