//! Credential store port consumed by the auth core.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use authhub_core::result::AppResult;

use super::model::{NewUser, User};

/// Persistence interface for user credentials and lockout/reset state.
///
/// Every multi-field update that must be atomic (attempt increments,
/// password change plus reset-token clearing) is a single indivisible
/// operation at this interface, regardless of backing store. Concurrent
/// failed logins for the same account must therefore never lose an
/// increment.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Find a user by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by username.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Find a user by email address.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a new user. Fails with `ErrorKind::Conflict` when the
    /// username or email is already taken.
    async fn insert(&self, user: &NewUser) -> AppResult<User>;

    /// Atomically increment the failed-login counter and return the
    /// post-increment count.
    async fn increment_login_attempts(&self, id: Uuid) -> AppResult<i32>;

    /// Open a lockout window on the account.
    async fn set_lockout(&self, id: Uuid, until: DateTime<Utc>) -> AppResult<()>;

    /// Reset the login state: attempts to zero, lockout cleared.
    async fn reset_login_state(&self, id: Uuid) -> AppResult<()>;

    /// Record a password-reset token and its expiry.
    async fn set_reset_token(
        &self,
        id: Uuid,
        token: &str,
        expires: DateTime<Utc>,
    ) -> AppResult<()>;

    /// Find the user holding the given reset token, if it has not expired
    /// by `now`. Returns `None` for unknown or expired tokens.
    async fn find_by_valid_reset_token(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<User>>;

    /// Replace the password hash and clear the reset-token fields in one
    /// indivisible update.
    async fn update_password_and_clear_reset(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> AppResult<()>;
}
