//! Session store port consumed by the session authority.

use async_trait::async_trait;

use authhub_core::result::AppResult;

use super::model::{NewSession, Session};

/// Persistence interface for bearer-token sessions.
///
/// Token uniqueness is store-enforced: inserting a session whose
/// `token_hash` collides with a live session must fail.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Persist a new session row.
    async fn insert(&self, session: &NewSession) -> AppResult<Session>;

    /// Look up a session by its token hash.
    async fn find_by_token_hash(&self, token_hash: &str) -> AppResult<Option<Session>>;

    /// Revoke the session with the given token hash.
    ///
    /// Returns `true` when a live (not yet revoked) session was revoked,
    /// `false` when the token is unknown or already revoked. Never an
    /// error in either case, so revocation stays idempotent.
    async fn revoke(&self, token_hash: &str) -> AppResult<bool>;
}
