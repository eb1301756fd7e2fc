//! Session authority.
//!
//! Issues bearer session tokens, validates presented tokens, and revokes
//! them. The persisted session row is authoritative: a token whose
//! signature and expiry both check out is still rejected if its row has
//! been revoked or is missing, so revocation takes effect immediately.

use std::fmt::Write as _;
use std::sync::Arc;

use sha2::{Digest, Sha256};
use tracing::debug;
use uuid::Uuid;

use authhub_core::result::AppResult;
use authhub_core::traits::Clock;
use authhub_entity::session::{NewSession, Session, SessionStore};

use crate::token::{TokenDecodeError, TokenDecoder, TokenEncoder};

/// Result of issuing a new session.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    /// The bearer token handed to the client. Never persisted.
    pub token: String,
    /// The persisted session row.
    pub session: Session,
}

/// Verdict on a presented bearer token.
#[derive(Debug, Clone)]
pub enum TokenStatus {
    /// The token is live; the session row is attached.
    Active(Session),
    /// The token or its session is past expiry.
    Expired,
    /// The session was explicitly revoked.
    Revoked,
    /// Malformed, tampered, or no session row exists for it.
    NotFound,
}

/// Outcome of a revocation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevokeOutcome {
    /// The session is revoked. Repeated revocations of the same token
    /// land here too.
    Revoked,
    /// No session exists for the presented token.
    NotFound,
}

/// Issues, validates, and revokes bearer sessions.
#[derive(Clone)]
pub struct SessionAuthority {
    encoder: TokenEncoder,
    decoder: TokenDecoder,
    store: Arc<dyn SessionStore>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for SessionAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionAuthority")
            .field("encoder", &self.encoder)
            .field("clock", &self.clock)
            .finish()
    }
}

impl SessionAuthority {
    /// Creates a new session authority.
    pub fn new(
        encoder: TokenEncoder,
        decoder: TokenDecoder,
        store: Arc<dyn SessionStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            encoder,
            decoder,
            store,
            clock,
        }
    }

    /// Issues a new session for the given user.
    pub async fn issue(&self, user_id: Uuid) -> AppResult<IssuedSession> {
        let now = self.clock.now();
        let (token, expires_at) = self.encoder.generate(user_id, now)?;

        let session = self
            .store
            .insert(&NewSession {
                user_id,
                token_hash: token_hash(&token),
                expires_at,
            })
            .await?;

        debug!(user_id = %user_id, session_id = %session.id, "Session issued");
        Ok(IssuedSession { token, session })
    }

    /// Validates a presented bearer token.
    ///
    /// The signature and embedded expiry are checked first, then the
    /// persisted row decides: revoked beats expired when both apply, and
    /// a missing row rejects an otherwise well-formed token.
    pub async fn validate(&self, token: &str) -> AppResult<TokenStatus> {
        let now = self.clock.now();

        match self.decoder.decode(token, now) {
            Ok(_) => {}
            Err(TokenDecodeError::Expired) => return Ok(TokenStatus::Expired),
            Err(TokenDecodeError::Invalid) => return Ok(TokenStatus::NotFound),
        }

        let Some(session) = self.store.find_by_token_hash(&token_hash(token)).await? else {
            return Ok(TokenStatus::NotFound);
        };

        if session.revoked {
            return Ok(TokenStatus::Revoked);
        }
        if session.is_expired_at(now) {
            return Ok(TokenStatus::Expired);
        }

        Ok(TokenStatus::Active(session))
    }

    /// Revokes the session behind the presented token.
    pub async fn revoke(&self, token: &str) -> AppResult<RevokeOutcome> {
        let hash = token_hash(token);

        if self.store.revoke(&hash).await? {
            debug!("Session revoked");
            return Ok(RevokeOutcome::Revoked);
        }

        // Nothing flipped: either the row is already revoked (idempotent
        // success) or it never existed.
        match self.store.find_by_token_hash(&hash).await? {
            Some(_) => Ok(RevokeOutcome::Revoked),
            None => Ok(RevokeOutcome::NotFound),
        }
    }
}

/// SHA-256 hex digest of a bearer token, the only form ever persisted.
pub fn token_hash(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    digest.iter().fold(String::with_capacity(64), |mut acc, b| {
        let _ = write!(acc, "{b:02x}");
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_hash_is_hex_sha256() {
        // SHA-256("abc")
        assert_eq!(
            token_hash("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(token_hash("").len(), 64);
    }
}
