//! Single-use password-reset tokens.
//!
//! A reset token is an opaque random string, stored on the user row with
//! its expiry. Redeeming it replaces the password and clears the token
//! in one indivisible store update, so a token can never be redeemed
//! twice.

use std::fmt::Write as _;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use tracing::debug;

use authhub_core::config::AuthConfig;
use authhub_core::result::AppResult;
use authhub_core::traits::Clock;
use authhub_entity::user::{CredentialStore, User};

/// Number of random bytes in a reset token (hex-encoded to 40 chars).
const RESET_TOKEN_BYTES: usize = 20;

/// A freshly issued reset token.
#[derive(Debug, Clone)]
pub struct IssuedReset {
    /// The opaque token to deliver out of band.
    pub token: String,
    /// When the token stops being redeemable.
    pub expires_at: DateTime<Utc>,
}

/// Outcome of a redemption attempt.
#[derive(Debug, Clone)]
pub enum RedeemOutcome {
    /// The password was replaced for this user.
    Redeemed(User),
    /// The token is unknown, expired, or already redeemed.
    Invalid,
}

/// Issues and redeems password-reset tokens.
#[derive(Clone)]
pub struct ResetTokenAuthority {
    store: Arc<dyn CredentialStore>,
    clock: Arc<dyn Clock>,
    /// Reset token TTL in minutes.
    ttl_minutes: i64,
}

impl std::fmt::Debug for ResetTokenAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResetTokenAuthority")
            .field("ttl_minutes", &self.ttl_minutes)
            .finish()
    }
}

impl ResetTokenAuthority {
    /// Creates a new reset authority.
    pub fn new(
        store: Arc<dyn CredentialStore>,
        clock: Arc<dyn Clock>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            store,
            clock,
            ttl_minutes: config.reset_token_ttl_minutes as i64,
        }
    }

    /// Issues a fresh reset token for the user, replacing any
    /// outstanding one.
    pub async fn issue(&self, user: &User) -> AppResult<IssuedReset> {
        let token = generate_token();
        let expires_at = self.clock.now() + Duration::minutes(self.ttl_minutes);

        self.store
            .set_reset_token(user.id, &token, expires_at)
            .await?;

        debug!(user_id = %user.id, "Password-reset token issued");
        Ok(IssuedReset { token, expires_at })
    }

    /// Redeems a reset token, installing the given password hash.
    ///
    /// Also clears any open lockout so the user can sign in with the new
    /// password immediately.
    pub async fn redeem(&self, token: &str, password_hash: &str) -> AppResult<RedeemOutcome> {
        let now = self.clock.now();

        let Some(user) = self.store.find_by_valid_reset_token(token, now).await? else {
            return Ok(RedeemOutcome::Invalid);
        };

        self.store
            .update_password_and_clear_reset(user.id, password_hash)
            .await?;
        self.store.reset_login_state(user.id).await?;

        debug!(user_id = %user.id, "Password reset redeemed");
        Ok(RedeemOutcome::Redeemed(user))
    }
}

fn generate_token() -> String {
    let mut bytes = [0u8; RESET_TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    bytes.iter().fold(
        String::with_capacity(RESET_TOKEN_BYTES * 2),
        |mut acc, b| {
            let _ = write!(acc, "{b:02x}");
            acc
        },
    )
}
