//! Session token validation.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use authhub_core::config::AuthConfig;

use super::claims::Claims;

/// Why a token string failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenDecodeError {
    /// Malformed, tampered, or signed with a different key.
    Invalid,
    /// Well-formed and correctly signed, but past its expiry.
    Expired,
}

/// Validates session token strings.
///
/// Expiry is checked against the caller-supplied instant rather than the
/// wall clock, so validation stays deterministic under a test clock.
#[derive(Clone)]
pub struct TokenDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Signature validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for TokenDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked explicitly below against the injected clock.
        validation.validate_exp = false;
        validation.required_spec_claims = std::collections::HashSet::new();

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a session token string.
    ///
    /// Checks the signature first; a tampered token is `Invalid` even if
    /// it would also be past its expiry.
    pub fn decode(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenDecodeError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| TokenDecodeError::Invalid)?;

        let claims = token_data.claims;
        if claims.is_expired_at(now) {
            return Err(TokenDecodeError::Expired);
        }

        Ok(claims)
    }
}
