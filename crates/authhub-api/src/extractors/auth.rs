//! `AuthUser` extractor, pulls the bearer token from the Authorization
//! header and validates it against the session authority.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;
use uuid::Uuid;

use authhub_auth::session::TokenStatus;
use authhub_core::error::AppError;
use authhub_core::result::AppResult;
use authhub_entity::session::Session;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated session context available in handlers.
///
/// A missing or malformed Authorization header rejects with 401; a
/// well-formed token whose session is unknown, expired, or revoked
/// rejects with 403.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The validated session row.
    pub session: Session,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;

        match state.sessions.validate(token).await? {
            TokenStatus::Active(session) => Ok(AuthUser {
                user_id: session.user_id,
                session,
            }),
            TokenStatus::Expired => Err(AppError::forbidden("Session has expired").into()),
            TokenStatus::Revoked => Err(AppError::forbidden("Session has been revoked").into()),
            TokenStatus::NotFound => Err(AppError::forbidden("Invalid session token").into()),
        }
    }
}

/// Pulls the bearer token out of the Authorization header.
pub fn bearer_token(headers: &HeaderMap) -> AppResult<&str> {
    let auth_header = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::unauthorized("Invalid Authorization header format"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn extracts_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers).unwrap(), "abc.def");
    }

    #[test]
    fn missing_header_is_unauthorized() {
        let headers = HeaderMap::new();
        let err = bearer_token(&headers).unwrap_err();
        assert_eq!(err.kind, authhub_core::error::ErrorKind::Unauthorized);
    }

    #[test]
    fn non_bearer_scheme_is_unauthorized() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Basic dXNlcg=="));
        assert!(bearer_token(&headers).is_err());
    }
}
