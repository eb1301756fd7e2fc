//! Request DTOs with validation.
//!
//! String fields default to empty on deserialization so a missing field
//! fails the `validator` checks (400) instead of surfacing as a body
//! parse rejection.

use serde::{Deserialize, Serialize};
use validator::Validate;

use authhub_core::error::AppError;
use authhub_core::result::AppResult;

/// Runs the derive-generated checks, mapping the first violation into a
/// validation error.
pub fn validate_request(request: &impl Validate) -> AppResult<()> {
    request.validate().map_err(|errors| {
        let message = errors
            .field_errors()
            .into_iter()
            .flat_map(|(_, errs)| errs.iter())
            .filter_map(|err| err.message.as_ref())
            .next()
            .map(|m| m.to_string())
            .unwrap_or_else(|| "Invalid request body".to_string());
        AppError::validation(message)
    })
}

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Desired username.
    #[serde(default)]
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Email address.
    #[serde(default)]
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    /// Plaintext password.
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Given name.
    #[serde(default)]
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    /// Mobile phone number.
    #[serde(default)]
    #[validate(length(min = 1, message = "Mobile number is required"))]
    pub mobile: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Username.
    #[serde(default)]
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Forgot-password request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordRequest {
    /// Account email address.
    #[serde(default)]
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
}

/// Reset-password request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    /// The reset token from the emailed link.
    #[serde(default)]
    #[validate(length(min = 1, message = "Reset token is required"))]
    pub token: String,
    /// The replacement password.
    #[serde(default)]
    #[validate(length(min = 1, message = "New password is required"))]
    pub new_password: String,
}
