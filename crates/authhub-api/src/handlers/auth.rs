//! Auth handlers, register, login, logout, password reset, and the
//! authenticated probe endpoint.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};

use authhub_auth::Registration;
use authhub_core::error::AppError;

use crate::error::ApiError;

use crate::dto::request::{
    ForgotPasswordRequest, LoginRequest, RegisterRequest, ResetPasswordRequest, validate_request,
};
use crate::dto::response::{LoginResponse, MessageResponse, ProtectedResponse, UserResponse};
use crate::extractors::{AuthUser, bearer_token};
use crate::state::AppState;

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    validate_request(&req)?;

    state
        .auth
        .register(Registration {
            username: req.username,
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
            mobile: req.mobile,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered successfully")),
    ))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    validate_request(&req)?;

    let result = state.auth.login(&req.username, &req.password).await?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token: result.token,
    }))
}

/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>, ApiError> {
    let token = bearer_token(&headers)?;
    state.auth.logout(token).await?;

    Ok(Json(MessageResponse::new("Logout successful")))
}

/// POST /auth/forgot-password
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(req): Json<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    validate_request(&req)?;

    state.auth.forgot_password(&req.email).await?;

    Ok(Json(MessageResponse::new("Password reset email sent")))
}

/// POST /auth/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    validate_request(&req)?;

    state.auth.reset_password(&req.token, &req.new_password).await?;

    Ok(Json(MessageResponse::new(
        "Password has been reset successfully",
    )))
}

/// GET /auth/protected-route
pub async fn protected_route(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ProtectedResponse>, ApiError> {
    let user = state
        .users
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(ProtectedResponse {
        message: "You have accessed a protected route".to_string(),
        user: UserResponse::from(user),
    }))
}
