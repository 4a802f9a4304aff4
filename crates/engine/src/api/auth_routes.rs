//! Authentication API routes.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::app::App;
use crate::infrastructure::auth::TokenPair;

use super::{ApiError, AuthUser};

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct UserInfoResponse {
    pub user_id: String,
    pub email: String,
    pub is_premium: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Register a new user.
pub async fn register(
    State(app): State<Arc<App>>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<TokenPair>), ApiError> {
    req.validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let tokens = app
        .use_cases
        .auth
        .register(&req.email, &req.password, &req.confirm_password)
        .await?;

    Ok((StatusCode::CREATED, Json(tokens)))
}

/// Login with email and password.
pub async fn login(
    State(app): State<Arc<App>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenPair>, ApiError> {
    req.validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let tokens = app.use_cases.auth.login(&req.email, &req.password).await?;
    Ok(Json(tokens))
}

/// Refresh the access token using a refresh token.
pub async fn refresh(
    State(app): State<Arc<App>>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<TokenPair>, ApiError> {
    let tokens = app.use_cases.auth.refresh(&req.refresh_token).await?;
    Ok(Json(tokens))
}

/// Get current user information.
pub async fn me(AuthUser(user): AuthUser) -> Json<UserInfoResponse> {
    Json(UserInfoResponse {
        user_id: user.id.to_string(),
        email: user.email,
        is_premium: user.is_premium,
        created_at: user.created_at,
    })
}

/// Logout. Tokens are stateless, so the client just drops them.
pub async fn logout(AuthUser(_user): AuthUser) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Successfully logged out".to_string(),
    })
}
