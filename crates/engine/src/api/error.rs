//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::infrastructure::auth::AuthError;
use crate::use_cases::UseCaseError;

#[derive(Debug)]
pub enum ApiError {
    NotFound(&'static str),
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    Conflict(String),
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(entity) => (StatusCode::NOT_FOUND, format!("{entity} not found")),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Internal(msg) => {
                // Never leak internals to the client.
                tracing::error!("Internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(entity) => ApiError::NotFound(entity),
            UseCaseError::InvalidInput(msg) => ApiError::BadRequest(msg),
            UseCaseError::Unauthorized(msg) => ApiError::Unauthorized(msg),
            UseCaseError::Forbidden(msg) => ApiError::Forbidden(msg),
            UseCaseError::Conflict(msg) => ApiError::Conflict(msg),
            UseCaseError::Domain(e) => ApiError::BadRequest(e.to_string()),
            UseCaseError::Auth(e) => e.into(),
            UseCaseError::Repo(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Expired => ApiError::Unauthorized("Token has expired".to_string()),
            AuthError::InvalidToken | AuthError::WrongTokenType { .. } => {
                ApiError::Unauthorized("Could not validate credentials".to_string())
            }
            AuthError::Credential(msg) => ApiError::Internal(msg),
        }
    }
}
