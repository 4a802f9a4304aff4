//! Request extractors.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

use habitquest_domain::User;

use crate::app::App;

use super::ApiError;

/// Extractor resolving the bearer token to the active user.
///
/// Rejects missing/malformed headers, invalid or expired tokens, refresh
/// tokens used as access tokens, and disabled accounts.
pub struct AuthUser(pub User);

impl FromRequestParts<Arc<App>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<App>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| {
                ApiError::Unauthorized("Missing or invalid Authorization header".to_string())
            })?;

        let user = state.use_cases.auth.authenticate(token).await?;
        Ok(AuthUser(user))
    }
}
