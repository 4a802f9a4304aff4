//! JWT service for token generation and validation.
//!
//! Access tokens are short-lived and carry the user's id and email; refresh
//! tokens are long-lived and may only be exchanged for a new pair. Both are
//! signed HS256 with the shared secret from configuration.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use habitquest_domain::UserId;

use super::AuthError;

const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 30;
const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 7;

/// Marker distinguishing the two token kinds inside the claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Claims carried by both token kinds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Email
    pub email: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Access or refresh
    #[serde(rename = "type")]
    pub token_type: TokenType,
}

impl Claims {
    /// Parse the subject back into a typed user id.
    pub fn user_id(&self) -> Result<UserId, AuthError> {
        self.sub
            .parse::<uuid::Uuid>()
            .map(UserId::from_uuid)
            .map_err(|_| AuthError::InvalidToken)
    }
}

/// Token pair returned to the client.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// JWT signing/validation service (HS256).
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Generate an access + refresh pair for a user.
    pub fn generate_token_pair(&self, user_id: UserId, email: &str) -> Result<TokenPair, AuthError> {
        let access_token = self.generate_token(
            user_id,
            email,
            TokenType::Access,
            Duration::minutes(ACCESS_TOKEN_EXPIRY_MINUTES),
        )?;
        let refresh_token = self.generate_token(
            user_id,
            email,
            TokenType::Refresh,
            Duration::days(REFRESH_TOKEN_EXPIRY_DAYS),
        )?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            token_type: "bearer".to_string(),
            expires_in: ACCESS_TOKEN_EXPIRY_MINUTES * 60,
        })
    }

    fn generate_token(
        &self,
        user_id: UserId,
        email: &str,
        token_type: TokenType,
        lifetime: Duration,
    ) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            exp: (now + lifetime).timestamp(),
            iat: now.timestamp(),
            token_type,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Credential(format!("Failed to encode token: {e}")))
    }

    /// Validate an access token and return its claims.
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, AuthError> {
        self.validate(token, TokenType::Access)
    }

    /// Validate a refresh token and return its claims.
    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims, AuthError> {
        self.validate(token, TokenType::Refresh)
    }

    fn validate(&self, token: &str, expected: TokenType) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(
            token,
            &self.decoding_key,
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
            _ => AuthError::InvalidToken,
        })?;

        if data.claims.token_type != expected {
            return Err(AuthError::WrongTokenType {
                expected: match expected {
                    TokenType::Access => "access",
                    TokenType::Refresh => "refresh",
                },
            });
        }

        Ok(data.claims)
    }
}
