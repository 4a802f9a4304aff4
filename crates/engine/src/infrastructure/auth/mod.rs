//! Authentication infrastructure: JWT issuance/validation and password hashing.

mod jwt;
mod password;

pub use jwt::{Claims, JwtService, TokenPair, TokenType};
pub use password::{hash_password, verify_password, Password};

/// Errors from token or credential handling.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token has expired")]
    Expired,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Wrong token type: expected {expected}")]
    WrongTokenType { expected: &'static str },
    #[error("Credential error: {0}")]
    Credential(String),
}
