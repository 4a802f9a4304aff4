//! User entity - registered account that owns characters.

use chrono::{DateTime, Utc};

use crate::ids::UserId;

/// How many characters a non-premium account may own.
pub const FREE_CHARACTER_LIMIT: usize = 3;

/// A registered account.
///
/// `password_hash` is the Argon2 PHC string; the plaintext never reaches
/// the domain layer.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
    pub is_premium: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new active, non-premium account.
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: UserId::new(),
            email: email.into(),
            password_hash: password_hash.into(),
            is_active: true,
            is_premium: false,
            created_at: now,
        }
    }

    /// Whether this account may own another character on top of `owned`.
    pub fn can_create_character(&self, owned: usize) -> bool {
        self.is_premium || owned < FREE_CHARACTER_LIMIT
    }
}
