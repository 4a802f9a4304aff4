//! Use cases - user-facing operations coordinated over the repository ports.
//!
//! Grouped per route family. Handlers stay thin; every business rule lives
//! here or in the domain crate.

use habitquest_domain::DomainError;

use crate::infrastructure::auth::AuthError;
use crate::infrastructure::ports::RepoError;

mod adventure;
mod auth;
mod characters;
mod completions;
mod enemies;
mod habits;

pub use adventure::{AdventureOps, AdventureOutcome};
pub use auth::AuthOps;
pub use characters::{CharacterOps, CreateCharacterInput};
pub use completions::{CompletionAction, CompletionOps};
pub use enemies::{EnemyOps, EnemyTemplateInput, EnemyTemplatePatch};
pub use habits::HabitOps;

/// Shared error type for use cases.
#[derive(Debug, thiserror::Error)]
pub enum UseCaseError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}
