//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete
//! types. Ports exist for:
//! - Database access (could swap Neo4j -> another graph store)
//! - Clock (for testing)

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use habitquest_domain::{
    Character, CharacterId, CharacterSummary, CompletionId, Difficulty, EnemyTemplate,
    EnemyTemplateId, Habit, HabitCompletion, HabitId, HabitWithCompletions, User, UserId,
};

// =============================================================================
// Error Types
// =============================================================================

/// Repository operation errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Entity not found - includes entity type and ID for actionable error messages.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Database operation failed - includes operation name for tracing.
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// Serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Business constraint violated (e.g. unique email).
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

impl RepoError {
    /// Create a NotFound error with entity type and ID context.
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Create a Database error with operation context.
    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }

    /// Check if this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// =============================================================================
// Infrastructure Types
// =============================================================================

/// One completion row in a date-range report, joined with its habit.
#[derive(Debug, Clone)]
pub struct CompletionRecord {
    pub habit_id: HabitId,
    pub habit_name: String,
    pub date: NaiveDate,
}

// =============================================================================
// Database Ports (one per node label)
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn create(&self, user: &User) -> Result<(), RepoError>;
    async fn get(&self, id: UserId) -> Result<Option<User>, RepoError>;
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Create the ownership edge between a user and a character.
    async fn link_character(
        &self,
        user_id: UserId,
        character_id: CharacterId,
    ) -> Result<(), RepoError>;
    async fn owns_character(
        &self,
        user_id: UserId,
        character_id: CharacterId,
    ) -> Result<bool, RepoError>;
    async fn list_characters(&self, user_id: UserId) -> Result<Vec<CharacterSummary>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterRepo: Send + Sync {
    async fn create(&self, character: &Character) -> Result<(), RepoError>;
    async fn get(&self, id: CharacterId) -> Result<Option<Character>, RepoError>;
    /// Persist all mutable fields (HP/XP/level, habit points, inventory, image).
    async fn save(&self, character: &Character) -> Result<(), RepoError>;
    async fn delete(&self, id: CharacterId) -> Result<(), RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HabitRepo: Send + Sync {
    /// Create the habit vertex and its edge from the owning character.
    async fn create(&self, habit: &Habit) -> Result<(), RepoError>;
    async fn get(&self, id: HabitId) -> Result<Option<Habit>, RepoError>;
    async fn list_for_character(
        &self,
        character_id: CharacterId,
    ) -> Result<Vec<HabitWithCompletions>, RepoError>;
    async fn delete(&self, id: HabitId) -> Result<(), RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionRepo: Send + Sync {
    async fn create(&self, completion: &HabitCompletion) -> Result<(), RepoError>;
    async fn find_for_date(
        &self,
        habit_id: HabitId,
        date: NaiveDate,
    ) -> Result<Option<HabitCompletion>, RepoError>;
    async fn delete(&self, id: CompletionId) -> Result<(), RepoError>;
    /// Completions across all of a character's habits in an inclusive range.
    async fn list_in_range(
        &self,
        character_id: CharacterId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CompletionRecord>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnemyTemplateRepo: Send + Sync {
    async fn create(&self, template: &EnemyTemplate) -> Result<(), RepoError>;
    /// Seed templates idempotently (merge by name). Returns how many were new.
    async fn seed(&self, templates: &[EnemyTemplate]) -> Result<usize, RepoError>;
    async fn get(&self, id: EnemyTemplateId) -> Result<Option<EnemyTemplate>, RepoError>;
    async fn list(&self) -> Result<Vec<EnemyTemplate>, RepoError>;
    async fn list_by_difficulty(
        &self,
        difficulty: Difficulty,
    ) -> Result<Vec<EnemyTemplate>, RepoError>;
    async fn save(&self, template: &EnemyTemplate) -> Result<(), RepoError>;
    async fn delete(&self, id: EnemyTemplateId) -> Result<(), RepoError>;
}

/// Connectivity probe for the health endpoint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HealthPort: Send + Sync {
    async fn ping(&self) -> Result<(), RepoError>;
}

// =============================================================================
// Testability Ports
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Production clock.
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
