//! HabitQuest domain crate.
//!
//! Core domain types for the habit-tracking backend: typed IDs, entities
//! (users, characters, habits, completions, enemy templates), value objects
//! (abilities, inventory), and the progression arithmetic (bonuses, leveling,
//! HP clamping, adventure reward validation). No I/O lives here.

pub mod adventure;
pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use adventure::{AdventureResults, LootItem};
pub use entities::{
    Character, CharacterSummary, EnemyInstance, EnemyTemplate, Habit, HabitCompletion,
    HabitWithCompletions, HpChange, User, XpGain, FREE_CHARACTER_LIMIT,
};
pub use error::DomainError;
pub use ids::{CharacterId, CompletionId, EnemyTemplateId, HabitId, UserId};
pub use value_objects::{AbilityScores, Attribute, AttributeScore, Difficulty, Inventory};
