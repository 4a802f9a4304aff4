//! Domain entities.

mod character;
mod completion;
mod enemy;
mod habit;
mod user;

pub use character::{Character, CharacterSummary, HpChange, XpGain, MAX_IMAGE_BYTES};
pub use completion::HabitCompletion;
pub use enemy::{EnemyInstance, EnemyTemplate};
pub use habit::{Habit, HabitWithCompletions};
pub use user::{User, FREE_CHARACTER_LIMIT};
