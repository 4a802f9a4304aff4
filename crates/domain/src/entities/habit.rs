//! Habit entity - a recurring task tied to one ability.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{CharacterId, HabitId};
use crate::value_objects::Attribute;

/// A user-defined recurring task. Completing it awards habit points toward
/// the linked ability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
    pub id: HabitId,
    pub character_id: CharacterId,
    pub name: String,
    pub attribute: Attribute,
    pub description: Option<String>,
}

impl Habit {
    pub fn new(
        character_id: CharacterId,
        name: impl Into<String>,
        attribute: Attribute,
        description: Option<String>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("Habit name cannot be empty"));
        }
        Ok(Self {
            id: HabitId::new(),
            character_id,
            name,
            attribute,
            description: description.filter(|d| !d.trim().is_empty()),
        })
    }
}

/// A habit together with the dates on which it was completed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitWithCompletions {
    pub habit: Habit,
    pub completed_dates: Vec<NaiveDate>,
}
