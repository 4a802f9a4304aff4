//! Habit completion entity - one record per habit per date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ids::{CompletionId, HabitId};

/// A per-date completion record for a habit. At most one exists per
/// (habit, date) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitCompletion {
    pub id: CompletionId,
    pub habit_id: HabitId,
    pub date: NaiveDate,
    pub completed: bool,
}

impl HabitCompletion {
    pub fn new(habit_id: HabitId, date: NaiveDate) -> Self {
        Self {
            id: CompletionId::new(),
            habit_id,
            date,
            completed: true,
        }
    }
}
