//! Marking habit completions and reading completion history.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use habitquest_domain::{CharacterId, HabitCompletion, HabitId, UserId};

use crate::infrastructure::ports::{
    ClockPort, CompletionRecord, CompletionRepo, HabitRepo, UserRepo,
};

use super::UseCaseError;

/// What a mark request actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionAction {
    /// A new completion vertex was created.
    Created,
    /// The date was already marked; nothing changed.
    AlreadyComplete,
    /// An existing completion was removed.
    Removed,
    /// Un-completing a date that was never marked; nothing changed.
    NothingToRemove,
}

pub struct CompletionOps {
    completions: Arc<dyn CompletionRepo>,
    habits: Arc<dyn HabitRepo>,
    users: Arc<dyn UserRepo>,
    clock: Arc<dyn ClockPort>,
}

impl CompletionOps {
    pub fn new(
        completions: Arc<dyn CompletionRepo>,
        habits: Arc<dyn HabitRepo>,
        users: Arc<dyn UserRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            completions,
            habits,
            users,
            clock,
        }
    }

    /// Mark a habit complete or incomplete for a date (default today).
    ///
    /// At most one completion exists per (habit, date); re-completing is a
    /// no-op and un-completing removes the vertex.
    pub async fn mark(
        &self,
        user_id: UserId,
        habit_id: HabitId,
        date: Option<NaiveDate>,
        completed: bool,
    ) -> Result<CompletionAction, UseCaseError> {
        let habit = self
            .habits
            .get(habit_id)
            .await?
            .ok_or(UseCaseError::NotFound("Habit"))?;

        if !self
            .users
            .owns_character(user_id, habit.character_id)
            .await?
        {
            return Err(UseCaseError::Forbidden(
                "You don't have access to this habit".to_string(),
            ));
        }

        let date = date.unwrap_or_else(|| self.clock.today());
        let existing = self.completions.find_for_date(habit_id, date).await?;

        let action = match (existing, completed) {
            (Some(_), true) => CompletionAction::AlreadyComplete,
            (Some(completion), false) => {
                self.completions.delete(completion.id).await?;
                CompletionAction::Removed
            }
            (None, true) => {
                let completion = HabitCompletion::new(habit_id, date);
                self.completions.create(&completion).await?;
                CompletionAction::Created
            }
            (None, false) => CompletionAction::NothingToRemove,
        };

        tracing::debug!(habit_id = %habit_id, %date, ?action, "Marked habit completion");
        Ok(action)
    }

    /// Completions for an owned character in an inclusive date range.
    pub async fn list_in_range(
        &self,
        user_id: UserId,
        character_id: CharacterId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CompletionRecord>, UseCaseError> {
        if start > end {
            return Err(UseCaseError::InvalidInput(
                "Start date must not be after end date".to_string(),
            ));
        }

        if !self.users.owns_character(user_id, character_id).await? {
            return Err(UseCaseError::Forbidden(
                "You don't have access to this character".to_string(),
            ));
        }

        Ok(self
            .completions
            .list_in_range(character_id, start, end)
            .await?)
    }
}
