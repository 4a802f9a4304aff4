//! Habit creation, listing, and deletion.

use std::sync::Arc;

use habitquest_domain::{Attribute, CharacterId, Habit, HabitId, HabitWithCompletions, UserId};

use crate::infrastructure::ports::{HabitRepo, UserRepo};

use super::UseCaseError;

pub struct HabitOps {
    habits: Arc<dyn HabitRepo>,
    users: Arc<dyn UserRepo>,
}

impl HabitOps {
    pub fn new(habits: Arc<dyn HabitRepo>, users: Arc<dyn UserRepo>) -> Self {
        Self { habits, users }
    }

    /// Create a habit under one of the caller's characters.
    pub async fn create(
        &self,
        user_id: UserId,
        character_id: CharacterId,
        name: String,
        attribute: &str,
        description: Option<String>,
    ) -> Result<Habit, UseCaseError> {
        self.ensure_character_ownership(user_id, character_id)
            .await?;

        let attribute = attribute
            .parse::<Attribute>()
            .map_err(UseCaseError::InvalidInput)?;
        let habit = Habit::new(character_id, name, attribute, description)?;
        self.habits.create(&habit).await?;

        tracing::info!(habit_id = %habit.id, character_id = %character_id, "Created habit");
        Ok(habit)
    }

    /// All habits of an owned character, with completion dates.
    pub async fn list_for_character(
        &self,
        user_id: UserId,
        character_id: CharacterId,
    ) -> Result<Vec<HabitWithCompletions>, UseCaseError> {
        self.ensure_character_ownership(user_id, character_id)
            .await?;
        Ok(self.habits.list_for_character(character_id).await?)
    }

    /// Delete a habit reachable through one of the caller's characters.
    pub async fn delete(&self, user_id: UserId, habit_id: HabitId) -> Result<(), UseCaseError> {
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

        self.habits.delete(habit_id).await?;
        tracing::info!(habit_id = %habit_id, "Deleted habit");
        Ok(())
    }

    async fn ensure_character_ownership(
        &self,
        user_id: UserId,
        character_id: CharacterId,
    ) -> Result<(), UseCaseError> {
        if self.users.owns_character(user_id, character_id).await? {
            Ok(())
        } else {
            Err(UseCaseError::Forbidden(
                "You don't have access to this character".to_string(),
            ))
        }
    }
}
