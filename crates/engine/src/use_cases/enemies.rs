//! Enemy template management and combat instance spawning.

use std::sync::Arc;

use habitquest_domain::{Difficulty, EnemyInstance, EnemyTemplate, EnemyTemplateId};

use crate::infrastructure::ports::EnemyTemplateRepo;

use super::UseCaseError;

/// Fields for a new custom template.
#[derive(Debug, Clone)]
pub struct EnemyTemplateInput {
    pub name: String,
    pub level: i32,
    pub max_hp: i32,
    pub dice_pool: String,
    pub xp_reward: i32,
    pub loot_table: Vec<String>,
    pub description: String,
    pub difficulty: Difficulty,
    pub environment: Vec<String>,
}

/// Partial update; only provided fields change.
#[derive(Debug, Clone, Default)]
pub struct EnemyTemplatePatch {
    pub name: Option<String>,
    pub level: Option<i32>,
    pub max_hp: Option<i32>,
    pub dice_pool: Option<String>,
    pub xp_reward: Option<i32>,
    pub loot_table: Option<Vec<String>>,
    pub description: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub environment: Option<Vec<String>>,
}

impl EnemyTemplatePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.level.is_none()
            && self.max_hp.is_none()
            && self.dice_pool.is_none()
            && self.xp_reward.is_none()
            && self.loot_table.is_none()
            && self.description.is_none()
            && self.difficulty.is_none()
            && self.environment.is_none()
    }
}

pub struct EnemyOps {
    enemies: Arc<dyn EnemyTemplateRepo>,
}

impl EnemyOps {
    pub fn new(enemies: Arc<dyn EnemyTemplateRepo>) -> Self {
        Self { enemies }
    }

    /// Seed the built-in bestiary; safe to call repeatedly.
    pub async fn initialize(&self) -> Result<usize, UseCaseError> {
        Ok(self.enemies.seed(&EnemyTemplate::builtin_bestiary()).await?)
    }

    pub async fn list(&self) -> Result<Vec<EnemyTemplate>, UseCaseError> {
        Ok(self.enemies.list().await?)
    }

    pub async fn get(&self, id: EnemyTemplateId) -> Result<EnemyTemplate, UseCaseError> {
        self.enemies
            .get(id)
            .await?
            .ok_or(UseCaseError::NotFound("Enemy template"))
    }

    pub async fn list_by_difficulty(
        &self,
        difficulty: Difficulty,
    ) -> Result<Vec<EnemyTemplate>, UseCaseError> {
        Ok(self.enemies.list_by_difficulty(difficulty).await?)
    }

    /// Templates that can appear in an environment. The tag list is stored
    /// as JSON, so membership is filtered application-side.
    pub async fn list_by_environment(
        &self,
        environment: &str,
    ) -> Result<Vec<EnemyTemplate>, UseCaseError> {
        let templates = self.enemies.list().await?;
        Ok(templates
            .into_iter()
            .filter(|t| t.appears_in(environment))
            .collect())
    }

    /// Spawn a transient combat instance scaled to the character's level.
    pub async fn spawn_instance(
        &self,
        template_id: EnemyTemplateId,
        character_level: i32,
    ) -> Result<EnemyInstance, UseCaseError> {
        let template = self.get(template_id).await?;
        Ok(template.spawn_instance(character_level.max(1)))
    }

    pub async fn create(&self, input: EnemyTemplateInput) -> Result<EnemyTemplate, UseCaseError> {
        if input.name.trim().is_empty() {
            return Err(UseCaseError::InvalidInput(
                "Enemy name cannot be empty".to_string(),
            ));
        }

        let template = EnemyTemplate {
            id: EnemyTemplateId::new(),
            name: input.name,
            level: input.level,
            max_hp: input.max_hp,
            dice_pool: input.dice_pool,
            xp_reward: input.xp_reward,
            loot_table: input.loot_table,
            description: input.description,
            difficulty: input.difficulty,
            environment: input.environment,
        };
        self.enemies.create(&template).await?;
        Ok(template)
    }

    /// Apply a partial update to an existing template.
    pub async fn update(
        &self,
        id: EnemyTemplateId,
        patch: EnemyTemplatePatch,
    ) -> Result<EnemyTemplate, UseCaseError> {
        if patch.is_empty() {
            return Err(UseCaseError::InvalidInput(
                "No valid updates provided".to_string(),
            ));
        }

        let mut template = self.get(id).await?;
        if let Some(name) = patch.name {
            if name.trim().is_empty() {
                return Err(UseCaseError::InvalidInput(
                    "Enemy name cannot be empty".to_string(),
                ));
            }
            template.name = name;
        }
        if let Some(level) = patch.level {
            template.level = level;
        }
        if let Some(max_hp) = patch.max_hp {
            template.max_hp = max_hp;
        }
        if let Some(dice_pool) = patch.dice_pool {
            template.dice_pool = dice_pool;
        }
        if let Some(xp_reward) = patch.xp_reward {
            template.xp_reward = xp_reward;
        }
        if let Some(loot_table) = patch.loot_table {
            template.loot_table = loot_table;
        }
        if let Some(description) = patch.description {
            template.description = description;
        }
        if let Some(difficulty) = patch.difficulty {
            template.difficulty = difficulty;
        }
        if let Some(environment) = patch.environment {
            template.environment = environment;
        }

        self.enemies.save(&template).await?;
        Ok(template)
    }

    pub async fn delete(&self, id: EnemyTemplateId) -> Result<(), UseCaseError> {
        // Resolve first so a missing template reports 404 rather than
        // silently succeeding.
        self.get(id).await?;
        self.enemies.delete(id).await?;
        Ok(())
    }
}
