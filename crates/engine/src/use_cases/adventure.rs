//! Adventure completion and status.
//!
//! Clients run combat locally and report the outcome; the server validates
//! the rewards, applies them to the character, and persists the result.

use std::sync::Arc;

use serde::Serialize;

use habitquest_domain::{
    AdventureResults, Character, CharacterId, HpChange, UserId, XpGain,
};

use crate::infrastructure::ports::{CharacterRepo, UserRepo};

use super::UseCaseError;

/// Applied (post-validation) rewards for one adventure.
#[derive(Debug, Clone, Serialize)]
pub struct AdventureOutcome {
    pub character_id: CharacterId,
    pub hp: HpChange,
    pub xp: XpGain,
    pub loot_count: usize,
    pub victory: bool,
    pub message: String,
}

pub struct AdventureOps {
    characters: Arc<dyn CharacterRepo>,
    users: Arc<dyn UserRepo>,
}

impl AdventureOps {
    pub fn new(characters: Arc<dyn CharacterRepo>, users: Arc<dyn UserRepo>) -> Self {
        Self { characters, users }
    }

    /// Apply a finished adventure's rewards to an owned character.
    pub async fn complete(
        &self,
        user_id: UserId,
        character_id: CharacterId,
        results: AdventureResults,
    ) -> Result<AdventureOutcome, UseCaseError> {
        let mut character = self.get_owned(user_id, character_id).await?;

        let results = results.validated();

        let hp = character.apply_hp_change(results.hp_change);
        let xp = character.gain_xp(results.xp_gained);
        for item in &results.loot {
            character.inventory.add(item.item_type.clone(), item.quantity.max(0));
        }

        self.characters.save(&character).await?;

        let mut message = if results.victory {
            format!(
                "Adventure completed successfully! Gained {} XP and {} items.",
                results.xp_gained,
                results.loot.len()
            )
        } else {
            "Adventure ended. You fought bravely but were defeated.".to_string()
        };
        if xp.leveled_up() {
            message.push_str(&format!(" You gained {} level(s)!", xp.levels_gained()));
        }

        tracing::info!(
            character_id = %character_id,
            hp_applied = hp.applied,
            xp_gained = results.xp_gained,
            levels_gained = xp.levels_gained(),
            "Adventure completed"
        );

        Ok(AdventureOutcome {
            character_id,
            hp,
            xp,
            loot_count: results.loot.len(),
            victory: results.victory,
            message,
        })
    }

    /// Current adventure-related state of an owned character.
    pub async fn status(
        &self,
        user_id: UserId,
        character_id: CharacterId,
    ) -> Result<Character, UseCaseError> {
        self.get_owned(user_id, character_id).await
    }

    async fn get_owned(
        &self,
        user_id: UserId,
        character_id: CharacterId,
    ) -> Result<Character, UseCaseError> {
        if !self.users.owns_character(user_id, character_id).await? {
            return Err(UseCaseError::Forbidden(
                "You don't have access to this character".to_string(),
            ));
        }
        self.characters
            .get(character_id)
            .await?
            .ok_or(UseCaseError::NotFound("Character"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use habitquest_domain::{AbilityScores, LootItem};
    use mockall::predicate::eq;

    use crate::infrastructure::ports::{MockCharacterRepo, MockUserRepo};

    fn character() -> Character {
        let abilities = AbilityScores::new(10, 10, 14, 10, 10, 10).expect("valid scores");
        Character::new("Hero", abilities).expect("valid character")
    }

    fn ops(stored: Character) -> AdventureOps {
        let character_id = stored.id;

        let mut users = MockUserRepo::new();
        users.expect_owns_character().returning(|_, _| Ok(true));

        let mut characters = MockCharacterRepo::new();
        characters
            .expect_get()
            .with(eq(character_id))
            .returning(move |_| Ok(Some(stored.clone())));
        characters.expect_save().returning(|_| Ok(()));

        AdventureOps::new(Arc::new(characters), Arc::new(users))
    }

    fn results(hp_change: i32, xp_gained: i32, victory: bool) -> AdventureResults {
        AdventureResults {
            hp_change,
            xp_gained,
            loot: vec![
                LootItem {
                    item_type: "coins".to_string(),
                    quantity: 12,
                },
                LootItem {
                    item_type: "potion".to_string(),
                    quantity: 1,
                },
            ],
            victory,
        }
    }

    #[tokio::test]
    async fn victory_applies_hp_xp_and_loot() {
        let stored = character();
        let character_id = stored.id;
        let ops = ops(stored);

        let outcome = ops
            .complete(UserId::new(), character_id, results(-5, 150, true))
            .await
            .expect("complete adventure");

        assert_eq!(outcome.hp.applied, -5);
        assert_eq!(outcome.hp.current_hp, 7);
        assert_eq!(outcome.xp.current_xp, 150);
        assert_eq!(outcome.xp.current_level, 2);
        assert_eq!(outcome.loot_count, 2);
        assert!(outcome.message.contains("150 XP"));
        assert!(outcome.message.contains("1 level(s)"));
    }

    #[tokio::test]
    async fn cheated_rewards_are_capped_before_applying() {
        let stored = character();
        let character_id = stored.id;
        let ops = ops(stored);

        let outcome = ops
            .complete(UserId::new(), character_id, results(0, 99_999, true))
            .await
            .expect("complete adventure");

        // Capped to 500 XP: thresholds 100..=500 all cleared, so level 6.
        assert_eq!(outcome.xp.current_xp, 500);
        assert_eq!(outcome.xp.current_level, 6);
        assert!(outcome.message.contains("500 XP"));
    }

    #[tokio::test]
    async fn defeat_reports_a_defeat_message() {
        let stored = character();
        let character_id = stored.id;
        let ops = ops(stored);

        let outcome = ops
            .complete(UserId::new(), character_id, results(-200, 0, false))
            .await
            .expect("complete adventure");

        assert!(!outcome.victory);
        // HP loss capped at 100, then clamped at zero.
        assert_eq!(outcome.hp.current_hp, 0);
        assert!(outcome.message.contains("defeated"));
    }

    #[tokio::test]
    async fn unknown_character_is_not_found() {
        let mut users = MockUserRepo::new();
        users.expect_owns_character().returning(|_, _| Ok(true));
        let mut characters = MockCharacterRepo::new();
        characters.expect_get().returning(|_| Ok(None));

        let ops = AdventureOps::new(Arc::new(characters), Arc::new(users));
        let err = ops
            .status(UserId::new(), CharacterId::new())
            .await
            .expect_err("missing character");
        assert!(matches!(err, UseCaseError::NotFound(_)));
    }
}
