//! Character CRUD, ownership checks, and habit-point crediting.

use std::sync::Arc;

use habitquest_domain::{
    AbilityScores, Attribute, Character, CharacterId, CharacterSummary, User, UserId,
};

use crate::infrastructure::ports::{CharacterRepo, UserRepo};

use super::UseCaseError;

/// Scores default to 10 when the client omits them.
#[derive(Debug, Clone)]
pub struct CreateCharacterInput {
    pub name: String,
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
    pub image_data: Option<String>,
}

pub struct CharacterOps {
    characters: Arc<dyn CharacterRepo>,
    users: Arc<dyn UserRepo>,
}

impl CharacterOps {
    pub fn new(characters: Arc<dyn CharacterRepo>, users: Arc<dyn UserRepo>) -> Self {
        Self { characters, users }
    }

    /// Create a character for the caller and link ownership.
    pub async fn create(
        &self,
        user: &User,
        input: CreateCharacterInput,
    ) -> Result<Character, UseCaseError> {
        let owned = self.users.list_characters(user.id).await?.len();
        if !user.can_create_character(owned) {
            return Err(UseCaseError::Forbidden(
                "Free users can only create up to 3 characters. Upgrade to premium for unlimited characters.".to_string(),
            ));
        }

        let abilities = AbilityScores::new(
            input.strength,
            input.dexterity,
            input.constitution,
            input.intelligence,
            input.wisdom,
            input.charisma,
        )?;
        let mut character = Character::new(input.name, abilities)?;
        if let Some(image_data) = input.image_data {
            character = character.with_image(image_data)?;
        }

        self.characters.create(&character).await?;

        if let Err(e) = self.users.link_character(user.id, character.id).await {
            // Don't leave an orphaned vertex behind.
            if let Err(cleanup) = self.characters.delete(character.id).await {
                tracing::warn!(
                    character_id = %character.id,
                    error = %cleanup,
                    "Failed to clean up character after ownership link failure"
                );
            }
            return Err(e.into());
        }

        tracing::info!(character_id = %character.id, user_id = %user.id, "Created character");
        Ok(character)
    }

    /// Summaries of every character the user owns.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<CharacterSummary>, UseCaseError> {
        Ok(self.users.list_characters(user_id).await?)
    }

    /// Fetch a character the user owns.
    pub async fn get_owned(
        &self,
        user_id: UserId,
        character_id: CharacterId,
    ) -> Result<Character, UseCaseError> {
        self.ensure_ownership(user_id, character_id).await?;
        self.characters
            .get(character_id)
            .await?
            .ok_or(UseCaseError::NotFound("Character"))
    }

    /// Replace the character's avatar image.
    pub async fn update_image(
        &self,
        user_id: UserId,
        character_id: CharacterId,
        image_data: String,
    ) -> Result<(), UseCaseError> {
        Character::validate_image_data(&image_data)?;

        let mut character = self.get_owned(user_id, character_id).await?;
        character.image_data = Some(image_data);
        self.characters.save(&character).await?;
        Ok(())
    }

    /// Credit habit points toward one ability.
    pub async fn add_habit_points(
        &self,
        user_id: UserId,
        character_id: CharacterId,
        attribute: &str,
        points: i32,
    ) -> Result<Character, UseCaseError> {
        let attribute = attribute
            .parse::<Attribute>()
            .map_err(UseCaseError::InvalidInput)?;

        let mut character = self.get_owned(user_id, character_id).await?;
        character.add_habit_points(attribute, points);
        self.characters.save(&character).await?;
        Ok(character)
    }

    /// Delete a character the user owns (habits and completions included).
    pub async fn delete(
        &self,
        user_id: UserId,
        character_id: CharacterId,
    ) -> Result<(), UseCaseError> {
        self.ensure_ownership(user_id, character_id).await?;
        self.characters.delete(character_id).await?;
        tracing::info!(character_id = %character_id, "Deleted character");
        Ok(())
    }

    async fn ensure_ownership(
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mockall::predicate::eq;

    use crate::infrastructure::ports::{MockCharacterRepo, MockUserRepo, RepoError};

    fn free_user() -> User {
        User::new("a@example.com", "$argon2id$stub", Utc::now())
    }

    fn input(name: &str) -> CreateCharacterInput {
        CreateCharacterInput {
            name: name.to_string(),
            strength: 10,
            dexterity: 12,
            constitution: 14,
            intelligence: 8,
            wisdom: 13,
            charisma: 15,
            image_data: None,
        }
    }

    fn summary(name: &str) -> CharacterSummary {
        CharacterSummary {
            id: CharacterId::new(),
            name: name.to_string(),
            level: 1,
            current_xp: 0,
            image_data: None,
        }
    }

    #[tokio::test]
    async fn create_links_ownership() {
        let user = free_user();
        let user_id = user.id;

        let mut users = MockUserRepo::new();
        users
            .expect_list_characters()
            .with(eq(user_id))
            .returning(|_| Ok(vec![]));
        users
            .expect_link_character()
            .withf(move |uid, _| *uid == user_id)
            .returning(|_, _| Ok(()));

        let mut characters = MockCharacterRepo::new();
        characters.expect_create().returning(|_| Ok(()));

        let ops = CharacterOps::new(Arc::new(characters), Arc::new(users));
        let character = ops.create(&user, input("Hero")).await.expect("create");
        assert_eq!(character.name, "Hero");
        assert_eq!(character.level, 1);
        // CON 14 -> +2 -> 12 HP.
        assert_eq!(character.max_hp, 12);
    }

    #[tokio::test]
    async fn create_enforces_free_tier_limit() {
        let user = free_user();

        let mut users = MockUserRepo::new();
        users
            .expect_list_characters()
            .returning(|_| Ok(vec![summary("A"), summary("B"), summary("C")]));

        let ops = CharacterOps::new(Arc::new(MockCharacterRepo::new()), Arc::new(users));
        let err = ops
            .create(&user, input("Fourth"))
            .await
            .expect_err("limit reached");
        assert!(matches!(err, UseCaseError::Forbidden(_)));
    }

    #[tokio::test]
    async fn premium_users_skip_the_limit() {
        let mut user = free_user();
        user.is_premium = true;

        let mut users = MockUserRepo::new();
        users
            .expect_list_characters()
            .returning(|_| Ok((0..10).map(|i| summary(&format!("c{i}"))).collect()));
        users.expect_link_character().returning(|_, _| Ok(()));

        let mut characters = MockCharacterRepo::new();
        characters.expect_create().returning(|_| Ok(()));

        let ops = CharacterOps::new(Arc::new(characters), Arc::new(users));
        assert!(ops.create(&user, input("Eleventh")).await.is_ok());
    }

    #[tokio::test]
    async fn create_rolls_back_when_linking_fails() {
        let user = free_user();

        let mut users = MockUserRepo::new();
        users.expect_list_characters().returning(|_| Ok(vec![]));
        users
            .expect_link_character()
            .returning(|_, _| Err(RepoError::database("link character", "gone")));

        let mut characters = MockCharacterRepo::new();
        characters.expect_create().returning(|_| Ok(()));
        characters.expect_delete().times(1).returning(|_| Ok(()));

        let ops = CharacterOps::new(Arc::new(characters), Arc::new(users));
        assert!(ops.create(&user, input("Hero")).await.is_err());
    }

    #[tokio::test]
    async fn get_owned_rejects_foreign_characters() {
        let mut users = MockUserRepo::new();
        users.expect_owns_character().returning(|_, _| Ok(false));

        let ops = CharacterOps::new(Arc::new(MockCharacterRepo::new()), Arc::new(users));
        let err = ops
            .get_owned(UserId::new(), CharacterId::new())
            .await
            .expect_err("not the owner");
        assert!(matches!(err, UseCaseError::Forbidden(_)));
    }

    #[tokio::test]
    async fn add_habit_points_updates_the_counter() {
        let abilities = AbilityScores::new(10, 10, 10, 10, 10, 10).expect("valid scores");
        let stored = Character::new("Hero", abilities).expect("valid character");
        let character_id = stored.id;

        let mut users = MockUserRepo::new();
        users.expect_owns_character().returning(|_, _| Ok(true));

        let mut characters = MockCharacterRepo::new();
        characters
            .expect_get()
            .with(eq(character_id))
            .returning(move |_| Ok(Some(stored.clone())));
        characters
            .expect_save()
            .withf(|c| c.abilities.wisdom.habit_points() == 7)
            .times(1)
            .returning(|_| Ok(()));

        let ops = CharacterOps::new(Arc::new(characters), Arc::new(users));
        let updated = ops
            .add_habit_points(UserId::new(), character_id, "wisdom", 7)
            .await
            .expect("credit points");
        assert_eq!(updated.abilities.wisdom.habit_points(), 7);
        assert_eq!(updated.abilities.wisdom.habit_bonus(), 1);
    }

    #[tokio::test]
    async fn add_habit_points_rejects_unknown_attribute() {
        let mut users = MockUserRepo::new();
        users.expect_owns_character().returning(|_, _| Ok(true));

        let ops = CharacterOps::new(Arc::new(MockCharacterRepo::new()), Arc::new(users));
        let err = ops
            .add_habit_points(UserId::new(), CharacterId::new(), "luck", 1)
            .await
            .expect_err("unknown attribute");
        assert!(matches!(err, UseCaseError::InvalidInput(_)));
    }
}
