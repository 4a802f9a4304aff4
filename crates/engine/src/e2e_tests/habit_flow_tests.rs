//! E2E tests for the account/character/habit lifecycle.

use chrono::NaiveDate;

use habitquest_domain::Attribute;

use crate::use_cases::{CompletionAction, CreateCharacterInput, UseCaseError};

use super::E2ETestContext;

fn character_input(name: &str) -> CreateCharacterInput {
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

fn date(s: &str) -> NaiveDate {
    s.parse().expect("valid date literal")
}

#[tokio::test]
#[ignore = "Requires Docker for Neo4j testcontainer"]
async fn test_auth_and_character_round_trip() {
    let ctx = E2ETestContext::setup().await.expect("setup should succeed");

    let (user, _) = ctx
        .register_user("hero@example.com")
        .await
        .expect("registration should succeed");

    // Duplicate registration is a conflict.
    let dup = ctx
        .app
        .use_cases
        .auth
        .register("hero@example.com", "password123", "password123")
        .await;
    assert!(matches!(dup, Err(UseCaseError::Conflict(_))));

    // Login round-trips.
    ctx.app
        .use_cases
        .auth
        .login("hero@example.com", "password123")
        .await
        .expect("login should succeed");

    // Character creation persists scores and derived HP.
    let character = ctx
        .app
        .use_cases
        .characters
        .create(&user, character_input("Brynn"))
        .await
        .expect("character creation should succeed");

    let fetched = ctx
        .app
        .use_cases
        .characters
        .get_owned(user.id, character.id)
        .await
        .expect("owner can read the character");
    assert_eq!(fetched.name, "Brynn");
    assert_eq!(fetched.abilities.constitution.base_score(), 14);
    assert_eq!(fetched.max_hp, 12);
    assert_eq!(fetched.current_hp, 12);

    let summaries = ctx
        .app
        .use_cases
        .characters
        .list_for_user(user.id)
        .await
        .expect("listing should succeed");
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].name, "Brynn");
}

#[tokio::test]
#[ignore = "Requires Docker for Neo4j testcontainer"]
async fn test_ownership_enforced_across_users() {
    let ctx = E2ETestContext::setup().await.expect("setup should succeed");

    let (owner, _) = ctx
        .register_user("owner@example.com")
        .await
        .expect("registration should succeed");
    let (intruder, _) = ctx
        .register_user("intruder@example.com")
        .await
        .expect("registration should succeed");

    let character = ctx
        .app
        .use_cases
        .characters
        .create(&owner, character_input("Brynn"))
        .await
        .expect("character creation should succeed");

    let err = ctx
        .app
        .use_cases
        .characters
        .get_owned(intruder.id, character.id)
        .await
        .expect_err("foreign access must be rejected");
    assert!(matches!(err, UseCaseError::Forbidden(_)));
}

#[tokio::test]
#[ignore = "Requires Docker for Neo4j testcontainer"]
async fn test_free_tier_limit_end_to_end() {
    let ctx = E2ETestContext::setup().await.expect("setup should succeed");

    let (user, _) = ctx
        .register_user("collector@example.com")
        .await
        .expect("registration should succeed");

    for name in ["One", "Two", "Three"] {
        ctx.app
            .use_cases
            .characters
            .create(&user, character_input(name))
            .await
            .expect("first three characters fit the free tier");
    }

    let err = ctx
        .app
        .use_cases
        .characters
        .create(&user, character_input("Four"))
        .await
        .expect_err("fourth character exceeds the free tier");
    assert!(matches!(err, UseCaseError::Forbidden(_)));
}

#[tokio::test]
#[ignore = "Requires Docker for Neo4j testcontainer"]
async fn test_habit_completion_lifecycle() {
    let ctx = E2ETestContext::setup().await.expect("setup should succeed");

    let (user, _) = ctx
        .register_user("runner@example.com")
        .await
        .expect("registration should succeed");
    let character = ctx
        .app
        .use_cases
        .characters
        .create(&user, character_input("Brynn"))
        .await
        .expect("character creation should succeed");

    let habit = ctx
        .app
        .use_cases
        .habits
        .create(
            user.id,
            character.id,
            "Morning run".to_string(),
            "constitution",
            Some("5k before breakfast".to_string()),
        )
        .await
        .expect("habit creation should succeed");
    assert_eq!(habit.attribute, Attribute::Constitution);

    let monday = date("2026-08-03");
    let tuesday = date("2026-08-04");

    // Mark two days; re-marking one is idempotent.
    let completions = &ctx.app.use_cases.completions;
    assert_eq!(
        completions
            .mark(user.id, habit.id, Some(monday), true)
            .await
            .expect("mark monday"),
        CompletionAction::Created
    );
    assert_eq!(
        completions
            .mark(user.id, habit.id, Some(tuesday), true)
            .await
            .expect("mark tuesday"),
        CompletionAction::Created
    );
    assert_eq!(
        completions
            .mark(user.id, habit.id, Some(monday), true)
            .await
            .expect("re-mark monday"),
        CompletionAction::AlreadyComplete
    );

    let habits = ctx
        .app
        .use_cases
        .habits
        .list_for_character(user.id, character.id)
        .await
        .expect("listing should succeed");
    assert_eq!(habits.len(), 1);
    assert_eq!(habits[0].completed_dates, vec![monday, tuesday]);

    // Range query sees both days, narrowed range sees one.
    let week = ctx
        .app
        .use_cases
        .completions
        .list_in_range(user.id, character.id, monday, date("2026-08-09"))
        .await
        .expect("range query should succeed");
    assert_eq!(week.len(), 2);
    assert!(week.iter().all(|r| r.habit_name == "Morning run"));

    let just_monday = ctx
        .app
        .use_cases
        .completions
        .list_in_range(user.id, character.id, monday, monday)
        .await
        .expect("range query should succeed");
    assert_eq!(just_monday.len(), 1);

    // Un-mark monday; it disappears from the log.
    assert_eq!(
        completions
            .mark(user.id, habit.id, Some(monday), false)
            .await
            .expect("unmark monday"),
        CompletionAction::Removed
    );
    assert_eq!(
        completions
            .mark(user.id, habit.id, Some(monday), false)
            .await
            .expect("re-unmark monday"),
        CompletionAction::NothingToRemove
    );

    let habits = ctx
        .app
        .use_cases
        .habits
        .list_for_character(user.id, character.id)
        .await
        .expect("listing should succeed");
    assert_eq!(habits[0].completed_dates, vec![tuesday]);

    // Deleting the habit removes it and its completions.
    ctx.app
        .use_cases
        .habits
        .delete(user.id, habit.id)
        .await
        .expect("habit deletion should succeed");
    let habits = ctx
        .app
        .use_cases
        .habits
        .list_for_character(user.id, character.id)
        .await
        .expect("listing should succeed");
    assert!(habits.is_empty());
}

#[tokio::test]
#[ignore = "Requires Docker for Neo4j testcontainer"]
async fn test_habit_points_feed_attribute_bonuses() {
    let ctx = E2ETestContext::setup().await.expect("setup should succeed");

    let (user, _) = ctx
        .register_user("points@example.com")
        .await
        .expect("registration should succeed");
    let character = ctx
        .app
        .use_cases
        .characters
        .create(&user, character_input("Brynn"))
        .await
        .expect("character creation should succeed");

    let updated = ctx
        .app
        .use_cases
        .characters
        .add_habit_points(user.id, character.id, "wisdom", 11)
        .await
        .expect("crediting points should succeed");
    // WIS 13 -> +1 base; 11 points -> +2 habit bonus.
    assert_eq!(updated.abilities.wisdom.habit_points(), 11);
    assert_eq!(updated.abilities.wisdom.total_bonus(), 3);

    // Persisted, not just in memory.
    let fetched = ctx
        .app
        .use_cases
        .characters
        .get_owned(user.id, character.id)
        .await
        .expect("owner can read the character");
    assert_eq!(fetched.abilities.wisdom.habit_points(), 11);
}
