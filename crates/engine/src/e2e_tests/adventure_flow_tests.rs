//! E2E tests for enemy templates and the adventure loop.

use habitquest_domain::{AdventureResults, Difficulty, LootItem};

use crate::use_cases::{CreateCharacterInput, EnemyTemplatePatch, UseCaseError};

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

#[tokio::test]
#[ignore = "Requires Docker for Neo4j testcontainer"]
async fn test_bestiary_seeding_is_idempotent() {
    let ctx = E2ETestContext::setup().await.expect("setup should succeed");

    let created = ctx
        .app
        .use_cases
        .enemies
        .initialize()
        .await
        .expect("first seed should succeed");
    assert_eq!(created, 7);

    let created_again = ctx
        .app
        .use_cases
        .enemies
        .initialize()
        .await
        .expect("second seed should succeed");
    assert_eq!(created_again, 0);

    let templates = ctx
        .app
        .use_cases
        .enemies
        .list()
        .await
        .expect("listing should succeed");
    assert_eq!(templates.len(), 7);

    let hard = ctx
        .app
        .use_cases
        .enemies
        .list_by_difficulty(Difficulty::Hard)
        .await
        .expect("difficulty filter should succeed");
    assert_eq!(hard.len(), 2);

    let in_swamps = ctx
        .app
        .use_cases
        .enemies
        .list_by_environment("swamps")
        .await
        .expect("environment filter should succeed");
    assert!(in_swamps.iter().any(|t| t.name == "Troll"));
}

#[tokio::test]
#[ignore = "Requires Docker for Neo4j testcontainer"]
async fn test_template_crud_and_instance_spawning() {
    let ctx = E2ETestContext::setup().await.expect("setup should succeed");

    ctx.app
        .use_cases
        .enemies
        .initialize()
        .await
        .expect("seed should succeed");

    let goblin = ctx
        .app
        .use_cases
        .enemies
        .list()
        .await
        .expect("listing should succeed")
        .into_iter()
        .find(|t| t.name == "Goblin")
        .expect("goblin should be seeded");

    // Level 6 challenger: modifier 3 -> +10 HP, +20 XP.
    let instance = ctx
        .app
        .use_cases
        .enemies
        .spawn_instance(goblin.id, 6)
        .await
        .expect("spawning should succeed");
    assert_eq!(instance.max_hp, goblin.max_hp + 10);
    assert_eq!(instance.xp_reward, goblin.xp_reward + 20);

    // Patch, then verify persistence.
    let patched = ctx
        .app
        .use_cases
        .enemies
        .update(
            goblin.id,
            EnemyTemplatePatch {
                max_hp: Some(9),
                ..Default::default()
            },
        )
        .await
        .expect("patch should succeed");
    assert_eq!(patched.max_hp, 9);

    let fetched = ctx
        .app
        .use_cases
        .enemies
        .get(goblin.id)
        .await
        .expect("fetch should succeed");
    assert_eq!(fetched.max_hp, 9);
    assert_eq!(fetched.loot_table, goblin.loot_table);

    // Delete, then it is gone.
    ctx.app
        .use_cases
        .enemies
        .delete(goblin.id)
        .await
        .expect("delete should succeed");
    let err = ctx
        .app
        .use_cases
        .enemies
        .get(goblin.id)
        .await
        .expect_err("deleted template is gone");
    assert!(matches!(err, UseCaseError::NotFound(_)));
}

#[tokio::test]
#[ignore = "Requires Docker for Neo4j testcontainer"]
async fn test_adventure_rewards_persist_on_character() {
    let ctx = E2ETestContext::setup().await.expect("setup should succeed");

    let (user, _) = ctx
        .register_user("adventurer@example.com")
        .await
        .expect("registration should succeed");
    let character = ctx
        .app
        .use_cases
        .characters
        .create(&user, character_input("Brynn"))
        .await
        .expect("character creation should succeed");

    let outcome = ctx
        .app
        .use_cases
        .adventure
        .complete(
            user.id,
            character.id,
            AdventureResults {
                hp_change: -5,
                xp_gained: 150,
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
                victory: true,
            },
        )
        .await
        .expect("adventure completion should succeed");

    assert_eq!(outcome.hp.current_hp, 7);
    assert_eq!(outcome.xp.current_level, 2);

    let status = ctx
        .app
        .use_cases
        .adventure
        .status(user.id, character.id)
        .await
        .expect("status should succeed");
    assert_eq!(status.current_hp, 7);
    assert_eq!(status.current_xp, 150);
    assert_eq!(status.level, 2);
    assert_eq!(status.inventory.quantity("coins"), 12);
    assert_eq!(status.inventory.quantity("potion"), 1);
    assert!(status.can_adventure());

    // A second adventure stacks inventory and can knock the character out.
    ctx.app
        .use_cases
        .adventure
        .complete(
            user.id,
            character.id,
            AdventureResults {
                hp_change: -50,
                xp_gained: 0,
                loot: vec![LootItem {
                    item_type: "coins".to_string(),
                    quantity: 3,
                }],
                victory: false,
            },
        )
        .await
        .expect("second adventure should succeed");

    let status = ctx
        .app
        .use_cases
        .adventure
        .status(user.id, character.id)
        .await
        .expect("status should succeed");
    assert_eq!(status.current_hp, 0);
    assert_eq!(status.inventory.quantity("coins"), 15);
    assert!(!status.can_adventure());
}
