//! Enemy templates and scaled combat instances.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ids::EnemyTemplateId;
use crate::value_objects::Difficulty;

/// Static definition of a combat opponent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub id: EnemyTemplateId,
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

/// A transient, scaled copy of a template spawned for one fight.
/// Instances are never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyInstance {
    pub instance_id: Uuid,
    pub template_id: EnemyTemplateId,
    pub name: String,
    pub level: i32,
    pub max_hp: i32,
    pub current_hp: i32,
    pub dice_pool: String,
    pub xp_reward: i32,
    pub loot_table: Vec<String>,
    pub description: String,
    pub difficulty: Difficulty,
    pub environment: Vec<String>,
}

impl EnemyTemplate {
    /// Spawn a combat instance scaled to the challenger's level.
    ///
    /// The modifier is `max(1, level / 2)`; each step past the first adds
    /// +5 HP, +10 XP reward, and +1 enemy level.
    pub fn spawn_instance(&self, character_level: i32) -> EnemyInstance {
        let level_modifier = (character_level / 2).max(1);
        let scaled_hp = self.max_hp + (level_modifier - 1) * 5;
        let scaled_xp = self.xp_reward + (level_modifier - 1) * 10;

        EnemyInstance {
            instance_id: Uuid::new_v4(),
            template_id: self.id,
            name: self.name.clone(),
            level: self.level + (level_modifier - 1).max(0),
            max_hp: scaled_hp,
            current_hp: scaled_hp,
            dice_pool: self.dice_pool.clone(),
            xp_reward: scaled_xp,
            loot_table: self.loot_table.clone(),
            description: self.description.clone(),
            difficulty: self.difficulty,
            environment: self.environment.clone(),
        }
    }

    pub fn appears_in(&self, environment: &str) -> bool {
        self.environment.iter().any(|e| e == environment)
    }

    /// The built-in bestiary seeded on first run.
    pub fn builtin_bestiary() -> Vec<EnemyTemplate> {
        let template = |name: &str,
                        level: i32,
                        max_hp: i32,
                        dice_pool: &str,
                        xp_reward: i32,
                        loot: &[&str],
                        description: &str,
                        difficulty: Difficulty,
                        environment: &[&str]| {
            EnemyTemplate {
                id: EnemyTemplateId::new(),
                name: name.to_string(),
                level,
                max_hp,
                dice_pool: dice_pool.to_string(),
                xp_reward,
                loot_table: loot.iter().map(|s| s.to_string()).collect(),
                description: description.to_string(),
                difficulty,
                environment: environment.iter().map(|s| s.to_string()).collect(),
            }
        };

        vec![
            template(
                "Goblin",
                1,
                7,
                "2d4",
                25,
                &["potion", "coins"],
                "A small, green-skinned humanoid with sharp teeth and cunning eyes.",
                Difficulty::Easy,
                &["forest", "caves", "ruins"],
            ),
            template(
                "Orc",
                2,
                15,
                "3d4",
                50,
                &["weapon", "coins", "potion"],
                "A brutish humanoid with gray skin and prominent tusks.",
                Difficulty::Medium,
                &["mountains", "ruins", "strongholds"],
            ),
            template(
                "Skeleton",
                1,
                13,
                "2d4+1",
                30,
                &["bones", "coins"],
                "The animated bones of a long-dead warrior.",
                Difficulty::Easy,
                &["crypts", "ruins", "battlefields"],
            ),
            template(
                "Troll",
                5,
                84,
                "6d4+2",
                200,
                &["rare_weapon", "gold", "gem"],
                "A massive, regenerating creature with claws and an insatiable hunger.",
                Difficulty::Hard,
                &["swamps", "mountains", "deep_caves"],
            ),
            template(
                "Dark Knight",
                4,
                65,
                "4d6",
                150,
                &["armor"],
                "A fallen paladin clad in blackened plate armor.",
                Difficulty::Hard,
                &["swamps", "mountains", "deep_caves"],
            ),
            template(
                "Young Dragon",
                5,
                84,
                "2d12",
                400,
                &["dragon_scale", "gold", "gem"],
                "A young but powerful dragon with scales that gleam like metal.",
                Difficulty::Legendary,
                &["mountains", "deep_caves", "ancient_ruins"],
            ),
            template(
                "Ancient Dragon",
                10,
                200,
                "20d12",
                4000,
                &["dragon_scale", "gold", "gem"],
                "A massive, ancient dragon with scales like molten metal.",
                Difficulty::Legendary,
                &["mountains", "deep_caves", "ancient_ruins"],
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goblin() -> EnemyTemplate {
        EnemyTemplate::builtin_bestiary()
            .into_iter()
            .find(|t| t.name == "Goblin")
            .expect("bestiary contains a goblin")
    }

    #[test]
    fn low_level_characters_get_unscaled_instances() {
        let template = goblin();
        for level in [1, 2, 3] {
            let instance = template.spawn_instance(level);
            assert_eq!(instance.max_hp, template.max_hp);
            assert_eq!(instance.current_hp, template.max_hp);
            assert_eq!(instance.xp_reward, template.xp_reward);
            assert_eq!(instance.level, template.level);
        }
    }

    #[test]
    fn scaling_steps_with_character_level() {
        let template = goblin();
        // Level 6 -> modifier 3 -> +10 HP, +20 XP, +2 levels.
        let instance = template.spawn_instance(6);
        assert_eq!(instance.max_hp, 17);
        assert_eq!(instance.xp_reward, 45);
        assert_eq!(instance.level, 3);
    }

    #[test]
    fn instances_get_fresh_ids() {
        let template = goblin();
        let a = template.spawn_instance(1);
        let b = template.spawn_instance(1);
        assert_ne!(a.instance_id, b.instance_id);
        assert_eq!(a.template_id, template.id);
    }

    #[test]
    fn environment_lookup_matches_tags() {
        let template = goblin();
        assert!(template.appears_in("caves"));
        assert!(!template.appears_in("swamps"));
    }

    #[test]
    fn bestiary_has_the_seven_builtins() {
        let bestiary = EnemyTemplate::builtin_bestiary();
        assert_eq!(bestiary.len(), 7);
        assert!(bestiary.iter().any(|t| t.name == "Ancient Dragon"));
    }
}
