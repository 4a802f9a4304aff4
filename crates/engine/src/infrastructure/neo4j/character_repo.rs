//! Neo4j character repository implementation.
//!
//! # Graph-First Design
//!
//! Ability scores and their habit-point counters are flat node properties
//! (one pair per ability) so single-field updates stay cheap to inspect in
//! the database. The loot inventory is a JSON map property. Relationships:
//! - Ownership: `(User)-[:OWNS]->(Character)` (managed by the user repo)
//! - Habits: `(Character)-[:HAS_HABIT]->(Habit)`

use async_trait::async_trait;
use neo4rs::{query, Graph, Node, Query};

use habitquest_domain::{
    AbilityScores, Attribute, AttributeScore, Character, CharacterId, Inventory,
};

use super::helpers::{parse_typed_id, NodeExt};
use crate::infrastructure::ports::{CharacterRepo, RepoError};

/// Repository for Character operations.
pub struct Neo4jCharacterRepo {
    graph: Graph,
}

impl Neo4jCharacterRepo {
    pub fn new(graph: Graph) -> Self {
        Self { graph }
    }

    /// Convert a Neo4j node to a Character entity.
    fn node_to_character(node: &Node) -> Result<Character, RepoError> {
        let ability = |attr: Attribute| -> Result<AttributeScore, RepoError> {
            let base = node.get_i64(attr.as_str())? as i32;
            let points = node.get_i64_or(&format!("{attr}_habit_points"), 0) as i32;
            AttributeScore::with_habit_points(base, points)
                .map_err(|e| RepoError::database("parse", e))
        };

        let abilities = AbilityScores {
            strength: ability(Attribute::Strength)?,
            dexterity: ability(Attribute::Dexterity)?,
            constitution: ability(Attribute::Constitution)?,
            intelligence: ability(Attribute::Intelligence)?,
            wisdom: ability(Attribute::Wisdom)?,
            charisma: ability(Attribute::Charisma)?,
        };

        Ok(Character {
            id: parse_typed_id(node, "id")?,
            name: node.get_string("name")?,
            level: node.get_i64_or("level", 1) as i32,
            current_xp: node.get_i64_or("current_xp", 0) as i32,
            current_hp: node.get_i64_or("current_hp", 0) as i32,
            max_hp: node.get_i64_or("max_hp", 1) as i32,
            image_data: node.get_optional_string("image_data"),
            abilities,
            inventory: node.get_json_or_default::<Inventory>("inventory"),
        })
    }

    /// Bind every mutable character property onto a query.
    fn bind_character_props(mut q: Query, character: &Character) -> Result<Query, RepoError> {
        let inventory_json = serde_json::to_string(&character.inventory)
            .map_err(|e| RepoError::serialization(e.to_string()))?;

        q = q
            .param("name", character.name.clone())
            .param("level", character.level as i64)
            .param("current_xp", character.current_xp as i64)
            .param("current_hp", character.current_hp as i64)
            .param("max_hp", character.max_hp as i64)
            .param(
                "image_data",
                character.image_data.clone().unwrap_or_default(),
            )
            .param("inventory", inventory_json);

        for (attr, score) in character.abilities.iter() {
            q = q
                .param(attr.as_str(), score.base_score() as i64)
                .param(
                    format!("{attr}_habit_points").as_str(),
                    score.habit_points() as i64,
                );
        }

        Ok(q)
    }
}

#[async_trait]
impl CharacterRepo for Neo4jCharacterRepo {
    async fn create(&self, character: &Character) -> Result<(), RepoError> {
        let q = query(
            "CREATE (c:Character {
                id: $id,
                name: $name,
                level: $level,
                current_xp: $current_xp,
                current_hp: $current_hp,
                max_hp: $max_hp,
                image_data: $image_data,
                inventory: $inventory,
                strength: $strength,
                strength_habit_points: $strength_habit_points,
                dexterity: $dexterity,
                dexterity_habit_points: $dexterity_habit_points,
                constitution: $constitution,
                constitution_habit_points: $constitution_habit_points,
                intelligence: $intelligence,
                intelligence_habit_points: $intelligence_habit_points,
                wisdom: $wisdom,
                wisdom_habit_points: $wisdom_habit_points,
                charisma: $charisma,
                charisma_habit_points: $charisma_habit_points
            })",
        )
        .param("id", character.id.to_string());

        let q = Self::bind_character_props(q, character)?;

        self.graph
            .run(q)
            .await
            .map_err(|e| RepoError::database("create character", e))?;
        tracing::debug!("Created character: {}", character.name);
        Ok(())
    }

    async fn get(&self, id: CharacterId) -> Result<Option<Character>, RepoError> {
        let q = query("MATCH (c:Character {id: $id}) RETURN c").param("id", id.to_string());

        let mut result = self
            .graph
            .execute(q)
            .await
            .map_err(|e| RepoError::database("get character", e))?;

        match result
            .next()
            .await
            .map_err(|e| RepoError::database("get character", e))?
        {
            Some(row) => {
                let node: Node = row
                    .get("c")
                    .map_err(|e| RepoError::database("get character", e))?;
                Ok(Some(Self::node_to_character(&node)?))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, character: &Character) -> Result<(), RepoError> {
        let q = query(
            "MATCH (c:Character {id: $id})
            SET c.name = $name,
                c.level = $level,
                c.current_xp = $current_xp,
                c.current_hp = $current_hp,
                c.max_hp = $max_hp,
                c.image_data = $image_data,
                c.inventory = $inventory,
                c.strength = $strength,
                c.strength_habit_points = $strength_habit_points,
                c.dexterity = $dexterity,
                c.dexterity_habit_points = $dexterity_habit_points,
                c.constitution = $constitution,
                c.constitution_habit_points = $constitution_habit_points,
                c.intelligence = $intelligence,
                c.intelligence_habit_points = $intelligence_habit_points,
                c.wisdom = $wisdom,
                c.wisdom_habit_points = $wisdom_habit_points,
                c.charisma = $charisma,
                c.charisma_habit_points = $charisma_habit_points
            RETURN c.id AS id",
        )
        .param("id", character.id.to_string());

        let q = Self::bind_character_props(q, character)?;

        let mut result = self
            .graph
            .execute(q)
            .await
            .map_err(|e| RepoError::database("save character", e))?;

        if result
            .next()
            .await
            .map_err(|e| RepoError::database("save character", e))?
            .is_none()
        {
            return Err(RepoError::not_found("Character", character.id));
        }

        Ok(())
    }

    async fn delete(&self, id: CharacterId) -> Result<(), RepoError> {
        // Habits and their completions go with the character.
        let q = query(
            "MATCH (c:Character {id: $id})
            OPTIONAL MATCH (c)-[:HAS_HABIT]->(h:Habit)
            OPTIONAL MATCH (h)-[:HAS_COMPLETION]->(hc:HabitCompletion)
            DETACH DELETE c, h, hc",
        )
        .param("id", id.to_string());

        self.graph
            .run(q)
            .await
            .map_err(|e| RepoError::database("delete character", e))
    }
}
