//! Neo4j habit repository implementation.
//!
//! Habits hang off their character via `(Character)-[:HAS_HABIT]->(Habit)`;
//! completions hang off the habit via `(Habit)-[:HAS_COMPLETION]->`.

use async_trait::async_trait;
use chrono::NaiveDate;
use neo4rs::{query, Graph, Node};

use habitquest_domain::{Attribute, CharacterId, Habit, HabitId, HabitWithCompletions};

use super::helpers::{parse_typed_id, NodeExt};
use crate::infrastructure::ports::{HabitRepo, RepoError};

/// Repository for Habit operations.
pub struct Neo4jHabitRepo {
    graph: Graph,
}

impl Neo4jHabitRepo {
    pub fn new(graph: Graph) -> Self {
        Self { graph }
    }

    fn node_to_habit(node: &Node) -> Result<Habit, RepoError> {
        let attribute = node
            .get_string("attribute")?
            .parse::<Attribute>()
            .map_err(|e| RepoError::database("parse", e))?;

        Ok(Habit {
            id: parse_typed_id(node, "id")?,
            character_id: parse_typed_id(node, "character_id")?,
            name: node.get_string("name")?,
            attribute,
            description: node.get_optional_string("description"),
        })
    }
}

#[async_trait]
impl HabitRepo for Neo4jHabitRepo {
    async fn create(&self, habit: &Habit) -> Result<(), RepoError> {
        let q = query(
            "MATCH (c:Character {id: $character_id})
            CREATE (h:Habit {
                id: $id,
                character_id: $character_id,
                name: $name,
                attribute: $attribute,
                description: $description
            })
            CREATE (c)-[:HAS_HABIT]->(h)
            RETURN h.id AS id",
        )
        .param("id", habit.id.to_string())
        .param("character_id", habit.character_id.to_string())
        .param("name", habit.name.clone())
        .param("attribute", habit.attribute.as_str())
        .param(
            "description",
            habit.description.clone().unwrap_or_default(),
        );

        let mut result = self
            .graph
            .execute(q)
            .await
            .map_err(|e| RepoError::database("create habit", e))?;

        // No row back means the MATCH found no character to attach to.
        if result
            .next()
            .await
            .map_err(|e| RepoError::database("create habit", e))?
            .is_none()
        {
            return Err(RepoError::not_found("Character", habit.character_id));
        }

        tracing::debug!("Created habit: {} ({})", habit.name, habit.attribute);
        Ok(())
    }

    async fn get(&self, id: HabitId) -> Result<Option<Habit>, RepoError> {
        let q = query("MATCH (h:Habit {id: $id}) RETURN h").param("id", id.to_string());

        let mut result = self
            .graph
            .execute(q)
            .await
            .map_err(|e| RepoError::database("get habit", e))?;

        match result
            .next()
            .await
            .map_err(|e| RepoError::database("get habit", e))?
        {
            Some(row) => {
                let node: Node = row
                    .get("h")
                    .map_err(|e| RepoError::database("get habit", e))?;
                Ok(Some(Self::node_to_habit(&node)?))
            }
            None => Ok(None),
        }
    }

    async fn list_for_character(
        &self,
        character_id: CharacterId,
    ) -> Result<Vec<HabitWithCompletions>, RepoError> {
        let q = query(
            "MATCH (c:Character {id: $character_id})-[:HAS_HABIT]->(h:Habit)
            OPTIONAL MATCH (h)-[:HAS_COMPLETION]->(hc:HabitCompletion {completed: true})
            RETURN h, collect(hc.date) AS dates
            ORDER BY h.name",
        )
        .param("character_id", character_id.to_string());

        let mut result = self
            .graph
            .execute(q)
            .await
            .map_err(|e| RepoError::database("list habits", e))?;

        let mut habits = Vec::new();
        while let Some(row) = result
            .next()
            .await
            .map_err(|e| RepoError::database("list habits", e))?
        {
            let node: Node = row
                .get("h")
                .map_err(|e| RepoError::database("list habits", e))?;
            let raw_dates: Vec<String> = row
                .get("dates")
                .map_err(|e| RepoError::database("list habits", e))?;

            let mut completed_dates = Vec::with_capacity(raw_dates.len());
            for raw in raw_dates {
                let date = NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|e| {
                    RepoError::database("parse", format!("Invalid completion date '{raw}': {e}"))
                })?;
                completed_dates.push(date);
            }
            completed_dates.sort();

            habits.push(HabitWithCompletions {
                habit: Self::node_to_habit(&node)?,
                completed_dates,
            });
        }

        Ok(habits)
    }

    async fn delete(&self, id: HabitId) -> Result<(), RepoError> {
        let q = query(
            "MATCH (h:Habit {id: $id})
            OPTIONAL MATCH (h)-[:HAS_COMPLETION]->(hc:HabitCompletion)
            DETACH DELETE h, hc",
        )
        .param("id", id.to_string());

        self.graph
            .run(q)
            .await
            .map_err(|e| RepoError::database("delete habit", e))
    }
}
