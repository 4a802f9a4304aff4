//! Neo4j habit-completion repository implementation.
//!
//! Dates are stored as ISO `YYYY-MM-DD` strings, so range filters can use
//! plain string comparison.

use async_trait::async_trait;
use chrono::NaiveDate;
use neo4rs::{query, Graph, Node};

use habitquest_domain::{CharacterId, CompletionId, HabitCompletion, HabitId};

use super::helpers::{parse_typed_id, NodeExt};
use crate::infrastructure::ports::{CompletionRecord, CompletionRepo, RepoError};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Repository for HabitCompletion operations.
pub struct Neo4jCompletionRepo {
    graph: Graph,
}

impl Neo4jCompletionRepo {
    pub fn new(graph: Graph) -> Self {
        Self { graph }
    }

    fn node_to_completion(node: &Node) -> Result<HabitCompletion, RepoError> {
        Ok(HabitCompletion {
            id: parse_typed_id(node, "id")?,
            habit_id: parse_typed_id(node, "habit_id")?,
            date: node.get_date("date")?,
            completed: node.get_bool_or("completed", true),
        })
    }
}

#[async_trait]
impl CompletionRepo for Neo4jCompletionRepo {
    async fn create(&self, completion: &HabitCompletion) -> Result<(), RepoError> {
        let q = query(
            "MATCH (h:Habit {id: $habit_id})
            CREATE (hc:HabitCompletion {
                id: $id,
                habit_id: $habit_id,
                date: $date,
                completed: $completed
            })
            CREATE (h)-[:HAS_COMPLETION]->(hc)
            RETURN hc.id AS id",
        )
        .param("id", completion.id.to_string())
        .param("habit_id", completion.habit_id.to_string())
        .param("date", completion.date.format(DATE_FORMAT).to_string())
        .param("completed", completion.completed);

        let mut result = self
            .graph
            .execute(q)
            .await
            .map_err(|e| RepoError::database("create completion", e))?;

        if result
            .next()
            .await
            .map_err(|e| RepoError::database("create completion", e))?
            .is_none()
        {
            return Err(RepoError::not_found("Habit", completion.habit_id));
        }

        Ok(())
    }

    async fn find_for_date(
        &self,
        habit_id: HabitId,
        date: NaiveDate,
    ) -> Result<Option<HabitCompletion>, RepoError> {
        let q = query(
            "MATCH (h:Habit {id: $habit_id})-[:HAS_COMPLETION]->(hc:HabitCompletion {date: $date})
            RETURN hc",
        )
        .param("habit_id", habit_id.to_string())
        .param("date", date.format(DATE_FORMAT).to_string());

        let mut result = self
            .graph
            .execute(q)
            .await
            .map_err(|e| RepoError::database("find completion", e))?;

        match result
            .next()
            .await
            .map_err(|e| RepoError::database("find completion", e))?
        {
            Some(row) => {
                let node: Node = row
                    .get("hc")
                    .map_err(|e| RepoError::database("find completion", e))?;
                Ok(Some(Self::node_to_completion(&node)?))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: CompletionId) -> Result<(), RepoError> {
        let q = query("MATCH (hc:HabitCompletion {id: $id}) DETACH DELETE hc")
            .param("id", id.to_string());

        self.graph
            .run(q)
            .await
            .map_err(|e| RepoError::database("delete completion", e))
    }

    async fn list_in_range(
        &self,
        character_id: CharacterId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CompletionRecord>, RepoError> {
        let q = query(
            "MATCH (c:Character {id: $character_id})-[:HAS_HABIT]->(h:Habit)
                  -[:HAS_COMPLETION]->(hc:HabitCompletion)
            WHERE hc.completed AND hc.date >= $start AND hc.date <= $end
            RETURN h.id AS habit_id, h.name AS habit_name, hc.date AS date
            ORDER BY hc.date, habit_name",
        )
        .param("character_id", character_id.to_string())
        .param("start", start.format(DATE_FORMAT).to_string())
        .param("end", end.format(DATE_FORMAT).to_string());

        let mut result = self
            .graph
            .execute(q)
            .await
            .map_err(|e| RepoError::database("list completions", e))?;

        let mut records = Vec::new();
        while let Some(row) = result
            .next()
            .await
            .map_err(|e| RepoError::database("list completions", e))?
        {
            let habit_id_raw: String = row
                .get("habit_id")
                .map_err(|e| RepoError::database("list completions", e))?;
            let habit_id = habit_id_raw
                .parse::<uuid::Uuid>()
                .map(HabitId::from_uuid)
                .map_err(|e| {
                    RepoError::database("parse", format!("Invalid habit id '{habit_id_raw}': {e}"))
                })?;
            let habit_name: String = row
                .get("habit_name")
                .map_err(|e| RepoError::database("list completions", e))?;
            let date_raw: String = row
                .get("date")
                .map_err(|e| RepoError::database("list completions", e))?;
            let date = NaiveDate::parse_from_str(&date_raw, DATE_FORMAT).map_err(|e| {
                RepoError::database("parse", format!("Invalid completion date '{date_raw}': {e}"))
            })?;

            records.push(CompletionRecord {
                habit_id,
                habit_name,
                date,
            });
        }

        Ok(records)
    }
}
