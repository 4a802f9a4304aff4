//! Neo4j enemy-template repository implementation.
//!
//! Loot tables and environment tags are JSON string properties (small
//! lists, read whole). Environment filtering happens application-side.

use async_trait::async_trait;
use neo4rs::{query, Graph, Node, Query};

use habitquest_domain::{Difficulty, EnemyTemplate, EnemyTemplateId};

use super::helpers::{parse_typed_id, NodeExt};
use crate::infrastructure::ports::{EnemyTemplateRepo, RepoError};

/// Repository for EnemyTemplate operations.
pub struct Neo4jEnemyTemplateRepo {
    graph: Graph,
}

impl Neo4jEnemyTemplateRepo {
    pub fn new(graph: Graph) -> Self {
        Self { graph }
    }

    fn node_to_template(node: &Node) -> Result<EnemyTemplate, RepoError> {
        let difficulty = node
            .get_string("difficulty")?
            .parse::<Difficulty>()
            .map_err(|e| RepoError::database("parse", e))?;

        Ok(EnemyTemplate {
            id: parse_typed_id(node, "id")?,
            name: node.get_string("name")?,
            level: node.get_i64("level")? as i32,
            max_hp: node.get_i64("max_hp")? as i32,
            dice_pool: node.get_string("dice_pool")?,
            xp_reward: node.get_i64("xp_reward")? as i32,
            loot_table: node.get_json("loot_table")?,
            description: node.get_string("description")?,
            difficulty,
            environment: node.get_json("environment")?,
        })
    }

    fn bind_template_props(q: Query, template: &EnemyTemplate) -> Result<Query, RepoError> {
        let loot_table = serde_json::to_string(&template.loot_table)
            .map_err(|e| RepoError::serialization(e.to_string()))?;
        let environment = serde_json::to_string(&template.environment)
            .map_err(|e| RepoError::serialization(e.to_string()))?;

        Ok(q.param("name", template.name.clone())
            .param("level", template.level as i64)
            .param("max_hp", template.max_hp as i64)
            .param("dice_pool", template.dice_pool.clone())
            .param("xp_reward", template.xp_reward as i64)
            .param("loot_table", loot_table)
            .param("description", template.description.clone())
            .param("difficulty", template.difficulty.as_str())
            .param("environment", environment))
    }

    async fn collect_templates(&self, q: Query) -> Result<Vec<EnemyTemplate>, RepoError> {
        let mut result = self
            .graph
            .execute(q)
            .await
            .map_err(|e| RepoError::database("list enemy templates", e))?;

        let mut templates = Vec::new();
        while let Some(row) = result
            .next()
            .await
            .map_err(|e| RepoError::database("list enemy templates", e))?
        {
            let node: Node = row
                .get("e")
                .map_err(|e| RepoError::database("list enemy templates", e))?;
            templates.push(Self::node_to_template(&node)?);
        }

        Ok(templates)
    }
}

#[async_trait]
impl EnemyTemplateRepo for Neo4jEnemyTemplateRepo {
    async fn create(&self, template: &EnemyTemplate) -> Result<(), RepoError> {
        let q = query(
            "CREATE (e:EnemyTemplate {
                id: $id,
                name: $name,
                level: $level,
                max_hp: $max_hp,
                dice_pool: $dice_pool,
                xp_reward: $xp_reward,
                loot_table: $loot_table,
                description: $description,
                difficulty: $difficulty,
                environment: $environment
            })",
        )
        .param("id", template.id.to_string());

        let q = Self::bind_template_props(q, template)?;

        self.graph
            .run(q)
            .await
            .map_err(|e| RepoError::database("create enemy template", e))
    }

    async fn seed(&self, templates: &[EnemyTemplate]) -> Result<usize, RepoError> {
        let mut created = 0;
        for template in templates {
            // MERGE by name keeps re-seeding idempotent; properties are only
            // set when the template is first created, so a fresh id in the
            // result means this round created it.
            let q = query(
                "MERGE (e:EnemyTemplate {name: $name})
                ON CREATE SET
                    e.id = $id,
                    e.level = $level,
                    e.max_hp = $max_hp,
                    e.dice_pool = $dice_pool,
                    e.xp_reward = $xp_reward,
                    e.loot_table = $loot_table,
                    e.description = $description,
                    e.difficulty = $difficulty,
                    e.environment = $environment
                RETURN e.id = $id AS was_created",
            )
            .param("id", template.id.to_string());
            let q = Self::bind_template_props(q, template)?;

            let mut result = self
                .graph
                .execute(q)
                .await
                .map_err(|e| RepoError::database("seed enemy templates", e))?;

            if let Some(row) = result
                .next()
                .await
                .map_err(|e| RepoError::database("seed enemy templates", e))?
            {
                if row.get::<bool>("was_created").unwrap_or(false) {
                    created += 1;
                }
            }
        }

        tracing::info!("Seeded enemy templates ({created} new)");
        Ok(created)
    }

    async fn get(&self, id: EnemyTemplateId) -> Result<Option<EnemyTemplate>, RepoError> {
        let q = query("MATCH (e:EnemyTemplate {id: $id}) RETURN e").param("id", id.to_string());

        let mut result = self
            .graph
            .execute(q)
            .await
            .map_err(|e| RepoError::database("get enemy template", e))?;

        match result
            .next()
            .await
            .map_err(|e| RepoError::database("get enemy template", e))?
        {
            Some(row) => {
                let node: Node = row
                    .get("e")
                    .map_err(|e| RepoError::database("get enemy template", e))?;
                Ok(Some(Self::node_to_template(&node)?))
            }
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<EnemyTemplate>, RepoError> {
        self.collect_templates(query(
            "MATCH (e:EnemyTemplate) RETURN e ORDER BY e.level, e.name",
        ))
        .await
    }

    async fn list_by_difficulty(
        &self,
        difficulty: Difficulty,
    ) -> Result<Vec<EnemyTemplate>, RepoError> {
        self.collect_templates(
            query(
                "MATCH (e:EnemyTemplate {difficulty: $difficulty})
                RETURN e
                ORDER BY e.level, e.name",
            )
            .param("difficulty", difficulty.as_str()),
        )
        .await
    }

    async fn save(&self, template: &EnemyTemplate) -> Result<(), RepoError> {
        let q = query(
            "MATCH (e:EnemyTemplate {id: $id})
            SET e.name = $name,
                e.level = $level,
                e.max_hp = $max_hp,
                e.dice_pool = $dice_pool,
                e.xp_reward = $xp_reward,
                e.loot_table = $loot_table,
                e.description = $description,
                e.difficulty = $difficulty,
                e.environment = $environment
            RETURN e.id AS id",
        )
        .param("id", template.id.to_string());

        let q = Self::bind_template_props(q, template)?;

        let mut result = self
            .graph
            .execute(q)
            .await
            .map_err(|e| RepoError::database("save enemy template", e))?;

        if result
            .next()
            .await
            .map_err(|e| RepoError::database("save enemy template", e))?
            .is_none()
        {
            return Err(RepoError::not_found("EnemyTemplate", template.id));
        }

        Ok(())
    }

    async fn delete(&self, id: EnemyTemplateId) -> Result<(), RepoError> {
        let q =
            query("MATCH (e:EnemyTemplate {id: $id}) DETACH DELETE e").param("id", id.to_string());

        self.graph
            .run(q)
            .await
            .map_err(|e| RepoError::database("delete enemy template", e))
    }
}
