//! Neo4j user repository implementation.
//!
//! Ownership is stored as `(User)-[:OWNS]->(Character)` edges; the
//! character-limit and access checks all traverse that edge.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use neo4rs::{query, Graph, Node};

use habitquest_domain::{CharacterId, CharacterSummary, User, UserId};

use super::helpers::{parse_typed_id, NodeExt};
use crate::infrastructure::ports::{RepoError, UserRepo};

/// Repository for User operations.
pub struct Neo4jUserRepo {
    graph: Graph,
}

impl Neo4jUserRepo {
    pub fn new(graph: Graph) -> Self {
        Self { graph }
    }

    fn node_to_user(node: &Node) -> Result<User, RepoError> {
        let created_at_raw = node.get_string("created_at")?;
        let created_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&created_at_raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                RepoError::database("parse", format!("Invalid created_at timestamp: {e}"))
            })?;

        Ok(User {
            id: parse_typed_id(node, "id")?,
            email: node.get_string("email")?,
            password_hash: node.get_string("password_hash")?,
            is_active: node.get_bool_or("is_active", true),
            is_premium: node.get_bool_or("is_premium", false),
            created_at,
        })
    }

    fn node_to_summary(node: &Node) -> Result<CharacterSummary, RepoError> {
        Ok(CharacterSummary {
            id: parse_typed_id(node, "id")?,
            name: node.get_string("name")?,
            level: node.get_i64_or("level", 1) as i32,
            current_xp: node.get_i64_or("current_xp", 0) as i32,
            image_data: node.get_optional_string("image_data"),
        })
    }
}

#[async_trait]
impl UserRepo for Neo4jUserRepo {
    async fn create(&self, user: &User) -> Result<(), RepoError> {
        let q = query(
            "CREATE (u:User {
                id: $id,
                email: $email,
                password_hash: $password_hash,
                is_active: $is_active,
                is_premium: $is_premium,
                created_at: $created_at
            })",
        )
        .param("id", user.id.to_string())
        .param("email", user.email.clone())
        .param("password_hash", user.password_hash.clone())
        .param("is_active", user.is_active)
        .param("is_premium", user.is_premium)
        .param("created_at", user.created_at.to_rfc3339());

        self.graph
            .run(q)
            .await
            .map_err(|e| RepoError::database("create user", e))?;
        tracing::debug!("Created user: {}", user.email);
        Ok(())
    }

    async fn get(&self, id: UserId) -> Result<Option<User>, RepoError> {
        let q = query("MATCH (u:User {id: $id}) RETURN u").param("id", id.to_string());

        let mut result = self
            .graph
            .execute(q)
            .await
            .map_err(|e| RepoError::database("get user", e))?;

        match result
            .next()
            .await
            .map_err(|e| RepoError::database("get user", e))?
        {
            Some(row) => {
                let node: Node = row
                    .get("u")
                    .map_err(|e| RepoError::database("get user", e))?;
                Ok(Some(Self::node_to_user(&node)?))
            }
            None => Ok(None),
        }
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let q = query("MATCH (u:User {email: $email}) RETURN u").param("email", email);

        let mut result = self
            .graph
            .execute(q)
            .await
            .map_err(|e| RepoError::database("get user by email", e))?;

        match result
            .next()
            .await
            .map_err(|e| RepoError::database("get user by email", e))?
        {
            Some(row) => {
                let node: Node = row
                    .get("u")
                    .map_err(|e| RepoError::database("get user by email", e))?;
                Ok(Some(Self::node_to_user(&node)?))
            }
            None => Ok(None),
        }
    }

    async fn link_character(
        &self,
        user_id: UserId,
        character_id: CharacterId,
    ) -> Result<(), RepoError> {
        let q = query(
            "MATCH (u:User {id: $user_id})
            MATCH (c:Character {id: $character_id})
            MERGE (u)-[:OWNS]->(c)",
        )
        .param("user_id", user_id.to_string())
        .param("character_id", character_id.to_string());

        self.graph
            .run(q)
            .await
            .map_err(|e| RepoError::database("link character", e))
    }

    async fn owns_character(
        &self,
        user_id: UserId,
        character_id: CharacterId,
    ) -> Result<bool, RepoError> {
        let q = query(
            "MATCH (u:User {id: $user_id})-[:OWNS]->(c:Character {id: $character_id})
            RETURN count(c) AS owned",
        )
        .param("user_id", user_id.to_string())
        .param("character_id", character_id.to_string());

        let mut result = self
            .graph
            .execute(q)
            .await
            .map_err(|e| RepoError::database("owns character", e))?;

        let owned = match result
            .next()
            .await
            .map_err(|e| RepoError::database("owns character", e))?
        {
            Some(row) => row
                .get::<i64>("owned")
                .map_err(|e| RepoError::database("owns character", e))?,
            None => 0,
        };

        Ok(owned > 0)
    }

    async fn list_characters(&self, user_id: UserId) -> Result<Vec<CharacterSummary>, RepoError> {
        let q = query(
            "MATCH (u:User {id: $user_id})-[:OWNS]->(c:Character)
            RETURN c
            ORDER BY c.name",
        )
        .param("user_id", user_id.to_string());

        let mut result = self
            .graph
            .execute(q)
            .await
            .map_err(|e| RepoError::database("list characters", e))?;

        let mut summaries = Vec::new();
        while let Some(row) = result
            .next()
            .await
            .map_err(|e| RepoError::database("list characters", e))?
        {
            let node: Node = row
                .get("c")
                .map_err(|e| RepoError::database("list characters", e))?;
            summaries.push(Self::node_to_summary(&node)?);
        }

        Ok(summaries)
    }
}
