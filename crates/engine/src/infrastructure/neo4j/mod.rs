//! Neo4j database implementations.

use async_trait::async_trait;
use neo4rs::{query, Graph};
use std::sync::Arc;

mod helpers;

mod character_repo;
mod completion_repo;
mod enemy_repo;
mod habit_repo;
mod user_repo;

mod schema;

pub use character_repo::Neo4jCharacterRepo;
pub use completion_repo::Neo4jCompletionRepo;
pub use enemy_repo::Neo4jEnemyTemplateRepo;
pub use habit_repo::Neo4jHabitRepo;
pub use schema::ensure_schema;
pub use user_repo::Neo4jUserRepo;

use crate::infrastructure::ports::{HealthPort, RepoError};

/// Create all Neo4j repositories from a graph connection.
pub struct Neo4jRepositories {
    pub user: Arc<Neo4jUserRepo>,
    pub character: Arc<Neo4jCharacterRepo>,
    pub habit: Arc<Neo4jHabitRepo>,
    pub completion: Arc<Neo4jCompletionRepo>,
    pub enemy: Arc<Neo4jEnemyTemplateRepo>,
    pub health: Arc<Neo4jHealthCheck>,
}

impl Neo4jRepositories {
    pub fn new(graph: Graph) -> Self {
        Self {
            user: Arc::new(Neo4jUserRepo::new(graph.clone())),
            character: Arc::new(Neo4jCharacterRepo::new(graph.clone())),
            habit: Arc::new(Neo4jHabitRepo::new(graph.clone())),
            completion: Arc::new(Neo4jCompletionRepo::new(graph.clone())),
            enemy: Arc::new(Neo4jEnemyTemplateRepo::new(graph.clone())),
            health: Arc::new(Neo4jHealthCheck::new(graph)),
        }
    }
}

/// Connectivity probe backing the health endpoint.
pub struct Neo4jHealthCheck {
    graph: Graph,
}

impl Neo4jHealthCheck {
    pub fn new(graph: Graph) -> Self {
        Self { graph }
    }
}

#[async_trait]
impl HealthPort for Neo4jHealthCheck {
    async fn ping(&self) -> Result<(), RepoError> {
        self.graph
            .run(query("RETURN 1"))
            .await
            .map_err(|e| RepoError::database("ping", e))
    }
}
