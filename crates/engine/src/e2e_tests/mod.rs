//! Backend E2E integration tests.
//!
//! These tests validate the full API flows using a real Neo4j database via
//! testcontainers and a complete App construction with all use cases.
//!
//! # Running E2E Tests
//!
//! ```bash
//! # Run all E2E tests (requires Docker)
//! cargo test -p habitquest-engine --lib e2e_tests -- --ignored --test-threads=1
//! ```

mod adventure_flow_tests;
mod habit_flow_tests;
mod neo4j_test_harness;

pub use neo4j_test_harness::*;

use std::sync::Arc;

use habitquest_domain::User;

use crate::infrastructure::auth::{JwtService, TokenPair};
use crate::infrastructure::neo4j::{ensure_schema, Neo4jRepositories};
use crate::App;

/// Shared context: running container, connected graph, composed App.
pub struct E2ETestContext {
    pub harness: Neo4jTestHarness,
    pub app: Arc<App>,
}

impl E2ETestContext {
    pub async fn setup() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let harness = Neo4jTestHarness::start().await?;
        ensure_schema(harness.graph()).await?;

        let repos = Neo4jRepositories::new(harness.graph_clone());
        let app = Arc::new(App::new(repos, JwtService::new("e2e-test-secret")));

        Ok(Self { harness, app })
    }

    /// Register an account through the public flow and resolve its user.
    pub async fn register_user(
        &self,
        email: &str,
    ) -> Result<(User, TokenPair), Box<dyn std::error::Error + Send + Sync>> {
        let tokens = self
            .app
            .use_cases
            .auth
            .register(email, "password123", "password123")
            .await?;
        let user = self
            .app
            .use_cases
            .auth
            .authenticate(&tokens.access_token)
            .await?;
        Ok((user, tokens))
    }
}
