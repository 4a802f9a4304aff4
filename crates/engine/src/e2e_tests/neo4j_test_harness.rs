//! Neo4j test harness for E2E testing.
//!
//! Provides testcontainer-based Neo4j instance management for integration tests.

use std::time::Duration;

use neo4rs::{query, Graph};
use testcontainers::{core::WaitFor, runners::AsyncRunner, ContainerAsync, GenericImage};
use tokio::time::sleep;

/// Password used for Neo4j test containers.
pub const TEST_NEO4J_PASSWORD: &str = "testpassword";

/// Neo4j test harness managing container lifecycle.
pub struct Neo4jTestHarness {
    _container: ContainerAsync<GenericImage>,
    graph: Graph,
}

impl Neo4jTestHarness {
    /// Start a new Neo4j container and establish a connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the container fails to start or connection cannot
    /// be established.
    pub async fn start() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let container: ContainerAsync<GenericImage> =
            neo4j_image(TEST_NEO4J_PASSWORD).start().await;
        let bolt_port = container.get_host_port_ipv4(7687).await;
        let uri = format!("bolt://127.0.0.1:{bolt_port}");

        let graph = connect_with_retry(&uri, "neo4j", TEST_NEO4J_PASSWORD).await?;

        Ok(Self {
            _container: container,
            graph,
        })
    }

    /// Get reference to the Neo4j graph connection.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Clone the graph connection for use in other components.
    pub fn graph_clone(&self) -> Graph {
        self.graph.clone()
    }
}

/// Create a Neo4j container image with the given password.
///
/// Configuration for reliability:
/// - Pinned version for consistency across runs
/// - Memory limits to prevent JVM crashes
/// - Connection readiness is verified by connect_with_retry with backoff
pub fn neo4j_image(password: &str) -> GenericImage {
    GenericImage::new("neo4j", "5.26.0-community")
        .with_env_var("NEO4J_AUTH", format!("neo4j/{password}"))
        .with_env_var(
            "NEO4J_dbms_connector_bolt_advertised__address",
            "localhost:7687",
        )
        .with_env_var("NEO4J_server_memory_heap_initial__size", "256m")
        .with_env_var("NEO4J_server_memory_heap_max__size", "512m")
        .with_env_var("NEO4J_server_memory_pagecache_size", "128m")
        .with_exposed_port(7687)
        .with_exposed_port(7474)
        .with_wait_for(WaitFor::seconds(5))
}

/// Connect to Neo4j with retry logic using exponential backoff.
pub async fn connect_with_retry(
    uri: &str,
    user: &str,
    pass: &str,
) -> Result<Graph, Box<dyn std::error::Error + Send + Sync>> {
    let max_attempts = 30;
    let initial_delay = Duration::from_millis(500);
    let max_delay = Duration::from_secs(5);

    let mut attempt = 0;
    let mut delay = initial_delay;
    let mut last_err: Option<String> = None;

    while attempt < max_attempts {
        attempt += 1;

        match Graph::new(uri, user, pass).await {
            Ok(graph) => {
                // Verify connection with a simple query before returning
                match graph.run(query("RETURN 1")).await {
                    Ok(_) => {
                        tracing::info!(
                            attempt = attempt,
                            uri = uri,
                            "Neo4j connection established and verified"
                        );
                        return Ok(graph);
                    }
                    Err(e) => {
                        last_err = Some(format!("Connection test query failed: {e}"));
                    }
                }
            }
            Err(e) => {
                last_err = Some(e.to_string());
            }
        }

        sleep(delay).await;
        delay = std::cmp::min(delay.saturating_mul(2), max_delay);
    }

    Err(format!(
        "Failed to connect to Neo4j at {uri} after {max_attempts} attempts: {last_err:?}"
    )
    .into())
}
