//! Neo4j schema initialization - constraints and indexes.

use neo4rs::{query, Graph};

/// Initialize the database schema (create constraints and indexes).
///
/// Called once on startup. Everything is created with IF NOT EXISTS to be
/// idempotent; failures are logged and tolerated so an older server version
/// does not block boot.
pub async fn ensure_schema(graph: &Graph) -> Result<(), neo4rs::Error> {
    let constraints = [
        "CREATE CONSTRAINT user_id IF NOT EXISTS FOR (u:User) REQUIRE u.id IS UNIQUE",
        "CREATE CONSTRAINT user_email IF NOT EXISTS FOR (u:User) REQUIRE u.email IS UNIQUE",
        "CREATE CONSTRAINT character_id IF NOT EXISTS FOR (c:Character) REQUIRE c.id IS UNIQUE",
        "CREATE CONSTRAINT habit_id IF NOT EXISTS FOR (h:Habit) REQUIRE h.id IS UNIQUE",
        "CREATE CONSTRAINT completion_id IF NOT EXISTS FOR (hc:HabitCompletion) REQUIRE hc.id IS UNIQUE",
        "CREATE CONSTRAINT enemy_template_id IF NOT EXISTS FOR (e:EnemyTemplate) REQUIRE e.id IS UNIQUE",
    ];

    for constraint in constraints {
        if let Err(e) = graph.run(query(constraint)).await {
            tracing::warn!("Constraint creation warning: {}", e);
        }
    }

    let indexes = [
        "CREATE INDEX character_name IF NOT EXISTS FOR (c:Character) ON (c.name)",
        "CREATE INDEX completion_date IF NOT EXISTS FOR (hc:HabitCompletion) ON (hc.date)",
        "CREATE INDEX enemy_difficulty IF NOT EXISTS FOR (e:EnemyTemplate) ON (e.difficulty)",
    ];

    for index in indexes {
        if let Err(e) = graph.run(query(index)).await {
            tracing::warn!("Index creation warning: {}", e);
        }
    }

    tracing::info!("Neo4j schema initialized (constraints and indexes ensured)");
    Ok(())
}
