//! Neo4j deserialization helpers for row conversion functions.
//!
//! Extension trait over `neo4rs::Node` to cut the boilerplate of converting
//! nodes into domain entities, with errors mapped to `RepoError`.

use chrono::NaiveDate;
use neo4rs::Node;
use uuid::Uuid;

use crate::infrastructure::ports::RepoError;

/// Extension trait for Neo4j Node to simplify common deserialization patterns.
pub trait NodeExt {
    /// Get a required string field.
    fn get_string(&self, field: &str) -> Result<String, RepoError>;

    /// Get a required UUID field and parse it.
    fn get_uuid(&self, field: &str) -> Result<Uuid, RepoError>;

    /// Get an optional string field, returning None if empty or missing.
    fn get_optional_string(&self, field: &str) -> Option<String>;

    /// Get a required integer field.
    fn get_i64(&self, field: &str) -> Result<i64, RepoError>;

    /// Get an integer field with a default value if missing.
    fn get_i64_or(&self, field: &str, default: i64) -> i64;

    /// Get a bool field with a default value if missing.
    fn get_bool_or(&self, field: &str, default: bool) -> bool;

    /// Get a required ISO `YYYY-MM-DD` date field.
    fn get_date(&self, field: &str) -> Result<NaiveDate, RepoError>;

    /// Get and deserialize a required JSON field.
    fn get_json<T: serde::de::DeserializeOwned>(&self, field: &str) -> Result<T, RepoError>;

    /// Get and deserialize a JSON field with default on error or absence.
    fn get_json_or_default<T: serde::de::DeserializeOwned + Default>(&self, field: &str) -> T;
}

impl NodeExt for Node {
    fn get_string(&self, field: &str) -> Result<String, RepoError> {
        self.get(field).map_err(|e| {
            RepoError::database("query", format!("Missing required field '{field}': {e}"))
        })
    }

    fn get_uuid(&self, field: &str) -> Result<Uuid, RepoError> {
        let s = self.get_string(field)?;
        Uuid::parse_str(&s).map_err(|e| {
            RepoError::database("parse", format!("Invalid UUID in field '{field}': {e}"))
        })
    }

    fn get_optional_string(&self, field: &str) -> Option<String> {
        self.get::<String>(field).ok().filter(|s| !s.is_empty())
    }

    fn get_i64(&self, field: &str) -> Result<i64, RepoError> {
        self.get(field).map_err(|e| {
            RepoError::database("query", format!("Missing required field '{field}': {e}"))
        })
    }

    fn get_i64_or(&self, field: &str, default: i64) -> i64 {
        self.get(field).unwrap_or(default)
    }

    fn get_bool_or(&self, field: &str, default: bool) -> bool {
        self.get(field).unwrap_or(default)
    }

    fn get_date(&self, field: &str) -> Result<NaiveDate, RepoError> {
        let s = self.get_string(field)?;
        NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|e| {
            RepoError::database("parse", format!("Invalid date in field '{field}': {e}"))
        })
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, field: &str) -> Result<T, RepoError> {
        let s = self.get_string(field)?;
        serde_json::from_str(&s).map_err(|e| {
            RepoError::database("parse", format!("Invalid JSON in field '{field}': {e}"))
        })
    }

    fn get_json_or_default<T: serde::de::DeserializeOwned + Default>(&self, field: &str) -> T {
        self.get::<String>(field)
            .ok()
            .filter(|s| !s.is_empty())
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }
}

/// Parse a typed ID from a Neo4j node field.
pub fn parse_typed_id<T>(node: &Node, field: &str) -> Result<T, RepoError>
where
    T: From<Uuid>,
{
    Ok(T::from(node.get_uuid(field)?))
}
