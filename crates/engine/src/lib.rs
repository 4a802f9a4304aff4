//! HabitQuest Engine library.
//!
//! This crate contains all server-side code for the HabitQuest backend.
//!
//! ## Structure
//!
//! - `use_cases/` - User-facing operations over the repository ports
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

/// E2E integration tests using real Neo4j via testcontainers.
#[cfg(test)]
mod e2e_tests;

pub use app::App;
