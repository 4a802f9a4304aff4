//! HTTP entry points.

pub mod adventure_routes;
pub mod auth_routes;
pub mod character_routes;
pub mod enemy_routes;
pub mod error;
pub mod extract;
pub mod habit_routes;
pub mod http;

pub use error::ApiError;
pub use extract::AuthUser;
