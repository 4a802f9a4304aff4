//! HTTP routes.

use axum::{
    extract::State,
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

use crate::app::App;

use super::{adventure_routes, auth_routes, character_routes, enemy_routes, habit_routes};

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health))
        // Auth
        .route("/api/auth/register", post(auth_routes::register))
        .route("/api/auth/login", post(auth_routes::login))
        .route("/api/auth/refresh", post(auth_routes::refresh))
        .route("/api/auth/me", get(auth_routes::me))
        .route("/api/auth/logout", post(auth_routes::logout))
        // Characters
        .route("/api/character", post(character_routes::create_character))
        .route(
            "/api/character/user/characters",
            get(character_routes::list_user_characters),
        )
        .route(
            "/api/character/{id}",
            get(character_routes::get_character)
                .put(character_routes::update_character)
                .delete(character_routes::delete_character),
        )
        .route(
            "/api/character/{id}/habit-points",
            put(character_routes::add_habit_points),
        )
        // Habits and completions
        .route("/api/habit", post(habit_routes::create_habit))
        .route(
            "/api/habit/character/{character_id}",
            get(habit_routes::list_habits),
        )
        .route(
            "/api/habit/character/{character_id}/completions",
            get(habit_routes::list_completions),
        )
        .route("/api/habit/completion", post(habit_routes::mark_completion))
        .route(
            "/api/habit/{habit_id}",
            axum::routing::delete(habit_routes::delete_habit),
        )
        // Adventure
        .route(
            "/api/adventure/{character_id}/complete",
            post(adventure_routes::complete_adventure),
        )
        .route(
            "/api/adventure/{character_id}/status",
            get(adventure_routes::adventure_status),
        )
        // Enemies
        .route(
            "/api/enemy/initialize",
            post(enemy_routes::initialize_templates),
        )
        .route("/api/enemy/templates", get(enemy_routes::list_templates))
        .route("/api/enemy/template", post(enemy_routes::create_template))
        .route(
            "/api/enemy/template/{id}",
            get(enemy_routes::get_template)
                .put(enemy_routes::update_template)
                .delete(enemy_routes::delete_template),
        )
        .route(
            "/api/enemy/difficulty/{difficulty}",
            get(enemy_routes::list_by_difficulty),
        )
        .route(
            "/api/enemy/environment/{environment}",
            get(enemy_routes::list_by_environment),
        )
        .route(
            "/api/enemy/instance/{template_id}",
            post(enemy_routes::spawn_instance),
        )
        .route("/api/enemy/available", get(enemy_routes::available_enemies))
}

#[derive(Serialize)]
struct RootResponse {
    message: &'static str,
    version: &'static str,
}

async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "HabitQuest API",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    database: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

async fn health(State(app): State<Arc<App>>) -> Json<HealthResponse> {
    match app.health.ping().await {
        Ok(()) => Json(HealthResponse {
            status: "healthy",
            database: "connected",
            version: env!("CARGO_PKG_VERSION"),
            error: None,
        }),
        Err(e) => Json(HealthResponse {
            status: "unhealthy",
            database: "disconnected",
            version: env!("CARGO_PKG_VERSION"),
            error: Some(e.to_string()),
        }),
    }
}
