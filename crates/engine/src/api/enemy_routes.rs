//! Enemy template API routes.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use habitquest_domain::{Difficulty, EnemyInstance, EnemyTemplate, EnemyTemplateId};

use crate::app::App;
use crate::use_cases::{EnemyTemplateInput, EnemyTemplatePatch};

use super::ApiError;

#[derive(Debug, Deserialize)]
pub struct CreateEnemyTemplateRequest {
    pub name: String,
    pub level: i32,
    pub max_hp: i32,
    pub dice_pool: String,
    pub xp_reward: i32,
    pub loot_table: Vec<String>,
    pub description: String,
    pub difficulty: String,
    pub environment: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateEnemyTemplateRequest {
    pub name: Option<String>,
    pub level: Option<i32>,
    pub max_hp: Option<i32>,
    pub dice_pool: Option<String>,
    pub xp_reward: Option<i32>,
    pub loot_table: Option<Vec<String>>,
    pub description: Option<String>,
    pub difficulty: Option<String>,
    pub environment: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct SpawnInstanceQuery {
    #[serde(default = "default_character_level")]
    pub character_level: i32,
}

fn default_character_level() -> i32 {
    1
}

#[derive(Debug, Serialize)]
pub struct TemplateListResponse {
    pub status: &'static str,
    pub data: Vec<EnemyTemplate>,
}

#[derive(Debug, Serialize)]
pub struct TemplateResponse {
    pub status: &'static str,
    pub data: EnemyTemplate,
}

#[derive(Debug, Serialize)]
pub struct InstanceResponse {
    pub status: &'static str,
    pub data: EnemyInstance,
}

#[derive(Debug, Serialize)]
pub struct InitializedResponse {
    pub status: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct StatusMessageResponse {
    pub status: &'static str,
    pub message: String,
}

/// Combat-oriented view of a template for the selection screen.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatTemplateDto {
    pub name: String,
    pub level: i32,
    pub max_hp: i32,
    pub dice_pool: String,
    pub xp_reward: i32,
    pub loot_table: Vec<String>,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct AvailableEnemiesResponse {
    pub status: &'static str,
    pub available_enemies: Vec<String>,
    pub enemy_templates: BTreeMap<String, CombatTemplateDto>,
}

fn parse_difficulty(raw: &str) -> Result<Difficulty, ApiError> {
    raw.parse::<Difficulty>().map_err(|_| {
        ApiError::BadRequest(format!(
            "Invalid difficulty. Must be one of: {}",
            Difficulty::ALL.map(|d| d.as_str()).join(", ")
        ))
    })
}

/// Seed the built-in enemy templates. Idempotent.
pub async fn initialize_templates(
    State(app): State<Arc<App>>,
) -> Result<Json<InitializedResponse>, ApiError> {
    let created = app.use_cases.enemies.initialize().await?;
    Ok(Json(InitializedResponse {
        status: "success",
        message: format!("Initialized {created} enemy templates"),
    }))
}

/// Retrieve all enemy templates.
pub async fn list_templates(
    State(app): State<Arc<App>>,
) -> Result<Json<TemplateListResponse>, ApiError> {
    let data = app.use_cases.enemies.list().await?;
    Ok(Json(TemplateListResponse {
        status: "success",
        data,
    }))
}

/// Retrieve a specific enemy template.
pub async fn get_template(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
) -> Result<Json<TemplateResponse>, ApiError> {
    let data = app
        .use_cases
        .enemies
        .get(EnemyTemplateId::from_uuid(id))
        .await?;
    Ok(Json(TemplateResponse {
        status: "success",
        data,
    }))
}

/// Get enemy templates filtered by difficulty level.
pub async fn list_by_difficulty(
    State(app): State<Arc<App>>,
    Path(difficulty): Path<String>,
) -> Result<Json<TemplateListResponse>, ApiError> {
    let difficulty = parse_difficulty(&difficulty)?;
    let data = app.use_cases.enemies.list_by_difficulty(difficulty).await?;
    Ok(Json(TemplateListResponse {
        status: "success",
        data,
    }))
}

/// Get enemy templates that can appear in a specific environment.
pub async fn list_by_environment(
    State(app): State<Arc<App>>,
    Path(environment): Path<String>,
) -> Result<Json<TemplateListResponse>, ApiError> {
    let data = app
        .use_cases
        .enemies
        .list_by_environment(&environment)
        .await?;
    Ok(Json(TemplateListResponse {
        status: "success",
        data,
    }))
}

/// Create an enemy instance from a template for combat.
pub async fn spawn_instance(
    State(app): State<Arc<App>>,
    Path(template_id): Path<Uuid>,
    Query(query): Query<SpawnInstanceQuery>,
) -> Result<Json<InstanceResponse>, ApiError> {
    let data = app
        .use_cases
        .enemies
        .spawn_instance(
            EnemyTemplateId::from_uuid(template_id),
            query.character_level,
        )
        .await?;
    Ok(Json(InstanceResponse {
        status: "success",
        data,
    }))
}

/// Create a new custom enemy template.
pub async fn create_template(
    State(app): State<Arc<App>>,
    Json(req): Json<CreateEnemyTemplateRequest>,
) -> Result<(StatusCode, Json<TemplateResponse>), ApiError> {
    let difficulty = parse_difficulty(&req.difficulty)?;
    let data = app
        .use_cases
        .enemies
        .create(EnemyTemplateInput {
            name: req.name,
            level: req.level,
            max_hp: req.max_hp,
            dice_pool: req.dice_pool,
            xp_reward: req.xp_reward,
            loot_table: req.loot_table,
            description: req.description,
            difficulty,
            environment: req.environment,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(TemplateResponse {
            status: "success",
            data,
        }),
    ))
}

/// Update an existing enemy template. Only provided fields change.
pub async fn update_template(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateEnemyTemplateRequest>,
) -> Result<Json<TemplateResponse>, ApiError> {
    let difficulty = req
        .difficulty
        .as_deref()
        .map(parse_difficulty)
        .transpose()?;

    let data = app
        .use_cases
        .enemies
        .update(
            EnemyTemplateId::from_uuid(id),
            EnemyTemplatePatch {
                name: req.name,
                level: req.level,
                max_hp: req.max_hp,
                dice_pool: req.dice_pool,
                xp_reward: req.xp_reward,
                loot_table: req.loot_table,
                description: req.description,
                difficulty,
                environment: req.environment,
            },
        )
        .await?;

    Ok(Json(TemplateResponse {
        status: "success",
        data,
    }))
}

/// Delete an enemy template.
pub async fn delete_template(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
) -> Result<Json<StatusMessageResponse>, ApiError> {
    app.use_cases
        .enemies
        .delete(EnemyTemplateId::from_uuid(id))
        .await?;
    Ok(Json(StatusMessageResponse {
        status: "success",
        message: "Enemy template deleted".to_string(),
    }))
}

/// Available enemies in the shape the combat selection screen expects,
/// keyed by a slug derived from the template name.
pub async fn available_enemies(
    State(app): State<Arc<App>>,
) -> Result<Json<AvailableEnemiesResponse>, ApiError> {
    let templates = app.use_cases.enemies.list().await?;

    let mut available_enemies = Vec::with_capacity(templates.len());
    let mut enemy_templates = BTreeMap::new();
    for template in templates {
        let slug = template.name.to_ascii_lowercase().replace(' ', "_");
        available_enemies.push(slug.clone());
        enemy_templates.insert(
            slug,
            CombatTemplateDto {
                name: template.name,
                level: template.level,
                max_hp: template.max_hp,
                dice_pool: template.dice_pool,
                xp_reward: template.xp_reward,
                loot_table: template.loot_table,
                description: template.description,
            },
        );
    }

    Ok(Json(AvailableEnemiesResponse {
        status: "success",
        available_enemies,
        enemy_templates,
    }))
}
