//! Character API routes.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use habitquest_domain::{Character, CharacterId, CharacterSummary};

use crate::app::App;
use crate::use_cases::CreateCharacterInput;

use super::{ApiError, AuthUser};

fn default_score() -> i32 {
    10
}

#[derive(Debug, Deserialize)]
pub struct CreateCharacterRequest {
    pub name: String,
    #[serde(default = "default_score")]
    pub strength: i32,
    #[serde(default = "default_score")]
    pub dexterity: i32,
    #[serde(default = "default_score")]
    pub constitution: i32,
    #[serde(default = "default_score")]
    pub intelligence: i32,
    #[serde(default = "default_score")]
    pub wisdom: i32,
    #[serde(default = "default_score")]
    pub charisma: i32,
    pub image_data: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCharacterRequest {
    pub image_data: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HabitPointsRequest {
    pub attribute: String,
    pub habit_points: i32,
}

#[derive(Debug, Serialize)]
pub struct CreatedCharacterResponse {
    pub status: &'static str,
    pub character_id: String,
}

#[derive(Debug, Serialize)]
pub struct CharacterListResponse {
    pub status: &'static str,
    pub data: Vec<CharacterSummary>,
}

#[derive(Debug, Serialize)]
pub struct AttributeDto {
    pub base: i32,
    pub habit_points: i32,
    pub bonus: i32,
}

/// Full character sheet returned to the frontend.
#[derive(Debug, Serialize)]
pub struct CharacterSheetDto {
    pub id: String,
    pub name: String,
    pub level: i32,
    pub current_xp: i32,
    pub current_hp: i32,
    pub max_hp: i32,
    pub image_data: Option<String>,
    pub attributes: BTreeMap<&'static str, AttributeDto>,
}

impl From<Character> for CharacterSheetDto {
    fn from(character: Character) -> Self {
        let attributes = character
            .abilities
            .iter()
            .map(|(attr, score)| {
                (
                    attr.as_str(),
                    AttributeDto {
                        base: score.base_score(),
                        habit_points: score.habit_points(),
                        bonus: score.total_bonus(),
                    },
                )
            })
            .collect();

        Self {
            id: character.id.to_string(),
            name: character.name,
            level: character.level,
            current_xp: character.current_xp,
            current_hp: character.current_hp,
            max_hp: character.max_hp,
            image_data: character.image_data,
            attributes,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CharacterResponse {
    pub status: &'static str,
    pub data: CharacterSheetDto,
}

#[derive(Debug, Serialize)]
pub struct StatusMessageResponse {
    pub status: &'static str,
    pub message: String,
}

/// Create a new character for the authenticated user.
pub async fn create_character(
    State(app): State<Arc<App>>,
    AuthUser(user): AuthUser,
    Json(req): Json<CreateCharacterRequest>,
) -> Result<(StatusCode, Json<CreatedCharacterResponse>), ApiError> {
    let character = app
        .use_cases
        .characters
        .create(
            &user,
            CreateCharacterInput {
                name: req.name,
                strength: req.strength,
                dexterity: req.dexterity,
                constitution: req.constitution,
                intelligence: req.intelligence,
                wisdom: req.wisdom,
                charisma: req.charisma,
                image_data: req.image_data,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedCharacterResponse {
            status: "success",
            character_id: character.id.to_string(),
        }),
    ))
}

/// Get all characters for the authenticated user.
pub async fn list_user_characters(
    State(app): State<Arc<App>>,
    AuthUser(user): AuthUser,
) -> Result<Json<CharacterListResponse>, ApiError> {
    let data = app.use_cases.characters.list_for_user(user.id).await?;
    Ok(Json(CharacterListResponse {
        status: "success",
        data,
    }))
}

/// Get a specific character (only if owned by user).
pub async fn get_character(
    State(app): State<Arc<App>>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<CharacterResponse>, ApiError> {
    let character = app
        .use_cases
        .characters
        .get_owned(user.id, CharacterId::from_uuid(id))
        .await?;

    Ok(Json(CharacterResponse {
        status: "success",
        data: character.into(),
    }))
}

/// Update a character's avatar image.
pub async fn update_character(
    State(app): State<Arc<App>>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateCharacterRequest>,
) -> Result<Json<StatusMessageResponse>, ApiError> {
    let image_data = req
        .image_data
        .ok_or_else(|| ApiError::BadRequest("Image data is required".to_string()))?;

    app.use_cases
        .characters
        .update_image(user.id, CharacterId::from_uuid(id), image_data)
        .await?;

    Ok(Json(StatusMessageResponse {
        status: "success",
        message: "Character updated".to_string(),
    }))
}

/// Credit habit points toward one of the character's attributes.
pub async fn add_habit_points(
    State(app): State<Arc<App>>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<HabitPointsRequest>,
) -> Result<Json<CharacterResponse>, ApiError> {
    let character = app
        .use_cases
        .characters
        .add_habit_points(
            user.id,
            CharacterId::from_uuid(id),
            &req.attribute,
            req.habit_points,
        )
        .await?;

    Ok(Json(CharacterResponse {
        status: "success",
        data: character.into(),
    }))
}

/// Delete a character (only if owned by user).
pub async fn delete_character(
    State(app): State<Arc<App>>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<StatusMessageResponse>, ApiError> {
    app.use_cases
        .characters
        .delete(user.id, CharacterId::from_uuid(id))
        .await?;

    Ok(Json(StatusMessageResponse {
        status: "success",
        message: "Character deleted".to_string(),
    }))
}
