//! Adventure API routes.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use habitquest_domain::{AdventureResults, CharacterId, Inventory, LootItem};

use crate::app::App;
use crate::use_cases::AdventureOutcome;

use super::{ApiError, AuthUser};

#[derive(Debug, Deserialize)]
pub struct LootItemRequest {
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

/// Client-reported adventure outcome (camelCase to match the frontend).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdventureResultsRequest {
    pub hp_change: i32,
    pub xp_gained: i32,
    #[serde(default)]
    pub loot: Vec<LootItemRequest>,
    pub victory: bool,
}

#[derive(Debug, Serialize)]
pub struct AdventureCompleteResponse {
    pub status: &'static str,
    pub message: String,
    pub rewards: RewardsDto,
}

#[derive(Debug, Serialize)]
pub struct RewardsDto {
    pub hp_change: i32,
    pub xp_gained: i32,
    pub loot_count: usize,
    pub levels_gained: i32,
}

#[derive(Debug, Serialize)]
pub struct AdventureStatusResponse {
    pub status: &'static str,
    pub character: AdventureCharacterDto,
    pub can_adventure: bool,
}

#[derive(Debug, Serialize)]
pub struct AdventureCharacterDto {
    pub id: String,
    pub name: String,
    pub level: i32,
    pub current_hp: i32,
    pub max_hp: i32,
    pub current_xp: i32,
    pub inventory: Inventory,
}

/// Apply a finished adventure's rewards to a character.
pub async fn complete_adventure(
    State(app): State<Arc<App>>,
    AuthUser(user): AuthUser,
    Path(character_id): Path<Uuid>,
    Json(req): Json<AdventureResultsRequest>,
) -> Result<Json<AdventureCompleteResponse>, ApiError> {
    let results = AdventureResults {
        hp_change: req.hp_change,
        xp_gained: req.xp_gained,
        loot: req
            .loot
            .into_iter()
            .map(|l| LootItem {
                item_type: l.item_type,
                quantity: l.quantity,
            })
            .collect(),
        victory: req.victory,
    };

    let outcome: AdventureOutcome = app
        .use_cases
        .adventure
        .complete(user.id, CharacterId::from_uuid(character_id), results)
        .await?;

    Ok(Json(AdventureCompleteResponse {
        status: "success",
        message: outcome.message,
        rewards: RewardsDto {
            hp_change: outcome.hp.applied,
            xp_gained: outcome.xp.current_xp - outcome.xp.previous_xp,
            loot_count: outcome.loot_count,
            levels_gained: outcome.xp.levels_gained(),
        },
    }))
}

/// Get a character's current adventure-related status.
pub async fn adventure_status(
    State(app): State<Arc<App>>,
    AuthUser(user): AuthUser,
    Path(character_id): Path<Uuid>,
) -> Result<Json<AdventureStatusResponse>, ApiError> {
    let character = app
        .use_cases
        .adventure
        .status(user.id, CharacterId::from_uuid(character_id))
        .await?;

    let can_adventure = character.can_adventure();
    Ok(Json(AdventureStatusResponse {
        status: "success",
        character: AdventureCharacterDto {
            id: character.id.to_string(),
            name: character.name,
            level: character.level,
            current_hp: character.current_hp,
            max_hp: character.max_hp,
            current_xp: character.current_xp,
            inventory: character.inventory,
        },
        can_adventure,
    }))
}
