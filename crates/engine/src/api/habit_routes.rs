//! Habit and completion API routes.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use habitquest_domain::{CharacterId, HabitId, HabitWithCompletions};

use crate::app::App;
use crate::use_cases::CompletionAction;

use super::{ApiError, AuthUser};

#[derive(Debug, Deserialize)]
pub struct CreateHabitRequest {
    pub character_id: Uuid,
    pub habit_name: String,
    pub attribute: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MarkCompletionRequest {
    pub habit_id: Uuid,
    pub completion_date: Option<NaiveDate>,
    #[serde(default = "default_completed")]
    pub completed: bool,
}

fn default_completed() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct CompletionRangeQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct CreatedHabitResponse {
    pub status: &'static str,
    pub habit_id: String,
}

#[derive(Debug, Serialize)]
pub struct HabitListResponse {
    pub status: &'static str,
    pub data: Vec<HabitWithCompletions>,
}

#[derive(Debug, Serialize)]
pub struct CompletionMarkedResponse {
    pub status: &'static str,
    pub action: CompletionAction,
}

#[derive(Debug, Serialize)]
pub struct CompletionRecordDto {
    pub habit_id: String,
    pub habit_name: String,
    pub date: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct CompletionRangeResponse {
    pub status: &'static str,
    pub data: Vec<CompletionRecordDto>,
}

#[derive(Debug, Serialize)]
pub struct StatusMessageResponse {
    pub status: &'static str,
    pub message: String,
}

/// Create a new habit for a character.
pub async fn create_habit(
    State(app): State<Arc<App>>,
    AuthUser(user): AuthUser,
    Json(req): Json<CreateHabitRequest>,
) -> Result<(StatusCode, Json<CreatedHabitResponse>), ApiError> {
    let habit = app
        .use_cases
        .habits
        .create(
            user.id,
            CharacterId::from_uuid(req.character_id),
            req.habit_name,
            &req.attribute,
            req.description,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedHabitResponse {
            status: "success",
            habit_id: habit.id.to_string(),
        }),
    ))
}

/// Get all habits for a character, with completion dates.
pub async fn list_habits(
    State(app): State<Arc<App>>,
    AuthUser(user): AuthUser,
    Path(character_id): Path<Uuid>,
) -> Result<Json<HabitListResponse>, ApiError> {
    let data = app
        .use_cases
        .habits
        .list_for_character(user.id, CharacterId::from_uuid(character_id))
        .await?;

    Ok(Json(HabitListResponse {
        status: "success",
        data,
    }))
}

/// Mark a habit as complete or incomplete for a specific date.
pub async fn mark_completion(
    State(app): State<Arc<App>>,
    AuthUser(user): AuthUser,
    Json(req): Json<MarkCompletionRequest>,
) -> Result<Json<CompletionMarkedResponse>, ApiError> {
    let action = app
        .use_cases
        .completions
        .mark(
            user.id,
            HabitId::from_uuid(req.habit_id),
            req.completion_date,
            req.completed,
        )
        .await?;

    Ok(Json(CompletionMarkedResponse {
        status: "success",
        action,
    }))
}

/// Completions for a character over an inclusive date range.
pub async fn list_completions(
    State(app): State<Arc<App>>,
    AuthUser(user): AuthUser,
    Path(character_id): Path<Uuid>,
    Query(range): Query<CompletionRangeQuery>,
) -> Result<Json<CompletionRangeResponse>, ApiError> {
    let records = app
        .use_cases
        .completions
        .list_in_range(
            user.id,
            CharacterId::from_uuid(character_id),
            range.start,
            range.end,
        )
        .await?;

    Ok(Json(CompletionRangeResponse {
        status: "success",
        data: records
            .into_iter()
            .map(|r| CompletionRecordDto {
                habit_id: r.habit_id.to_string(),
                habit_name: r.habit_name,
                date: r.date,
            })
            .collect(),
    }))
}

/// Delete a habit.
pub async fn delete_habit(
    State(app): State<Arc<App>>,
    AuthUser(user): AuthUser,
    Path(habit_id): Path<Uuid>,
) -> Result<Json<StatusMessageResponse>, ApiError> {
    app.use_cases
        .habits
        .delete(user.id, HabitId::from_uuid(habit_id))
        .await?;

    Ok(Json(StatusMessageResponse {
        status: "success",
        message: "Habit deleted".to_string(),
    }))
}
