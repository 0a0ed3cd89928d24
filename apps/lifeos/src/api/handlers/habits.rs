//! Habit routes. The toggle recomputes streaks over the full date set; a
//! missing body or date means today.

use crate::api::AppState;
use crate::api::error::{ApiError, JsonBody};
use crate::api::types::{DeleteResponse, ToggleHabitRequest};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use lifeos_core::services::{HabitPatch, NewHabit};
use lifeos_core::{AccountId, Habit, RecordId, Rewarded};

pub async fn list_habits(
    State(state): State<AppState>,
    Extension(account): Extension<AccountId>,
) -> Result<Json<Vec<Habit>>, ApiError> {
    Ok(Json(state.scope(account).list_habits()?))
}

pub async fn create_habit(
    State(state): State<AppState>,
    Extension(account): Extension<AccountId>,
    JsonBody(input): JsonBody<NewHabit>,
) -> Result<(StatusCode, Json<Habit>), ApiError> {
    let habit = state.scope(account).create_habit(input)?;
    Ok((StatusCode::CREATED, Json(habit)))
}

pub async fn update_habit(
    State(state): State<AppState>,
    Extension(account): Extension<AccountId>,
    Path(id): Path<u64>,
    JsonBody(patch): JsonBody<HabitPatch>,
) -> Result<Json<Habit>, ApiError> {
    Ok(Json(state.scope(account).update_habit(RecordId(id), patch)?))
}

pub async fn delete_habit(
    State(state): State<AppState>,
    Extension(account): Extension<AccountId>,
    Path(id): Path<u64>,
) -> Result<Json<DeleteResponse>, ApiError> {
    state.scope(account).delete_habit(RecordId(id))?;
    Ok(Json(DeleteResponse::deleted("Habit")))
}

pub async fn toggle_habit(
    State(state): State<AppState>,
    Extension(account): Extension<AccountId>,
    Path(id): Path<u64>,
    body: Option<JsonBody<ToggleHabitRequest>>,
) -> Result<Json<Rewarded<Habit>>, ApiError> {
    let date = body.and_then(|JsonBody(request)| request.date);
    let rewarded = state.scope(account).toggle_habit(RecordId(id), date)?;
    super::log_progression(account, &rewarded);
    Ok(Json(rewarded))
}
