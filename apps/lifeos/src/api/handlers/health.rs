//! Daily health entries and workouts.

use crate::api::AppState;
use crate::api::error::{ApiError, JsonBody};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use lifeos_core::services::{HealthPatch, NewWorkout};
use lifeos_core::{AccountId, HealthEntry, RecordId, Rewarded, Workout};

pub async fn list_health(
    State(state): State<AppState>,
    Extension(account): Extension<AccountId>,
) -> Result<Json<Vec<HealthEntry>>, ApiError> {
    Ok(Json(state.scope(account).list_health()?))
}

/// Today's entry, created on first access.
pub async fn health_today(
    State(state): State<AppState>,
    Extension(account): Extension<AccountId>,
) -> Result<Json<HealthEntry>, ApiError> {
    Ok(Json(state.scope(account).health_today()?))
}

pub async fn update_health(
    State(state): State<AppState>,
    Extension(account): Extension<AccountId>,
    Path(id): Path<u64>,
    JsonBody(patch): JsonBody<HealthPatch>,
) -> Result<Json<HealthEntry>, ApiError> {
    Ok(Json(state.scope(account).update_health(RecordId(id), patch)?))
}

pub async fn add_workout(
    State(state): State<AppState>,
    Extension(account): Extension<AccountId>,
    Path(id): Path<u64>,
    JsonBody(input): JsonBody<NewWorkout>,
) -> Result<(StatusCode, Json<Rewarded<Workout>>), ApiError> {
    let rewarded = state.scope(account).add_workout(RecordId(id), input)?;
    super::log_progression(account, &rewarded);
    Ok((StatusCode::CREATED, Json(rewarded)))
}
