//! Learning items. Reaching exactly 100% progress earns the completion bonus.

use crate::api::AppState;
use crate::api::error::{ApiError, JsonBody};
use crate::api::types::DeleteResponse;
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use lifeos_core::services::{LearningPatch, NewLearningItem};
use lifeos_core::{AccountId, LearningItem, RecordId, Rewarded};

pub async fn list_learning(
    State(state): State<AppState>,
    Extension(account): Extension<AccountId>,
) -> Result<Json<Vec<LearningItem>>, ApiError> {
    Ok(Json(state.scope(account).list_learning()?))
}

pub async fn create_learning(
    State(state): State<AppState>,
    Extension(account): Extension<AccountId>,
    JsonBody(input): JsonBody<NewLearningItem>,
) -> Result<(StatusCode, Json<LearningItem>), ApiError> {
    let item = state.scope(account).create_learning(input)?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update_learning(
    State(state): State<AppState>,
    Extension(account): Extension<AccountId>,
    Path(id): Path<u64>,
    JsonBody(patch): JsonBody<LearningPatch>,
) -> Result<Json<Rewarded<LearningItem>>, ApiError> {
    let rewarded = state.scope(account).update_learning(RecordId(id), patch)?;
    super::log_progression(account, &rewarded);
    Ok(Json(rewarded))
}

pub async fn delete_learning(
    State(state): State<AppState>,
    Extension(account): Extension<AccountId>,
    Path(id): Path<u64>,
) -> Result<Json<DeleteResponse>, ApiError> {
    state.scope(account).delete_learning(RecordId(id))?;
    Ok(Json(DeleteResponse::deleted("Learning item")))
}
