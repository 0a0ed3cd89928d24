//! Task routes. Completion via PATCH or toggle earns XP once per flip.

use crate::api::AppState;
use crate::api::error::{ApiError, JsonBody};
use crate::api::types::DeleteResponse;
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use lifeos_core::services::{NewTask, TaskFilter, TaskPatch};
use lifeos_core::{AccountId, RecordId, Rewarded, Task};

pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(account): Extension<AccountId>,
    Query(filter): Query<TaskFilter>,
) -> Result<Json<Vec<Task>>, ApiError> {
    Ok(Json(state.scope(account).list_tasks(&filter)?))
}

pub async fn create_task(
    State(state): State<AppState>,
    Extension(account): Extension<AccountId>,
    JsonBody(input): JsonBody<NewTask>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let task = state.scope(account).create_task(input)?;
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn update_task(
    State(state): State<AppState>,
    Extension(account): Extension<AccountId>,
    Path(id): Path<u64>,
    JsonBody(patch): JsonBody<TaskPatch>,
) -> Result<Json<Rewarded<Task>>, ApiError> {
    let rewarded = state.scope(account).update_task(RecordId(id), patch)?;
    super::log_progression(account, &rewarded);
    Ok(Json(rewarded))
}

pub async fn toggle_task(
    State(state): State<AppState>,
    Extension(account): Extension<AccountId>,
    Path(id): Path<u64>,
) -> Result<Json<Rewarded<Task>>, ApiError> {
    let rewarded = state.scope(account).toggle_task(RecordId(id))?;
    super::log_progression(account, &rewarded);
    Ok(Json(rewarded))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Extension(account): Extension<AccountId>,
    Path(id): Path<u64>,
) -> Result<Json<DeleteResponse>, ApiError> {
    state.scope(account).delete_task(RecordId(id))?;
    Ok(Json(DeleteResponse::deleted("Task")))
}
