//! Idea capture and search.

use crate::api::AppState;
use crate::api::error::{ApiError, JsonBody};
use crate::api::types::DeleteResponse;
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use lifeos_core::services::{IdeaFilter, IdeaPatch, NewIdea};
use lifeos_core::{AccountId, Idea, RecordId, Rewarded};

pub async fn list_ideas(
    State(state): State<AppState>,
    Extension(account): Extension<AccountId>,
    Query(filter): Query<IdeaFilter>,
) -> Result<Json<Vec<Idea>>, ApiError> {
    Ok(Json(state.scope(account).list_ideas(&filter)?))
}

pub async fn create_idea(
    State(state): State<AppState>,
    Extension(account): Extension<AccountId>,
    JsonBody(input): JsonBody<NewIdea>,
) -> Result<(StatusCode, Json<Rewarded<Idea>>), ApiError> {
    let rewarded = state.scope(account).create_idea(input)?;
    super::log_progression(account, &rewarded);
    Ok((StatusCode::CREATED, Json(rewarded)))
}

pub async fn update_idea(
    State(state): State<AppState>,
    Extension(account): Extension<AccountId>,
    Path(id): Path<u64>,
    JsonBody(patch): JsonBody<IdeaPatch>,
) -> Result<Json<Idea>, ApiError> {
    Ok(Json(state.scope(account).update_idea(RecordId(id), patch)?))
}

pub async fn toggle_pin(
    State(state): State<AppState>,
    Extension(account): Extension<AccountId>,
    Path(id): Path<u64>,
) -> Result<Json<Idea>, ApiError> {
    Ok(Json(state.scope(account).toggle_idea_pin(RecordId(id))?))
}

pub async fn delete_idea(
    State(state): State<AppState>,
    Extension(account): Extension<AccountId>,
    Path(id): Path<u64>,
) -> Result<Json<DeleteResponse>, ApiError> {
    state.scope(account).delete_idea(RecordId(id))?;
    Ok(Json(DeleteResponse::deleted("Idea")))
}
