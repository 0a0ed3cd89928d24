//! Goal and milestone routes. Progress is derived from milestones when a
//! goal has any; reaching 100% the first time earns the goal bonus.

use crate::api::AppState;
use crate::api::error::{ApiError, JsonBody};
use crate::api::types::DeleteResponse;
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use lifeos_core::services::{GoalPatch, NewGoal, NewMilestone};
use lifeos_core::{AccountId, Goal, RecordId, Rewarded};

pub async fn list_goals(
    State(state): State<AppState>,
    Extension(account): Extension<AccountId>,
) -> Result<Json<Vec<Goal>>, ApiError> {
    Ok(Json(state.scope(account).list_goals()?))
}

pub async fn create_goal(
    State(state): State<AppState>,
    Extension(account): Extension<AccountId>,
    JsonBody(input): JsonBody<NewGoal>,
) -> Result<(StatusCode, Json<Goal>), ApiError> {
    let goal = state.scope(account).create_goal(input)?;
    Ok((StatusCode::CREATED, Json(goal)))
}

pub async fn update_goal(
    State(state): State<AppState>,
    Extension(account): Extension<AccountId>,
    Path(id): Path<u64>,
    JsonBody(patch): JsonBody<GoalPatch>,
) -> Result<Json<Goal>, ApiError> {
    Ok(Json(state.scope(account).update_goal(RecordId(id), patch)?))
}

pub async fn delete_goal(
    State(state): State<AppState>,
    Extension(account): Extension<AccountId>,
    Path(id): Path<u64>,
) -> Result<Json<DeleteResponse>, ApiError> {
    state.scope(account).delete_goal(RecordId(id))?;
    Ok(Json(DeleteResponse::deleted("Goal")))
}

pub async fn add_milestone(
    State(state): State<AppState>,
    Extension(account): Extension<AccountId>,
    Path(id): Path<u64>,
    JsonBody(input): JsonBody<NewMilestone>,
) -> Result<(StatusCode, Json<Goal>), ApiError> {
    let goal = state.scope(account).add_milestone(RecordId(id), input)?;
    Ok((StatusCode::CREATED, Json(goal)))
}

pub async fn toggle_milestone(
    State(state): State<AppState>,
    Extension(account): Extension<AccountId>,
    Path((goal, milestone)): Path<(u64, u64)>,
) -> Result<Json<Rewarded<Goal>>, ApiError> {
    let rewarded = state
        .scope(account)
        .toggle_milestone(RecordId(goal), RecordId(milestone))?;
    super::log_progression(account, &rewarded);
    Ok(Json(rewarded))
}
