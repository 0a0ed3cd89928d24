//! Pomodoro sessions.

use crate::api::AppState;
use crate::api::error::{ApiError, JsonBody};
use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
};
use lifeos_core::services::{FocusStats, NewFocusSession};
use lifeos_core::{AccountId, FocusSession, Rewarded};

pub async fn list_focus(
    State(state): State<AppState>,
    Extension(account): Extension<AccountId>,
) -> Result<Json<Vec<FocusSession>>, ApiError> {
    Ok(Json(state.scope(account).list_focus()?))
}

pub async fn create_focus(
    State(state): State<AppState>,
    Extension(account): Extension<AccountId>,
    JsonBody(input): JsonBody<NewFocusSession>,
) -> Result<(StatusCode, Json<Rewarded<FocusSession>>), ApiError> {
    let rewarded = state.scope(account).create_focus(input)?;
    super::log_progression(account, &rewarded);
    Ok((StatusCode::CREATED, Json(rewarded)))
}

pub async fn focus_stats(
    State(state): State<AppState>,
    Extension(account): Extension<AccountId>,
) -> Result<Json<FocusStats>, ApiError> {
    Ok(Json(state.scope(account).focus_stats()?))
}
