//! Daily reflections, one per calendar day.

use crate::api::AppState;
use crate::api::error::{ApiError, JsonBody};
use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
};
use lifeos_core::services::NewReflection;
use lifeos_core::{AccountId, Reflection, Rewarded};

pub async fn list_reflections(
    State(state): State<AppState>,
    Extension(account): Extension<AccountId>,
) -> Result<Json<Vec<Reflection>>, ApiError> {
    Ok(Json(state.scope(account).list_reflections()?))
}

pub async fn create_reflection(
    State(state): State<AppState>,
    Extension(account): Extension<AccountId>,
    JsonBody(input): JsonBody<NewReflection>,
) -> Result<(StatusCode, Json<Rewarded<Reflection>>), ApiError> {
    let rewarded = state.scope(account).create_reflection(input)?;
    super::log_progression(account, &rewarded);
    Ok((StatusCode::CREATED, Json(rewarded)))
}
