//! Registration, profile, manual XP, stats and export.

use crate::api::AppState;
use crate::api::error::{ApiError, JsonBody};
use crate::api::types::{HealthResponse, RegisterRequest, XpRequest};
use axum::{Extension, Json, extract::State, http::StatusCode};
use lifeos_core::services::{AccountExport, ProfilePatch, Registration, Stats, register};
use lifeos_core::{AccountId, Profile, Progression, Reward};

/// `GET /health`
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// `POST /api/auth/register`
pub async fn register_handler(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<Registration>), ApiError> {
    let registration = register(&state.store, &state.clock, &request.name, &request.email)?;
    tracing::info!(
        event = "account_registered",
        account = registration.account.id.0,
        "Account registered"
    );
    Ok((StatusCode::CREATED, Json(registration)))
}

/// `GET /api/auth/me` and `GET /api/user/profile`
pub async fn profile_handler(
    State(state): State<AppState>,
    Extension(account): Extension<AccountId>,
) -> Result<Json<Profile>, ApiError> {
    Ok(Json(state.scope(account).profile()?))
}

/// `PATCH /api/user/profile`
pub async fn update_profile_handler(
    State(state): State<AppState>,
    Extension(account): Extension<AccountId>,
    JsonBody(patch): JsonBody<ProfilePatch>,
) -> Result<Json<Profile>, ApiError> {
    Ok(Json(state.scope(account).update_profile(patch)?))
}

/// `POST /api/user/xp`
pub async fn grant_xp_handler(
    State(state): State<AppState>,
    Extension(account): Extension<AccountId>,
    JsonBody(request): JsonBody<XpRequest>,
) -> Result<Json<Progression>, ApiError> {
    let progression = state.scope(account).grant_xp(request.amount)?;
    super::log_reward(account, Reward::Manual(request.amount), &progression);
    Ok(Json(progression))
}

/// `GET /api/user/stats`
pub async fn stats_handler(
    State(state): State<AppState>,
    Extension(account): Extension<AccountId>,
) -> Result<Json<Stats>, ApiError> {
    Ok(Json(state.scope(account).stats()?))
}

/// `GET /api/user/export`
pub async fn export_handler(
    State(state): State<AppState>,
    Extension(account): Extension<AccountId>,
) -> Result<Json<AccountExport>, ApiError> {
    Ok(Json(state.scope(account).export()?))
}
