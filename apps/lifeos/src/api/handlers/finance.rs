//! Transaction routes. Amounts are integer cents.

use crate::api::AppState;
use crate::api::error::{ApiError, JsonBody};
use crate::api::types::DeleteResponse;
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use lifeos_core::services::{NewTransaction, TransactionFilter, TransactionSummary};
use lifeos_core::{AccountId, RecordId, Transaction};

pub async fn list_transactions(
    State(state): State<AppState>,
    Extension(account): Extension<AccountId>,
    Query(filter): Query<TransactionFilter>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    Ok(Json(state.scope(account).list_transactions(&filter)?))
}

pub async fn transaction_summary(
    State(state): State<AppState>,
    Extension(account): Extension<AccountId>,
) -> Result<Json<TransactionSummary>, ApiError> {
    Ok(Json(state.scope(account).transaction_summary()?))
}

pub async fn create_transaction(
    State(state): State<AppState>,
    Extension(account): Extension<AccountId>,
    JsonBody(input): JsonBody<NewTransaction>,
) -> Result<(StatusCode, Json<Transaction>), ApiError> {
    let transaction = state.scope(account).create_transaction(input)?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

pub async fn delete_transaction(
    State(state): State<AppState>,
    Extension(account): Extension<AccountId>,
    Path(id): Path<u64>,
) -> Result<Json<DeleteResponse>, ApiError> {
    state.scope(account).delete_transaction(RecordId(id))?;
    Ok(Json(DeleteResponse::deleted("Transaction")))
}
