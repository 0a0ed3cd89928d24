//! # API Errors
//!
//! Maps `LifeError` onto HTTP statuses with a `{success: false, error}` body,
//! and wraps the JSON extractor so malformed bodies get the same shape.
//! `Option<JsonBody<T>>` treats a request without `Content-Type` as absent.

use super::types::ErrorResponse;
use axum::{
    Json,
    extract::{FromRequest, OptionalFromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use lifeos_core::LifeError;
use serde::de::DeserializeOwned;

/// A `LifeError` leaving through the HTTP boundary.
#[derive(Debug)]
pub struct ApiError(pub LifeError);

impl From<LifeError> for ApiError {
    fn from(err: LifeError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Status code for the wrapped error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self.0 {
            LifeError::InvalidAward(_) | LifeError::Invalid(_) => StatusCode::BAD_REQUEST,
            LifeError::Unauthorized => StatusCode::UNAUTHORIZED,
            LifeError::NotFound { .. } => StatusCode::NOT_FOUND,
            LifeError::Conflict(_) => StatusCode::CONFLICT,
            LifeError::Storage(_) | LifeError::Serialization(_) | LifeError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            tracing::error!(event = "internal_error", error = %self.0, "Request failed");
            "Internal server error".to_string()
        } else {
            self.0.to_string()
        };
        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

/// `axum::Json` whose rejections (bad syntax, wrong types, malformed dates)
/// become 400 responses in the API's error shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match <Json<T> as FromRequest<S>>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError(LifeError::Invalid(rejection.body_text()))),
        }
    }
}

impl<T, S> OptionalFromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Option<Self>, Self::Rejection> {
        match <Json<T> as OptionalFromRequest<S>>::from_request(req, state).await {
            Ok(body) => Ok(body.map(|Json(value)| Self(value))),
            Err(rejection) => Err(ApiError(LifeError::Invalid(rejection.body_text()))),
        }
    }
}
