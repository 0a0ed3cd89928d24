//! # API Types
//!
//! Request and response bodies that exist only at the HTTP boundary. Feature
//! payloads (`NewTask`, `Goal`, ...) are the core's own serde types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Error body for every non-2xx response produced by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
}

/// Manual experience grant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct XpRequest {
    pub amount: i64,
}

/// Habit check-in toggle. Without a date, today is toggled.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ToggleHabitRequest {
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Acknowledgement for deletions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

impl DeleteResponse {
    #[must_use]
    pub fn deleted(kind: &str) -> Self {
        Self {
            success: true,
            message: format!("{kind} deleted"),
        }
    }
}
