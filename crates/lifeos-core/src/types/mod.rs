//! # Core Type Definitions
//!
//! This module contains the shared vocabulary of the LifeOS engine:
//! - Identifiers (`AccountId`, `RecordId`)
//! - Closed enumerations used by the records (`Priority`, `Cadence`, ...)
//! - Error types (`LifeError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer arithmetic only (no floating-point)
//! - Implement `Ord` where they are used as keys in `BTreeMap`/`BTreeSet`

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Unique identifier of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(pub u64);

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a record owned by an account.
///
/// Record ids are allocated from a single store-wide counter, so an id is
/// never reused across record kinds or accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(pub u64);

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// ENUMERATIONS
// =============================================================================

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Urgent,
    High,
    #[default]
    Medium,
    Low,
}

/// How often a habit is meant to be performed.
///
/// Informational: streaks are always counted in consecutive calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    #[default]
    Daily,
    Weekly,
}

/// Goal category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GoalCategory {
    Career,
    Health,
    Finance,
    #[default]
    Personal,
    Learning,
    Relationships,
}

/// Direction of a money movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

/// Self-reported mood on a health entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Great,
    Good,
    Okay,
    Bad,
    Terrible,
}

/// Kind of learning item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LearningKind {
    #[default]
    Course,
    Book,
    Skill,
    Project,
}

/// Kind of focus session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum FocusKind {
    #[default]
    Pomodoro,
    ShortBreak,
    LongBreak,
}

impl FocusKind {
    /// Whether this is a work session (as opposed to a break).
    #[must_use]
    pub fn is_work(self) -> bool {
        matches!(self, FocusKind::Pomodoro)
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the LifeOS engine and store.
///
/// - No silent failures
/// - Use `Result<T, LifeError>` for fallible operations
/// - The engine never panics; contract violations are rejected with an error
#[derive(Debug, Error)]
pub enum LifeError {
    /// An experience award was zero or negative.
    #[error("Invalid award amount: {0} (must be positive)")]
    InvalidAward(i64),

    /// The requested record does not exist for this account.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: u64 },

    /// Input failed validation at the boundary.
    #[error("Invalid input: {0}")]
    Invalid(String),

    /// The operation conflicts with existing state.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Credentials were missing or did not match.
    #[error("Unauthorized")]
    Unauthorized,

    /// The underlying database reported an error.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A record could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A file could not be read or written.
    #[error("I/O error: {0}")]
    Io(String),
}

impl LifeError {
    /// Shorthand for a missing record.
    #[must_use]
    pub fn not_found(kind: &'static str, id: RecordId) -> Self {
        LifeError::NotFound { kind, id: id.0 }
    }
}

// =============================================================================
// TESTS
// =============================================================================
