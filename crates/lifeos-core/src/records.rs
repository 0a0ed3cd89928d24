//! # Records
//!
//! The canonical schema for everything an account owns.
//!
//! Each record serializes with explicit camelCase field names; the same
//! shape is used for storage (postcard) and for the HTTP boundary (JSON).
//! Fields that must never leave the server (credential digests) live on
//! [`Account`], which is not exposed directly; [`Profile`] is its public view.
//!
//! Records must not use `skip_serializing_if` or `flatten`: postcard is not
//! self-describing.

use crate::streak::{self, HabitStreak};
use crate::types::{
    AccountId, Cadence, FocusKind, GoalCategory, LearningKind, Mood, Priority, RecordId,
    TransactionKind,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// =============================================================================
// ACCOUNT
// =============================================================================

/// An account and its progression state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    /// Cumulative experience; never decreases.
    pub xp: u64,
    /// Derived from `xp`; always >= 1.
    pub level: u32,
    /// Daily engagement streak, advanced by XP-granting actions.
    pub streak: u32,
    pub last_active_on: Option<NaiveDate>,
    /// BLAKE3 digest of the access token secret.
    pub token_hash: [u8; 32],
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// A freshly registered account: xp 0, level 1, streak 0.
    #[must_use]
    pub fn new(
        id: AccountId,
        name: String,
        email: String,
        token_hash: [u8; 32],
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            avatar: None,
            xp: 0,
            level: 1,
            streak: 0,
            last_active_on: None,
            token_hash,
            created_at,
        }
    }

    /// Public view of this account as of `today`.
    #[must_use]
    pub fn profile(&self, today: NaiveDate) -> Profile {
        Profile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            avatar: self.avatar.clone(),
            xp: self.xp,
            level: self.level,
            xp_to_next_level: crate::ledger::xp_to_next_level(self.xp),
            streak: streak::engagement_as_of(self.last_active_on, self.streak, today),
            last_active_on: self.last_active_on,
            created_at: self.created_at,
        }
    }
}

/// Public projection of an [`Account`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub xp: u64,
    pub level: u32,
    pub xp_to_next_level: u64,
    pub streak: u32,
    pub last_active_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// TASKS
// =============================================================================

/// A to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: RecordId,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub category: String,
    pub due_date: Option<DateTime<Utc>>,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Set the completion flag.
    ///
    /// Returns `true` only on a false -> true transition.
    pub fn set_completed(&mut self, completed: bool, now: DateTime<Utc>) -> bool {
        let newly_completed = completed && !self.completed;
        self.completed = completed;
        self.completed_at = if completed {
            self.completed_at.or(Some(now))
        } else {
            None
        };
        newly_completed
    }
}

// =============================================================================
// HABITS
// =============================================================================

/// A recurring habit and its completion history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: RecordId,
    pub name: String,
    pub icon: String,
    pub color: String,
    #[serde(rename = "frequency")]
    pub cadence: Cadence,
    /// Source of truth for the streak fields.
    pub completed_dates: BTreeSet<NaiveDate>,
    pub streak: u32,
    pub best_streak: u32,
    pub created_at: DateTime<Utc>,
}

impl Habit {
    /// Flip `date` in the completion set and recompute the streak caches.
    ///
    /// Returns `true` if the date was added.
    pub fn toggle(&mut self, date: NaiveDate, today: NaiveDate) -> bool {
        let added = streak::toggle_date(&mut self.completed_dates, date);
        self.refresh_streak(today);
        added
    }

    /// Recompute `streak`/`best_streak` from the completion set.
    pub fn refresh_streak(&mut self, today: NaiveDate) {
        let cache = HabitStreak {
            current: self.streak,
            best: self.best_streak,
        }
        .recompute(&self.completed_dates, today);
        self.streak = cache.current;
        self.best_streak = cache.best;
    }
}

// =============================================================================
// GOALS
// =============================================================================

/// A step towards a goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: RecordId,
    pub title: String,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

/// A long-running goal broken into milestones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: RecordId,
    pub title: String,
    pub description: Option<String>,
    pub category: GoalCategory,
    /// Percentage, 0..=100.
    pub progress: u8,
    pub target_date: Option<DateTime<Utc>>,
    pub milestones: Vec<Milestone>,
    pub completed_at: Option<DateTime<Utc>>,
    /// Set the first time milestones carry the goal to 100; never cleared.
    pub achieved: bool,
    pub created_at: DateTime<Utc>,
}

impl Goal {
    /// Share of completed milestones as a percentage, rounded half up.
    ///
    /// A goal without milestones keeps its manually set progress.
    #[must_use]
    pub fn milestone_progress(&self) -> u8 {
        let total = self.milestones.len();
        if total == 0 {
            return self.progress;
        }
        let done = self.milestones.iter().filter(|m| m.completed).count();
        ((done * 200 + total) / (total * 2)) as u8
    }

    /// Derive `progress` and `completed_at` from the milestones.
    ///
    /// Returns `true` the first time this carries the goal to 100. Goals
    /// without milestones are left alone.
    pub fn settle_milestones(&mut self, now: DateTime<Utc>) -> bool {
        if self.milestones.is_empty() {
            return false;
        }
        self.progress = self.milestone_progress();
        if self.progress < 100 {
            self.completed_at = None;
            return false;
        }
        self.completed_at = self.completed_at.or(Some(now));
        let first = !self.achieved;
        self.achieved = true;
        first
    }
}

// =============================================================================
// FINANCE
// =============================================================================

/// A single income or expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: RecordId,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Always positive; the direction is carried by `kind`.
    pub amount_cents: u64,
    pub category: String,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// HEALTH
// =============================================================================

/// Exercise logged against a health entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: RecordId,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "duration")]
    pub duration_minutes: u32,
    pub calories_burned: Option<u32>,
    pub notes: Option<String>,
}

/// One day of health metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthEntry {
    pub id: RecordId,
    pub date: NaiveDate,
    #[serde(rename = "waterIntake")]
    pub water_glasses: u32,
    pub sleep_minutes: u32,
    pub mood: Option<Mood>,
    pub workouts: Vec<Workout>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// LEARNING
// =============================================================================

/// A course, book, skill or project being learned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningItem {
    pub id: RecordId,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: LearningKind,
    pub category: String,
    /// Percentage, 0..=100.
    pub progress: u8,
    pub notes: Option<String>,
    pub url: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// IDEAS
// =============================================================================

/// A captured idea.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    pub id: RecordId,
    pub title: String,
    pub content: Option<String>,
    pub category: String,
    pub tags: Vec<String>,
    pub pinned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Idea {
    /// Case-insensitive match on title or content.
    #[must_use]
    pub fn matches(&self, needle_lowercase: &str) -> bool {
        self.title.to_lowercase().contains(needle_lowercase)
            || self
                .content
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(needle_lowercase))
    }
}

// =============================================================================
// FOCUS
// =============================================================================

/// A finished focus or break session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusSession {
    pub id: RecordId,
    #[serde(rename = "duration")]
    pub duration_minutes: u32,
    #[serde(rename = "type")]
    pub kind: FocusKind,
    pub completed_at: DateTime<Utc>,
}

// =============================================================================
// REFLECTIONS
// =============================================================================

/// End-of-day reflection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reflection {
    pub id: RecordId,
    pub date: NaiveDate,
    pub gratitude: Vec<String>,
    pub wins: Vec<String>,
    pub improvements: Vec<String>,
    /// 1..=5
    pub mood: u8,
    /// 1..=5
    pub energy_level: u8,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// TESTS
// =============================================================================
