//! # Account-Scoped Services
//!
//! Every feature operation runs through an [`AccountScope`]: the store, the
//! authenticated account and the instant the request is served at. There is
//! no ambient global store; a scope is built per request.
//!
//! Mutations run inside a single [`RedbStore::write`] transaction, including
//! the XP grant they trigger, so a feature change and its reward are
//! committed together or not at all.

mod account;
mod finance;
mod focus;
mod goals;
mod habits;
mod health;
mod ideas;
mod learning;
mod reflections;
mod tasks;

pub use account::{AccountExport, ProfilePatch, Registration, Stats, register};
pub use finance::{NewTransaction, TransactionFilter, TransactionSummary};
pub use focus::{FocusStats, NewFocusSession};
pub use goals::{GoalPatch, NewGoal, NewMilestone};
pub use habits::{HabitPatch, NewHabit};
pub use health::{HealthPatch, NewWorkout};
pub use ideas::{IdeaFilter, IdeaPatch, NewIdea};
pub use learning::{LearningPatch, NewLearningItem};
pub use reflections::NewReflection;
pub use tasks::{NewTask, TaskFilter, TaskPatch};

use crate::LifeError;
use crate::clock::Clock;
use crate::primitives::{MAX_TEXT_LENGTH, MAX_TITLE_LENGTH};
use crate::progression::{Progression, Reward};
use crate::storage::{RedbStore, WriteTxn};
use crate::types::AccountId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// Operations on behalf of one authenticated account.
#[derive(Debug, Clone, Copy)]
pub struct AccountScope<'s> {
    store: &'s RedbStore,
    account: AccountId,
    now: DateTime<Utc>,
}

impl<'s> AccountScope<'s> {
    /// Scope `store` to `account`, reading the time once from `clock`.
    #[must_use]
    pub fn new(store: &'s RedbStore, account: AccountId, clock: &Clock) -> Self {
        Self {
            store,
            account,
            now: clock.now(),
        }
    }

    /// The account this scope acts for.
    #[must_use]
    pub fn account(&self) -> AccountId {
        self.account
    }

    fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    /// Grant `reward` inside the caller's transaction.
    ///
    /// A rejected amount leaves the account untouched and yields `None`; the
    /// feature mutation that triggered it still goes through.
    fn award(&self, tx: &WriteTxn<'_>, reward: Reward) -> Result<Option<Progression>, LifeError> {
        let mut account = tx.account(self.account)?;
        match account.apply_reward(reward, self.today()) {
            Ok(progression) => {
                tx.put_account(&account)?;
                Ok(Some(progression))
            }
            Err(LifeError::InvalidAward(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Wrap `item`, granting `reward` when `earned`.
    fn reward_if<T>(
        &self,
        tx: &WriteTxn<'_>,
        item: T,
        earned: bool,
        reward: Reward,
    ) -> Result<Rewarded<T>, LifeError> {
        if !earned {
            return Ok(Rewarded::plain(item));
        }
        let progression = self.award(tx, reward)?;
        Ok(Rewarded {
            item,
            reward: progression.map(|_| reward),
            progression,
        })
    }
}

/// A feature result together with the progression it earned, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rewarded<T> {
    #[serde(flatten)]
    pub item: T,
    /// Action that was rewarded; set whenever `progression` is.
    #[serde(skip)]
    pub reward: Option<Reward>,
    pub progression: Option<Progression>,
}

impl<T> Rewarded<T> {
    fn plain(item: T) -> Self {
        Self {
            item,
            reward: None,
            progression: None,
        }
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

/// A required, non-blank title of bounded length. Returns it trimmed.
fn title(field: &str, value: &str) -> Result<String, LifeError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LifeError::Invalid(format!("{field} is required")));
    }
    if trimmed.len() > MAX_TITLE_LENGTH {
        return Err(LifeError::Invalid(format!(
            "{field} exceeds {MAX_TITLE_LENGTH} bytes"
        )));
    }
    Ok(trimmed.to_string())
}

/// Optional free-form text of bounded length.
fn text(field: &str, value: Option<String>) -> Result<Option<String>, LifeError> {
    match value {
        Some(v) if v.len() > MAX_TEXT_LENGTH => Err(LifeError::Invalid(format!(
            "{field} exceeds {MAX_TEXT_LENGTH} bytes"
        ))),
        other => Ok(other),
    }
}

/// A category label; blank falls back to `general`.
fn category(value: Option<String>) -> Result<String, LifeError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok("general".to_string()),
        Some(v) => title("category", v),
    }
}

/// A percentage in 0..=100.
fn percent(field: &str, value: u8) -> Result<u8, LifeError> {
    if value > 100 {
        return Err(LifeError::Invalid(format!("{field} must be between 0 and 100")));
    }
    Ok(value)
}
