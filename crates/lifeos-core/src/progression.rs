//! # Progression
//!
//! Binds feature actions to the ledger.
//!
//! A [`Reward`] names the action that earned experience; applying it to an
//! [`Account`] runs the ledger, advances the engagement streak and yields a
//! [`Progression`] the API hands back to the client.

use crate::LifeError;
use crate::ledger::grant_experience;
use crate::primitives::{
    FOCUS_BREAK_XP, FOCUS_WORK_XP, GOAL_ACHIEVED_XP, HABIT_CHECK_IN_XP, IDEA_CAPTURED_XP,
    LEARNING_FINISHED_XP, REFLECTION_RECORDED_XP, TASK_COMPLETED_XP, WORKOUT_LOGGED_XP,
};
use crate::records::Account;
use crate::streak::advance_engagement;
use crate::types::FocusKind;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An action that earns experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reward {
    TaskCompleted,
    HabitCheckIn,
    WorkoutLogged,
    FocusSession(FocusKind),
    LearningFinished,
    GoalAchieved,
    IdeaCaptured,
    ReflectionRecorded,
    /// Caller-supplied amount (manual grant endpoint).
    Manual(i64),
}

impl Reward {
    /// Points awarded for this action.
    #[must_use]
    pub fn amount(self) -> i64 {
        match self {
            Reward::TaskCompleted => TASK_COMPLETED_XP,
            Reward::HabitCheckIn => HABIT_CHECK_IN_XP,
            Reward::WorkoutLogged => WORKOUT_LOGGED_XP,
            Reward::FocusSession(kind) if kind.is_work() => FOCUS_WORK_XP,
            Reward::FocusSession(_) => FOCUS_BREAK_XP,
            Reward::LearningFinished => LEARNING_FINISHED_XP,
            Reward::GoalAchieved => GOAL_ACHIEVED_XP,
            Reward::IdeaCaptured => IDEA_CAPTURED_XP,
            Reward::ReflectionRecorded => REFLECTION_RECORDED_XP,
            Reward::Manual(amount) => amount,
        }
    }

    /// Stable name for logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Reward::TaskCompleted => "task_completed",
            Reward::HabitCheckIn => "habit_check_in",
            Reward::WorkoutLogged => "workout_logged",
            Reward::FocusSession(_) => "focus_session",
            Reward::LearningFinished => "learning_finished",
            Reward::GoalAchieved => "goal_achieved",
            Reward::IdeaCaptured => "idea_captured",
            Reward::ReflectionRecorded => "reflection_recorded",
            Reward::Manual(_) => "manual",
        }
    }
}

/// Outcome of applying a reward, returned to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progression {
    pub xp_added: u64,
    pub previous_level: u32,
    pub level: u32,
    pub current_xp: u64,
    pub leveled_up: bool,
}

impl Account {
    /// Apply `reward` earned on `today`.
    ///
    /// On `LifeError::InvalidAward` the account is left untouched.
    pub fn apply_reward(&mut self, reward: Reward, today: NaiveDate) -> Result<Progression, LifeError> {
        let previous_level = self.level;
        let grant = grant_experience(self.xp, self.level, reward.amount())?;

        let xp_added = grant.xp - self.xp;
        self.xp = grant.xp;
        self.level = grant.level;
        self.streak = advance_engagement(self.last_active_on, self.streak, today);
        self.last_active_on = Some(today);

        Ok(Progression {
            xp_added,
            previous_level,
            level: grant.level,
            current_xp: grant.xp,
            leveled_up: grant.leveled_up,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
