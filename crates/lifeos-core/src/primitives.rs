//! # Engine Primitives
//!
//! Hardcoded constants for the LifeOS progression engine.
//!
//! These values are compiled into the binary and are immutable at runtime.
//!
//! ## Primitives
//!
//! 1. **Level Primitive**: how much experience one level costs.
//! 2. **Reward Primitives**: the award attached to each progression event.
//! 3. **Validation Limits**: bounds enforced on every record before it is stored.

/// Experience points required per level.
///
/// `level = xp / XP_PER_LEVEL + 1`. This is the one canonical value for every
/// awarding action; a client that shows 500 per level is out of date.
pub const XP_PER_LEVEL: u64 = 1000;

// =============================================================================
// REWARDS
// =============================================================================

/// Completing a task (false -> true transition only).
pub const TASK_COMPLETED_XP: i64 = 10;

/// Marking a habit done for the current day.
pub const HABIT_CHECK_IN_XP: i64 = 5;

/// Logging a workout against a health entry.
pub const WORKOUT_LOGGED_XP: i64 = 15;

/// Finishing a full pomodoro work session.
pub const FOCUS_WORK_XP: i64 = 20;

/// Finishing a short or long break.
pub const FOCUS_BREAK_XP: i64 = 5;

/// A learning item reaching 100% progress.
pub const LEARNING_FINISHED_XP: i64 = 50;

/// A goal reaching 100% through its milestones.
pub const GOAL_ACHIEVED_XP: i64 = 100;

/// Capturing a new idea.
pub const IDEA_CAPTURED_XP: i64 = 5;

/// Recording a daily reflection.
pub const REFLECTION_RECORDED_XP: i64 = 20;

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum length for titles and names.
pub const MAX_TITLE_LENGTH: usize = 256;

/// Maximum length for free-form text (descriptions, notes, idea content).
pub const MAX_TEXT_LENGTH: usize = 65536;

/// Maximum number of tags on an idea.
pub const MAX_TAGS: usize = 32;

/// Maximum number of milestones on a goal.
pub const MAX_MILESTONES: usize = 100;

/// Maximum entries per reflection list (gratitude, wins, improvements).
pub const MAX_REFLECTION_ITEMS: usize = 20;

/// Minutes in a day; upper bound for sleep duration.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Maximum number of focus sessions returned by a listing.
pub const FOCUS_HISTORY_LIMIT: usize = 50;

/// Maximum number of health entries returned by a listing.
pub const HEALTH_HISTORY_LIMIT: usize = 30;
