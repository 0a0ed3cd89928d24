//! # lifeos-core
//!
//! The progression engine and record store for LifeOS.
//!
//! Two pieces of real logic live here:
//! - the **XP/Level Ledger** (`ledger`), a monotonic experience counter with
//!   a derived level, and
//! - the **Streak Calculator** (`streak`), which turns a set of completion
//!   dates into a current and best streak.
//!
//! Everything else is account-scoped bookkeeping over a redb database
//! (`storage`, `services`). A feature action mutates its record and applies
//! its reward in the same write transaction.
//!
//! ## Architectural Constraints
//!
//! - NO async, NO network dependencies (pure Rust)
//! - Integer arithmetic only; money is in cents, sleep in minutes
//! - The ledger and the streak calculator never touch storage

// =============================================================================
// MODULES
// =============================================================================

pub mod clock;
pub mod credentials;
pub mod ledger;
pub mod primitives;
pub mod progression;
pub mod records;
pub mod services;
pub mod storage;
pub mod streak;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types
// =============================================================================

pub use types::{
    AccountId, Cadence, FocusKind, GoalCategory, LearningKind, LifeError, Mood, Priority,
    RecordId, TransactionKind,
};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use clock::Clock;
pub use ledger::{Grant, grant_experience, level_for_xp, xp_to_next_level};
pub use progression::{Progression, Reward};
pub use streak::{HabitStreak, advance_engagement, compute_streak, engagement_as_of, toggle_date};

// =============================================================================
// RE-EXPORTS: Records, Storage and Services
// =============================================================================

pub use records::{
    Account, FocusSession, Goal, Habit, HealthEntry, Idea, LearningItem, Milestone, Profile,
    Reflection, Task, Transaction, Workout,
};
pub use services::{AccountScope, Rewarded};
pub use storage::{RedbStore, StoreStatus};
