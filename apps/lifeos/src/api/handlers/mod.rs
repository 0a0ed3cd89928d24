//! # HTTP Handlers
//!
//! One module per feature area. Handlers build an `AccountScope` for the
//! authenticated caller, run the core operation and shape the response.
//! Anything that earns XP is logged through [`log_progression`].

pub mod account;
pub mod finance;
pub mod focus;
pub mod goals;
pub mod habits;
pub mod health;
pub mod ideas;
pub mod learning;
pub mod reflections;
pub mod tasks;

use lifeos_core::{AccountId, Progression, Reward, Rewarded};

/// Emit `reward` and, when the level changed, `level_up` events.
pub(crate) fn log_progression<T>(account: AccountId, rewarded: &Rewarded<T>) {
    if let (Some(reward), Some(progression)) = (rewarded.reward, rewarded.progression) {
        log_reward(account, reward, &progression);
    }
}

pub(crate) fn log_reward(account: AccountId, reward: Reward, progression: &Progression) {
    tracing::info!(
        event = "reward",
        account = account.0,
        reward = reward.name(),
        xp_added = progression.xp_added,
        xp = progression.current_xp,
        "XP awarded"
    );
    if progression.leveled_up {
        tracing::info!(
            event = "level_up",
            account = account.0,
            previous_level = progression.previous_level,
            level = progression.level,
            "Level up"
        );
    }
}
