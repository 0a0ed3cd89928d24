//! # XP/Level Ledger
//!
//! Converts point awards into a monotonic experience counter and a derived
//! level number.
//!
//! The ledger is pure: it never reads or writes storage. Callers persist the
//! returned [`Grant`] onto the account and surface `leveled_up` to the UI.
//!
//! ## Rules
//!
//! - `xp' = xp + amount` (saturating)
//! - `level' = xp' / XP_PER_LEVEL + 1`
//! - `leveled_up = level' > level`
//! - `amount <= 0` is rejected before anything is computed
//!
//! Grants are additive, not idempotent: applying the same award twice
//! doubles it.

use crate::LifeError;
use crate::primitives::XP_PER_LEVEL;
use serde::{Deserialize, Serialize};

/// Result of a single experience grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    /// Experience after the grant.
    pub xp: u64,
    /// Level derived from `xp`.
    pub level: u32,
    /// Whether `level` is higher than the level passed in.
    pub leveled_up: bool,
}

/// Level for a given experience total.
///
/// Piecewise constant and non-decreasing in `xp`; the first level is 1.
#[must_use]
pub fn level_for_xp(xp: u64) -> u32 {
    let bucket = xp / XP_PER_LEVEL;
    u32::try_from(bucket)
        .unwrap_or(u32::MAX)
        .saturating_add(1)
}

/// Experience still needed to reach the next level.
#[must_use]
pub fn xp_to_next_level(xp: u64) -> u64 {
    XP_PER_LEVEL - xp % XP_PER_LEVEL
}

/// Apply an award of `amount` points.
///
/// # Errors
///
/// Returns `LifeError::InvalidAward` if `amount` is zero or negative.
pub fn grant_experience(current_xp: u64, current_level: u32, amount: i64) -> Result<Grant, LifeError> {
    if amount <= 0 {
        return Err(LifeError::InvalidAward(amount));
    }

    let xp = current_xp.saturating_add(amount as u64);
    let level = level_for_xp(xp);

    Ok(Grant {
        xp,
        level,
        leveled_up: level > current_level,
    })
}

// =============================================================================
// TESTS
// =============================================================================
