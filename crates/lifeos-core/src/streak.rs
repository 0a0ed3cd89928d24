//! # Streak Calculator
//!
//! Converts a set of completion dates into a current-streak length, and
//! folds it into the best streak ever observed.
//!
//! ## Algorithm
//!
//! 1. No dates: streak is 0.
//! 2. Dates are deduplicated and walked most recent first.
//! 3. If the most recent date is neither the reference day nor the day
//!    before it, the streak is broken: 0. This holds even when a long
//!    unbroken run exists further back.
//! 4. Otherwise count each date that is exactly one day before the current
//!    anchor, moving the anchor back; stop at the first gap.
//!
//! The completion set is the source of truth. `current`/`best` are caches
//! and are recomputed after every change to the set.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Length of the run of consecutive days ending on `reference` or the day before.
#[must_use]
pub fn compute_streak<'a, I>(dates: I, reference: NaiveDate) -> u32
where
    I: IntoIterator<Item = &'a NaiveDate>,
{
    let unique: BTreeSet<NaiveDate> = dates.into_iter().copied().collect();
    let mut descending = unique.iter().rev();

    let Some(&most_recent) = descending.next() else {
        return 0;
    };

    if most_recent != reference && Some(most_recent) != reference.pred_opt() {
        return 0;
    }

    let mut streak: u32 = 1;
    let mut anchor = most_recent;
    for &date in descending {
        if Some(date) != anchor.pred_opt() {
            break;
        }
        streak = streak.saturating_add(1);
        anchor = date;
    }

    streak
}

/// Flip membership of `date` in a completion set.
///
/// Returns `true` if the date was added, `false` if it was removed.
pub fn toggle_date(dates: &mut BTreeSet<NaiveDate>, date: NaiveDate) -> bool {
    if dates.remove(&date) {
        false
    } else {
        dates.insert(date);
        true
    }
}

// =============================================================================
// HABIT STREAK CACHE
// =============================================================================

/// Cached streak values stored on a habit.
///
/// Invariant: `best >= current` after every call to [`HabitStreak::recompute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HabitStreak {
    /// Current run length as of the last recomputation.
    pub current: u32,
    /// Highest value `current` has ever reached.
    pub best: u32,
}

impl HabitStreak {
    /// Recompute from the full completion set and fold into the best streak.
    #[must_use]
    pub fn recompute(self, dates: &BTreeSet<NaiveDate>, reference: NaiveDate) -> Self {
        let current = compute_streak(dates, reference);
        Self {
            current,
            best: self.best.max(current),
        }
    }
}

// =============================================================================
// ACCOUNT ENGAGEMENT
// =============================================================================

/// Advance the account-wide engagement streak for activity on `today`.
///
/// Same day leaves it unchanged, the day after the last activity extends it,
/// anything else restarts it at 1.
#[must_use]
pub fn advance_engagement(last_active_on: Option<NaiveDate>, streak: u32, today: NaiveDate) -> u32 {
    match last_active_on {
        Some(last) if last == today => streak.max(1),
        Some(last) if Some(last) == today.pred_opt() => streak.saturating_add(1),
        _ => 1,
    }
}

/// Engagement streak as it should be reported on `today`.
///
/// A counter whose last activity is older than yesterday has lapsed.
#[must_use]
pub fn engagement_as_of(last_active_on: Option<NaiveDate>, streak: u32, today: NaiveDate) -> u32 {
    match last_active_on {
        Some(last) if last == today || Some(last) == today.pred_opt() => streak,
        _ => 0,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("date")
    }

    fn days_back(today: NaiveDate, offsets: &[u64]) -> BTreeSet<NaiveDate> {
        offsets
            .iter()
            .map(|&n| today - chrono::Days::new(n))
            .collect()
    }

    #[test]
    fn empty_set_is_zero() {
        assert_eq!(compute_streak(&BTreeSet::new(), day("2026-03-10")), 0);
    }

    #[test]
    fn single_completion_today() {
        let today = day("2026-03-10");
        assert_eq!(compute_streak(&days_back(today, &[0]), today), 1);
    }

    #[test]
    fn yesterday_only_is_still_alive() {
        let today = day("2026-03-10");
        assert_eq!(compute_streak(&days_back(today, &[1]), today), 1);
    }

    #[test]
    fn two_days_ago_only_is_broken() {
        let today = day("2026-03-10");
        assert_eq!(compute_streak(&days_back(today, &[2]), today), 0);
    }

    #[test]
    fn five_days_ending_today() {
        let today = day("2026-03-10");
        let dates = days_back(today, &[0, 1, 2, 3, 4]);
        assert_eq!(compute_streak(&dates, today), 5);
    }

    #[test]
    fn five_days_ending_yesterday() {
        let today = day("2026-03-10");
        let dates = days_back(today, &[1, 2, 3, 4, 5]);
        assert_eq!(compute_streak(&dates, today), 5);
    }

    #[test]
    fn stops_at_first_gap() {
        let today = day("2026-03-10");
        let dates = days_back(today, &[0, 1, 3]);
        assert_eq!(compute_streak(&dates, today), 2);
    }

    #[test]
    fn long_run_behind_a_gap_does_not_count() {
        let today = day("2026-03-10");
        let dates = days_back(today, &[2, 3, 4, 5, 6, 7]);
        assert_eq!(compute_streak(&dates, today), 0);
    }

    #[test]
    fn duplicates_do_not_double_count() {
        let today = day("2026-03-10");
        let dates = vec![today, today, today - chrono::Days::new(1), today];
        assert_eq!(compute_streak(&dates, today), 2);
    }

    #[test]
    fn future_dates_break_the_anchor() {
        let today = day("2026-03-10");
        let dates = vec![today, today + chrono::Days::new(1)];
        assert_eq!(compute_streak(&dates, today), 0);
    }

    #[test]
    fn run_across_month_boundary() {
        let today = day("2026-03-01");
        let dates = vec![day("2026-02-27"), day("2026-02-28"), today];
        assert_eq!(compute_streak(&dates, today), 3);
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut dates = BTreeSet::new();
        let d = day("2026-03-10");
        assert!(toggle_date(&mut dates, d));
        assert!(dates.contains(&d));
        assert!(!toggle_date(&mut dates, d));
        assert!(dates.is_empty());
    }

    #[test]
    fn toggling_off_most_recent_can_zero_the_streak() {
        let today = day("2026-03-10");
        // today, then a run that ends two days ago
        let mut dates = days_back(today, &[0, 2, 3, 4]);
        let streak = HabitStreak::default().recompute(&dates, today);
        assert_eq!(streak.current, 1);

        toggle_date(&mut dates, today);
        let streak = streak.recompute(&dates, today);
        assert_eq!(streak.current, 0);
        assert_eq!(streak.best, 1);
    }

    #[test]
    fn best_never_decreases() {
        let today = day("2026-03-10");
        let full = days_back(today, &[0, 1, 2]);
        let streak = HabitStreak::default().recompute(&full, today);
        assert_eq!(streak, HabitStreak { current: 3, best: 3 });

        let streak = streak.recompute(&BTreeSet::new(), today);
        assert_eq!(streak, HabitStreak { current: 0, best: 3 });
    }

    #[test]
    fn engagement_same_day_unchanged() {
        let today = day("2026-03-10");
        assert_eq!(advance_engagement(Some(today), 4, today), 4);
    }

    #[test]
    fn engagement_next_day_extends() {
        let today = day("2026-03-10");
        let yesterday = day("2026-03-09");
        assert_eq!(advance_engagement(Some(yesterday), 4, today), 5);
    }

    #[test]
    fn engagement_after_gap_restarts() {
        let today = day("2026-03-10");
        assert_eq!(advance_engagement(Some(day("2026-03-01")), 9, today), 1);
        assert_eq!(advance_engagement(None, 0, today), 1);
    }

    #[test]
    fn engagement_lapses_when_read_late() {
        let today = day("2026-03-10");
        assert_eq!(engagement_as_of(Some(day("2026-03-09")), 3, today), 3);
        assert_eq!(engagement_as_of(Some(day("2026-03-08")), 3, today), 0);
        assert_eq!(engagement_as_of(None, 0, today), 0);
    }
}
