//! Habit operations.
//!
//! Toggling a date flips it in the completion set, then recomputes the streak
//! caches from the whole set. Only adding *today* earns XP; back-filling past
//! days repairs the streak without a reward.

use super::{AccountScope, Rewarded, title};
use crate::LifeError;
use crate::progression::Reward;
use crate::records::Habit;
use crate::types::{Cadence, RecordId};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHabit {
    pub name: String,
    pub icon: Option<String>,
    pub color: Option<String>,
    #[serde(default, rename = "frequency")]
    pub cadence: Cadence,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitPatch {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    #[serde(rename = "frequency")]
    pub cadence: Option<Cadence>,
}

const DEFAULT_ICON: &str = "⭐";
const DEFAULT_COLOR: &str = "#ff6b6b";

impl AccountScope<'_> {
    /// Habits in creation order.
    pub fn list_habits(&self) -> Result<Vec<Habit>, LifeError> {
        self.store.read(|r| r.list::<Habit>(self.account))
    }

    pub fn create_habit(&self, input: NewHabit) -> Result<Habit, LifeError> {
        let name = title("name", &input.name)?;
        self.store.write(|tx| {
            let habit = Habit {
                id: tx.allocate_record_id()?,
                name,
                icon: input.icon.unwrap_or_else(|| DEFAULT_ICON.to_string()),
                color: input.color.unwrap_or_else(|| DEFAULT_COLOR.to_string()),
                cadence: input.cadence,
                completed_dates: BTreeSet::new(),
                streak: 0,
                best_streak: 0,
                created_at: self.now,
            };
            tx.put(self.account, &habit)?;
            Ok(habit)
        })
    }

    pub fn update_habit(&self, id: RecordId, patch: HabitPatch) -> Result<Habit, LifeError> {
        let name = patch.name.as_deref().map(|n| title("name", n)).transpose()?;
        self.store.write(|tx| {
            let mut habit: Habit = tx.require(self.account, id)?;
            if let Some(n) = name {
                habit.name = n;
            }
            if let Some(icon) = patch.icon {
                habit.icon = icon;
            }
            if let Some(color) = patch.color {
                habit.color = color;
            }
            if let Some(cadence) = patch.cadence {
                habit.cadence = cadence;
            }
            tx.put(self.account, &habit)?;
            Ok(habit)
        })
    }

    pub fn delete_habit(&self, id: RecordId) -> Result<(), LifeError> {
        self.store.write(|tx| tx.remove::<Habit>(self.account, id))
    }

    /// Flip `date` (default: the scope's current day) in the habit's
    /// completion set.
    ///
    /// The streak is recomputed against the scope's current day, whatever
    /// `date` is. XP is granted only when today's date is added. Dates after
    /// today are rejected.
    pub fn toggle_habit(
        &self,
        id: RecordId,
        date: Option<NaiveDate>,
    ) -> Result<Rewarded<Habit>, LifeError> {
        let today = self.today();
        let date = date.unwrap_or(today);
        if date > today {
            return Err(LifeError::Invalid(format!(
                "date: {} is after today ({})",
                date, today
            )));
        }
        self.store.write(|tx| {
            let mut habit: Habit = tx.require(self.account, id)?;
            let added = habit.toggle(date, today);
            tx.put(self.account, &habit)?;
            self.reward_if(tx, habit, added && date == today, Reward::HabitCheckIn)
        })
    }
}
