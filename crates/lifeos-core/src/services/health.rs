//! Daily health entries and the workouts logged against them.

use super::{AccountScope, Rewarded, text, title};
use crate::LifeError;
use crate::primitives::{HEALTH_HISTORY_LIMIT, MINUTES_PER_DAY};
use crate::progression::Reward;
use crate::records::{HealthEntry, Workout};
use crate::types::{Mood, RecordId};
use serde::Deserialize;
use std::cmp::Reverse;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthPatch {
    #[serde(rename = "waterIntake")]
    pub water_glasses: Option<u32>,
    pub sleep_minutes: Option<u32>,
    pub mood: Option<Mood>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkout {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "duration")]
    pub duration_minutes: u32,
    pub calories_burned: Option<u32>,
    pub notes: Option<String>,
}

impl AccountScope<'_> {
    /// The most recent entries, newest day first.
    pub fn list_health(&self) -> Result<Vec<HealthEntry>, LifeError> {
        let mut entries = self.store.read(|r| r.list::<HealthEntry>(self.account))?;
        entries.sort_by_key(|e| (Reverse(e.date), Reverse(e.id)));
        entries.truncate(HEALTH_HISTORY_LIMIT);
        Ok(entries)
    }

    /// Today's entry, created empty on first access.
    pub fn health_today(&self) -> Result<HealthEntry, LifeError> {
        let today = self.today();
        self.store.write(|tx| {
            let existing = tx
                .list::<HealthEntry>(self.account)?
                .into_iter()
                .find(|e| e.date == today);
            if let Some(entry) = existing {
                return Ok(entry);
            }
            let entry = HealthEntry {
                id: tx.allocate_record_id()?,
                date: today,
                water_glasses: 0,
                sleep_minutes: 0,
                mood: None,
                workouts: Vec::new(),
                created_at: self.now,
            };
            tx.put(self.account, &entry)?;
            Ok(entry)
        })
    }

    pub fn update_health(&self, id: RecordId, patch: HealthPatch) -> Result<HealthEntry, LifeError> {
        if patch.sleep_minutes.is_some_and(|m| m > MINUTES_PER_DAY) {
            return Err(LifeError::Invalid(format!(
                "sleepMinutes must be at most {MINUTES_PER_DAY}"
            )));
        }
        self.store.write(|tx| {
            let mut entry: HealthEntry = tx.require(self.account, id)?;
            if let Some(water) = patch.water_glasses {
                entry.water_glasses = water;
            }
            if let Some(sleep) = patch.sleep_minutes {
                entry.sleep_minutes = sleep;
            }
            if patch.mood.is_some() {
                entry.mood = patch.mood;
            }
            tx.put(self.account, &entry)?;
            Ok(entry)
        })
    }

    /// Log a workout on an entry. Always rewarded.
    pub fn add_workout(&self, entry_id: RecordId, input: NewWorkout) -> Result<Rewarded<Workout>, LifeError> {
        let kind = title("type", &input.kind)?;
        if input.duration_minutes == 0 {
            return Err(LifeError::Invalid(
                "duration must be at least 1 minute".to_string(),
            ));
        }
        let notes = text("notes", input.notes)?;

        self.store.write(|tx| {
            let mut entry: HealthEntry = tx.require(self.account, entry_id)?;
            let workout = Workout {
                id: tx.allocate_record_id()?,
                kind,
                duration_minutes: input.duration_minutes,
                calories_burned: input.calories_burned,
                notes,
            };
            entry.workouts.push(workout.clone());
            tx.put(self.account, &entry)?;
            self.reward_if(tx, workout, true, Reward::WorkoutLogged)
        })
    }
}
