//! Daily reflections: one per calendar day, each rewarded.

use super::{AccountScope, Rewarded, title};
use crate::LifeError;
use crate::primitives::MAX_REFLECTION_ITEMS;
use crate::progression::Reward;
use crate::records::Reflection;
use chrono::NaiveDate;
use serde::Deserialize;
use std::cmp::Reverse;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReflection {
    /// Defaults to today.
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub gratitude: Vec<String>,
    #[serde(default)]
    pub wins: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
    pub mood: u8,
    pub energy_level: u8,
}

fn entries(field: &str, values: Vec<String>) -> Result<Vec<String>, LifeError> {
    if values.len() > MAX_REFLECTION_ITEMS {
        return Err(LifeError::Invalid(format!(
            "{field} holds at most {MAX_REFLECTION_ITEMS} entries"
        )));
    }
    values.iter().map(|v| title(field, v)).collect()
}

fn rating(field: &str, value: u8) -> Result<u8, LifeError> {
    if !(1..=5).contains(&value) {
        return Err(LifeError::Invalid(format!("{field} must be between 1 and 5")));
    }
    Ok(value)
}

impl AccountScope<'_> {
    /// Reflections, most recent day first.
    pub fn list_reflections(&self) -> Result<Vec<Reflection>, LifeError> {
        let mut reflections = self.store.read(|r| r.list::<Reflection>(self.account))?;
        reflections.sort_by_key(|r| Reverse(r.date));
        Ok(reflections)
    }

    /// Record the reflection for a day.
    ///
    /// # Errors
    ///
    /// `LifeError::Conflict` if that day already has one.
    pub fn create_reflection(&self, input: NewReflection) -> Result<Rewarded<Reflection>, LifeError> {
        let date = input.date.unwrap_or_else(|| self.today());
        let gratitude = entries("gratitude", input.gratitude)?;
        let wins = entries("wins", input.wins)?;
        let improvements = entries("improvements", input.improvements)?;
        let mood = rating("mood", input.mood)?;
        let energy_level = rating("energyLevel", input.energy_level)?;

        self.store.write(|tx| {
            if tx
                .list::<Reflection>(self.account)?
                .iter()
                .any(|r| r.date == date)
            {
                return Err(LifeError::Conflict(format!(
                    "a reflection for {date} already exists"
                )));
            }
            let reflection = Reflection {
                id: tx.allocate_record_id()?,
                date,
                gratitude,
                wins,
                improvements,
                mood,
                energy_level,
                created_at: self.now,
            };
            tx.put(self.account, &reflection)?;
            self.reward_if(tx, reflection, true, Reward::ReflectionRecorded)
        })
    }
}
