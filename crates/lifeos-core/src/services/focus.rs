//! Focus (pomodoro) sessions and their totals.

use super::{AccountScope, Rewarded};
use crate::LifeError;
use crate::primitives::FOCUS_HISTORY_LIMIT;
use crate::progression::Reward;
use crate::records::FocusSession;
use crate::types::FocusKind;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFocusSession {
    #[serde(rename = "duration")]
    pub duration_minutes: u32,
    #[serde(default, rename = "type")]
    pub kind: FocusKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusStats {
    pub total_minutes: u64,
    /// Minutes of sessions completed on the current UTC day.
    pub today_minutes: u64,
    pub total_sessions: u64,
}

impl AccountScope<'_> {
    /// The most recent sessions, newest first.
    pub fn list_focus(&self) -> Result<Vec<FocusSession>, LifeError> {
        let mut sessions = self.store.read(|r| r.list::<FocusSession>(self.account))?;
        sessions.sort_by_key(|s| (Reverse(s.completed_at), Reverse(s.id)));
        sessions.truncate(FOCUS_HISTORY_LIMIT);
        Ok(sessions)
    }

    /// Record a finished session; work sessions earn more than breaks.
    pub fn create_focus(&self, input: NewFocusSession) -> Result<Rewarded<FocusSession>, LifeError> {
        if input.duration_minutes == 0 {
            return Err(LifeError::Invalid(
                "duration must be at least 1 minute".to_string(),
            ));
        }
        self.store.write(|tx| {
            let session = FocusSession {
                id: tx.allocate_record_id()?,
                duration_minutes: input.duration_minutes,
                kind: input.kind,
                completed_at: self.now,
            };
            tx.put(self.account, &session)?;
            self.reward_if(tx, session, true, Reward::FocusSession(input.kind))
        })
    }

    pub fn focus_stats(&self) -> Result<FocusStats, LifeError> {
        let today = self.today();
        let sessions = self.store.read(|r| r.list::<FocusSession>(self.account))?;
        let mut stats = FocusStats {
            total_minutes: 0,
            today_minutes: 0,
            total_sessions: sessions.len() as u64,
        };
        for s in &sessions {
            let minutes = u64::from(s.duration_minutes);
            stats.total_minutes = stats.total_minutes.saturating_add(minutes);
            if s.completed_at.date_naive() == today {
                stats.today_minutes = stats.today_minutes.saturating_add(minutes);
            }
        }
        Ok(stats)
    }
}
