//! Registration, profile, manual XP grants, stats and export.

use super::{AccountScope, title};
use crate::LifeError;
use crate::clock::Clock;
use crate::credentials;
use crate::progression::{Progression, Reward};
use crate::records::{
    Account, FocusSession, Goal, Habit, HealthEntry, Idea, LearningItem, Profile, Reflection,
    Task, Transaction,
};
use crate::storage::RedbStore;
use crate::types::AccountId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of registering: the one-time token and the new profile.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub token: String,
    pub account: Profile,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    pub name: Option<String>,
    /// An empty string clears the avatar.
    pub avatar: Option<String>,
}

/// Aggregate counters shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub active_goals: u64,
    pub tasks_completed: u64,
    pub tasks_pending: u64,
    pub habits_tracked: u64,
    pub total_focus_minutes: u64,
}

/// Everything an account owns, in one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountExport {
    pub exported_at: DateTime<Utc>,
    pub profile: Profile,
    pub tasks: Vec<Task>,
    pub habits: Vec<Habit>,
    pub goals: Vec<Goal>,
    pub transactions: Vec<Transaction>,
    pub health: Vec<HealthEntry>,
    pub learning: Vec<LearningItem>,
    pub ideas: Vec<Idea>,
    pub focus_sessions: Vec<FocusSession>,
    pub reflections: Vec<Reflection>,
}

fn normalize_email(email: &str) -> Result<String, LifeError> {
    let email = email.trim().to_lowercase();
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !valid || email.len() > crate::primitives::MAX_TITLE_LENGTH {
        return Err(LifeError::Invalid("a valid email is required".to_string()));
    }
    Ok(email)
}

/// Create an account and issue its access token.
///
/// # Errors
///
/// `LifeError::Conflict` if the e-mail (case-insensitive) is already taken.
pub fn register(
    store: &RedbStore,
    clock: &Clock,
    name: &str,
    email: &str,
) -> Result<Registration, LifeError> {
    let name = title("name", name)?;
    let email = normalize_email(email)?;
    let now = clock.now();

    store.write(|tx| {
        if tx.account_by_email(&email)?.is_some() {
            return Err(LifeError::Conflict(format!("{email} is already registered")));
        }
        let id = AccountId(tx.allocate_id()?);
        let issued = credentials::issue(id);
        let account = Account::new(id, name, email, issued.digest, now);
        tx.put_account(&account)?;
        tx.index_email(&account.email, id)?;
        Ok(Registration {
            token: issued.token,
            account: account.profile(now.date_naive()),
        })
    })
}

impl AccountScope<'_> {
    pub fn profile(&self) -> Result<Profile, LifeError> {
        let account = self.store.read(|r| r.account(self.account))?;
        Ok(account.profile(self.today()))
    }

    pub fn update_profile(&self, patch: ProfilePatch) -> Result<Profile, LifeError> {
        let name = patch.name.as_deref().map(|n| title("name", n)).transpose()?;
        let avatar = patch
            .avatar
            .map(|a| {
                let a = a.trim();
                if a.is_empty() {
                    Ok(None)
                } else {
                    super::text("avatar", Some(a.to_string()))
                }
            })
            .transpose()?;

        self.store.write(|tx| {
            let mut account = tx.account(self.account)?;
            if let Some(n) = name {
                account.name = n;
            }
            if let Some(a) = avatar {
                account.avatar = a;
            }
            tx.put_account(&account)?;
            Ok(account.profile(self.today()))
        })
    }

    /// Grant a caller-chosen amount of XP.
    ///
    /// # Errors
    ///
    /// `LifeError::InvalidAward` if `amount <= 0`; the account is unchanged.
    pub fn grant_xp(&self, amount: i64) -> Result<Progression, LifeError> {
        self.store.write(|tx| {
            let mut account = tx.account(self.account)?;
            let progression = account.apply_reward(Reward::Manual(amount), self.today())?;
            tx.put_account(&account)?;
            Ok(progression)
        })
    }

    pub fn stats(&self) -> Result<Stats, LifeError> {
        self.store.read(|r| {
            let goals = r.list::<Goal>(self.account)?;
            let tasks = r.list::<Task>(self.account)?;
            let habits = r.list::<Habit>(self.account)?;
            let sessions = r.list::<FocusSession>(self.account)?;

            let tasks_completed = tasks.iter().filter(|t| t.completed).count() as u64;
            Ok(Stats {
                active_goals: goals.iter().filter(|g| g.completed_at.is_none()).count() as u64,
                tasks_completed,
                tasks_pending: tasks.len() as u64 - tasks_completed,
                habits_tracked: habits.len() as u64,
                total_focus_minutes: sessions
                    .iter()
                    .map(|s| u64::from(s.duration_minutes))
                    .fold(0u64, u64::saturating_add),
            })
        })
    }

    /// Snapshot of the whole account, taken in one read transaction.
    pub fn export(&self) -> Result<AccountExport, LifeError> {
        self.store.read(|r| {
            Ok(AccountExport {
                exported_at: self.now,
                profile: r.account(self.account)?.profile(self.today()),
                tasks: r.list(self.account)?,
                habits: r.list(self.account)?,
                goals: r.list(self.account)?,
                transactions: r.list(self.account)?,
                health: r.list(self.account)?,
                learning: r.list(self.account)?,
                ideas: r.list(self.account)?,
                focus_sessions: r.list(self.account)?,
                reflections: r.list(self.account)?,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emails_are_normalized() {
        assert_eq!(
            normalize_email("  Ada@Example.COM ").expect("email"),
            "ada@example.com"
        );
        assert!(normalize_email("nope").is_err());
        assert!(normalize_email("@example.com").is_err());
        assert!(normalize_email("ada@localhost").is_err());
    }
}
