//! Goal and milestone operations.
//!
//! A goal with milestones derives its progress from them; completing the last
//! open milestone earns the achievement bonus, once per goal.

use super::{AccountScope, Rewarded, text, title};
use crate::LifeError;
use crate::primitives::MAX_MILESTONES;
use crate::progression::Reward;
use crate::records::{Goal, Milestone};
use crate::types::{GoalCategory, RecordId};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::cmp::Reverse;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMilestone {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub category: GoalCategory,
    #[serde(default)]
    pub progress: u8,
    pub target_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub milestones: Vec<NewMilestone>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<GoalCategory>,
    pub progress: Option<u8>,
    pub target_date: Option<DateTime<Utc>>,
}

impl AccountScope<'_> {
    /// Goals, newest first.
    pub fn list_goals(&self) -> Result<Vec<Goal>, LifeError> {
        let mut goals = self.store.read(|r| r.list::<Goal>(self.account))?;
        goals.sort_by_key(|g| (Reverse(g.created_at), Reverse(g.id)));
        Ok(goals)
    }

    /// Create a goal, optionally with milestones.
    ///
    /// A goal created with every milestone done is complete from the start
    /// but earns no bonus.
    pub fn create_goal(&self, input: NewGoal) -> Result<Goal, LifeError> {
        let goal_title = title("title", &input.title)?;
        let description = text("description", input.description)?;
        let progress = super::percent("progress", input.progress)?;
        if input.milestones.len() > MAX_MILESTONES {
            return Err(LifeError::Invalid(format!(
                "a goal holds at most {MAX_MILESTONES} milestones"
            )));
        }
        let milestone_titles = input
            .milestones
            .iter()
            .map(|m| title("milestone title", &m.title))
            .collect::<Result<Vec<_>, _>>()?;

        self.store.write(|tx| {
            let mut milestones = Vec::with_capacity(milestone_titles.len());
            for (draft, milestone_title) in input.milestones.iter().zip(milestone_titles) {
                milestones.push(Milestone {
                    id: tx.allocate_record_id()?,
                    title: milestone_title,
                    completed: draft.completed,
                    completed_at: draft.completed.then_some(self.now),
                });
            }

            let mut goal = Goal {
                id: tx.allocate_record_id()?,
                title: goal_title,
                description,
                category: input.category,
                progress,
                target_date: input.target_date,
                milestones,
                completed_at: (progress == 100).then_some(self.now),
                achieved: false,
                created_at: self.now,
            };
            goal.settle_milestones(self.now);
            tx.put(self.account, &goal)?;
            Ok(goal)
        })
    }

    /// Apply `patch`.
    ///
    /// # Errors
    ///
    /// `LifeError::Invalid` if `progress` is set on a goal whose progress is
    /// derived from milestones.
    pub fn update_goal(&self, id: RecordId, patch: GoalPatch) -> Result<Goal, LifeError> {
        let new_title = patch.title.as_deref().map(|t| title("title", t)).transpose()?;
        let description = text("description", patch.description)?;
        let progress = patch
            .progress
            .map(|p| super::percent("progress", p))
            .transpose()?;

        self.store.write(|tx| {
            let mut goal: Goal = tx.require(self.account, id)?;
            if let Some(t) = new_title {
                goal.title = t;
            }
            if description.is_some() {
                goal.description = description;
            }
            if let Some(c) = patch.category {
                goal.category = c;
            }
            if patch.target_date.is_some() {
                goal.target_date = patch.target_date;
            }
            if let Some(p) = progress {
                if !goal.milestones.is_empty() {
                    return Err(LifeError::Invalid(
                        "progress is derived from milestones".to_string(),
                    ));
                }
                goal.progress = p;
                goal.completed_at = if p == 100 {
                    goal.completed_at.or(Some(self.now))
                } else {
                    None
                };
            }
            tx.put(self.account, &goal)?;
            Ok(goal)
        })
    }

    pub fn delete_goal(&self, id: RecordId) -> Result<(), LifeError> {
        self.store.write(|tx| tx.remove::<Goal>(self.account, id))
    }

    /// Append an open milestone; the goal's progress is re-derived.
    pub fn add_milestone(&self, goal_id: RecordId, input: NewMilestone) -> Result<Goal, LifeError> {
        let milestone_title = title("title", &input.title)?;
        self.store.write(|tx| {
            let mut goal: Goal = tx.require(self.account, goal_id)?;
            if goal.milestones.len() >= MAX_MILESTONES {
                return Err(LifeError::Invalid(format!(
                    "a goal holds at most {MAX_MILESTONES} milestones"
                )));
            }
            goal.milestones.push(Milestone {
                id: tx.allocate_record_id()?,
                title: milestone_title,
                completed: input.completed,
                completed_at: input.completed.then_some(self.now),
            });
            goal.settle_milestones(self.now);
            tx.put(self.account, &goal)?;
            Ok(goal)
        })
    }

    /// Flip a milestone; the first time the goal reaches 100 earns the bonus.
    pub fn toggle_milestone(
        &self,
        goal_id: RecordId,
        milestone_id: RecordId,
    ) -> Result<Rewarded<Goal>, LifeError> {
        self.store.write(|tx| {
            let mut goal: Goal = tx.require(self.account, goal_id)?;
            let milestone = goal
                .milestones
                .iter_mut()
                .find(|m| m.id == milestone_id)
                .ok_or_else(|| LifeError::not_found("Milestone", milestone_id))?;
            milestone.completed = !milestone.completed;
            milestone.completed_at = milestone.completed.then_some(self.now);

            let first_achievement = goal.settle_milestones(self.now);
            tx.put(self.account, &goal)?;
            self.reward_if(tx, goal, first_achievement, Reward::GoalAchieved)
        })
    }
}
