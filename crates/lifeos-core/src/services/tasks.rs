//! Task operations. Completing a task earns XP once per false -> true flip.

use super::{AccountScope, Rewarded, category, text, title};
use crate::LifeError;
use crate::progression::Reward;
use crate::records::Task;
use crate::types::{Priority, RecordId};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::cmp::Reverse;

/// Listing filter (query string).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFilter {
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    pub category: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub category: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub completed: Option<bool>,
}

impl AccountScope<'_> {
    /// Tasks matching `filter`: open tasks first, newest first within each group.
    pub fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, LifeError> {
        let mut tasks: Vec<Task> = self
            .store
            .read(|r| r.list::<Task>(self.account))?
            .into_iter()
            .filter(|t| filter.completed.is_none_or(|c| t.completed == c))
            .filter(|t| filter.priority.is_none_or(|p| t.priority == p))
            .collect();
        tasks.sort_by_key(|t| (t.completed, Reverse(t.created_at), Reverse(t.id)));
        Ok(tasks)
    }

    pub fn create_task(&self, input: NewTask) -> Result<Task, LifeError> {
        let task_title = title("title", &input.title)?;
        let description = text("description", input.description)?;
        let task_category = category(input.category)?;

        self.store.write(|tx| {
            let task = Task {
                id: tx.allocate_record_id()?,
                title: task_title,
                description,
                priority: input.priority,
                category: task_category,
                due_date: input.due_date,
                completed: false,
                completed_at: None,
                created_at: self.now,
            };
            tx.put(self.account, &task)?;
            Ok(task)
        })
    }

    /// Apply `patch`; setting `completed` to true on an open task earns XP.
    pub fn update_task(&self, id: RecordId, patch: TaskPatch) -> Result<Rewarded<Task>, LifeError> {
        let new_title = patch.title.as_deref().map(|t| title("title", t)).transpose()?;
        let description = text("description", patch.description)?;
        let new_category = patch.category.map(|c| category(Some(c))).transpose()?;

        self.store.write(|tx| {
            let mut task: Task = tx.require(self.account, id)?;
            if let Some(t) = new_title {
                task.title = t;
            }
            if description.is_some() {
                task.description = description;
            }
            if let Some(p) = patch.priority {
                task.priority = p;
            }
            if let Some(c) = new_category {
                task.category = c;
            }
            if patch.due_date.is_some() {
                task.due_date = patch.due_date;
            }
            let newly_completed = match patch.completed {
                Some(completed) => task.set_completed(completed, self.now),
                None => false,
            };
            tx.put(self.account, &task)?;
            self.reward_if(tx, task, newly_completed, Reward::TaskCompleted)
        })
    }

    /// Flip completion.
    pub fn toggle_task(&self, id: RecordId) -> Result<Rewarded<Task>, LifeError> {
        self.store.write(|tx| {
            let mut task: Task = tx.require(self.account, id)?;
            let newly_completed = task.set_completed(!task.completed, self.now);
            tx.put(self.account, &task)?;
            self.reward_if(tx, task, newly_completed, Reward::TaskCompleted)
        })
    }

    pub fn delete_task(&self, id: RecordId) -> Result<(), LifeError> {
        self.store.write(|tx| tx.remove::<Task>(self.account, id))
    }
}
