//! Learning items. Finishing one (progress reaching 100) earns XP.

use super::{AccountScope, Rewarded, category, percent, text, title};
use crate::LifeError;
use crate::progression::Reward;
use crate::records::LearningItem;
use crate::types::{LearningKind, RecordId};
use serde::Deserialize;
use std::cmp::Reverse;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLearningItem {
    pub title: String,
    #[serde(default, rename = "type")]
    pub kind: LearningKind,
    pub category: Option<String>,
    #[serde(default)]
    pub progress: u8,
    pub notes: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPatch {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<LearningKind>,
    pub category: Option<String>,
    pub progress: Option<u8>,
    pub notes: Option<String>,
    pub url: Option<String>,
}

fn url(value: Option<String>) -> Result<Option<String>, LifeError> {
    match value {
        Some(u) if !(u.starts_with("http://") || u.starts_with("https://")) => Err(
            LifeError::Invalid("url must start with http:// or https://".to_string()),
        ),
        other => text("url", other),
    }
}

impl AccountScope<'_> {
    /// Learning items, newest first.
    pub fn list_learning(&self) -> Result<Vec<LearningItem>, LifeError> {
        let mut items = self.store.read(|r| r.list::<LearningItem>(self.account))?;
        items.sort_by_key(|i| (Reverse(i.created_at), Reverse(i.id)));
        Ok(items)
    }

    pub fn create_learning(&self, input: NewLearningItem) -> Result<LearningItem, LifeError> {
        let item_title = title("title", &input.title)?;
        let item_category = category(input.category)?;
        let progress = percent("progress", input.progress)?;
        let notes = text("notes", input.notes)?;
        let item_url = url(input.url)?;

        self.store.write(|tx| {
            let item = LearningItem {
                id: tx.allocate_record_id()?,
                title: item_title,
                kind: input.kind,
                category: item_category,
                progress,
                notes,
                url: item_url,
                completed_at: (progress == 100).then_some(self.now),
                created_at: self.now,
            };
            tx.put(self.account, &item)?;
            Ok(item)
        })
    }

    /// Apply `patch`; moving progress from below 100 to 100 earns XP.
    pub fn update_learning(
        &self,
        id: RecordId,
        patch: LearningPatch,
    ) -> Result<Rewarded<LearningItem>, LifeError> {
        let new_title = patch.title.as_deref().map(|t| title("title", t)).transpose()?;
        let new_category = patch.category.map(|c| category(Some(c))).transpose()?;
        let progress = patch.progress.map(|p| percent("progress", p)).transpose()?;
        let notes = text("notes", patch.notes)?;
        let item_url = url(patch.url)?;

        self.store.write(|tx| {
            let mut item: LearningItem = tx.require(self.account, id)?;
            let was_finished = item.progress == 100;
            if let Some(t) = new_title {
                item.title = t;
            }
            if let Some(k) = patch.kind {
                item.kind = k;
            }
            if let Some(c) = new_category {
                item.category = c;
            }
            if notes.is_some() {
                item.notes = notes;
            }
            if item_url.is_some() {
                item.url = item_url;
            }
            if let Some(p) = progress {
                item.progress = p;
                item.completed_at = if p == 100 {
                    item.completed_at.or(Some(self.now))
                } else {
                    None
                };
            }
            let finished = !was_finished && item.progress == 100;
            tx.put(self.account, &item)?;
            self.reward_if(tx, item, finished, Reward::LearningFinished)
        })
    }

    pub fn delete_learning(&self, id: RecordId) -> Result<(), LifeError> {
        self.store.write(|tx| tx.remove::<LearningItem>(self.account, id))
    }
}
