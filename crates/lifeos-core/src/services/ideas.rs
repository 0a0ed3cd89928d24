//! Idea capture. Every new idea earns a small reward.

use super::{AccountScope, Rewarded, category, text, title};
use crate::LifeError;
use crate::primitives::MAX_TAGS;
use crate::progression::Reward;
use crate::records::Idea;
use crate::types::RecordId;
use serde::Deserialize;
use std::cmp::Reverse;

/// Listing filter (query string).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaFilter {
    /// Case-insensitive substring of title or content.
    pub search: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIdea {
    pub title: String,
    pub content: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub pinned: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub pinned: Option<bool>,
}

fn tags(values: Vec<String>) -> Result<Vec<String>, LifeError> {
    if values.len() > MAX_TAGS {
        return Err(LifeError::Invalid(format!("at most {MAX_TAGS} tags")));
    }
    values.iter().map(|t| title("tag", t)).collect()
}

impl AccountScope<'_> {
    /// Ideas matching `filter`: pinned first, then newest first.
    pub fn list_ideas(&self, filter: &IdeaFilter) -> Result<Vec<Idea>, LifeError> {
        let needle = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);
        let mut ideas: Vec<Idea> = self
            .store
            .read(|r| r.list::<Idea>(self.account))?
            .into_iter()
            .filter(|i| filter.category.as_deref().is_none_or(|c| i.category == c))
            .filter(|i| needle.as_deref().is_none_or(|n| i.matches(n)))
            .collect();
        ideas.sort_by_key(|i| (Reverse(i.pinned), Reverse(i.created_at), Reverse(i.id)));
        Ok(ideas)
    }

    pub fn create_idea(&self, input: NewIdea) -> Result<Rewarded<Idea>, LifeError> {
        let idea_title = title("title", &input.title)?;
        let content = text("content", input.content)?;
        let idea_category = category(input.category)?;
        let idea_tags = tags(input.tags)?;

        self.store.write(|tx| {
            let idea = Idea {
                id: tx.allocate_record_id()?,
                title: idea_title,
                content,
                category: idea_category,
                tags: idea_tags,
                pinned: input.pinned,
                created_at: self.now,
                updated_at: self.now,
            };
            tx.put(self.account, &idea)?;
            self.reward_if(tx, idea, true, Reward::IdeaCaptured)
        })
    }

    pub fn update_idea(&self, id: RecordId, patch: IdeaPatch) -> Result<Idea, LifeError> {
        let new_title = patch.title.as_deref().map(|t| title("title", t)).transpose()?;
        let content = text("content", patch.content)?;
        let new_category = patch.category.map(|c| category(Some(c))).transpose()?;
        let new_tags = patch.tags.map(tags).transpose()?;

        self.store.write(|tx| {
            let mut idea: Idea = tx.require(self.account, id)?;
            if let Some(t) = new_title {
                idea.title = t;
            }
            if content.is_some() {
                idea.content = content;
            }
            if let Some(c) = new_category {
                idea.category = c;
            }
            if let Some(t) = new_tags {
                idea.tags = t;
            }
            if let Some(p) = patch.pinned {
                idea.pinned = p;
            }
            idea.updated_at = self.now;
            tx.put(self.account, &idea)?;
            Ok(idea)
        })
    }

    pub fn toggle_idea_pin(&self, id: RecordId) -> Result<Idea, LifeError> {
        self.store.write(|tx| {
            let mut idea: Idea = tx.require(self.account, id)?;
            idea.pinned = !idea.pinned;
            idea.updated_at = self.now;
            tx.put(self.account, &idea)?;
            Ok(idea)
        })
    }

    pub fn delete_idea(&self, id: RecordId) -> Result<(), LifeError> {
        self.store.write(|tx| tx.remove::<Idea>(self.account, id))
    }
}
