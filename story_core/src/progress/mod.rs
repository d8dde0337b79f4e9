//! Persisted reader progress: achievements, completed stories, quiz scores and points.

mod storage;

pub use storage::*;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{info, warn};

use crate::error::StoryError;
use crate::library::StoryId;
use space_weather::AchievementId;

/// The persisted progress record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProgress {
    pub achievements: BTreeSet<AchievementId>,
    pub stories_completed: BTreeSet<StoryId>,
    /// Best score per quiz category.
    pub quiz_scores: BTreeMap<String, u32>,
    pub total_points: u32,
    /// Correct quiz answers across all sessions.
    pub correct_answers: u32,
}

impl UserProgress {
    pub fn has_achievement(&self, id: &AchievementId) -> bool {
        self.achievements.contains(id)
    }

    pub fn has_completed(&self, story: &StoryId) -> bool {
        self.stories_completed.contains(story)
    }

    /// Check if every story in `ids` has been completed.
    pub fn has_completed_all<'a>(&self, mut ids: impl Iterator<Item = &'a StoryId>) -> bool {
        ids.all(|id| self.stories_completed.contains(id))
    }
}

/// Progress backed by a storage slot; every mutation rewrites the record.
#[derive(Debug)]
pub struct ProgressStore<S: KeyValueStorage> {
    storage: S,
    key: String,
    progress: UserProgress,
}

impl<S: KeyValueStorage> ProgressStore<S> {
    /// Load progress from `key`, starting fresh if the record is missing or unreadable.
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let progress = Self::load(&storage, &key);
        Self {
            storage,
            key,
            progress,
        }
    }

    fn load(storage: &S, key: &str) -> UserProgress {
        match storage.get(key) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(progress) => progress,
                Err(e) => {
                    warn!(key, error = %e, "malformed progress record, starting fresh");
                    UserProgress::default()
                }
            },
            Ok(None) => UserProgress::default(),
            Err(e) => {
                warn!(key, error = %e, "progress storage unreadable, starting fresh");
                UserProgress::default()
            }
        }
    }

    pub fn progress(&self) -> &UserProgress {
        &self.progress
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn save(&mut self) -> Result<(), StoryError> {
        let raw = serde_json::to_string(&self.progress).map_err(crate::error::StorageError::from)?;
        self.storage.set(&self.key, &raw)?;
        Ok(())
    }

    /// Apply `change` and persist it. A failed write leaves the record as it was.
    fn update(&mut self, change: impl FnOnce(&mut UserProgress)) -> Result<(), StoryError> {
        let previous = self.progress.clone();
        change(&mut self.progress);
        if let Err(e) = self.save() {
            warn!(key = %self.key, error = %e, "progress write failed, rolling back");
            self.progress = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Unlock an achievement worth `points`.
    ///
    /// Returns `true` only when the achievement was newly added.
    pub fn unlock_achievement(&mut self, id: AchievementId, points: u32) -> Result<bool, StoryError> {
        if self.progress.has_achievement(&id) {
            return Ok(false);
        }
        self.update(|progress| {
            progress.achievements.insert(id.clone());
            progress.total_points += points;
        })?;
        info!(achievement = %id, points, "achievement unlocked");
        Ok(true)
    }

    /// Mark a story completed and add the points earned reading it.
    pub fn complete_story(&mut self, story: StoryId, points: u32) -> Result<(), StoryError> {
        self.update(|progress| {
            progress.stories_completed.insert(story.clone());
            progress.total_points += points;
        })?;
        info!(story = %story, points, "story completed");
        Ok(())
    }

    /// Record a quiz result, keeping the best score per category.
    pub fn record_quiz(&mut self, category: &str, score: u32) -> Result<(), StoryError> {
        self.update(|progress| {
            let best = progress.quiz_scores.entry(category.to_string()).or_insert(0);
            *best = (*best).max(score);
            progress.correct_answers += score;
        })
    }

    /// Forget all progress.
    pub fn reset(&mut self) -> Result<(), StoryError> {
        self.progress = UserProgress::default();
        self.storage.remove(&self.key)?;
        Ok(())
    }
}
