//! Story library - the read-only set of stories available to the reader.
//!
//! The library is loaded once from TOML and indexed by story id. Page counts are
//! always derived from each story's page table.

mod story;

pub use story::*;

use serde::Deserialize;
use std::collections::HashMap;
use tracing::{info, warn};

use crate::error::StoryError;

const BUILTIN_STORIES: &str = include_str!("../../data/stories.toml");

#[derive(Deserialize)]
struct StoryFile {
    stories: Vec<StoryDefinition>,
}

/// All loaded stories in declaration order.
#[derive(Debug, Clone, Default)]
pub struct StoryLibrary {
    stories: Vec<StoryDefinition>,

    /// Index: story id -> position in `stories`.
    by_id: HashMap<StoryId, usize>,
}

impl StoryLibrary {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// The three stories shipped with the application.
    pub fn builtin() -> Result<Self, StoryError> {
        Self::from_toml_str(BUILTIN_STORIES)
    }

    /// Load stories from a TOML document with a `[[stories]]` array.
    pub fn from_toml_str(s: &str) -> Result<Self, StoryError> {
        let file: StoryFile = toml::from_str(s)?;
        let mut library = Self::new();
        for story in file.stories {
            library.add_story(story);
        }
        info!(stories = library.len(), "story library loaded");
        Ok(library)
    }

    /// Add a story; a story with the same id replaces the earlier one.
    pub fn add_story(&mut self, story: StoryDefinition) {
        if story.illustrations.len() != story.pages.len() {
            warn!(
                story = %story.id,
                pages = story.pages.len(),
                illustrations = story.illustrations.len(),
                "illustration count does not match page count"
            );
        }

        match self.by_id.get(&story.id) {
            Some(&index) => self.stories[index] = story,
            None => {
                self.by_id.insert(story.id.clone(), self.stories.len());
                self.stories.push(story);
            }
        }
    }

    pub fn get(&self, id: &StoryId) -> Result<&StoryDefinition, StoryError> {
        self.by_id
            .get(id)
            .map(|&index| &self.stories[index])
            .ok_or_else(|| StoryError::UnknownStory(id.clone()))
    }

    pub fn contains(&self, id: &StoryId) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &StoryId> {
        self.stories.iter().map(|s| &s.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StoryDefinition> {
        self.stories.iter()
    }

    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_library() {
        let library = StoryLibrary::builtin().unwrap();
        assert_eq!(library.len(), 3);

        let ids: Vec<&str> = library.ids().map(StoryId::as_str).collect();
        assert_eq!(ids, vec!["solar-storm", "geomagnetic-storm", "cme"]);

        assert_eq!(library.get(&"solar-storm".into()).unwrap().total_pages(), 10);
        assert_eq!(library.get(&"geomagnetic-storm".into()).unwrap().total_pages(), 12);
        assert_eq!(library.get(&"cme".into()).unwrap().total_pages(), 12);
    }

    #[test]
    fn test_every_page_has_three_choices() {
        let library = StoryLibrary::builtin().unwrap();
        for story in library.iter() {
            assert_eq!(story.illustrations.len(), story.total_pages());
            for page in &story.pages {
                assert_eq!(page.choices.len(), 3, "{} / {}", story.id, page.title);
                assert!(!page.hotspots.is_empty());
            }
        }
    }

    #[test]
    fn test_quiz_categories() {
        let library = StoryLibrary::builtin().unwrap();
        let category = |id: &str| library.get(&id.into()).unwrap().quiz_category.clone();
        assert_eq!(category("solar-storm"), "impacts");
        assert_eq!(category("geomagnetic-storm"), "aurora");
        assert_eq!(category("cme"), "cme");
    }

    #[test]
    fn test_unknown_story() {
        let library = StoryLibrary::builtin().unwrap();
        let err = library.get(&"moon-landing".into()).unwrap_err();
        assert!(matches!(err, StoryError::UnknownStory(id) if id.as_str() == "moon-landing"));
    }

    #[test]
    fn test_add_story_replaces() {
        let mut library = StoryLibrary::builtin().unwrap();
        let mut story = library.get(&"cme".into()).unwrap().clone();
        story.pages.truncate(2);
        story.illustrations.truncate(2);
        library.add_story(story);

        assert_eq!(library.len(), 3);
        assert_eq!(library.get(&"cme".into()).unwrap().total_pages(), 2);
    }
}
