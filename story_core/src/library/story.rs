//! Story definitions - the static content of a single narrative.

use serde::{Deserialize, Serialize};

/// Unique identifier for stories (e.g. `solar-storm`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoryId(pub String);

impl StoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for StoryId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A clickable point on a page illustration that reveals a fact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    /// Horizontal position, percent of image width.
    pub x: u8,
    /// Vertical position, percent of image height.
    pub y: u8,
    pub fact: String,
}

/// Base content of one story page, before any overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageContent {
    pub title: String,
    pub text: String,
    #[serde(default)]
    pub choices: Vec<String>,
    #[serde(default)]
    pub hotspots: Vec<Hotspot>,
}

/// The three-act outline shown on the story card.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NarrativeArc {
    pub opening: String,
    pub conflict: String,
    pub resolution: String,
}

/// A complete story: metadata plus its page table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryDefinition {
    pub id: StoryId,
    pub title: String,
    pub character: String,
    pub age: u8,
    pub setting: String,
    pub theme: String,
    /// Illustration file names, one per page.
    #[serde(default)]
    pub illustrations: Vec<String>,
    #[serde(default)]
    pub narrative: NarrativeArc,
    /// Quiz category offered after the story.
    pub quiz_category: String,
    pub pages: Vec<PageContent>,
}

impl StoryDefinition {
    pub fn total_pages(&self) -> usize {
        self.pages.len()
    }

    pub fn page(&self, index: usize) -> Option<&PageContent> {
        self.pages.get(index)
    }

    /// Illustration path for a page, if one is listed.
    pub fn illustration(&self, base_path: &str, index: usize) -> Option<String> {
        self.illustrations
            .get(index)
            .map(|name| format!("{base_path}{name}"))
    }
}
