//! Error types for the narrative controller.

use thiserror::Error;

use crate::library::StoryId;

/// Errors raised while loading stories or driving a reading session.
#[derive(Debug, Error)]
pub enum StoryError {
    #[error("story not found: {0}")]
    UnknownStory(StoryId),

    #[error("story {story} has no page {page}")]
    UnknownPage { story: StoryId, page: usize },

    #[error("choice {index} out of range ({available} available)")]
    InvalidChoice { index: usize, available: usize },

    #[error("no story is loaded")]
    NoStoryLoaded,

    #[error("story {0} has no pages")]
    EmptyStory(StoryId),

    #[error("story {0} is already completed")]
    AlreadyCompleted(StoryId),

    #[error("quiz has no questions left")]
    QuizFinished,

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Catalogue(#[from] space_weather::CatalogueError),
}

/// Errors from a key-value storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}
