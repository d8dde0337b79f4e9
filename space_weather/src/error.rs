//! Error types for catalogue loading and lookups.

use thiserror::Error;

/// Errors raised while loading or querying the catalogue.
#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid {kind} classification: {value:?}")]
    InvalidClassification { kind: &'static str, value: String },

    #[error("unknown fact category: {0}")]
    UnknownCategory(String),

    #[error("category {0} has no facts")]
    EmptyCategory(String),
}
