//! Error types for the offline cache.

use thiserror::Error;

/// A request that never produced a response.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("Network request for {url} failed: {reason}")]
    Network { url: String, reason: String },

    #[error("Offline while requesting {0}")]
    Offline(String),
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Install aborted: {url} returned status {status}")]
    BadStatus { url: String, status: u16 },

    #[error("Invalid cache name: {0}")]
    InvalidCacheName(String),

    #[error("Cache storage error: {0}")]
    Storage(String),

    #[error("No window available to open {0}")]
    NoWindow(String),

    #[error("Notification error: {0}")]
    Notification(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
