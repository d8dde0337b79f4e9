//! Control messages from pages and broadcasts back to them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::CacheError;

/// Messages a page can post to the worker.
///
/// Wire form is `{"type": "CACHE_STORY_ASSETS", "data": {"storyType": "aurora"}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ControlMessage {
    SkipWaiting,
    CacheStoryAssets {
        #[serde(rename = "storyType")]
        story_type: String,
    },
    ClearCache,
    GetCacheStatus,
}

impl ControlMessage {
    pub fn from_json(s: &str) -> Result<Self, CacheError> {
        Ok(serde_json::from_str(s)?)
    }
}

/// Broadcasts from the worker to open pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientMessage {
    /// The data resource was refreshed; `timestamp` is milliseconds since the epoch.
    NasaDataUpdated { timestamp: i64 },
}

/// Entry counts per cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatus {
    pub caches: BTreeMap<String, usize>,
    pub total_caches: usize,
    /// Milliseconds since the epoch.
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageReply {
    Ack,
    Status(CacheStatus),
    StoryAssetsCached {
        story_type: String,
        cached: usize,
        failed: usize,
    },
    Cleared {
        deleted: usize,
    },
}
