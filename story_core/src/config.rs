//! Narrative controller configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::StoryError;
use crate::overlay::OverlayConfig;

/// Storage key the progress record lives under.
pub const DEFAULT_PROGRESS_KEY: &str = "solarMonarchProgress";

/// Tunables for the narrative controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrativeConfig {
    /// How long a choice outcome stays on screen before the page advances.
    pub choice_display_delay_ms: u64,

    /// Key for the persisted progress record.
    pub progress_key: String,

    /// Correct quiz answers needed for the quiz achievement.
    pub quiz_master_threshold: u32,

    /// Questions drawn per quiz session.
    pub quiz_length: usize,

    /// Base path prepended to illustration file names.
    pub image_base_path: String,

    pub overlay: OverlayConfig,
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            choice_display_delay_ms: 2000,
            progress_key: DEFAULT_PROGRESS_KEY.to_string(),
            quiz_master_threshold: 5,
            quiz_length: 3,
            image_base_path: "assets/images/".to_string(),
            overlay: OverlayConfig::default(),
        }
    }
}

impl NarrativeConfig {
    /// Parse a config, filling unspecified fields with defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, StoryError> {
        Ok(toml::from_str(s)?)
    }

    pub fn choice_display_delay(&self) -> Duration {
        Duration::from_millis(self.choice_display_delay_ms)
    }
}
