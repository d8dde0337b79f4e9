//! Overlay rules - which adaptation touches which pages, and with what text.

use serde::{Deserialize, Serialize};
use space_weather::AdaptationKind;

/// The zero-based page indices a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageRange {
    All,
    /// Pages strictly before the given index.
    Below(usize),
    /// Pages from `first` to `last`, inclusive.
    Between { first: usize, last: usize },
}

impl PageRange {
    /// Check if the page at `index` falls in this range.
    pub fn contains(&self, index: usize) -> bool {
        match *self {
            PageRange::All => true,
            PageRange::Below(limit) => index < limit,
            PageRange::Between { first, last } => (first..=last).contains(&index),
        }
    }
}

/// Text and an optional extra choice appended when an adaptation is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayRule {
    pub adaptation: AdaptationKind,
    pub pages: PageRange,
    pub text: String,
    #[serde(default)]
    pub extra_choice: Option<String>,
}

impl OverlayRule {
    /// Check if this rule touches the page at `index`, regardless of adaptations.
    pub fn applies(&self, index: usize) -> bool {
        self.pages.contains(index)
    }
}

/// Ordered overlay rules; rules are applied in this order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub rules: Vec<OverlayRule>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            rules: vec![
                OverlayRule {
                    adaptation: AdaptationKind::SolarFlare,
                    pages: PageRange::Below(4),
                    text: " \n\n🌟 REAL-TIME UPDATE: NASA has detected recent solar flare activity! Your story is happening during actual space weather conditions.".to_string(),
                    extra_choice: Some("Check current NASA space weather data".to_string()),
                },
                OverlayRule {
                    adaptation: AdaptationKind::CmeArrival,
                    pages: PageRange::Between { first: 6, last: 9 },
                    text: " \n\n⚡ LIVE EVENT: A real CME is arriving at Earth right now! The aurora in this story might be visible in real life tonight.".to_string(),
                    extra_choice: Some("Look up tonight's aurora forecast".to_string()),
                },
                OverlayRule {
                    adaptation: AdaptationKind::GeomagneticStorm,
                    pages: PageRange::All,
                    text: " \n\n🌍 ACTIVE NOW: Earth is experiencing a geomagnetic storm similar to this story! Check outside for possible aurora activity.".to_string(),
                    extra_choice: None,
                },
            ],
        }
    }
}
