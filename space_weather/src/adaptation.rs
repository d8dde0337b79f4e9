//! Story adaptation rules - conditions over the catalogue that alter narrative content.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalogue::SpaceWeatherCatalogue;

/// The adaptation conditions the stories know how to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AdaptationKind {
    SolarFlare,
    CmeArrival,
    GeomagneticStorm,
}

impl AdaptationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdaptationKind::SolarFlare => "solarFlare",
            AdaptationKind::CmeArrival => "cmeArrival",
            AdaptationKind::GeomagneticStorm => "geomagneticStorm",
        }
    }
}

/// How dramatic an adaptation should feel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoryIntensity {
    #[default]
    Active,
    High,
    Extreme,
}

/// Content payload applied when a rule fires.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoryModification {
    pub intensity: StoryIntensity,
    pub dialogue: String,
    #[serde(default)]
    pub choices: Vec<String>,
}

/// Predicate over catalogue state, expressed as data so rules can live in config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AdaptationTrigger {
    /// Some flare started within the last `within_hours`, and not after now.
    #[serde(rename_all = "camelCase")]
    RecentFlare { within_hours: u32 },
    /// Some CME arrives within `hours` either side of now.
    CmeArrivalWindow { hours: u32 },
    /// Some geomagnetic storm is in progress.
    StormInProgress,
}

impl AdaptationTrigger {
    /// Evaluate the trigger against the catalogue at `now`.
    pub fn holds(&self, catalogue: &SpaceWeatherCatalogue, now: DateTime<Utc>) -> bool {
        match self {
            AdaptationTrigger::RecentFlare { within_hours } => {
                let window = Duration::hours(*within_hours as i64);
                catalogue.solar_flares.iter().any(|f| f.started_within(now, window))
            }
            AdaptationTrigger::CmeArrivalWindow { hours } => catalogue
                .cme_events
                .iter()
                .any(|c| c.arrives_within(now, *hours)),
            AdaptationTrigger::StormInProgress => catalogue
                .geomagnetic_storms
                .iter()
                .any(|s| s.is_strictly_ongoing(now)),
        }
    }
}

/// A condition-to-content mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdaptationRule {
    pub kind: AdaptationKind,
    pub trigger: AdaptationTrigger,
    pub modifications: StoryModification,
}

/// The set of adaptations currently in effect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveAdaptations {
    active: BTreeMap<AdaptationKind, StoryModification>,
}

impl ActiveAdaptations {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from bare flags, with empty modification payloads.
    pub fn from_flags(kinds: impl IntoIterator<Item = AdaptationKind>) -> Self {
        let mut set = Self::new();
        for kind in kinds {
            set.insert(kind, StoryModification::default());
        }
        set
    }

    pub fn insert(&mut self, kind: AdaptationKind, modification: StoryModification) {
        self.active.insert(kind, modification);
    }

    pub fn is_active(&self, kind: AdaptationKind) -> bool {
        self.active.contains_key(&kind)
    }

    pub fn get(&self, kind: AdaptationKind) -> Option<&StoryModification> {
        self.active.get(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Active kinds in a stable order.
    pub fn flags(&self) -> impl Iterator<Item = AdaptationKind> + '_ {
        self.active.keys().copied()
    }

    /// Modifications intense enough to warrant an on-screen alert.
    pub fn alerts(&self) -> impl Iterator<Item = (AdaptationKind, &StoryModification)> {
        self.active
            .iter()
            .filter(|(_, m)| m.intensity == StoryIntensity::Extreme)
            .map(|(k, m)| (*k, m))
    }

    /// Merge another set into this one; entries in `other` win.
    pub fn merge(&mut self, other: &ActiveAdaptations) {
        for (kind, modification) in &other.active {
            self.active.insert(*kind, modification.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flags() {
        let set = ActiveAdaptations::from_flags([AdaptationKind::SolarFlare]);
        assert!(set.is_active(AdaptationKind::SolarFlare));
        assert!(!set.is_active(AdaptationKind::CmeArrival));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_merge_overrides() {
        let mut base = ActiveAdaptations::from_flags([AdaptationKind::SolarFlare]);
        let mut update = ActiveAdaptations::new();
        update.insert(
            AdaptationKind::SolarFlare,
            StoryModification {
                intensity: StoryIntensity::High,
                dialogue: "Flare!".to_string(),
                choices: vec![],
            },
        );
        update.insert(AdaptationKind::GeomagneticStorm, StoryModification::default());

        base.merge(&update);

        assert_eq!(base.len(), 2);
        assert_eq!(base.get(AdaptationKind::SolarFlare).unwrap().dialogue, "Flare!");
    }

    #[test]
    fn test_alerts_only_extreme() {
        let mut set = ActiveAdaptations::new();
        set.insert(
            AdaptationKind::CmeArrival,
            StoryModification {
                intensity: StoryIntensity::Extreme,
                dialogue: "CME now".to_string(),
                choices: vec![],
            },
        );
        set.insert(AdaptationKind::GeomagneticStorm, StoryModification::default());

        let alerts: Vec<_> = set.alerts().collect();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].0, AdaptationKind::CmeArrival);
    }

    #[test]
    fn test_trigger_serde() {
        let trigger: AdaptationTrigger =
            serde_json::from_str(r#"{"type":"recentFlare","withinHours":24}"#).unwrap();
        assert_eq!(trigger, AdaptationTrigger::RecentFlare { within_hours: 24 });
    }

    #[test]
    fn test_recent_flare_trigger_window() {
        use chrono::TimeZone;

        let catalogue = SpaceWeatherCatalogue::builtin().unwrap();
        let day = AdaptationTrigger::RecentFlare { within_hours: 24 };

        // FL_003 is dated 2024-11-02T08:45Z.
        let before = Utc.with_ymd_and_hms(2024, 11, 2, 8, 0, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2024, 11, 2, 9, 0, 0).unwrap();
        assert!(!day.holds(&catalogue, before));
        assert!(day.holds(&catalogue, after));

        let forever = AdaptationTrigger::RecentFlare { within_hours: u32::MAX };
        assert!(forever.holds(&catalogue, after));
        assert!(!forever.holds(&catalogue, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));
    }
}
