//! Event record definitions.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{CmeImpacts, EventId, StormMeasurements, StoryImpact};
use crate::classification::{FlareClass, ImpactLevel, NoaaLevel};

/// Duration assumed for a CME whose record has none, in hours.
pub const DEFAULT_CME_DURATION_HOURS: u32 = 24;

/// An M- or X-class solar flare.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolarFlare {
    pub id: EventId,
    pub class: FlareClass,
    pub date: DateTime<Utc>,
    pub peak_time: DateTime<Utc>,
    /// Seconds.
    pub duration: u32,
    pub source_region: String,
    pub coordinates: String,
    pub description: String,
    pub impact_level: ImpactLevel,
    #[serde(default)]
    pub affected_tech: Vec<String>,
    #[serde(default)]
    pub story_impact: StoryImpact,
}

/// `now - window`, clamped to the earliest representable instant.
pub(crate) fn saturating_sub(now: DateTime<Utc>, window: Duration) -> DateTime<Utc> {
    now.checked_sub_signed(window).unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// `now + window`, clamped to the latest representable instant.
pub(crate) fn saturating_add(now: DateTime<Utc>, window: Duration) -> DateTime<Utc> {
    now.checked_add_signed(window).unwrap_or(DateTime::<Utc>::MAX_UTC)
}

impl SolarFlare {
    /// Check if the flare started in `(now - window, now]`. Flares dated
    /// after `now` have not happened yet.
    pub fn started_within(&self, now: DateTime<Utc>, window: Duration) -> bool {
        self.date > saturating_sub(now, window) && self.date <= now
    }
}

/// A coronal mass ejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CmeEvent {
    pub id: EventId,
    pub date: DateTime<Utc>,
    /// km/s.
    pub speed: u32,
    pub direction: String,
    /// Degrees.
    pub half_angle: u32,
    pub source_location: String,
    pub arrival_time: DateTime<Utc>,
    pub description: String,
    pub geomagnetic_storm_level: NoaaLevel,
    pub kp_index: u8,
    /// Hours of effect after arrival.
    #[serde(default)]
    pub duration: Option<u32>,
    pub impacts: CmeImpacts,
    #[serde(default)]
    pub story_impact: StoryImpact,
}

impl CmeEvent {
    /// End of the effect window.
    pub fn effect_end(&self) -> DateTime<Utc> {
        let hours = self.duration.unwrap_or(DEFAULT_CME_DURATION_HOURS);
        saturating_add(self.arrival_time, Duration::hours(hours as i64))
    }

    /// Check if the CME has arrived and its effects are still ongoing.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.arrival_time <= now && self.effect_end() >= now
    }

    /// Check if arrival falls strictly within `hours` either side of `now`.
    pub fn arrives_within(&self, now: DateTime<Utc>, hours: u32) -> bool {
        let window = Duration::hours(hours as i64);
        self.arrival_time > saturating_sub(now, window) && self.arrival_time < saturating_add(now, window)
    }
}

/// A geomagnetic storm.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeomagneticStorm {
    pub id: EventId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub max_kp_index: u8,
    pub storm_level: NoaaLevel,
    pub cause: String,
    pub description: String,
    #[serde(default)]
    pub regions: Vec<String>,
    /// System name -> observed effect.
    #[serde(default)]
    pub impacts: BTreeMap<String, String>,
    pub measurements: StormMeasurements,
}

impl GeomagneticStorm {
    /// Inclusive check used by status queries.
    pub fn is_ongoing(&self, now: DateTime<Utc>) -> bool {
        self.start_time <= now && self.end_time >= now
    }

    /// Exclusive check used by adaptation triggers.
    pub fn is_strictly_ongoing(&self, now: DateTime<Utc>) -> bool {
        self.start_time < now && self.end_time > now
    }
}

/// A solar energetic particle event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SepEvent {
    pub id: EventId,
    pub date: DateTime<Utc>,
    pub flux_level: NoaaLevel,
    pub peak_intensity: String,
    /// Hours.
    pub duration: u32,
    #[serde(default)]
    pub associated_flare: Option<EventId>,
    pub description: String,
    #[serde(default)]
    pub impacts: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::NoaaScale;
    use crate::events::AuroraForecast;
    use chrono::TimeZone;

    fn cme(arrival: DateTime<Utc>, duration: Option<u32>) -> CmeEvent {
        CmeEvent {
            id: EventId::new("CME_T"),
            date: arrival - Duration::days(2),
            speed: 800,
            direction: "Earth-directed".to_string(),
            half_angle: 45,
            source_location: "N15W45".to_string(),
            arrival_time: arrival,
            description: "Test CME".to_string(),
            geomagnetic_storm_level: NoaaLevel::new(NoaaScale::Geomagnetic, 2),
            kp_index: 6,
            duration,
            impacts: CmeImpacts {
                aurora: AuroraForecast {
                    visibility: "Enhanced".to_string(),
                    latitude_range: "55-65 degrees".to_string(),
                    colors: vec!["Green".to_string()],
                    intensity: "Moderate".to_string(),
                },
                technology: BTreeMap::new(),
            },
            story_impact: StoryImpact::default(),
        }
    }

    #[test]
    fn test_cme_active_window() {
        let arrival = Utc.with_ymd_and_hms(2024, 10, 18, 15, 30, 0).unwrap();
        let event = cme(arrival, Some(18));

        assert!(!event.is_active_at(arrival - Duration::minutes(1)));
        assert!(event.is_active_at(arrival));
        assert!(event.is_active_at(arrival + Duration::hours(18)));
        assert!(!event.is_active_at(arrival + Duration::hours(19)));
    }

    #[test]
    fn test_cme_default_duration() {
        let arrival = Utc.with_ymd_and_hms(2024, 10, 18, 0, 0, 0).unwrap();
        let event = cme(arrival, None);
        assert_eq!(event.effect_end(), arrival + Duration::hours(24));
    }

    #[test]
    fn test_cme_arrival_window() {
        let arrival = Utc.with_ymd_and_hms(2024, 10, 18, 12, 0, 0).unwrap();
        let event = cme(arrival, None);

        assert!(event.arrives_within(arrival + Duration::hours(11), 12));
        assert!(event.arrives_within(arrival - Duration::hours(11), 12));
        assert!(!event.arrives_within(arrival + Duration::hours(12), 12));
    }

    #[test]
    fn test_huge_windows_saturate() {
        let arrival = Utc.with_ymd_and_hms(2024, 10, 18, 12, 0, 0).unwrap();
        let event = cme(arrival, Some(u32::MAX));
        assert!(event.effect_end() > arrival);
        assert!(event.is_active_at(arrival + Duration::days(365)));
        assert!(event.arrives_within(arrival, u32::MAX));
    }
}
