//! Impact and measurement components attached to event records.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Narrative consequence of an event for each story character.
///
/// Keys are character keys such as `farmerMia` or `pilotAlex`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoryImpact(pub BTreeMap<String, String>);

impl StoryImpact {
    /// Look up the impact text for a character key.
    pub fn for_character(&self, character: &str) -> Option<&str> {
        self.0.get(character).map(String::as_str)
    }

    pub fn characters(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Aurora outlook attached to a CME.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuroraForecast {
    pub visibility: String,
    pub latitude_range: String,
    pub colors: Vec<String>,
    pub intensity: String,
}

/// Expected consequences of a CME arrival.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CmeImpacts {
    pub aurora: AuroraForecast,
    /// System name -> expected effect.
    pub technology: BTreeMap<String, String>,
}

/// Ground and spacecraft measurements taken during a storm.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StormMeasurements {
    /// Disturbance storm time index in nT.
    pub dst_index: i32,
    /// Three-hourly planetary K index readings.
    pub planetary_k_index: Vec<u8>,
    /// km/s.
    pub solar_wind_speed: f32,
    /// nT.
    pub magnetic_field_strength: f32,
}

impl StormMeasurements {
    /// Highest K index reading of the storm.
    pub fn peak_k_index(&self) -> Option<u8> {
        self.planetary_k_index.iter().copied().max()
    }
}
