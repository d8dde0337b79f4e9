//! Live status board and solar wind snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::classification::RiskLevel;

/// Summary readings shown on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentStatus {
    pub solar_flare_risk: RiskLevel,
    pub magnetic_activity: String,
    /// Number of CMEs currently being tracked.
    pub cme_events: u32,
    /// Planetary K index, 0 to 9.
    pub k_index: f32,
    /// km/s.
    pub solar_wind_speed: f32,
    pub proton_flux: String,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
    pub active_regions: u32,
}

impl Default for CurrentStatus {
    fn default() -> Self {
        Self {
            solar_flare_risk: RiskLevel::Low,
            magnetic_activity: "Quiet".to_string(),
            cme_events: 0,
            k_index: 0.0,
            solar_wind_speed: 400.0,
            proton_flux: "Normal".to_string(),
            last_updated: None,
            active_regions: 0,
        }
    }
}

/// Interplanetary magnetic field components in nT.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MagneticField {
    pub total: f32,
    pub bx: f32,
    pub by: f32,
    pub bz: f32,
}

/// Simulated real-time solar wind measurements.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolarWind {
    /// km/s.
    pub speed: f32,
    /// particles/cm^3.
    pub density: f32,
    /// Kelvin.
    pub temperature: f32,
    pub magnetic_field: MagneticField,
    /// Energy channel (e.g. `10MeV`) -> flux.
    #[serde(default)]
    pub proton_flux: BTreeMap<String, f32>,
}

impl Default for SolarWind {
    fn default() -> Self {
        Self {
            speed: 400.0,
            density: 5.0,
            temperature: 100_000.0,
            magnetic_field: MagneticField::default(),
            proton_flux: BTreeMap::new(),
        }
    }
}

impl SolarWind {
    /// A southward Bz couples the solar wind into the magnetosphere.
    pub fn is_southward(&self) -> bool {
        self.magnetic_field.bz < 0.0
    }
}
