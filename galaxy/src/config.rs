//! Population sizes, animation speeds and intensity presets.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::GalaxyError;

/// Tunables for the starfield.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GalaxyConfig {
    pub star_count: usize,
    /// Target number of live comets while motion is allowed.
    pub comet_count: usize,
    pub nebula_count: usize,

    /// Base twinkle rate; each star scales it by its own factor.
    pub twinkle_speed: f32,
    /// Base comet speed; applied when a comet is spawned.
    pub comet_speed: f32,
    /// Base nebula drift; each nebula scales it by its own factor.
    pub nebula_speed: f32,

    pub parallax_layers: u8,
    pub max_trail_length: usize,

    /// Multiplier on twinkle and drift while reduced motion is on.
    pub reduced_motion_scale: f32,

    /// Comets added at once by a storm shower.
    pub shower_size: usize,

    pub flash_max_size: f32,
    pub flash_duration_ms: f64,
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            star_count: 800,
            comet_count: 3,
            nebula_count: 5,
            twinkle_speed: 0.02,
            comet_speed: 0.3,
            nebula_speed: 0.001,
            parallax_layers: 3,
            max_trail_length: 20,
            reduced_motion_scale: 0.1,
            shower_size: 5,
            flash_max_size: 50.0,
            flash_duration_ms: 2000.0,
        }
    }
}

impl GalaxyConfig {
    /// Parse a config, filling unspecified fields with defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, GalaxyError> {
        Ok(toml::from_str(s)?)
    }
}

/// Visual intensity requested by story events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Calm,
    #[default]
    Active,
    Storm,
}

impl Intensity {
    pub fn twinkle_speed(&self) -> f32 {
        match self {
            Intensity::Calm => 0.01,
            Intensity::Active => 0.02,
            Intensity::Storm => 0.05,
        }
    }

    pub fn comet_speed(&self) -> f32 {
        match self {
            Intensity::Calm => 0.1,
            Intensity::Active => 0.3,
            Intensity::Storm => 0.8,
        }
    }

    /// Storms bring a comet shower with them.
    pub fn triggers_shower(&self) -> bool {
        matches!(self, Intensity::Storm)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Intensity::Calm => "calm",
            Intensity::Active => "active",
            Intensity::Storm => "storm",
        }
    }
}

impl FromStr for Intensity {
    type Err = GalaxyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "calm" => Ok(Intensity::Calm),
            "active" => Ok(Intensity::Active),
            "storm" => Ok(Intensity::Storm),
            other => Err(GalaxyError::UnknownIntensity(other.to_string())),
        }
    }
}

impl std::fmt::Display for Intensity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
