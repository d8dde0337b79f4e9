//! Space weather event records.

mod impacts;
mod records;

pub use impacts::*;
pub use records::*;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Catalogue identifier for an event record (e.g. `FL_001`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub String);

impl EventId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kinds of records held in the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    SolarFlare,
    CoronalMassEjection,
    GeomagneticStorm,
    SolarEnergeticParticles,
}

/// Any catalogue event, borrowed from the catalogue.
#[derive(Debug, Clone, Copy)]
pub enum SpaceWeatherEvent<'a> {
    SolarFlare(&'a SolarFlare),
    Cme(&'a CmeEvent),
    GeomagneticStorm(&'a GeomagneticStorm),
    Sep(&'a SepEvent),
}

impl<'a> SpaceWeatherEvent<'a> {
    pub fn id(&self) -> &'a EventId {
        match self {
            SpaceWeatherEvent::SolarFlare(e) => &e.id,
            SpaceWeatherEvent::Cme(e) => &e.id,
            SpaceWeatherEvent::GeomagneticStorm(e) => &e.id,
            SpaceWeatherEvent::Sep(e) => &e.id,
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            SpaceWeatherEvent::SolarFlare(_) => EventKind::SolarFlare,
            SpaceWeatherEvent::Cme(_) => EventKind::CoronalMassEjection,
            SpaceWeatherEvent::GeomagneticStorm(_) => EventKind::GeomagneticStorm,
            SpaceWeatherEvent::Sep(_) => EventKind::SolarEnergeticParticles,
        }
    }

    /// When the event started (or was first observed).
    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            SpaceWeatherEvent::SolarFlare(e) => e.date,
            SpaceWeatherEvent::Cme(e) => e.date,
            SpaceWeatherEvent::GeomagneticStorm(e) => e.start_time,
            SpaceWeatherEvent::Sep(e) => e.date,
        }
    }

    pub fn description(&self) -> &'a str {
        match self {
            SpaceWeatherEvent::SolarFlare(e) => &e.description,
            SpaceWeatherEvent::Cme(e) => &e.description,
            SpaceWeatherEvent::GeomagneticStorm(e) => &e.description,
            SpaceWeatherEvent::Sep(e) => &e.description,
        }
    }

    /// Magnitude classification rendered as text (`X1.8`, `G3-Strong`, ...).
    pub fn magnitude(&self) -> String {
        match self {
            SpaceWeatherEvent::SolarFlare(e) => e.class.to_string(),
            SpaceWeatherEvent::Cme(e) => e.geomagnetic_storm_level.to_string(),
            SpaceWeatherEvent::GeomagneticStorm(e) => e.storm_level.to_string(),
            SpaceWeatherEvent::Sep(e) => e.flux_level.to_string(),
        }
    }

    /// Per-character narrative impact, when the record carries one.
    pub fn story_impact(&self) -> Option<&'a StoryImpact> {
        match self {
            SpaceWeatherEvent::SolarFlare(e) => Some(&e.story_impact),
            SpaceWeatherEvent::Cme(e) => Some(&e.story_impact),
            SpaceWeatherEvent::GeomagneticStorm(_) | SpaceWeatherEvent::Sep(_) => None,
        }
    }
}
