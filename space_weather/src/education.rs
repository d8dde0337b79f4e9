//! Educational facts and achievement definitions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::CatalogueError;

/// Topic groupings for educational facts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FactCategory {
    SolarFlares,
    CmeEvents,
    GeomagneticStorms,
    SpaceWeatherImpacts,
}

impl FactCategory {
    pub const ALL: [FactCategory; 4] = [
        FactCategory::SolarFlares,
        FactCategory::CmeEvents,
        FactCategory::GeomagneticStorms,
        FactCategory::SpaceWeatherImpacts,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FactCategory::SolarFlares => "solarFlares",
            FactCategory::CmeEvents => "cmeEvents",
            FactCategory::GeomagneticStorms => "geomagneticStorms",
            FactCategory::SpaceWeatherImpacts => "spaceWeatherImpacts",
        }
    }
}

impl FromStr for FactCategory {
    type Err = CatalogueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FactCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| CatalogueError::UnknownCategory(s.to_string()))
    }
}

impl std::fmt::Display for FactCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Educational facts keyed by category name (see [`FactCategory::as_str`]).
pub type EducationalFacts = BTreeMap<String, Vec<String>>;

/// Identifier for an achievement (e.g. `first_story`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AchievementId(pub String);

impl AchievementId {
    pub const FIRST_STORY: &'static str = "first_story";
    pub const ALL_STORIES: &'static str = "all_stories";
    pub const QUIZ_MASTER: &'static str = "quiz_master";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AchievementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An unlockable milestone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub title: String,
    pub description: String,
    pub icon: String,
    pub points: u32,
}
