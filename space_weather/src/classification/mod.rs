//! Magnitude classifications: flare classes, NOAA scale levels and impact ratings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CatalogueError;

/// X-ray flare class letters, weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FlareLetter {
    A,
    B,
    C,
    M,
    X,
}

impl FlareLetter {
    /// Peak X-ray flux (W/m^2) at magnitude 1.0 for this class.
    pub fn base_flux(&self) -> f64 {
        match self {
            FlareLetter::A => 1e-8,
            FlareLetter::B => 1e-7,
            FlareLetter::C => 1e-6,
            FlareLetter::M => 1e-5,
            FlareLetter::X => 1e-4,
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(FlareLetter::A),
            'B' => Some(FlareLetter::B),
            'C' => Some(FlareLetter::C),
            'M' => Some(FlareLetter::M),
            'X' => Some(FlareLetter::X),
            _ => None,
        }
    }
}

/// A flare classification such as `M2.1` or `X1.8`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FlareClass {
    pub letter: FlareLetter,
    pub magnitude: f32,
}

impl FlareClass {
    pub fn new(letter: FlareLetter, magnitude: f32) -> Self {
        Self { letter, magnitude }
    }

    /// Peak flux implied by the class and magnitude.
    pub fn peak_flux(&self) -> f64 {
        self.letter.base_flux() * self.magnitude as f64
    }

    /// Check if this flare is at least as strong as the given class letter.
    pub fn is_at_least(&self, letter: FlareLetter) -> bool {
        self.letter >= letter
    }
}

impl FromStr for FlareClass {
    type Err = CatalogueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CatalogueError::InvalidClassification {
            kind: "flare",
            value: s.to_string(),
        };
        let mut chars = s.trim().chars();
        let letter = chars.next().and_then(FlareLetter::from_char).ok_or_else(invalid)?;
        let magnitude: f32 = chars.as_str().parse().map_err(|_| invalid())?;
        if magnitude <= 0.0 {
            return Err(invalid());
        }
        Ok(Self { letter, magnitude })
    }
}

impl TryFrom<String> for FlareClass {
    type Error = CatalogueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FlareClass> for String {
    fn from(class: FlareClass) -> Self {
        class.to_string()
    }
}

impl fmt::Display for FlareClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}{:.1}", self.letter, self.magnitude)
    }
}

/// The three NOAA space weather scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoaaScale {
    /// G - geomagnetic storms.
    Geomagnetic,
    /// S - solar radiation storms.
    Radiation,
    /// R - radio blackouts.
    RadioBlackout,
}

impl NoaaScale {
    pub fn prefix(&self) -> char {
        match self {
            NoaaScale::Geomagnetic => 'G',
            NoaaScale::Radiation => 'S',
            NoaaScale::RadioBlackout => 'R',
        }
    }

    fn from_prefix(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'G' => Some(NoaaScale::Geomagnetic),
            'S' => Some(NoaaScale::Radiation),
            'R' => Some(NoaaScale::RadioBlackout),
            _ => None,
        }
    }
}

/// A NOAA scale level such as `G2-Moderate` or `S1-Minor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NoaaLevel {
    pub scale: NoaaScale,
    /// 1 (minor) through 5 (extreme).
    pub level: u8,
}

impl NoaaLevel {
    pub fn new(scale: NoaaScale, level: u8) -> Self {
        Self {
            scale,
            level: level.clamp(1, 5),
        }
    }

    /// Human label for the level.
    pub fn label(&self) -> &'static str {
        match self.level {
            1 => "Minor",
            2 => "Moderate",
            3 => "Strong",
            4 => "Severe",
            _ => "Extreme",
        }
    }
}

impl FromStr for NoaaLevel {
    type Err = CatalogueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CatalogueError::InvalidClassification {
            kind: "noaa scale",
            value: s.to_string(),
        };
        let code = s.trim().split('-').next().unwrap_or_default();
        let mut chars = code.chars();
        let scale = chars.next().and_then(NoaaScale::from_prefix).ok_or_else(invalid)?;
        let level: u8 = chars.as_str().parse().map_err(|_| invalid())?;
        if !(1..=5).contains(&level) {
            return Err(invalid());
        }
        Ok(Self { scale, level })
    }
}

impl TryFrom<String> for NoaaLevel {
    type Error = CatalogueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NoaaLevel> for String {
    fn from(level: NoaaLevel) -> Self {
        level.to_string()
    }
}

impl fmt::Display for NoaaLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}-{}", self.scale.prefix(), self.level, self.label())
    }
}

/// Qualitative impact rating attached to flares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ImpactLevel {
    Minor,
    Moderate,
    Strong,
    Severe,
    Extreme,
}

/// Qualitative risk reading shown on the status board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}
