//! Error types for the galaxy engine.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GalaxyError {
    #[error("Invalid viewport {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },

    #[error("Unknown intensity: {0}")]
    UnknownIntensity(String),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
