//! # Galaxy
//!
//! The animated background of the Solar Monarch reader. Stars twinkle on
//! parallax layers, nebulae drift and pulse, comets streak across with
//! fading trails, and story events can request flashes and comet showers.
//!
//! ## Core Components
//!
//! - **surface**: The drawing seam plus a recording implementation for tests
//! - **star** / **nebula** / **comet** / **flash**: Per-entity state and drawing
//! - **engine**: Owns the populations and advances them one frame at a time
//! - **config**: Population sizes, speeds and intensity presets
//!
//! ## Design Philosophy
//!
//! - **Caller-driven frames**: The host calls `frame(t)`; nothing here owns a timer
//! - **Injected randomness**: Every population is drawn from the engine's `Rng`
//! - **Accessible motion**: Reduced motion slows everything down and removes comets

pub mod comet;
pub mod config;
pub mod engine;
pub mod error;
pub mod flash;
pub mod nebula;
pub mod star;
pub mod surface;

pub use comet::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use flash::*;
pub use nebula::*;
pub use star::*;
pub use surface::*;
