//! # Story Core
//!
//! The narrative controller of the Solar Monarch reader. This crate reads the
//! `space_weather` catalogue, renders story pages with live space weather
//! overlays, resolves reader choices and keeps persisted progress.
//!
//! ## Core Components
//!
//! - **library**: The read-only story definitions and their page tables
//! - **overlay**: Appends real-time annotations to pages for active adaptations
//! - **controller**: One reading session at a time - navigation, choices, completion
//! - **progress**: Achievements, completed stories and points behind a storage trait
//! - **events**: Reader commands in, observable effects out
//!
//! ## Design Philosophy
//!
//! - **Pure rendering**: A page is a function of its base content, index and adaptation flags
//! - **Single writer**: Only the controller mutates reader progress
//! - **Graceful degradation**: Missing speech, sharing or clipboard support is never an error

pub mod capabilities;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod library;
pub mod overlay;
pub mod progress;
pub mod quiz;

pub use capabilities::*;
pub use config::*;
pub use controller::*;
pub use error::*;
pub use events::*;
pub use library::*;
pub use overlay::*;
pub use progress::*;
pub use quiz::*;
