//! # Space Weather
//!
//! The content catalogue crate - holds every space weather record, educational fact,
//! quiz item and story adaptation rule the rest of the workspace reads from.
//! The catalogue is built once at startup and handed to consumers by reference;
//! nothing in this crate renders, schedules or persists anything.

pub mod adaptation;
pub mod catalogue;
pub mod classification;
pub mod education;
pub mod error;
pub mod events;
pub mod quiz;

pub use adaptation::*;
pub use catalogue::*;
pub use classification::*;
pub use education::*;
pub use error::*;
pub use events::*;
pub use quiz::*;
