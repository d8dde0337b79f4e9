//! # Offline Cache
//!
//! Offline-first delivery for the Solar Monarch reader. Every page request
//! is routed to one of three caching strategies, a versioned manifest decides
//! which caches survive activation, and side channels handle control
//! messages, background sync and push alerts.
//!
//! ## Core Components
//!
//! - **http**: Minimal request and response values
//! - **manifest**: Versioned cache names compared structurally
//! - **routes**: URL classification into network-first, cache-first or stale-while-revalidate
//! - **storage** / **host**: Async seams for cache storage, the network, open pages and notifications
//! - **memory**: In-memory implementations of every seam
//! - **worker**: The lifecycle, strategies and event dispatch
//!
//! ## Design Philosophy
//!
//! - **Degrade, don't crash**: Network failures fall back to cache or a synthesized response
//! - **Atomic install**: The static cache is written in full or not at all
//! - **Explicit time**: Handlers that stamp messages take `now` from the caller

pub mod config;
pub mod error;
pub mod fallback;
pub mod host;
pub mod http;
pub mod manifest;
pub mod memory;
pub mod messages;
pub mod push;
pub mod routes;
pub mod storage;
pub mod worker;

pub use config::*;
pub use error::*;
pub use fallback::*;
pub use host::*;
pub use http::*;
pub use manifest::*;
pub use memory::*;
pub use messages::*;
pub use push::*;
pub use routes::*;
pub use storage::*;
pub use worker::*;
