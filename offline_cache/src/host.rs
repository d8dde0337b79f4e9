//! Seams to the outside world: the network, open pages and the notification tray.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::{CacheError, FetchError};
use crate::http::{Request, Response};
use crate::messages::ClientMessage;
use crate::push::NotificationOptions;

/// Issues real network requests.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// `Ok` for any response the server produced, including error statuses.
    async fn fetch(&self, request: &Request) -> Result<Response, FetchError>;
}

/// Identifier for an open page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientId(pub Uuid);

impl ClientId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowClient {
    pub id: ClientId,
    pub url: String,
}

impl WindowClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            id: ClientId::new(),
            url: url.into(),
        }
    }
}

/// The set of pages this worker can reach.
#[async_trait]
pub trait ClientHub: Send + Sync {
    /// Every open window, controlled or not.
    async fn windows(&self) -> Vec<WindowClient>;

    async fn focus_and_navigate(&self, client: ClientId, url: &str) -> Result<(), CacheError>;

    async fn open_window(&self, url: &str) -> Result<ClientId, CacheError>;

    async fn post_message(&self, client: ClientId, message: &ClientMessage);

    /// Take control of open pages; returns how many were claimed.
    async fn claim(&self) -> usize;
}

/// Shows platform notifications.
#[async_trait]
pub trait NotificationHost: Send + Sync {
    async fn show(&self, title: &str, options: &NotificationOptions) -> Result<(), CacheError>;
}

/// A hub with no pages.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoClients;

#[async_trait]
impl ClientHub for NoClients {
    async fn windows(&self) -> Vec<WindowClient> {
        Vec::new()
    }

    async fn focus_and_navigate(&self, _client: ClientId, url: &str) -> Result<(), CacheError> {
        Err(CacheError::NoWindow(url.to_string()))
    }

    async fn open_window(&self, url: &str) -> Result<ClientId, CacheError> {
        Err(CacheError::NoWindow(url.to_string()))
    }

    async fn post_message(&self, _client: ClientId, _message: &ClientMessage) {}

    async fn claim(&self) -> usize {
        0
    }
}

/// Drops notifications when the platform has no tray.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoNotifications;

#[async_trait]
impl NotificationHost for NoNotifications {
    async fn show(&self, title: &str, _options: &NotificationOptions) -> Result<(), CacheError> {
        debug!(title, "Notifications unavailable, dropping");
        Ok(())
    }
}
