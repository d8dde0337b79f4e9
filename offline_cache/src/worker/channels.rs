//! Side channels: control messages, background sync, push and notification clicks.

use chrono::{DateTime, Utc};
use futures::future::join_all;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use super::OfflineWorker;
use crate::error::CacheError;
use crate::host::ClientId;
use crate::http::{Request, Response};
use crate::messages::{CacheStatus, ClientMessage, ControlMessage, MessageReply};
use crate::push::{NotificationData, NotificationOptions, PushPayload, ACTION_DISMISS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The tag is not one this worker handles.
    UnknownTag,
    Refreshed { notified: usize, alerted: bool },
    BadStatus(u16),
    NetworkFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Dismissed,
    Focused(ClientId),
    Opened(ClientId),
}

impl OfflineWorker {
    pub async fn handle_message(
        &self,
        message: ControlMessage,
        now: DateTime<Utc>,
    ) -> Result<MessageReply, CacheError> {
        match message {
            ControlMessage::SkipWaiting => {
                self.skip_waiting().await;
                Ok(MessageReply::Ack)
            }
            ControlMessage::CacheStoryAssets { story_type } => Ok(self.cache_story_assets(&story_type).await),
            ControlMessage::ClearCache => {
                let deleted = self.clear_caches().await?;
                Ok(MessageReply::Cleared { deleted })
            }
            ControlMessage::GetCacheStatus => Ok(MessageReply::Status(self.cache_status(now).await?)),
        }
    }

    /// Fetch a story's configured assets into the dynamic cache.
    pub async fn cache_story_assets(&self, story_type: &str) -> MessageReply {
        let urls: &[String] = match self.config.story_assets.get(story_type) {
            Some(urls) => urls.as_slice(),
            None => {
                warn!(story_type, "No assets configured for story");
                &[]
            }
        };
        info!(story_type, assets = urls.len(), "Caching story assets");

        let results = join_all(urls.iter().map(|url| async move {
            match self.network.fetch(&Request::get(url.clone())).await {
                Ok(response) => self.store_dynamic(url, &response).await,
                Err(e) => {
                    debug!(url = %url, error = %e, "Story asset fetch failed");
                    false
                }
            }
        }))
        .await;

        let cached = results.iter().filter(|ok| **ok).count();
        MessageReply::StoryAssetsCached {
            story_type: story_type.to_string(),
            cached,
            failed: results.len() - cached,
        }
    }

    /// Delete every cache, current or not.
    pub async fn clear_caches(&self) -> Result<usize, CacheError> {
        let mut deleted = 0;
        for name in self.storage.names().await? {
            if self.storage.delete(&name).await? {
                deleted += 1;
            }
        }
        info!(deleted, "All caches cleared");
        Ok(deleted)
    }

    pub async fn cache_status(&self, now: DateTime<Utc>) -> Result<CacheStatus, CacheError> {
        let mut caches = BTreeMap::new();
        for name in self.storage.names().await? {
            let count = self.storage.entry_count(&name).await?;
            caches.insert(name, count);
        }
        Ok(CacheStatus {
            total_caches: caches.len(),
            caches,
            timestamp: now.timestamp_millis(),
        })
    }

    /// One-off background sync: refresh the data resource and tell open pages.
    pub async fn handle_sync(&self, tag: &str, now: DateTime<Utc>) -> SyncOutcome {
        if tag != self.config.sync_tag {
            debug!(tag, "Ignoring unknown sync tag");
            return SyncOutcome::UnknownTag;
        }
        info!(url = %self.config.data_url, "Syncing data");
        if let Err(outcome) = self.refresh_data().await {
            return outcome;
        }

        let message = ClientMessage::NasaDataUpdated {
            timestamp: now.timestamp_millis(),
        };
        let windows = self.clients.windows().await;
        for window in &windows {
            self.clients.post_message(window.id, &message).await;
        }
        info!(notified = windows.len(), "Data synced");
        SyncOutcome::Refreshed {
            notified: windows.len(),
            alerted: false,
        }
    }

    /// Scheduled sync: refresh the data resource and raise an alert if the
    /// policy finds something worth one.
    pub async fn handle_periodic_sync(&self, tag: &str, now: DateTime<Utc>) -> SyncOutcome {
        if tag != self.config.periodic_sync_tag {
            debug!(tag, "Ignoring unknown periodic sync tag");
            return SyncOutcome::UnknownTag;
        }
        info!("Periodic space weather update");
        let response = match self.refresh_data().await {
            Ok(response) => response,
            Err(outcome) => return outcome,
        };

        let alerted = match self.alert_policy.evaluate(&response, now) {
            Some(payload) => match self.show_alert(payload, now).await {
                Ok(()) => true,
                Err(e) => {
                    warn!(error = %e, "Failed to show space weather alert");
                    false
                }
            },
            None => false,
        };
        SyncOutcome::Refreshed {
            notified: 0,
            alerted,
        }
    }

    async fn refresh_data(&self) -> Result<Response, SyncOutcome> {
        let url = &self.config.data_url;
        match self.network.fetch(&Request::get(url.clone())).await {
            Ok(response) if response.is_ok() => {
                self.store_dynamic(url, &response).await;
                Ok(response)
            }
            Ok(response) => {
                warn!(url = %url, status = response.status, "Data refresh returned non-ok status");
                Err(SyncOutcome::BadStatus(response.status))
            }
            Err(e) => {
                warn!(url = %url, error = %e, "Data refresh failed");
                Err(SyncOutcome::NetworkFailed)
            }
        }
    }

    /// Show an alert for incoming push data; returns whether one was shown.
    pub async fn handle_push(&self, data: Option<&str>, now: DateTime<Utc>) -> Result<bool, CacheError> {
        let Some(data) = data else {
            return Ok(false);
        };
        let payload = PushPayload::from_json(data)?;
        self.show_alert(payload, now).await?;
        Ok(true)
    }

    async fn show_alert(&self, payload: PushPayload, now: DateTime<Utc>) -> Result<(), CacheError> {
        let (title, options) = NotificationOptions::alert(payload, &self.config.notification, now);
        info!(title = %title, url = %options.data.url, "Showing alert");
        self.notifications.show(&title, &options).await
    }

    /// Focus an open page of this origin and navigate it, or open a new one.
    pub async fn handle_notification_click(
        &self,
        action: Option<&str>,
        data: Option<&NotificationData>,
    ) -> Result<ClickOutcome, CacheError> {
        if action == Some(ACTION_DISMISS) {
            return Ok(ClickOutcome::Dismissed);
        }
        let url = data.map_or(self.config.notification.url.as_str(), |d| d.url.as_str());

        let windows = self.clients.windows().await;
        if let Some(window) = windows.iter().find(|w| w.url.contains(&self.config.origin)) {
            self.clients.focus_and_navigate(window.id, url).await?;
            debug!(client = %window.id, url, "Focused existing window");
            return Ok(ClickOutcome::Focused(window.id));
        }

        let id = self.clients.open_window(url).await?;
        debug!(client = %id, url, "Opened new window");
        Ok(ClickOutcome::Opened(id))
    }
}
