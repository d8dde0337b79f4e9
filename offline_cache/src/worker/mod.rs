//! The offline worker: lifecycle, request strategies and side channels.

mod channels;
mod strategies;

pub use channels::*;
pub use strategies::*;

use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::config::WorkerConfig;
use crate::error::CacheError;
use crate::host::{ClientHub, Fetcher, NoClients, NoNotifications, NotificationHost};
use crate::http::{Request, Response};
use crate::manifest::CacheManifest;
use crate::messages::{ControlMessage, MessageReply};
use crate::push::{AlertPolicy, NoAlerts, NotificationData};
use crate::routes::RouteTable;
use crate::storage::CacheStorage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Created, not yet installed.
    Parsed,
    Installing,
    Installed,
    Activated,
    /// Install failed; this worker will never activate.
    Redundant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub cache: String,
    pub assets: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationReport {
    pub deleted: Vec<String>,
    pub kept: Vec<String>,
    pub claimed: usize,
}

/// Everything the host can deliver to the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerEvent {
    Install,
    Activate,
    Fetch(Request),
    Message(ControlMessage),
    Sync(String),
    PeriodicSync(String),
    /// Raw push data, if the push carried any.
    Push(Option<String>),
    NotificationClick {
        action: Option<String>,
        data: Option<NotificationData>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerReply {
    Installed(InstallReport),
    Activated(ActivationReport),
    Fetch(FetchOutcome),
    Message(MessageReply),
    Sync(SyncOutcome),
    Push { shown: bool },
    NotificationClick(ClickOutcome),
}

#[derive(Debug, Clone, Copy)]
struct WorkerState {
    lifecycle: Lifecycle,
    skip_waiting: bool,
}

pub struct OfflineWorker {
    config: WorkerConfig,
    manifest: CacheManifest,
    routes: RouteTable,
    storage: Arc<dyn CacheStorage>,
    network: Arc<dyn Fetcher>,
    clients: Arc<dyn ClientHub>,
    notifications: Arc<dyn NotificationHost>,
    alert_policy: Arc<dyn AlertPolicy>,
    state: RwLock<WorkerState>,
    refreshes: Mutex<JoinSet<()>>,
}

impl OfflineWorker {
    /// A worker with no reachable pages, no notification tray and no alert policy.
    pub fn new(config: WorkerConfig, storage: Arc<dyn CacheStorage>, network: Arc<dyn Fetcher>) -> Self {
        Self {
            manifest: config.manifest(),
            routes: config.routes(),
            config,
            storage,
            network,
            clients: Arc::new(NoClients),
            notifications: Arc::new(NoNotifications),
            alert_policy: Arc::new(NoAlerts),
            state: RwLock::new(WorkerState {
                lifecycle: Lifecycle::Parsed,
                skip_waiting: false,
            }),
            refreshes: Mutex::new(JoinSet::new()),
        }
    }

    /// Reach open pages through `clients`.
    pub fn with_clients(mut self, clients: Arc<dyn ClientHub>) -> Self {
        self.clients = clients;
        self
    }

    /// Show alerts through `notifications`.
    pub fn with_notifications(mut self, notifications: Arc<dyn NotificationHost>) -> Self {
        self.notifications = notifications;
        self
    }

    /// Decide from refreshed data whether a periodic sync raises an alert.
    pub fn with_alert_policy(mut self, policy: Arc<dyn AlertPolicy>) -> Self {
        self.alert_policy = policy;
        self
    }

    /// Get the configuration this worker was built with.
    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    /// Get the cache manifest for the configured generation.
    pub fn manifest(&self) -> &CacheManifest {
        &self.manifest
    }

    /// Get the URL to strategy routing table.
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Get the current lifecycle state.
    pub async fn lifecycle(&self) -> Lifecycle {
        self.state.read().await.lifecycle
    }

    /// Installed, but waiting for old pages to close before activating.
    pub async fn is_waiting(&self) -> bool {
        let state = self.state.read().await;
        state.lifecycle == Lifecycle::Installed && !state.skip_waiting
    }

    /// Activate as soon as installed instead of waiting.
    pub async fn skip_waiting(&self) {
        self.state.write().await.skip_waiting = true;
        info!("Skip waiting requested");
    }

    async fn set_lifecycle(&self, lifecycle: Lifecycle) {
        self.state.write().await.lifecycle = lifecycle;
    }

    /// Fetch every manifest asset and store them in the static cache.
    ///
    /// Any network failure or non-2xx response aborts the install before
    /// anything is written.
    pub async fn install(&self) -> Result<InstallReport, CacheError> {
        let cache = self.manifest.static_cache().to_string();
        info!(cache = %cache, assets = self.manifest.assets.len(), "Installing");
        self.set_lifecycle(Lifecycle::Installing).await;

        let fetches = self.manifest.assets.iter().map(|url| async move {
            let response = self.network.fetch(&Request::get(url.clone())).await?;
            if !response.is_ok() {
                return Err(CacheError::BadStatus {
                    url: url.clone(),
                    status: response.status,
                });
            }
            Ok::<_, CacheError>((url.clone(), response))
        });

        let entries = match try_join_all(fetches).await {
            Ok(entries) => entries,
            Err(e) => {
                error!(error = %e, "Installation failed");
                self.set_lifecycle(Lifecycle::Redundant).await;
                return Err(e);
            }
        };
        let assets = entries.len();
        if let Err(e) = self.storage.put_all(&cache, entries).await {
            error!(error = %e, "Installation failed writing the static cache");
            self.set_lifecycle(Lifecycle::Redundant).await;
            return Err(e);
        }

        self.set_lifecycle(Lifecycle::Installed).await;
        self.skip_waiting().await;
        info!(cache = %cache, assets, "Installation complete");
        Ok(InstallReport { cache, assets })
    }

    /// Delete every cache outside the current manifest, then claim open pages.
    pub async fn activate(&self) -> Result<ActivationReport, CacheError> {
        info!("Activating");
        let mut deleted = Vec::new();
        let mut kept = Vec::new();
        for name in self.storage.names().await? {
            if self.manifest.is_current(&name) {
                kept.push(name);
            } else {
                info!(cache = %name, "Deleting stale cache");
                self.storage.delete(&name).await?;
                deleted.push(name);
            }
        }

        let claimed = self.clients.claim().await;
        self.set_lifecycle(Lifecycle::Activated).await;
        info!(deleted = deleted.len(), claimed, "Activation complete");
        Ok(ActivationReport {
            deleted,
            kept,
            claimed,
        })
    }

    /// Single dispatch point for host events.
    pub async fn dispatch(&self, event: WorkerEvent, now: DateTime<Utc>) -> Result<WorkerReply, CacheError> {
        let reply = match event {
            WorkerEvent::Install => self.install().await.map(WorkerReply::Installed),
            WorkerEvent::Activate => self.activate().await.map(WorkerReply::Activated),
            WorkerEvent::Fetch(request) => self
                .handle_fetch(&request)
                .await
                .map(WorkerReply::Fetch)
                .map_err(CacheError::from),
            WorkerEvent::Message(message) => self.handle_message(message, now).await.map(WorkerReply::Message),
            WorkerEvent::Sync(tag) => Ok(WorkerReply::Sync(self.handle_sync(&tag, now).await)),
            WorkerEvent::PeriodicSync(tag) => Ok(WorkerReply::Sync(self.handle_periodic_sync(&tag, now).await)),
            WorkerEvent::Push(data) => self
                .handle_push(data.as_deref(), now)
                .await
                .map(|shown| WorkerReply::Push { shown }),
            WorkerEvent::NotificationClick { action, data } => self
                .handle_notification_click(action.as_deref(), data.as_ref())
                .await
                .map(WorkerReply::NotificationClick),
        };
        if let Err(e) = &reply {
            warn!(error = %e, "Worker event failed");
        }
        reply
    }

    /// Store a copy in the dynamic cache if the response is 2xx.
    async fn store_dynamic(&self, url: &str, response: &Response) -> bool {
        if !response.is_ok() {
            return false;
        }
        let cache = self.manifest.dynamic_cache().to_string();
        match self.storage.put(&cache, url, response.clone()).await {
            Ok(()) => true,
            Err(e) => {
                warn!(url, error = %e, "Failed to cache response");
                false
            }
        }
    }

    async fn lookup(&self, url: &str) -> Option<Response> {
        match self.storage.match_any(url).await {
            Ok(found) => found,
            Err(e) => {
                warn!(url, error = %e, "Cache lookup failed");
                None
            }
        }
    }
}
