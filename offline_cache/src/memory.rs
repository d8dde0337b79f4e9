//! In-memory implementations of every seam.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::{Mutex, RwLock};

use crate::error::{CacheError, FetchError};
use crate::host::{ClientHub, ClientId, Fetcher, NotificationHost, WindowClient};
use crate::http::{Request, Response};
use crate::messages::ClientMessage;
use crate::push::NotificationOptions;
use crate::storage::CacheStorage;

/// Caches kept in creation order.
#[derive(Debug, Default)]
pub struct MemoryCacheStorage {
    caches: RwLock<Vec<(String, BTreeMap<String, Response>)>>,
}

impl MemoryCacheStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn entries_mut<'a>(
    caches: &'a mut Vec<(String, BTreeMap<String, Response>)>,
    cache: &str,
) -> &'a mut BTreeMap<String, Response> {
    let index = match caches.iter().position(|(name, _)| name == cache) {
        Some(index) => index,
        None => {
            caches.push((cache.to_string(), BTreeMap::new()));
            caches.len() - 1
        }
    };
    &mut caches[index].1
}

#[async_trait]
impl CacheStorage for MemoryCacheStorage {
    async fn names(&self) -> Result<Vec<String>, CacheError> {
        Ok(self.caches.read().await.iter().map(|(n, _)| n.clone()).collect())
    }

    async fn has(&self, cache: &str) -> Result<bool, CacheError> {
        Ok(self.caches.read().await.iter().any(|(n, _)| n == cache))
    }

    async fn delete(&self, cache: &str) -> Result<bool, CacheError> {
        let mut caches = self.caches.write().await;
        let before = caches.len();
        caches.retain(|(n, _)| n != cache);
        Ok(caches.len() != before)
    }

    async fn put(&self, cache: &str, url: &str, response: Response) -> Result<(), CacheError> {
        let mut caches = self.caches.write().await;
        entries_mut(&mut caches, cache).insert(url.to_string(), response);
        Ok(())
    }

    async fn put_all(&self, cache: &str, entries: Vec<(String, Response)>) -> Result<(), CacheError> {
        // One guard for the whole batch.
        let mut caches = self.caches.write().await;
        entries_mut(&mut caches, cache).extend(entries);
        Ok(())
    }

    async fn get(&self, cache: &str, url: &str) -> Result<Option<Response>, CacheError> {
        Ok(self
            .caches
            .read()
            .await
            .iter()
            .find(|(n, _)| n == cache)
            .and_then(|(_, entries)| entries.get(url).cloned()))
    }

    async fn match_any(&self, url: &str) -> Result<Option<Response>, CacheError> {
        Ok(self
            .caches
            .read()
            .await
            .iter()
            .find_map(|(_, entries)| entries.get(url).cloned()))
    }

    async fn entry_count(&self, cache: &str) -> Result<usize, CacheError> {
        Ok(self
            .caches
            .read()
            .await
            .iter()
            .find(|(n, _)| n == cache)
            .map_or(0, |(_, entries)| entries.len()))
    }
}

/// A scripted network: fixed responses per URL, per-URL failures and an
/// offline switch. Unknown URLs answer 404.
#[derive(Debug, Default)]
pub struct MemoryNetwork {
    routes: RwLock<HashMap<String, Response>>,
    failing: RwLock<HashSet<String>>,
    offline: AtomicBool,
    calls: Mutex<Vec<String>>,
    call_count: AtomicUsize,
}

impl MemoryNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_route(mut self, url: impl Into<String>, response: Response) -> Self {
        self.routes.get_mut().insert(url.into(), response);
        self
    }

    /// Every URL answers `200` with its own path as the body.
    pub fn serving(urls: &[String]) -> Self {
        urls.iter().fold(Self::new(), |network, url| {
            network.with_route(url.clone(), Response::ok(url.as_bytes()))
        })
    }

    pub async fn set_route(&self, url: impl Into<String>, response: Response) {
        self.routes.write().await.insert(url.into(), response);
    }

    /// Make requests for `url` fail at the network level.
    pub async fn fail(&self, url: impl Into<String>) {
        self.failing.write().await.insert(url.into());
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Total requests seen, including failed ones.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub async fn calls_for(&self, url: &str) -> usize {
        self.calls.lock().await.iter().filter(|u| *u == url).count()
    }
}

#[async_trait]
impl Fetcher for MemoryNetwork {
    async fn fetch(&self, request: &Request) -> Result<Response, FetchError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.calls.lock().await.push(request.url.clone());

        if self.offline.load(Ordering::SeqCst) {
            return Err(FetchError::Offline(request.url.clone()));
        }
        if self.failing.read().await.contains(&request.url) {
            return Err(FetchError::Network {
                url: request.url.clone(),
                reason: "connection reset".to_string(),
            });
        }
        Ok(self
            .routes
            .read()
            .await
            .get(&request.url)
            .cloned()
            .unwrap_or_else(Response::not_found))
    }
}

/// Open windows plus a log of everything done to them.
#[derive(Debug, Default)]
pub struct MemoryClients {
    windows: RwLock<Vec<WindowClient>>,
    messages: Mutex<Vec<(ClientId, ClientMessage)>>,
    navigations: Mutex<Vec<(ClientId, String)>>,
    claimed: AtomicUsize,
}

impl MemoryClients {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_window(mut self, window: WindowClient) -> Self {
        self.windows.get_mut().push(window);
        self
    }

    pub async fn open_windows(&self) -> Vec<WindowClient> {
        self.windows.read().await.clone()
    }

    pub async fn messages(&self) -> Vec<(ClientId, ClientMessage)> {
        self.messages.lock().await.clone()
    }

    /// Focus-and-navigate calls, in order.
    pub async fn navigations(&self) -> Vec<(ClientId, String)> {
        self.navigations.lock().await.clone()
    }

    pub fn claimed(&self) -> usize {
        self.claimed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ClientHub for MemoryClients {
    async fn windows(&self) -> Vec<WindowClient> {
        self.open_windows().await
    }

    async fn focus_and_navigate(&self, client: ClientId, url: &str) -> Result<(), CacheError> {
        let mut windows = self.windows.write().await;
        let window = windows
            .iter_mut()
            .find(|w| w.id == client)
            .ok_or_else(|| CacheError::NoWindow(url.to_string()))?;
        window.url = url.to_string();
        self.navigations.lock().await.push((client, url.to_string()));
        Ok(())
    }

    async fn open_window(&self, url: &str) -> Result<ClientId, CacheError> {
        let window = WindowClient::new(url);
        let id = window.id;
        self.windows.write().await.push(window);
        Ok(id)
    }

    async fn post_message(&self, client: ClientId, message: &ClientMessage) {
        self.messages.lock().await.push((client, message.clone()));
    }

    async fn claim(&self) -> usize {
        let count = self.windows.read().await.len();
        self.claimed.store(count, Ordering::SeqCst);
        count
    }
}

/// Records every notification shown.
#[derive(Debug, Default)]
pub struct MemoryNotifications {
    shown: Mutex<Vec<(String, NotificationOptions)>>,
}

impl MemoryNotifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn shown(&self) -> Vec<(String, NotificationOptions)> {
        self.shown.lock().await.clone()
    }
}

#[async_trait]
impl NotificationHost for MemoryNotifications {
    async fn show(&self, title: &str, options: &NotificationOptions) -> Result<(), CacheError> {
        self.shown.lock().await.push((title.to_string(), options.clone()));
        Ok(())
    }
}
