//! The three caching strategies.

use std::sync::Arc;
use tracing::{debug, warn};

use super::OfflineWorker;
use crate::error::FetchError;
use crate::fallback::{offline_page, placeholder_image};
use crate::host::Fetcher;
use crate::http::{Destination, Request, Response};
use crate::routes::Strategy;
use crate::storage::CacheStorage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseSource {
    Network,
    Cache,
    /// Synthesized offline page or placeholder.
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Not intercepted; the host performs the request itself.
    Passthrough,
    Respond {
        response: Response,
        source: ResponseSource,
        strategy: Strategy,
    },
}

impl FetchOutcome {
    fn respond(response: Response, source: ResponseSource, strategy: Strategy) -> Self {
        FetchOutcome::Respond {
            response,
            source,
            strategy,
        }
    }

    pub fn response(&self) -> Option<&Response> {
        match self {
            FetchOutcome::Passthrough => None,
            FetchOutcome::Respond { response, .. } => Some(response),
        }
    }

    pub fn source(&self) -> Option<ResponseSource> {
        match self {
            FetchOutcome::Passthrough => None,
            FetchOutcome::Respond { source, .. } => Some(*source),
        }
    }
}

impl OfflineWorker {
    /// Route a page request to its strategy. Only GET is intercepted.
    pub async fn handle_fetch(&self, request: &Request) -> Result<FetchOutcome, FetchError> {
        if !request.is_get() {
            return Ok(FetchOutcome::Passthrough);
        }
        match self.routes.classify(&request.url) {
            Strategy::NetworkFirst => self.network_first(request).await,
            Strategy::CacheFirst => self.cache_first(request).await,
            Strategy::StaleWhileRevalidate => self.stale_while_revalidate(request).await,
        }
    }

    /// Network, then any cache, then the offline page for navigations.
    pub async fn network_first(&self, request: &Request) -> Result<FetchOutcome, FetchError> {
        let strategy = Strategy::NetworkFirst;
        let err = match self.network.fetch(request).await {
            Ok(response) => {
                self.store_dynamic(&request.url, &response).await;
                return Ok(FetchOutcome::respond(response, ResponseSource::Network, strategy));
            }
            Err(err) => err,
        };

        debug!(url = %request.url, error = %err, "Network failed, trying cache");
        if let Some(cached) = self.lookup(&request.url).await {
            return Ok(FetchOutcome::respond(cached, ResponseSource::Cache, strategy));
        }
        if request.is_navigation() {
            if let Some(stored) = self.lookup(&self.config.offline_page_url).await {
                return Ok(FetchOutcome::respond(stored, ResponseSource::Cache, strategy));
            }
            return Ok(FetchOutcome::respond(offline_page(), ResponseSource::Fallback, strategy));
        }
        Err(err)
    }

    /// Any cache, then network, then a placeholder for images.
    pub async fn cache_first(&self, request: &Request) -> Result<FetchOutcome, FetchError> {
        let strategy = Strategy::CacheFirst;
        if let Some(cached) = self.lookup(&request.url).await {
            return Ok(FetchOutcome::respond(cached, ResponseSource::Cache, strategy));
        }

        match self.network.fetch(request).await {
            Ok(response) => {
                self.store_dynamic(&request.url, &response).await;
                Ok(FetchOutcome::respond(response, ResponseSource::Network, strategy))
            }
            Err(err) => {
                debug!(url = %request.url, error = %err, "Fetch failed");
                if request.destination == Destination::Image {
                    return Ok(FetchOutcome::respond(
                        placeholder_image(),
                        ResponseSource::Fallback,
                        strategy,
                    ));
                }
                Err(err)
            }
        }
    }

    /// Serve the cached copy now and refresh it in the background; without a
    /// cached copy, wait for the network.
    ///
    /// Concurrent requests for the same URL each start their own refresh.
    pub async fn stale_while_revalidate(&self, request: &Request) -> Result<FetchOutcome, FetchError> {
        let strategy = Strategy::StaleWhileRevalidate;
        if let Some(cached) = self.lookup(&request.url).await {
            let task = refresh(
                Arc::clone(&self.storage),
                Arc::clone(&self.network),
                self.manifest.dynamic_cache().to_string(),
                request.clone(),
            );
            let mut refreshes = self.refreshes.lock().await;
            // Finished refreshes are reaped here so the set only holds live tasks.
            while let Some(result) = refreshes.try_join_next() {
                if let Err(e) = result {
                    warn!(error = %e, "Background refresh task failed");
                }
            }
            refreshes.spawn(task);
            drop(refreshes);
            return Ok(FetchOutcome::respond(cached, ResponseSource::Cache, strategy));
        }

        let response = self.network.fetch(request).await?;
        self.store_dynamic(&request.url, &response).await;
        Ok(FetchOutcome::respond(response, ResponseSource::Network, strategy))
    }

    /// Background refreshes not yet reaped.
    pub async fn pending_refreshes(&self) -> usize {
        self.refreshes.lock().await.len()
    }

    /// Wait for every outstanding background refresh; returns how many were awaited.
    pub async fn settle(&self) -> usize {
        let mut pending = std::mem::take(&mut *self.refreshes.lock().await);
        let mut settled = 0;
        while let Some(result) = pending.join_next().await {
            if let Err(e) = result {
                warn!(error = %e, "Background refresh task failed");
            }
            settled += 1;
        }
        settled
    }
}

async fn refresh(
    storage: Arc<dyn CacheStorage>,
    network: Arc<dyn Fetcher>,
    cache: String,
    request: Request,
) {
    match network.fetch(&request).await {
        Ok(response) if response.is_ok() => {
            if let Err(e) = storage.put(&cache, &request.url, response).await {
                warn!(url = %request.url, error = %e, "Failed to store refreshed response");
            }
        }
        Ok(response) => {
            debug!(url = %request.url, status = response.status, "Refresh returned non-ok status");
        }
        Err(e) => {
            debug!(url = %request.url, error = %e, "Background refresh failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorkerConfig;
    use crate::http::Method;
    use crate::memory::{MemoryCacheStorage, MemoryNetwork};

    fn worker(network: Arc<MemoryNetwork>) -> (OfflineWorker, Arc<MemoryCacheStorage>) {
        let storage = Arc::new(MemoryCacheStorage::new());
        let worker = OfflineWorker::new(WorkerConfig::default(), storage.clone(), network);
        (worker, storage)
    }

    #[tokio::test]
    async fn test_non_get_passes_through() {
        let network = Arc::new(MemoryNetwork::new());
        let (worker, _) = worker(network.clone());
        let outcome = worker
            .handle_fetch(&Request::new(Method::Post, "/api/score"))
            .await
            .unwrap();
        assert_eq!(outcome, FetchOutcome::Passthrough);
        assert_eq!(network.call_count(), 0);
    }

    #[tokio::test]
    async fn test_network_first_falls_back_to_cache() {
        let network = Arc::new(MemoryNetwork::new().with_route("/api/kp", Response::ok("kp=5")));
        let (worker, _) = worker(network.clone());

        worker.handle_fetch(&Request::get("/api/kp")).await.unwrap();
        network.set_offline(true);

        let outcome = worker.handle_fetch(&Request::get("/api/kp")).await.unwrap();
        assert_eq!(outcome.source(), Some(ResponseSource::Cache));
        assert_eq!(outcome.response().unwrap().text(), "kp=5");
    }

    #[tokio::test]
    async fn test_network_first_offline_navigation() {
        let network = Arc::new(MemoryNetwork::new());
        network.set_offline(true);
        let (worker, _) = worker(network);

        let outcome = worker
            .network_first(&Request::navigate("/api/page"))
            .await
            .unwrap();
        assert_eq!(outcome.source(), Some(ResponseSource::Fallback));
        assert_eq!(outcome.response().unwrap().content_type(), Some("text/html"));

        let err = worker.network_first(&Request::get("/api/data")).await.unwrap_err();
        assert!(matches!(err, FetchError::Offline(_)));
    }

    #[tokio::test]
    async fn test_network_first_prefers_stored_offline_page() {
        let network = Arc::new(MemoryNetwork::new());
        network.set_offline(true);
        let (worker, storage) = worker(network);
        storage
            .put("solar-monarch-static-v1", "/offline.html", Response::ok("stored offline"))
            .await
            .unwrap();

        let outcome = worker.network_first(&Request::navigate("/api/page")).await.unwrap();
        assert_eq!(outcome.source(), Some(ResponseSource::Cache));
        assert_eq!(outcome.response().unwrap().text(), "stored offline");
    }

    #[tokio::test]
    async fn test_non_ok_not_cached() {
        let network = Arc::new(MemoryNetwork::new().with_route("/api/x", Response::new(503, "busy")));
        let (worker, storage) = worker(network);

        let outcome = worker.handle_fetch(&Request::get("/api/x")).await.unwrap();
        assert_eq!(outcome.response().unwrap().status, 503);
        assert!(storage.match_any("/api/x").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_cache_first_image_placeholder() {
        let network = Arc::new(MemoryNetwork::new());
        network.fail("/assets/images/aurora-page1.png").await;
        let (worker, _) = worker(network);

        let image = Request::get("/assets/images/aurora-page1.png").with_destination(Destination::Image);
        let outcome = worker.handle_fetch(&image).await.unwrap();
        assert_eq!(outcome.source(), Some(ResponseSource::Fallback));
        assert_eq!(outcome.response().unwrap().content_type(), Some("image/svg+xml"));

        let audio = Request::get("/assets/images/aurora-page1.png").with_destination(Destination::Audio);
        assert!(worker.handle_fetch(&audio).await.is_err());
    }

    #[tokio::test]
    async fn test_stale_while_revalidate_refreshes_in_background() {
        let network = Arc::new(MemoryNetwork::new().with_route("/css/main.css", Response::ok("v1")));
        let (worker, storage) = worker(network.clone());

        let first = worker.handle_fetch(&Request::get("/css/main.css")).await.unwrap();
        assert_eq!(first.source(), Some(ResponseSource::Network));

        network.set_route("/css/main.css", Response::ok("v2")).await;
        let second = worker.handle_fetch(&Request::get("/css/main.css")).await.unwrap();
        assert_eq!(second.source(), Some(ResponseSource::Cache));
        assert_eq!(second.response().unwrap().text(), "v1");

        assert_eq!(worker.settle().await, 1);
        let stored = storage
            .get("solar-monarch-dynamic-v1", "/css/main.css")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.text(), "v2");
    }

    #[tokio::test]
    async fn test_stale_while_revalidate_no_dedup() {
        let network = Arc::new(MemoryNetwork::new().with_route("/js/main.js", Response::ok("js")));
        let (worker, _) = worker(network.clone());
        worker.handle_fetch(&Request::get("/js/main.js")).await.unwrap();

        let request = Request::get("/js/main.js");
        let (a, b) = tokio::join!(worker.handle_fetch(&request), worker.handle_fetch(&request));
        assert!(a.is_ok() && b.is_ok());
        worker.settle().await;
        assert_eq!(network.calls_for("/js/main.js").await, 3);
    }

    #[tokio::test]
    async fn test_finished_refreshes_are_reaped() {
        let network = Arc::new(MemoryNetwork::new().with_route("/css/main.css", Response::ok("css")));
        let (worker, _) = worker(network.clone());
        worker.handle_fetch(&Request::get("/css/main.css")).await.unwrap();

        for _ in 0..200 {
            let hit = worker.handle_fetch(&Request::get("/css/main.css")).await.unwrap();
            assert_eq!(hit.source(), Some(ResponseSource::Cache));
            tokio::task::yield_now().await;
        }
        assert!(worker.pending_refreshes().await <= 2);
        worker.settle().await;
        assert_eq!(worker.pending_refreshes().await, 0);
        assert_eq!(network.calls_for("/css/main.css").await, 201);
    }

    #[tokio::test]
    async fn test_stale_while_revalidate_miss_propagates() {
        let network = Arc::new(MemoryNetwork::new());
        network.set_offline(true);
        let (worker, _) = worker(network);
        assert!(worker.handle_fetch(&Request::get("/css/main.css")).await.is_err());
        assert_eq!(worker.settle().await, 0);
    }
}
