//! The cache storage seam.

use async_trait::async_trait;

use crate::error::CacheError;
use crate::http::Response;

/// Named caches of URL-keyed responses.
///
/// Cache names are listed in creation order, and `match_any` searches them
/// in that order.
#[async_trait]
pub trait CacheStorage: Send + Sync {
    async fn names(&self) -> Result<Vec<String>, CacheError>;

    async fn has(&self, cache: &str) -> Result<bool, CacheError>;

    /// Delete a cache; returns whether it existed.
    async fn delete(&self, cache: &str) -> Result<bool, CacheError>;

    /// Store one response, creating the cache if needed.
    async fn put(&self, cache: &str, url: &str, response: Response) -> Result<(), CacheError>;

    /// Store every entry or none of them.
    async fn put_all(&self, cache: &str, entries: Vec<(String, Response)>) -> Result<(), CacheError>;

    async fn get(&self, cache: &str, url: &str) -> Result<Option<Response>, CacheError>;

    /// First stored response for `url` across all caches.
    async fn match_any(&self, url: &str) -> Result<Option<Response>, CacheError>;

    async fn entry_count(&self, cache: &str) -> Result<usize, CacheError>;
}
