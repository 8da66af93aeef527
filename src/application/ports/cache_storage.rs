use crate::domain::entities::CachedResponse;
use crate::domain::value_objects::{CacheName, RequestKey};
use crate::shared::error::AppError;
use async_trait::async_trait;

/// Named, versioned response cache shared by every session of the origin.
///
/// Each operation is individually atomic; concurrent writers on the same
/// key are last-writer-wins, which is acceptable because both writes hold
/// equivalent network responses captured at nearly the same time.
#[async_trait]
pub trait CacheStorage: Send + Sync {
    async fn get(
        &self,
        cache: &CacheName,
        key: &RequestKey,
    ) -> Result<Option<CachedResponse>, AppError>;

    /// Upsert. Entries are added to a cache, never moved between caches.
    async fn put(
        &self,
        cache: &CacheName,
        key: &RequestKey,
        response: &CachedResponse,
    ) -> Result<(), AppError>;

    /// Every cache name currently holding at least one entry.
    async fn cache_names(&self) -> Result<Vec<CacheName>, AppError>;

    /// Keys held by one cache, for inspection.
    async fn keys(&self, cache: &CacheName) -> Result<Vec<RequestKey>, AppError>;

    /// Wholesale eviction of one cache. The only eviction mechanism:
    /// there is no per-entry TTL and no LRU.
    async fn delete_cache(&self, cache: &CacheName) -> Result<bool, AppError>;
}
