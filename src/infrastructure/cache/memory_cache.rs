use crate::application::ports::CacheStorage;
use crate::domain::entities::CachedResponse;
use crate::domain::value_objects::{CacheName, RequestKey};
use crate::shared::error::AppError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory substitute for the durable cache storage. Same contract,
/// no persistence; used by tests and ephemeral hosts.
#[derive(Default)]
pub struct MemoryCacheStorage {
    caches: Arc<RwLock<HashMap<CacheName, HashMap<RequestKey, CachedResponse>>>>,
}

impl MemoryCacheStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStorage for MemoryCacheStorage {
    async fn get(
        &self,
        cache: &CacheName,
        key: &RequestKey,
    ) -> Result<Option<CachedResponse>, AppError> {
        let caches = self.caches.read().await;
        Ok(caches.get(cache).and_then(|entries| entries.get(key)).cloned())
    }

    async fn put(
        &self,
        cache: &CacheName,
        key: &RequestKey,
        response: &CachedResponse,
    ) -> Result<(), AppError> {
        let mut caches = self.caches.write().await;
        caches
            .entry(cache.clone())
            .or_default()
            .insert(key.clone(), response.clone());
        Ok(())
    }

    async fn cache_names(&self) -> Result<Vec<CacheName>, AppError> {
        let caches = self.caches.read().await;
        Ok(caches.keys().cloned().collect())
    }

    async fn keys(&self, cache: &CacheName) -> Result<Vec<RequestKey>, AppError> {
        let caches = self.caches.read().await;
        Ok(caches
            .get(cache)
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default())
    }

    async fn delete_cache(&self, cache: &CacheName) -> Result<bool, AppError> {
        let mut caches = self.caches.write().await;
        Ok(caches.remove(cache).is_some())
    }
}
