use crate::application::ports::{CacheStorage, PageFetcher};
use crate::domain::entities::CachedResponse;
use crate::domain::routing::{Disposition, RoutingTable};
use crate::domain::value_objects::{
    CacheNames, CacheRole, PageRequest, RequestKey, RequestMethod,
};
use crate::shared::error::AppError;
use std::sync::Arc;
use tracing::warn;
use url::Url;

const SHELL_DOCUMENT: &str = "/index.html";

/// Where a served response came from, so callers (and tests) can tell a
/// cache hit from a live fetch.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ServedFrom {
    Network,
    Cache,
    OfflineShell,
    /// Cross-origin request passed through untouched.
    Bypass,
}

#[derive(Debug, Clone)]
pub struct ServedResponse {
    pub response: CachedResponse,
    pub served_from: ServedFrom,
}

/// The fetch proxy: classifies every intercepted request through the
/// routing table and applies the matching caching strategy.
pub struct FetchService {
    storage: Arc<dyn CacheStorage>,
    fetcher: Arc<dyn PageFetcher>,
    routes: RoutingTable,
    names: CacheNames,
    origin: Url,
}

impl FetchService {
    pub fn new(
        storage: Arc<dyn CacheStorage>,
        fetcher: Arc<dyn PageFetcher>,
        names: CacheNames,
        origin: Url,
    ) -> Self {
        Self {
            storage,
            fetcher,
            routes: RoutingTable::standard(),
            names,
            origin,
        }
    }

    pub fn with_routes(mut self, routes: RoutingTable) -> Self {
        self.routes = routes;
        self
    }

    /// Handle one intercepted request. Exactly one strategy runs per
    /// request; cross-origin traffic is not intercepted at all.
    pub async fn handle(&self, request: &PageRequest) -> Result<ServedResponse, AppError> {
        if request.url.origin() != self.origin.origin() {
            let response = self.fetcher.fetch(request).await?;
            return Ok(ServedResponse {
                response,
                served_from: ServedFrom::Bypass,
            });
        }

        match self.routes.resolve(request) {
            Disposition::NetworkFirst => self.network_first(request).await,
            Disposition::CacheFirst(role) => self.cache_first(request, role).await,
        }
    }

    /// Serve from cache when present; fetch and populate on miss. Cached
    /// entries are returned without any freshness check and expire only
    /// by generation replacement.
    async fn cache_first(
        &self,
        request: &PageRequest,
        role: CacheRole,
    ) -> Result<ServedResponse, AppError> {
        let cache = self.names.for_role(role);
        let key = request.key();

        if let Some(cached) = self.storage.get(cache, &key).await? {
            return Ok(ServedResponse {
                response: cached,
                served_from: ServedFrom::Cache,
            });
        }

        match self.fetcher.fetch(request).await {
            Ok(response) => {
                self.store_if_cacheable(request, role, &key, &response).await;
                Ok(ServedResponse {
                    response,
                    served_from: ServedFrom::Network,
                })
            }
            Err(err) if err.is_network() => self.offline_fallback(request, err).await,
            Err(err) => Err(err),
        }
    }

    /// Prefer freshness; degrade to the last cached copy under failure.
    async fn network_first(&self, request: &PageRequest) -> Result<ServedResponse, AppError> {
        let cache = self.names.for_role(CacheRole::Runtime);
        let key = request.key();

        match self.fetcher.fetch(request).await {
            Ok(response) => {
                self.store_if_cacheable(request, CacheRole::Runtime, &key, &response)
                    .await;
                Ok(ServedResponse {
                    response,
                    served_from: ServedFrom::Network,
                })
            }
            Err(err) if err.is_network() => {
                if let Some(cached) = self.storage.get(cache, &key).await? {
                    warn!("Network failed, serving stale cache: {}", key);
                    return Ok(ServedResponse {
                        response: cached,
                        served_from: ServedFrom::Cache,
                    });
                }
                // No further fallback for API calls; navigations still get
                // the offline shell.
                self.offline_fallback(request, err).await
            }
            Err(err) => Err(err),
        }
    }

    /// Only successful GET responses are captured. A failed cache write
    /// never fails the response that is already in hand.
    async fn store_if_cacheable(
        &self,
        request: &PageRequest,
        role: CacheRole,
        key: &RequestKey,
        response: &CachedResponse,
    ) {
        if !request.is_get() || !response.is_success() {
            return;
        }
        let cache = self.names.for_role(role);
        if let Err(err) = self.storage.put(cache, key, response).await {
            warn!("Failed to cache {}: {}", key, err);
        }
    }

    /// Last resort for navigations when the network is unreachable: the
    /// root document cached at install time. Everything else propagates
    /// the failure to the caller.
    async fn offline_fallback(
        &self,
        request: &PageRequest,
        err: AppError,
    ) -> Result<ServedResponse, AppError> {
        if !request.is_navigation {
            return Err(err);
        }

        let shell_url = self.origin.join(SHELL_DOCUMENT)?;
        let shell_key = RequestKey::from_parts(RequestMethod::Get, &shell_url);
        match self
            .storage
            .get(self.names.for_role(CacheRole::Static), &shell_key)
            .await?
        {
            Some(shell) => {
                warn!("Network unreachable, serving offline shell");
                Ok(ServedResponse {
                    response: shell,
                    served_from: ServedFrom::OfflineShell,
                })
            }
            None => Err(err),
        }
    }
}
