use crate::application::ports::{CacheStorage, PageFetcher, PlatformBridge};
use crate::domain::entities::{CachedResponse, WorkerState};
use crate::domain::value_objects::push::DEFAULT_CLICK_TARGET;
use crate::domain::value_objects::{
    CacheNames, CacheRole, Notification, PageRequest, PushPayload, RequestKey,
    ResourceDestination, WorkerMessage,
};
use crate::shared::error::AppError;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};
use url::Url;

/// Lifecycle controller of the fetch proxy: install, activate, update
/// promotion, page messages and push notifications.
///
/// A first install activates immediately (skip waiting); an update
/// instance is built with `awaits_promotion()` and stays in Waiting
/// until a `SKIP_WAITING` message promotes it.
pub struct LifecycleService {
    storage: Arc<dyn CacheStorage>,
    fetcher: Arc<dyn PageFetcher>,
    platform: Arc<dyn PlatformBridge>,
    names: CacheNames,
    manifest: Vec<String>,
    origin: Url,
    state: RwLock<WorkerState>,
    activate_immediately: bool,
}

impl LifecycleService {
    pub fn new(
        storage: Arc<dyn CacheStorage>,
        fetcher: Arc<dyn PageFetcher>,
        platform: Arc<dyn PlatformBridge>,
        names: CacheNames,
        manifest: Vec<String>,
        origin: Url,
    ) -> Self {
        Self {
            storage,
            fetcher,
            platform,
            names,
            manifest,
            origin,
            state: RwLock::new(WorkerState::Installing),
            activate_immediately: true,
        }
    }

    /// Update-path variant: install completes into Waiting and the
    /// instance is promoted only by `SKIP_WAITING` (or the platform once
    /// no sessions remain open).
    pub fn awaits_promotion(mut self) -> Self {
        self.activate_immediately = false;
        self
    }

    pub async fn state(&self) -> WorkerState {
        *self.state.read().await
    }

    pub async fn is_active(&self) -> bool {
        self.state().await == WorkerState::Active
    }

    /// Pre-populate the static cache with the shell manifest,
    /// all-or-nothing: every asset is fetched before anything is stored,
    /// so a single failed fetch leaves the install incomplete and the
    /// instance ineligible to activate.
    pub async fn install(&self) -> Result<(), AppError> {
        info!("Installing: caching {} shell assets", self.manifest.len());

        let mut entries: Vec<(RequestKey, CachedResponse)> = Vec::with_capacity(self.manifest.len());
        for asset in &self.manifest {
            let url = self.origin.join(asset)?;
            let request = PageRequest::get(url, ResourceDestination::Other);
            let response = self.fetcher.fetch(&request).await?;
            if !response.is_success() {
                return Err(AppError::Lifecycle(format!(
                    "Install asset fetch failed: {asset} returned {}",
                    response.status
                )));
            }
            entries.push((request.key(), response));
        }

        let statics = self.names.for_role(CacheRole::Static);
        for (key, response) in &entries {
            self.storage.put(statics, key, response).await?;
        }

        *self.state.write().await = WorkerState::Waiting;
        info!("Install complete");

        if self.activate_immediately {
            self.activate().await?;
        }
        Ok(())
    }

    /// Delete every cache outside the current generation set, claim open
    /// sessions and become the controlling instance. Refuses while the
    /// install has not completed.
    pub async fn activate(&self) -> Result<(), AppError> {
        {
            let state = self.state.read().await;
            if *state == WorkerState::Installing {
                return Err(AppError::Lifecycle(
                    "Cannot activate before install has completed".to_string(),
                ));
            }
        }

        for name in self.storage.cache_names().await? {
            if !self.names.contains(&name) {
                info!("Deleting stale cache: {}", name);
                self.storage.delete_cache(&name).await?;
            }
        }

        self.platform.claim_clients().await?;
        *self.state.write().await = WorkerState::Active;
        info!("Activated");
        Ok(())
    }

    /// Promote a waiting update immediately.
    pub async fn skip_waiting(&self) -> Result<(), AppError> {
        match self.state().await {
            WorkerState::Active => Ok(()),
            WorkerState::Waiting => self.activate().await,
            WorkerState::Installing => Err(AppError::Lifecycle(
                "Cannot skip waiting before install has completed".to_string(),
            )),
        }
    }

    pub async fn handle_message(&self, message: WorkerMessage) -> Result<(), AppError> {
        match message {
            WorkerMessage::SkipWaiting => self.skip_waiting().await,
            WorkerMessage::CacheUrls { urls } => self.cache_urls(&urls).await,
            WorkerMessage::ClearCache => self.clear_all_caches().await.map(|_| ()),
        }
    }

    /// Fetch each URL and store it in the runtime cache. Fails on the
    /// first unfetchable URL; already-stored entries remain.
    async fn cache_urls(&self, urls: &[String]) -> Result<(), AppError> {
        let runtime = self.names.for_role(CacheRole::Runtime);
        for raw in urls {
            let url = self.origin.join(raw)?;
            let request = PageRequest::get(url, ResourceDestination::Other);
            let response = self.fetcher.fetch(&request).await?;
            if !response.is_success() {
                return Err(AppError::Cache(format!(
                    "Cannot cache {raw}: status {}",
                    response.status
                )));
            }
            self.storage.put(runtime, &request.key(), &response).await?;
        }
        Ok(())
    }

    /// Delete every existing cache by name. Returns how many were deleted.
    pub async fn clear_all_caches(&self) -> Result<u32, AppError> {
        let mut deleted = 0;
        for name in self.storage.cache_names().await? {
            if self.storage.delete_cache(&name).await? {
                deleted += 1;
            }
        }
        info!("Cleared {} caches", deleted);
        Ok(deleted)
    }

    /// Raise a platform notification for an inbound push payload.
    pub async fn handle_push(&self, data: &[u8]) -> Result<(), AppError> {
        let payload = if data.is_empty() {
            PushPayload::default()
        } else {
            serde_json::from_slice(data)?
        };
        let notification = Notification::from_payload(payload);
        self.platform.show_notification(&notification).await
    }

    /// Open or focus a window at the notification's click-through target.
    pub async fn handle_notification_click(&self, target: Option<&str>) -> Result<(), AppError> {
        let url = target.unwrap_or(DEFAULT_CLICK_TARGET);
        self.platform.open_window(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::StubFetcher;
    use crate::domain::value_objects::{CacheGeneration, CacheName};
    use crate::infrastructure::cache::MemoryCacheStorage;
    use crate::infrastructure::platform::HeadlessPlatform;
    use bytes::Bytes;

    const MANIFEST: [&str; 4] = ["/", "/index.html", "/manifest.json", "/placeholder.svg"];

    fn names_for(generation: &str) -> CacheNames {
        CacheNames::current(
            "triptuner",
            &CacheGeneration::new(generation.into()).unwrap(),
        )
    }

    fn shell_fetcher() -> Arc<StubFetcher> {
        let fetcher = Arc::new(StubFetcher::new());
        fetcher.respond("GET https://triptuner.app/", 200, b"<html>root</html>");
        fetcher.respond("GET https://triptuner.app/index.html", 200, b"<html>shell</html>");
        fetcher.respond("GET https://triptuner.app/manifest.json", 200, b"{}");
        fetcher.respond("GET https://triptuner.app/placeholder.svg", 200, b"<svg/>");
        fetcher
    }

    fn service_with(
        fetcher: Arc<StubFetcher>,
        storage: Arc<MemoryCacheStorage>,
        platform: Arc<HeadlessPlatform>,
        generation: &str,
    ) -> LifecycleService {
        LifecycleService::new(
            storage,
            fetcher,
            platform,
            names_for(generation),
            MANIFEST.iter().map(|s| s.to_string()).collect(),
            Url::parse("https://triptuner.app").unwrap(),
        )
    }

    #[tokio::test]
    async fn install_precaches_manifest_and_activates() {
        let storage = Arc::new(MemoryCacheStorage::new());
        let platform = Arc::new(HeadlessPlatform::default());
        let service = service_with(shell_fetcher(), storage.clone(), platform.clone(), "v1");

        service.install().await.unwrap();

        assert_eq!(service.state().await, WorkerState::Active);
        assert_eq!(platform.claim_count(), 1);

        let keys = storage
            .keys(names_for("v1").for_role(CacheRole::Static))
            .await
            .unwrap();
        assert_eq!(keys.len(), MANIFEST.len());
    }

    #[tokio::test]
    async fn install_twice_leaves_exactly_the_manifest_set() {
        let storage = Arc::new(MemoryCacheStorage::new());
        let platform = Arc::new(HeadlessPlatform::default());
        let service = service_with(shell_fetcher(), storage.clone(), platform, "v1");

        service.install().await.unwrap();
        service.install().await.unwrap();

        let mut keys: Vec<String> = storage
            .keys(names_for("v1").for_role(CacheRole::Static))
            .await
            .unwrap()
            .into_iter()
            .map(String::from)
            .collect();
        keys.sort();
        let mut expected: Vec<String> = MANIFEST
            .iter()
            .map(|asset| format!("GET https://triptuner.app{asset}"))
            .collect();
        expected.sort();
        assert_eq!(keys, expected);
    }

    #[tokio::test]
    async fn install_is_all_or_nothing() {
        let fetcher = Arc::new(StubFetcher::new());
        fetcher.respond("GET https://triptuner.app/", 200, b"<html>root</html>");
        fetcher.respond("GET https://triptuner.app/index.html", 200, b"<html>shell</html>");
        fetcher.respond("GET https://triptuner.app/manifest.json", 500, b"oops");
        fetcher.respond("GET https://triptuner.app/placeholder.svg", 200, b"<svg/>");

        let storage = Arc::new(MemoryCacheStorage::new());
        let platform = Arc::new(HeadlessPlatform::default());
        let service = service_with(fetcher, storage.clone(), platform, "v1");

        assert!(service.install().await.is_err());
        assert_eq!(service.state().await, WorkerState::Installing);

        // Nothing was stored and the instance cannot activate.
        assert!(storage
            .keys(names_for("v1").for_role(CacheRole::Static))
            .await
            .unwrap()
            .is_empty());
        assert!(service.activate().await.is_err());
    }

    #[tokio::test]
    async fn activate_deletes_only_stale_generations() {
        let storage = Arc::new(MemoryCacheStorage::new());
        let platform = Arc::new(HeadlessPlatform::default());

        // A previous generation left caches behind.
        let old = service_with(shell_fetcher(), storage.clone(), platform.clone(), "v1");
        old.install().await.unwrap();
        let stale_runtime = names_for("v1").for_role(CacheRole::Runtime).clone();
        storage
            .put(
                &stale_runtime,
                &RequestKey::from("GET https://triptuner.app/api/trips".to_string()),
                &CachedResponse::new(200, vec![], Bytes::from_static(b"[]"), 0),
            )
            .await
            .unwrap();

        let update = service_with(shell_fetcher(), storage.clone(), platform, "v2");
        update.install().await.unwrap();

        let remaining: Vec<CacheName> = storage.cache_names().await.unwrap();
        assert!(remaining.iter().all(|name| names_for("v2").contains(name)));
        assert!(!remaining.contains(&stale_runtime));
        assert!(storage
            .keys(names_for("v2").for_role(CacheRole::Static))
            .await
            .unwrap()
            .len()
            > 0);
    }

    #[tokio::test]
    async fn update_waits_until_skip_waiting_message() {
        let storage = Arc::new(MemoryCacheStorage::new());
        let platform = Arc::new(HeadlessPlatform::default());
        let update =
            service_with(shell_fetcher(), storage, platform, "v2").awaits_promotion();

        update.install().await.unwrap();
        assert_eq!(update.state().await, WorkerState::Waiting);

        update
            .handle_message(WorkerMessage::SkipWaiting)
            .await
            .unwrap();
        assert_eq!(update.state().await, WorkerState::Active);
    }

    #[tokio::test]
    async fn cache_urls_message_fills_runtime_cache() {
        let fetcher = shell_fetcher();
        fetcher.respond("GET https://triptuner.app/trips/42", 200, b"trip page");
        let storage = Arc::new(MemoryCacheStorage::new());
        let platform = Arc::new(HeadlessPlatform::default());
        let service = service_with(fetcher, storage.clone(), platform, "v1");
        service.install().await.unwrap();

        service
            .handle_message(WorkerMessage::CacheUrls {
                urls: vec!["/trips/42".to_string()],
            })
            .await
            .unwrap();

        let runtime_keys = storage
            .keys(names_for("v1").for_role(CacheRole::Runtime))
            .await
            .unwrap();
        assert_eq!(runtime_keys.len(), 1);
    }

    #[tokio::test]
    async fn clear_cache_message_deletes_everything() {
        let storage = Arc::new(MemoryCacheStorage::new());
        let platform = Arc::new(HeadlessPlatform::default());
        let service = service_with(shell_fetcher(), storage.clone(), platform, "v1");
        service.install().await.unwrap();

        service.handle_message(WorkerMessage::ClearCache).await.unwrap();
        assert!(storage.cache_names().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn push_without_payload_shows_default_notification() {
        let storage = Arc::new(MemoryCacheStorage::new());
        let platform = Arc::new(HeadlessPlatform::default());
        let service = service_with(shell_fetcher(), storage, platform.clone(), "v1");

        service.handle_push(b"").await.unwrap();

        let shown = platform.shown_notifications();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].title, "TripTuner");
        assert_eq!(shown[0].target_url, "/");
    }

    #[tokio::test]
    async fn notification_click_opens_target_window() {
        let storage = Arc::new(MemoryCacheStorage::new());
        let platform = Arc::new(HeadlessPlatform::default());
        let service = service_with(shell_fetcher(), storage, platform.clone(), "v1");

        service
            .handle_push(br#"{"title":"Trip reminder","url":"/trips/42"}"#)
            .await
            .unwrap();
        let shown = platform.shown_notifications();
        service
            .handle_notification_click(Some(&shown[0].target_url))
            .await
            .unwrap();
        service.handle_notification_click(None).await.unwrap();

        assert_eq!(platform.opened_windows(), vec!["/trips/42", "/"]);
    }
}
