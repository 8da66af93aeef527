use crate::application::ports::{CacheStorage, PlatformBridge, QueuePersistence, ReplayTransport};
use crate::application::services::{
    CapabilityService, FetchService, LifecycleService, SyncService,
};
use crate::domain::value_objects::{CacheGeneration, CacheNames};
use crate::infrastructure::cache::SqliteCacheStorage;
use crate::infrastructure::database::Database;
use crate::infrastructure::network::{ApiClient, ReqwestPageFetcher};
use crate::infrastructure::offline::SqliteQueueStore;
use crate::shared::config::AppConfig;
use crate::shared::error::{AppError, Result};
use std::sync::Arc;
use tracing::info;
use url::Url;

/// Fully wired application state. Built once at startup; every service
/// is shared behind an Arc so the host can hand them to its event hooks.
pub struct AppState {
    pub config: AppConfig,
    pub fetch_service: Arc<FetchService>,
    pub lifecycle_service: Arc<LifecycleService>,
    pub sync_service: Arc<SyncService>,
    pub capability_service: Arc<CapabilityService>,
    pub platform: Arc<dyn PlatformBridge>,
}

impl AppState {
    /// Open the database, run migrations and wire every service. The
    /// platform bridge is host-specific and injected by the caller.
    pub async fn new(config: AppConfig, platform: Arc<dyn PlatformBridge>) -> Result<Self> {
        config.validate().map_err(AppError::InvalidInput)?;

        let pool =
            Database::initialize(&config.database.url, config.database.max_connections).await?;
        let store: Arc<dyn QueuePersistence> = Arc::new(SqliteQueueStore::new(pool.clone()));
        let storage: Arc<dyn CacheStorage> = Arc::new(SqliteCacheStorage::new(pool));

        let client = reqwest::Client::new();
        let fetcher = Arc::new(ReqwestPageFetcher::new(client.clone()));
        let transport: Arc<dyn ReplayTransport> =
            Arc::new(ApiClient::new(client, &config.backend));

        let origin = Url::parse(&config.shell.origin)?;
        let generation = CacheGeneration::new(config.shell.generation.clone())
            .map_err(AppError::InvalidInput)?;
        let names = CacheNames::current(&config.shell.cache_prefix, &generation);

        let fetch_service = Arc::new(FetchService::new(
            storage.clone(),
            fetcher.clone(),
            names.clone(),
            origin.clone(),
        ));
        let lifecycle_service = Arc::new(LifecycleService::new(
            storage,
            fetcher,
            platform.clone(),
            names,
            config.shell.static_assets.clone(),
            origin,
        ));
        let sync_service = Arc::new(SyncService::new(store.clone(), transport));
        let capability_service = Arc::new(CapabilityService::new(
            store,
            lifecycle_service.clone(),
            platform.clone(),
        ));

        info!("Application state initialized");
        Ok(Self {
            config,
            fetch_service,
            lifecycle_service,
            sync_service,
            capability_service,
            platform,
        })
    }

    /// Spawn the reconnect listener and, when auto-sync is enabled, the
    /// periodic replay loop.
    pub fn start_background_sync(&self) -> Vec<tokio::task::JoinHandle<()>> {
        let mut handles = vec![self
            .sync_service
            .clone()
            .spawn_reconnect_listener(self.platform.online_changes())];
        if self.config.sync.auto_sync {
            handles.push(
                self.sync_service
                    .clone()
                    .schedule_sync(self.config.sync.sync_interval),
            );
        }
        handles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::platform::HeadlessPlatform;

    fn test_config(url: &str) -> AppConfig {
        let mut config = AppConfig::default();
        config.database.url = url.to_string();
        // A pooled in-memory SQLite gets one database per connection.
        config.database.max_connections = 1;
        config
    }

    #[tokio::test]
    async fn wires_services_from_config() {
        let config = test_config("sqlite::memory:");
        let platform = Arc::new(HeadlessPlatform::default());
        let state = AppState::new(config, platform).await.unwrap();

        let capabilities = state.capability_service.capabilities().await;
        assert!(!capabilities.has_pending_sync);
        assert!(!capabilities.is_offline_ready);
    }

    #[tokio::test]
    async fn rejects_invalid_config() {
        let mut config = test_config("sqlite::memory:");
        config.shell.origin = String::new();
        let platform = Arc::new(HeadlessPlatform::default());
        assert!(AppState::new(config, platform).await.is_err());
    }
}
