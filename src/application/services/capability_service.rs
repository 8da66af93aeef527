use crate::application::ports::{PlatformBridge, QueuePersistence};
use crate::application::services::LifecycleService;
use crate::domain::entities::{
    DocumentDraft, InstallOutcome, NotificationPermission, PwaCapabilities, TripDraft,
};
use crate::domain::value_objects::QueueKind;
use crate::shared::error::AppError;
use std::sync::Arc;
use tracing::{info, warn};

/// A write captured while the page is offline, destined for one of the
/// durable queues.
#[derive(Debug, Clone)]
pub enum OfflineDraft {
    Trip(TripDraft),
    Document(DocumentDraft),
}

impl OfflineDraft {
    fn kind(&self) -> QueueKind {
        match self {
            OfflineDraft::Trip(_) => QueueKind::Trips,
            OfflineDraft::Document(_) => QueueKind::Documents,
        }
    }
}

/// Page-facing facade over installation, notifications, offline capture
/// and cache maintenance.
pub struct CapabilityService {
    store: Arc<dyn QueuePersistence>,
    lifecycle: Arc<LifecycleService>,
    platform: Arc<dyn PlatformBridge>,
}

impl CapabilityService {
    pub fn new(
        store: Arc<dyn QueuePersistence>,
        lifecycle: Arc<LifecycleService>,
        platform: Arc<dyn PlatformBridge>,
    ) -> Self {
        Self {
            store,
            lifecycle,
            platform,
        }
    }

    /// Current capability snapshot, recomputed on every call. A queue
    /// read failure degrades `has_pending_sync` to false instead of
    /// failing the whole snapshot.
    pub async fn capabilities(&self) -> PwaCapabilities {
        let probe = self.platform.probe();
        let has_pending_sync = match self.store.pending_counts().await {
            Ok(counts) => counts.has_pending(),
            Err(e) => {
                warn!("Could not read pending queue counts: {}", e);
                false
            }
        };

        PwaCapabilities {
            is_installed: probe.standalone_display,
            can_install: self.platform.install_prompt_available(),
            is_offline_ready: self.lifecycle.is_active().await,
            notification_permission: self.platform.notification_permission(),
            has_pending_sync,
        }
    }

    /// Surface the platform's deferred install prompt. Returns true only
    /// on an accepted prompt.
    pub async fn install_app(&self) -> Result<bool, AppError> {
        match self.platform.prompt_install().await? {
            InstallOutcome::Accepted => {
                info!("Install prompt accepted");
                Ok(true)
            }
            InstallOutcome::Dismissed | InstallOutcome::Unavailable => Ok(false),
        }
    }

    /// Request notification permission and, when granted, register for
    /// push delivery. A failed push registration does not revoke the
    /// granted permission.
    pub async fn enable_notifications(&self) -> Result<NotificationPermission, AppError> {
        let permission = self.platform.request_notification_permission().await?;
        if permission == NotificationPermission::Granted {
            match self.platform.subscribe_push().await {
                Ok(true) => info!("Push subscription registered"),
                Ok(false) => info!("Push subscription unavailable on this platform"),
                Err(e) => warn!("Push subscription failed: {}", e),
            }
        }
        Ok(permission)
    }

    /// Capture a write for later replay. While online this is a no-op
    /// returning false: the caller should submit directly. While offline
    /// the draft is enqueued durably and a retry trigger is registered
    /// under the queue's sync tag.
    pub async fn save_offline(&self, draft: OfflineDraft) -> Result<bool, AppError> {
        if self.platform.is_online() {
            return Ok(false);
        }

        let kind = draft.kind();
        match draft {
            OfflineDraft::Trip(trip) => {
                let pending = self.store.enqueue_trip(trip).await?;
                info!("Queued trip {} for later sync", pending.local_id);
            }
            OfflineDraft::Document(document) => {
                let pending = self.store.enqueue_document(document).await?;
                info!("Queued document {} for later sync", pending.local_id);
            }
        }

        // The entry is durable at this point; a failed trigger
        // registration still gets picked up by the periodic replay.
        if let Err(e) = self.platform.register_sync(kind.sync_tag()).await {
            warn!("Could not register sync trigger {}: {}", kind.sync_tag(), e);
        }
        Ok(true)
    }

    /// Delete every cache and reload the page so it rebuilds from the
    /// network.
    pub async fn clear_app_cache(&self) -> Result<u32, AppError> {
        let deleted = self.lifecycle.clear_all_caches().await?;
        self.platform.reload().await?;
        Ok(deleted)
    }
}
