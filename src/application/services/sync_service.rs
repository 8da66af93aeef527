use crate::application::ports::{QueuePersistence, ReplayTransport};
use crate::domain::entities::SyncReport;
use crate::domain::value_objects::QueueKind;
use crate::shared::error::AppError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{error, info, warn};

/// Replays queued writes to the backend when connectivity returns.
///
/// Semantics are at-least-once: an entry leaves its queue only after the
/// backend acknowledged it, so a crash between acknowledgement and
/// removal re-submits under the same idempotency key.
pub struct SyncService {
    store: Arc<dyn QueuePersistence>,
    transport: Arc<dyn ReplayTransport>,
}

impl SyncService {
    pub fn new(store: Arc<dyn QueuePersistence>, transport: Arc<dyn ReplayTransport>) -> Self {
        Self { store, transport }
    }

    /// Drain one queue, oldest entry first. A per-entry failure is logged
    /// and the drain continues with the next entry; only a failure to
    /// read the queue itself aborts.
    pub async fn sync(&self, kind: QueueKind) -> Result<SyncReport, AppError> {
        let mut synced_count = 0;
        let mut failed_count = 0;

        match kind {
            QueueKind::Trips => {
                for trip in self.store.list_trips().await? {
                    match self.transport.submit_trip(&trip).await {
                        Ok(()) => {
                            // Acknowledged; a failed removal re-replays under
                            // the same idempotency key next round.
                            if let Err(e) = self.store.remove_trip(trip.id).await {
                                warn!("Synced trip {} not removed: {}", trip.local_id, e);
                            }
                            synced_count += 1;
                        }
                        Err(e) => {
                            warn!("Failed to sync trip {}: {}", trip.local_id, e);
                            failed_count += 1;
                        }
                    }
                }
            }
            QueueKind::Documents => {
                for document in self.store.list_documents().await? {
                    match self.transport.upload_document(&document).await {
                        Ok(()) => {
                            if let Err(e) = self.store.remove_document(document.id).await {
                                warn!(
                                    "Synced document {} not removed: {}",
                                    document.local_id, e
                                );
                            }
                            synced_count += 1;
                        }
                        Err(e) => {
                            warn!("Failed to sync document {}: {}", document.local_id, e);
                            failed_count += 1;
                        }
                    }
                }
            }
        }

        let counts = self.store.pending_counts().await?;
        let pending_count = match kind {
            QueueKind::Trips => counts.trips,
            QueueKind::Documents => counts.documents,
        };

        if synced_count > 0 || failed_count > 0 {
            info!(
                "Sync {} complete: {} synced, {} failed, {} pending",
                kind.sync_tag(),
                synced_count,
                failed_count,
                pending_count
            );
        }

        Ok(SyncReport {
            synced_count,
            failed_count,
            pending_count,
        })
    }

    /// Drain every queue in declaration order.
    pub async fn sync_all(&self) -> Result<Vec<SyncReport>, AppError> {
        let mut reports = Vec::with_capacity(QueueKind::ALL.len());
        for kind in QueueKind::ALL {
            reports.push(self.sync(kind).await?);
        }
        Ok(reports)
    }

    /// Drain both queues every time connectivity flips from offline to
    /// online. Returns the spawned task handle.
    pub fn spawn_reconnect_listener(
        self: Arc<Self>,
        mut online: watch::Receiver<bool>,
    ) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut was_online = *online.borrow();
            while online.changed().await.is_ok() {
                let is_online = *online.borrow();
                if is_online && !was_online {
                    info!("Connectivity restored, replaying queued writes");
                    if let Err(e) = self.sync_all().await {
                        error!("Reconnect sync failed: {}", e);
                    }
                }
                was_online = is_online;
            }
        })
    }

    /// Periodic replay safety net for entries that missed a reconnect
    /// transition.
    pub fn schedule_sync(self: Arc<Self>, interval_secs: u64) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                if let Err(e) = self.sync_all().await {
                    error!("Scheduled sync failed: {}", e);
                }
            }
        })
    }
}
