use crate::domain::entities::{
    DocumentDraft, PendingCounts, PendingDocument, PendingTrip, RemoveOutcome, TripDraft,
};
use crate::domain::value_objects::EntryId;
use crate::shared::error::AppError;
use async_trait::async_trait;

/// Durable storage for deferred user actions. Two independent queues with
/// identical lifecycle rules: enqueue assigns identity atomically, listing
/// is insertion-ordered for deterministic replay, and entries are immutable
/// until deleted by id.
#[async_trait]
pub trait QueuePersistence: Send + Sync {
    async fn enqueue_trip(&self, draft: TripDraft) -> Result<PendingTrip, AppError>;

    async fn enqueue_document(&self, draft: DocumentDraft) -> Result<PendingDocument, AppError>;

    async fn list_trips(&self) -> Result<Vec<PendingTrip>, AppError>;

    async fn list_documents(&self) -> Result<Vec<PendingDocument>, AppError>;

    async fn remove_trip(&self, id: EntryId) -> Result<RemoveOutcome, AppError>;

    async fn remove_document(&self, id: EntryId) -> Result<RemoveOutcome, AppError>;

    async fn pending_counts(&self) -> Result<PendingCounts, AppError>;
}
