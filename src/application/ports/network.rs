use crate::domain::entities::{CachedResponse, PendingDocument, PendingTrip};
use crate::domain::value_objects::PageRequest;
use crate::shared::error::AppError;
use async_trait::async_trait;

/// Performs the actual network fetch for an intercepted page request.
/// An unreachable network surfaces as `AppError::Network`; a reachable
/// server answering with an error status is a normal response.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, request: &PageRequest) -> Result<CachedResponse, AppError>;
}

/// Replays queued entries against the backend. Success means the backend
/// acknowledged the submission; the orchestrator then deletes the entry.
#[async_trait]
pub trait ReplayTransport: Send + Sync {
    async fn submit_trip(&self, trip: &PendingTrip) -> Result<(), AppError>;

    async fn upload_document(&self, document: &PendingDocument) -> Result<(), AppError>;
}
