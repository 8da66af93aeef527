pub mod capabilities;
pub mod queue;
pub mod response;

pub use capabilities::{
    InstallOutcome, NotificationPermission, PlatformProbe, PwaCapabilities, WorkerState,
};
pub use queue::{
    DocumentDraft, PendingCounts, PendingDocument, PendingTrip, RemoveOutcome, SyncReport,
    TripDraft,
};
pub use response::CachedResponse;
