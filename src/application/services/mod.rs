pub mod capability_service;
pub mod fetch_service;
pub mod lifecycle_service;
pub mod sync_service;

#[cfg(test)]
pub mod test_support;

pub use capability_service::{CapabilityService, OfflineDraft};
pub use fetch_service::{FetchService, ServedFrom, ServedResponse};
pub use lifecycle_service::LifecycleService;
pub use sync_service::SyncService;
