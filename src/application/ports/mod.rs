pub mod cache_storage;
pub mod network;
pub mod platform;
pub mod queue_store;

pub use cache_storage::CacheStorage;
pub use network::{PageFetcher, ReplayTransport};
pub use platform::PlatformBridge;
pub use queue_store::QueuePersistence;
