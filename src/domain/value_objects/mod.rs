pub mod cache;
pub mod message;
pub mod push;
pub mod queue;
pub mod request;

pub use cache::{CacheGeneration, CacheName, CacheNames, CacheRole};
pub use message::WorkerMessage;
pub use push::{Notification, NotificationAction, PushPayload};
pub use queue::{EntryId, QueueKind};
pub use request::{PageRequest, RequestKey, RequestMethod, ResourceDestination};
