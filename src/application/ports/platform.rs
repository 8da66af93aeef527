use crate::domain::entities::{InstallOutcome, NotificationPermission, PlatformProbe};
use crate::domain::value_objects::Notification;
use crate::shared::error::AppError;
use async_trait::async_trait;
use tokio::sync::watch;

/// Host-platform surface: connectivity, install prompt, notifications and
/// the background-sync registration hooks. The capability probe is
/// computed once at startup by the implementation and handed out as a
/// value, so "capability absent" is a single well-defined code path.
#[async_trait]
pub trait PlatformBridge: Send + Sync {
    fn probe(&self) -> PlatformProbe;

    fn is_online(&self) -> bool;

    /// Receiver observing connectivity transitions; `true` means online.
    fn online_changes(&self) -> watch::Receiver<bool>;

    /// Whether a deferred install prompt is currently available.
    fn install_prompt_available(&self) -> bool;

    /// Invoke the deferred install prompt, if any, and await the user's
    /// choice.
    async fn prompt_install(&self) -> Result<InstallOutcome, AppError>;

    fn notification_permission(&self) -> NotificationPermission;

    async fn request_notification_permission(&self)
        -> Result<NotificationPermission, AppError>;

    /// Register for push delivery. A missing server key or unsupported
    /// platform is reported as `Ok(false)`.
    async fn subscribe_push(&self) -> Result<bool, AppError>;

    async fn show_notification(&self, notification: &Notification) -> Result<(), AppError>;

    /// Open or focus a window at the given URL.
    async fn open_window(&self, url: &str) -> Result<(), AppError>;

    /// Register a retry trigger for the given sync tag.
    async fn register_sync(&self, tag: &str) -> Result<(), AppError>;

    /// Take control of already-open sessions immediately.
    async fn claim_clients(&self) -> Result<(), AppError>;

    /// Force a full page reload to rebuild state from scratch.
    async fn reload(&self) -> Result<(), AppError>;
}
