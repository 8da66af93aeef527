use crate::application::ports::PlatformBridge;
use crate::domain::entities::{InstallOutcome, NotificationPermission, PlatformProbe};
use crate::domain::value_objects::Notification;
use crate::shared::error::AppError;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::watch;
use tracing::{info, warn};

/// Platform bridge for hosts without a browser shell, and the in-memory
/// substitute used in tests. Connectivity is driven through `set_online`;
/// prompts, notifications and sync registrations are recorded so callers
/// can observe them.
pub struct HeadlessPlatform {
    probe: PlatformProbe,
    push_server_key: Option<String>,
    online_tx: watch::Sender<bool>,
    install_prompt_deferred: Mutex<bool>,
    prompt_answer: Mutex<InstallOutcome>,
    permission: Mutex<NotificationPermission>,
    permission_answer: Mutex<NotificationPermission>,
    shown_notifications: Mutex<Vec<Notification>>,
    opened_windows: Mutex<Vec<String>>,
    registered_tags: Mutex<Vec<String>>,
    claim_count: AtomicUsize,
    reload_count: AtomicUsize,
}

impl HeadlessPlatform {
    pub fn new(probe: PlatformProbe, push_server_key: Option<String>) -> Self {
        let (online_tx, _) = watch::channel(true);
        Self {
            probe,
            push_server_key,
            online_tx,
            install_prompt_deferred: Mutex::new(false),
            prompt_answer: Mutex::new(InstallOutcome::Accepted),
            permission: Mutex::new(NotificationPermission::Default),
            permission_answer: Mutex::new(NotificationPermission::Granted),
            shown_notifications: Mutex::new(Vec::new()),
            opened_windows: Mutex::new(Vec::new()),
            registered_tags: Mutex::new(Vec::new()),
            claim_count: AtomicUsize::new(0),
            reload_count: AtomicUsize::new(0),
        }
    }

    pub fn set_online(&self, online: bool) {
        self.online_tx.send_replace(online);
    }

    /// Simulate the platform deferring an install prompt.
    pub fn defer_install_prompt(&self) {
        *self.install_prompt_deferred.lock().unwrap() = true;
    }

    /// What the next `prompt_install` call reports as the user's choice.
    pub fn set_prompt_answer(&self, outcome: InstallOutcome) {
        *self.prompt_answer.lock().unwrap() = outcome;
    }

    /// What the next permission request resolves to.
    pub fn set_permission_answer(&self, permission: NotificationPermission) {
        *self.permission_answer.lock().unwrap() = permission;
    }

    pub fn shown_notifications(&self) -> Vec<Notification> {
        self.shown_notifications.lock().unwrap().clone()
    }

    pub fn opened_windows(&self) -> Vec<String> {
        self.opened_windows.lock().unwrap().clone()
    }

    pub fn registered_tags(&self) -> Vec<String> {
        self.registered_tags.lock().unwrap().clone()
    }

    pub fn claim_count(&self) -> usize {
        self.claim_count.load(Ordering::SeqCst)
    }

    pub fn reload_count(&self) -> usize {
        self.reload_count.load(Ordering::SeqCst)
    }
}

impl Default for HeadlessPlatform {
    fn default() -> Self {
        Self::new(PlatformProbe::default(), None)
    }
}

#[async_trait]
impl PlatformBridge for HeadlessPlatform {
    fn probe(&self) -> PlatformProbe {
        self.probe
    }

    fn is_online(&self) -> bool {
        *self.online_tx.borrow()
    }

    fn online_changes(&self) -> watch::Receiver<bool> {
        self.online_tx.subscribe()
    }

    fn install_prompt_available(&self) -> bool {
        *self.install_prompt_deferred.lock().unwrap()
    }

    async fn prompt_install(&self) -> Result<InstallOutcome, AppError> {
        let mut deferred = self.install_prompt_deferred.lock().unwrap();
        if !*deferred {
            return Ok(InstallOutcome::Unavailable);
        }
        let outcome = *self.prompt_answer.lock().unwrap();
        if outcome == InstallOutcome::Accepted {
            // A prompt can only be used once.
            *deferred = false;
        }
        Ok(outcome)
    }

    fn notification_permission(&self) -> NotificationPermission {
        if !self.probe.notifications_supported {
            return NotificationPermission::Denied;
        }
        *self.permission.lock().unwrap()
    }

    async fn request_notification_permission(
        &self,
    ) -> Result<NotificationPermission, AppError> {
        if !self.probe.notifications_supported {
            warn!("Notifications not supported on this platform");
            return Ok(NotificationPermission::Denied);
        }
        let current = *self.permission.lock().unwrap();
        // Denied is sticky; the platform will not re-prompt.
        if current == NotificationPermission::Denied {
            return Ok(current);
        }
        if current == NotificationPermission::Granted {
            return Ok(current);
        }
        let answer = *self.permission_answer.lock().unwrap();
        *self.permission.lock().unwrap() = answer;
        Ok(answer)
    }

    async fn subscribe_push(&self) -> Result<bool, AppError> {
        if !self.probe.push_supported {
            warn!("Push delivery not supported on this platform");
            return Ok(false);
        }
        if self.push_server_key.is_none() {
            warn!("Push server key not configured");
            return Ok(false);
        }
        info!("Push subscription registered");
        Ok(true)
    }

    async fn show_notification(&self, notification: &Notification) -> Result<(), AppError> {
        self.shown_notifications
            .lock()
            .unwrap()
            .push(notification.clone());
        Ok(())
    }

    async fn open_window(&self, url: &str) -> Result<(), AppError> {
        self.opened_windows.lock().unwrap().push(url.to_string());
        Ok(())
    }

    async fn register_sync(&self, tag: &str) -> Result<(), AppError> {
        if !self.probe.background_sync_supported {
            return Err(AppError::Platform(
                "Background sync not supported".to_string(),
            ));
        }
        self.registered_tags.lock().unwrap().push(tag.to_string());
        Ok(())
    }

    async fn claim_clients(&self) -> Result<(), AppError> {
        self.claim_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn reload(&self) -> Result<(), AppError> {
        self.reload_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn prompt_unavailable_until_deferred() {
        let platform = HeadlessPlatform::default();
        assert_eq!(
            platform.prompt_install().await.unwrap(),
            InstallOutcome::Unavailable
        );

        platform.defer_install_prompt();
        assert!(platform.install_prompt_available());
        assert_eq!(
            platform.prompt_install().await.unwrap(),
            InstallOutcome::Accepted
        );
        // Accepted consumes the deferred prompt.
        assert!(!platform.install_prompt_available());
    }

    #[tokio::test]
    async fn denied_permission_is_sticky() {
        let platform = HeadlessPlatform::default();
        platform.set_permission_answer(NotificationPermission::Denied);
        assert_eq!(
            platform.request_notification_permission().await.unwrap(),
            NotificationPermission::Denied
        );

        platform.set_permission_answer(NotificationPermission::Granted);
        assert_eq!(
            platform.request_notification_permission().await.unwrap(),
            NotificationPermission::Denied
        );
    }

    #[tokio::test]
    async fn subscribe_push_requires_server_key() {
        let without_key = HeadlessPlatform::default();
        assert!(!without_key.subscribe_push().await.unwrap());

        let with_key =
            HeadlessPlatform::new(PlatformProbe::default(), Some("server-key".to_string()));
        assert!(with_key.subscribe_push().await.unwrap());
    }

    #[test]
    fn online_transitions_are_observable() {
        let platform = HeadlessPlatform::default();
        let rx = platform.online_changes();
        assert!(platform.is_online());

        platform.set_online(false);
        assert!(!platform.is_online());
        assert!(!*rx.borrow());
    }
}
