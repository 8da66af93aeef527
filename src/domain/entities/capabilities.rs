use serde::{Deserialize, Serialize};

/// Lifecycle states of the fetch proxy. An update installs in parallel
/// with the active instance and waits until promoted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerState {
    Installing,
    Waiting,
    Active,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationPermission {
    Default,
    Granted,
    Denied,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallOutcome {
    Accepted,
    Dismissed,
    /// No deferred prompt is available on this platform.
    Unavailable,
}

/// Optional platform capabilities probed once at startup and passed down,
/// so behavior with a capability absent is a single code path.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformProbe {
    pub standalone_display: bool,
    pub notifications_supported: bool,
    pub push_supported: bool,
    pub background_sync_supported: bool,
}

impl Default for PlatformProbe {
    fn default() -> Self {
        Self {
            standalone_display: false,
            notifications_supported: true,
            push_supported: true,
            background_sync_supported: true,
        }
    }
}

/// Snapshot handed to the UI. Derived on demand from platform state, the
/// lifecycle controller and the queue store; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PwaCapabilities {
    pub is_installed: bool,
    pub can_install: bool,
    pub is_offline_ready: bool,
    pub notification_permission: NotificationPermission,
    pub has_pending_sync: bool,
}
