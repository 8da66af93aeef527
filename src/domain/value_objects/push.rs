use serde::{Deserialize, Serialize};

pub const DEFAULT_NOTIFICATION_TITLE: &str = "TripTuner";
pub const DEFAULT_NOTIFICATION_BODY: &str = "You have a new notification";
pub const DEFAULT_NOTIFICATION_ICON: &str = "/placeholder.svg";
pub const DEFAULT_CLICK_TARGET: &str = "/";

/// Inbound push payload. Every field is optional; defaults are applied
/// when the notification is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushPayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub actions: Vec<NotificationAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationAction {
    pub action: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Platform notification derived from a push payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub badge: String,
    /// Click-through target, opened or focused when the user taps the
    /// notification.
    pub target_url: String,
    pub actions: Vec<NotificationAction>,
}

impl Notification {
    pub fn from_payload(payload: PushPayload) -> Self {
        Self {
            title: payload
                .title
                .unwrap_or_else(|| DEFAULT_NOTIFICATION_TITLE.to_string()),
            body: payload
                .body
                .unwrap_or_else(|| DEFAULT_NOTIFICATION_BODY.to_string()),
            icon: DEFAULT_NOTIFICATION_ICON.to_string(),
            badge: DEFAULT_NOTIFICATION_ICON.to_string(),
            target_url: payload
                .url
                .unwrap_or_else(|| DEFAULT_CLICK_TARGET.to_string()),
            actions: payload.actions,
        }
    }
}
