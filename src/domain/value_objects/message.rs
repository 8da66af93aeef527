use serde::{Deserialize, Serialize};

/// Control message delivered to the active proxy instance from any page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkerMessage {
    /// Force an update-pending instance to become active immediately.
    SkipWaiting,
    /// Fetch and store each URL into the runtime cache.
    CacheUrls { urls: Vec<String> },
    /// Delete every existing cache by name.
    ClearCache,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_round_trip_wire_format() {
        let msg: WorkerMessage = serde_json::from_str(r#"{"type":"SKIP_WAITING"}"#).unwrap();
        assert_eq!(msg, WorkerMessage::SkipWaiting);

        let msg: WorkerMessage =
            serde_json::from_str(r#"{"type":"CACHE_URLS","urls":["/a.css","/b.js"]}"#).unwrap();
        assert_eq!(
            msg,
            WorkerMessage::CacheUrls {
                urls: vec!["/a.css".to_string(), "/b.js".to_string()]
            }
        );

        let json = serde_json::to_value(&WorkerMessage::ClearCache).unwrap();
        assert_eq!(json["type"], "CLEAR_CACHE");
    }
}
