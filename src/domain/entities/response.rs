use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Immutable snapshot of a network response captured at fetch time.
/// Cached entries do not expire by time; they live until their cache is
/// deleted wholesale during generation cleanup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
    pub cached_at: i64,
}

impl CachedResponse {
    pub fn new(status: u16, headers: Vec<(String, String)>, body: Bytes, cached_at: i64) -> Self {
        Self {
            status,
            headers,
            body,
            cached_at,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
