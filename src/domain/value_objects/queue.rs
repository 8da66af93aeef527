use serde::{Deserialize, Serialize};
use std::fmt;

/// The two independent durable queues. Identical lifecycle rules, different
/// payload shapes; no cross-queue ordering is guaranteed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueKind {
    Trips,
    Documents,
}

impl QueueKind {
    pub const ALL: [QueueKind; 2] = [QueueKind::Trips, QueueKind::Documents];

    /// The retry trigger tag registered with the platform after an
    /// offline enqueue.
    pub fn sync_tag(&self) -> &'static str {
        match self {
            QueueKind::Trips => "sync-trips",
            QueueKind::Documents => "sync-documents",
        }
    }

    pub fn store_name(&self) -> &'static str {
        match self {
            QueueKind::Trips => "pending-trips",
            QueueKind::Documents => "pending-documents",
        }
    }
}

impl fmt::Display for QueueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.store_name())
    }
}

/// Auto-assigned integer identifier of a queue entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(i64);

impl EntryId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_tags_match_store_names() {
        assert_eq!(QueueKind::Trips.sync_tag(), "sync-trips");
        assert_eq!(QueueKind::Documents.sync_tag(), "sync-documents");
        assert_eq!(QueueKind::Trips.store_name(), "pending-trips");
        assert_eq!(QueueKind::Documents.store_name(), "pending-documents");
    }
}
