use crate::domain::value_objects::EntryId;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Trip data captured while offline, before the store assigns identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripDraft {
    pub payload: Value,
}

impl TripDraft {
    pub fn new(payload: Value) -> Result<Self, String> {
        if payload.is_null() {
            return Err("Trip payload cannot be null".to_string());
        }
        Ok(Self { payload })
    }
}

/// A durably recorded trip submission awaiting replay. Immutable once
/// written; lives until the sync orchestrator confirms delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTrip {
    pub id: EntryId,
    /// Client-generated idempotency key sent with every replay attempt.
    pub local_id: String,
    pub payload: Value,
    pub created_at: i64,
}

/// Document blob plus metadata captured while offline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentDraft {
    pub file_name: String,
    pub mime_type: String,
    pub content: Bytes,
    pub metadata: Value,
}

impl DocumentDraft {
    pub fn new(
        file_name: String,
        mime_type: String,
        content: Bytes,
        metadata: Value,
    ) -> Result<Self, String> {
        if file_name.trim().is_empty() {
            return Err("Document file name cannot be empty".to_string());
        }
        if mime_type.trim().is_empty() {
            return Err("Document mime type cannot be empty".to_string());
        }
        Ok(Self {
            file_name,
            mime_type,
            content,
            metadata,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDocument {
    pub id: EntryId,
    pub local_id: String,
    pub file_name: String,
    pub mime_type: String,
    pub content: Bytes,
    pub metadata: Value,
    pub created_at: i64,
}

/// What happened to a removal request. Removing an id that is no longer
/// present is routine under at-least-once replay, not an error.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    NotFound,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingCounts {
    pub trips: i64,
    pub documents: i64,
}

impl PendingCounts {
    pub fn has_pending(&self) -> bool {
        self.trips > 0 || self.documents > 0
    }
}

/// Outcome of one sync drain over a single queue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    pub synced_count: u32,
    pub failed_count: u32,
    pub pending_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn trip_draft_rejects_null_payload() {
        assert!(TripDraft::new(Value::Null).is_err());
        assert!(TripDraft::new(json!({"destination": "Bali"})).is_ok());
    }

    #[test]
    fn document_draft_requires_name_and_mime() {
        let ok = DocumentDraft::new(
            "passport.pdf".into(),
            "application/pdf".into(),
            Bytes::from_static(b"%PDF"),
            json!({"kind": "passport"}),
        );
        assert!(ok.is_ok());

        let missing_name =
            DocumentDraft::new("  ".into(), "application/pdf".into(), Bytes::new(), json!({}));
        assert!(missing_name.is_err());
    }

    #[test]
    fn pending_counts_flag_any_queue() {
        assert!(!PendingCounts::default().has_pending());
        assert!(PendingCounts { trips: 1, documents: 0 }.has_pending());
        assert!(PendingCounts { trips: 0, documents: 2 }.has_pending());
    }
}
