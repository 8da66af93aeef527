use crate::domain::entities::{PendingDocument, PendingTrip};
use crate::domain::value_objects::EntryId;
use crate::shared::error::AppError;
use bytes::Bytes;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct PendingTripRow {
    pub id: i64,
    pub local_id: String,
    pub payload: String,
    pub created_at: i64,
}

impl PendingTripRow {
    pub fn into_entity(self) -> Result<PendingTrip, AppError> {
        Ok(PendingTrip {
            id: EntryId::new(self.id),
            local_id: self.local_id,
            payload: serde_json::from_str(&self.payload)?,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct PendingDocumentRow {
    pub id: i64,
    pub local_id: String,
    pub file_name: String,
    pub mime_type: String,
    pub content: Vec<u8>,
    pub metadata: String,
    pub created_at: i64,
}

impl PendingDocumentRow {
    pub fn into_entity(self) -> Result<PendingDocument, AppError> {
        Ok(PendingDocument {
            id: EntryId::new(self.id),
            local_id: self.local_id,
            file_name: self.file_name,
            mime_type: self.mime_type,
            content: Bytes::from(self.content),
            metadata: serde_json::from_str(&self.metadata)?,
            created_at: self.created_at,
        })
    }
}
