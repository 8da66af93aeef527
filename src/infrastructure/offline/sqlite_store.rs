use crate::application::ports::QueuePersistence;
use crate::domain::entities::{
    DocumentDraft, PendingCounts, PendingDocument, PendingTrip, RemoveOutcome, TripDraft,
};
use crate::domain::value_objects::EntryId;
use crate::infrastructure::database::DbPool;
use crate::infrastructure::offline::rows::{PendingDocumentRow, PendingTripRow};
use crate::shared::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

/// SQLite-backed durable queue store. Every enqueue is a single INSERT,
/// so an entry is either durably recorded with its timestamp or not
/// recorded at all.
pub struct SqliteQueueStore {
    pool: DbPool,
}

impl SqliteQueueStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QueuePersistence for SqliteQueueStore {
    async fn enqueue_trip(&self, draft: TripDraft) -> Result<PendingTrip, AppError> {
        let local_id = Uuid::new_v4().to_string();
        let payload = serde_json::to_string(&draft.payload)?;
        let created_at = Utc::now().timestamp();

        let result = sqlx::query(
            r#"
            INSERT INTO pending_trips (local_id, payload, created_at)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(&local_id)
        .bind(&payload)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(PendingTrip {
            id: EntryId::new(result.last_insert_rowid()),
            local_id,
            payload: draft.payload,
            created_at,
        })
    }

    async fn enqueue_document(&self, draft: DocumentDraft) -> Result<PendingDocument, AppError> {
        let local_id = Uuid::new_v4().to_string();
        let metadata = serde_json::to_string(&draft.metadata)?;
        let created_at = Utc::now().timestamp();

        let result = sqlx::query(
            r#"
            INSERT INTO pending_documents (local_id, file_name, mime_type, content, metadata, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&local_id)
        .bind(&draft.file_name)
        .bind(&draft.mime_type)
        .bind(draft.content.as_ref())
        .bind(&metadata)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(PendingDocument {
            id: EntryId::new(result.last_insert_rowid()),
            local_id,
            file_name: draft.file_name,
            mime_type: draft.mime_type,
            content: draft.content,
            metadata: draft.metadata,
            created_at,
        })
    }

    async fn list_trips(&self) -> Result<Vec<PendingTrip>, AppError> {
        let rows = sqlx::query_as::<_, PendingTripRow>(
            "SELECT * FROM pending_trips ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(PendingTripRow::into_entity).collect()
    }

    async fn list_documents(&self) -> Result<Vec<PendingDocument>, AppError> {
        let rows = sqlx::query_as::<_, PendingDocumentRow>(
            "SELECT * FROM pending_documents ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(PendingDocumentRow::into_entity)
            .collect()
    }

    async fn remove_trip(&self, id: EntryId) -> Result<RemoveOutcome, AppError> {
        let result = sqlx::query("DELETE FROM pending_trips WHERE id = ?1")
            .bind(id.value())
            .execute(&self.pool)
            .await?;

        Ok(if result.rows_affected() > 0 {
            RemoveOutcome::Removed
        } else {
            RemoveOutcome::NotFound
        })
    }

    async fn remove_document(&self, id: EntryId) -> Result<RemoveOutcome, AppError> {
        let result = sqlx::query("DELETE FROM pending_documents WHERE id = ?1")
            .bind(id.value())
            .execute(&self.pool)
            .await?;

        Ok(if result.rows_affected() > 0 {
            RemoveOutcome::Removed
        } else {
            RemoveOutcome::NotFound
        })
    }

    async fn pending_counts(&self) -> Result<PendingCounts, AppError> {
        let (trips,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM pending_trips")
            .fetch_one(&self.pool)
            .await?;
        let (documents,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM pending_documents")
            .fetch_one(&self.pool)
            .await?;

        Ok(PendingCounts { trips, documents })
    }
}
