use crate::application::ports::CacheStorage;
use crate::domain::entities::CachedResponse;
use crate::domain::value_objects::{CacheName, RequestKey};
use crate::infrastructure::database::DbPool;
use crate::shared::error::AppError;
use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
struct CacheEntryRow {
    status: i64,
    headers: String,
    body: Vec<u8>,
    cached_at: i64,
}

impl CacheEntryRow {
    fn into_response(self) -> Result<CachedResponse, AppError> {
        Ok(CachedResponse {
            status: self.status as u16,
            headers: serde_json::from_str(&self.headers)?,
            body: Bytes::from(self.body),
            cached_at: self.cached_at,
        })
    }
}

/// Durable response cache shared across sessions. One row per
/// (cache name, request key); writes upsert so concurrent fills on the
/// same key resolve last-writer-wins.
pub struct SqliteCacheStorage {
    pool: DbPool,
}

impl SqliteCacheStorage {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CacheStorage for SqliteCacheStorage {
    async fn get(
        &self,
        cache: &CacheName,
        key: &RequestKey,
    ) -> Result<Option<CachedResponse>, AppError> {
        let row = sqlx::query_as::<_, CacheEntryRow>(
            r#"
            SELECT status, headers, body, cached_at
            FROM cache_entries
            WHERE cache_name = ?1 AND request_key = ?2
            "#,
        )
        .bind(cache.as_str())
        .bind(key.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(CacheEntryRow::into_response).transpose()
    }

    async fn put(
        &self,
        cache: &CacheName,
        key: &RequestKey,
        response: &CachedResponse,
    ) -> Result<(), AppError> {
        let headers = serde_json::to_string(&response.headers)?;
        let cached_at = Utc::now().timestamp();

        sqlx::query(
            r#"
            INSERT INTO cache_entries (cache_name, request_key, status, headers, body, cached_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(cache_name, request_key) DO UPDATE SET
                status = excluded.status,
                headers = excluded.headers,
                body = excluded.body,
                cached_at = excluded.cached_at
            "#,
        )
        .bind(cache.as_str())
        .bind(key.as_str())
        .bind(response.status as i64)
        .bind(&headers)
        .bind(response.body.as_ref())
        .bind(cached_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn cache_names(&self) -> Result<Vec<CacheName>, AppError> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT DISTINCT cache_name FROM cache_entries ORDER BY cache_name")
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter()
            .map(|(name,)| CacheName::new(name).map_err(AppError::Cache))
            .collect()
    }

    async fn keys(&self, cache: &CacheName) -> Result<Vec<RequestKey>, AppError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT request_key FROM cache_entries WHERE cache_name = ?1 ORDER BY request_key",
        )
        .bind(cache.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(key,)| RequestKey::from(key)).collect())
    }

    async fn delete_cache(&self, cache: &CacheName) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM cache_entries WHERE cache_name = ?1")
            .bind(cache.as_str())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
