use anyhow::Result;
use sqlx::{sqlite::SqlitePoolOptions, Pool, Sqlite};
use std::path::Path;
use tracing::info;

pub type DbPool = Pool<Sqlite>;

pub struct Database;

impl Database {
    /// Open (or create) the sync database and bring it to the current
    /// schema version. Idempotent and never destructive: existing queues
    /// survive every open.
    pub async fn initialize(database_url: &str, max_connections: u32) -> Result<DbPool> {
        if let Some(path) = database_url
            .strip_prefix("sqlite://")
            .map(|p| p.split('?').next().unwrap_or(p))
        {
            if let Some(parent) = Path::new(path).parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        info!("Sync database connected: {}", database_url);

        Self::run_migrations(&pool).await?;

        Ok(pool)
    }

    async fn run_migrations(pool: &DbPool) -> Result<()> {
        sqlx::migrate!("./migrations").run(pool).await?;
        info!("Sync database migrations completed");
        Ok(())
    }

    /// In-memory database for tests and ephemeral use.
    pub async fn in_memory() -> Result<DbPool> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        Self::run_migrations(&pool).await?;
        Ok(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn initialize_creates_file_and_schema() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("sync.db");
        let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

        let pool = Database::initialize(&db_url, 1).await.unwrap();
        assert!(db_path.exists());

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();
        let names: Vec<&str> = tables.iter().map(|(n,)| n.as_str()).collect();

        assert!(names.contains(&"pending_trips"));
        assert!(names.contains(&"pending_documents"));
        assert!(names.contains(&"cache_entries"));

        pool.close().await;
    }

    #[tokio::test]
    async fn initialize_twice_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("sync.db");
        let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

        let first = Database::initialize(&db_url, 1).await.unwrap();
        sqlx::query("INSERT INTO pending_trips (local_id, payload, created_at) VALUES ('a', '{}', 0)")
            .execute(&first)
            .await
            .unwrap();
        first.close().await;

        // Reopening must not discard previously queued entries.
        let second = Database::initialize(&db_url, 1).await.unwrap();
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM pending_trips")
            .fetch_one(&second)
            .await
            .unwrap();
        assert_eq!(count, 1);
        second.close().await;
    }
}
