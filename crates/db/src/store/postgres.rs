use async_trait::async_trait;
use chrono::Utc;
use eyre::Result;

use super::KeyValueStore;
use crate::{models::DbStorageEntry, DbPool};

/// Stores each key as a row of the `planner_storage` table.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KeyValueStore for PgStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        tracing::debug!("Reading storage key: {}", key);

        let entry = sqlx::query_as::<_, DbStorageEntry>(
            r#"
            SELECT key, value, updated_at
            FROM planner_storage
            WHERE key = $1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entry.map(|entry| entry.value))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        tracing::debug!("Writing storage key: {} ({} bytes)", key, value.len());

        sqlx::query(
            r#"
            INSERT INTO planner_storage (key, value, updated_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (key) DO UPDATE
            SET value = EXCLUDED.value, updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
