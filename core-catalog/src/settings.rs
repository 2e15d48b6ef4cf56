//! SQLite-backed settings store
//!
//! Persists host configuration in the `settings` table alongside the
//! catalog itself, so credentials and sync bookkeeping survive restarts
//! without a second storage backend.

use async_trait::async_trait;
use host_traits::{HostError, SettingsStore};
use sqlx::{query, query_as, SqlitePool};

/// SQLite implementation of the host settings store.
pub struct SqliteSettingsStore {
    pool: SqlitePool,
}

impl SqliteSettingsStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn store_error(err: sqlx::Error) -> HostError {
    HostError::OperationFailed(format!("settings store: {}", err))
}

#[async_trait]
impl SettingsStore for SqliteSettingsStore {
    async fn set_string(&self, key: &str, value: &str) -> host_traits::Result<()> {
        query(
            r#"
            INSERT INTO settings (key, value, updated_at)
            VALUES (?, ?, strftime('%s', 'now'))
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(())
    }

    async fn get_string(&self, key: &str) -> host_traits::Result<Option<String>> {
        let row: Option<(String,)> = query_as("SELECT value FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error)?;

        Ok(row.map(|(value,)| value))
    }

    async fn delete(&self, key: &str) -> host_traits::Result<()> {
        query("DELETE FROM settings WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(store_error)?;

        Ok(())
    }
}
