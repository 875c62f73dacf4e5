//! SQLite-backed reference slot and state store.
//!
//! Both tables are key → JSON text. Writes are single-statement upserts, so a reader never sees a
//! half-written row.

use async_trait::async_trait;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::error::StoreError;
use crate::reference_store::{decode, encode, ReferenceStore};
use crate::sqlite_pool::SqlitePoolManager;
use crate::state::StateStore;

/// Slot name used when the caller does not pick one.
pub const DEFAULT_REFERENCE_SLOT: &str = "conversation_reference";

/// Reference slot stored as one row of `conversation_references`.
#[derive(Clone)]
pub struct SqliteReferenceStore {
    pool_manager: SqlitePoolManager,
    slot: String,
}

impl SqliteReferenceStore {
    pub async fn new(database_url: &str) -> Result<Self, StoreError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        Self::with_pool(pool_manager, DEFAULT_REFERENCE_SLOT).await
    }

    /// Uses an existing pool (shared with the state store) and a named slot.
    pub async fn with_pool(
        pool_manager: SqlitePoolManager,
        slot: impl Into<String>,
    ) -> Result<Self, StoreError> {
        let store = Self {
            pool_manager,
            slot: slot.into(),
        };
        store.init().await?;
        Ok(store)
    }

    async fn init(&self) -> Result<(), StoreError> {
        info!("Creating conversation_references table if not exist");
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS conversation_references (
                slot TEXT PRIMARY KEY,
                payload TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(self.pool_manager.pool())
        .await?;
        Ok(())
    }

    /// Overwrites the slot with raw text, bypassing serialization.
    pub async fn save_raw(&self, payload: &str) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO conversation_references (slot, payload, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(slot) DO UPDATE SET payload = excluded.payload, updated_at = excluded.updated_at
            "#,
        )
        .bind(&self.slot)
        .bind(payload)
        .bind(Utc::now().to_rfc3339())
        .execute(self.pool_manager.pool())
        .await?;
        Ok(())
    }
}

#[async_trait]
impl<T> ReferenceStore<T> for SqliteReferenceStore
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    #[instrument(skip(self, value))]
    async fn save(&self, value: &T) -> Result<(), StoreError> {
        let bytes = encode(value)?;
        let payload =
            String::from_utf8(bytes).map_err(|e| StoreError::CorruptData(e.to_string()))?;
        self.save_raw(&payload).await?;
        info!(slot = %self.slot, bytes = payload.len(), "Reference saved");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn load(&self) -> Result<T, StoreError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT payload FROM conversation_references WHERE slot = ?")
                .bind(&self.slot)
                .fetch_optional(self.pool_manager.pool())
                .await?;

        match row {
            Some((payload,)) => {
                debug!(slot = %self.slot, bytes = payload.len(), "Reference row read");
                decode(payload.as_bytes())
            }
            None => Err(StoreError::NotFound(format!(
                "no reference saved in slot {}",
                self.slot
            ))),
        }
    }
}

/// Key-value state kept in the `state_entries` table.
#[derive(Clone)]
pub struct SqliteStateStore {
    pool_manager: SqlitePoolManager,
}

impl SqliteStateStore {
    pub async fn new(database_url: &str) -> Result<Self, StoreError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        Self::with_pool(pool_manager).await
    }

    pub async fn with_pool(pool_manager: SqlitePoolManager) -> Result<Self, StoreError> {
        let store = Self { pool_manager };
        store.init().await?;
        Ok(store)
    }

    async fn init(&self) -> Result<(), StoreError> {
        info!("Creating state_entries table if not exist");
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS state_entries (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(self.pool_manager.pool())
        .await?;
        Ok(())
    }
}

#[async_trait]
impl StateStore for SqliteStateStore {
    async fn read(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM state_entries WHERE key = ?")
            .bind(key)
            .fetch_optional(self.pool_manager.pool())
            .await?;

        row.map(|(text,)| {
            serde_json::from_str(&text).map_err(|e| StoreError::CorruptData(format!("{}: {}", key, e)))
        })
        .transpose()
    }

    async fn write(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let text = value.to_string();
        sqlx::query(
            r#"
            INSERT INTO state_entries (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(&text)
        .bind(Utc::now().to_rfc3339())
        .execute(self.pool_manager.pool())
        .await?;
        debug!(key = %key, "State entry written");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM state_entries WHERE key = ?")
            .bind(key)
            .execute(self.pool_manager.pool())
            .await?;
        Ok(())
    }
}
