//! Single-slot store for one serialized value (the bot's conversation reference).
//!
//! The stored value is opaque to this crate: any `Serialize + DeserializeOwned` type works, and it
//! is kept as JSON. A save replaces the previous value (last write wins); nothing is ever deleted.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::error::StoreError;

/// Durable single-slot persistence of one value of type `T`.
#[async_trait]
pub trait ReferenceStore<T>: Send + Sync {
    /// Serializes `value` and writes it, replacing any prior value.
    async fn save(&self, value: &T) -> Result<(), StoreError>;

    /// Reads back the most recently saved value.
    ///
    /// `NotFound` if nothing was ever saved, `CorruptData` if the stored bytes do not deserialize.
    async fn load(&self) -> Result<T, StoreError>;
}

pub(crate) fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec_pretty(value).map_err(|e| StoreError::CorruptData(e.to_string()))
}

pub(crate) fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, StoreError> {
    serde_json::from_slice(bytes).map_err(|e| StoreError::CorruptData(e.to_string()))
}

/// Process-local slot. Keeps the serialized bytes, so decoding behaves exactly like the durable stores.
#[derive(Default)]
pub struct MemoryReferenceStore {
    slot: RwLock<Option<Vec<u8>>>,
}

impl MemoryReferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose slot already holds `bytes` (e.g. to exercise corrupt data).
    pub fn with_raw(bytes: Vec<u8>) -> Self {
        Self {
            slot: RwLock::new(Some(bytes)),
        }
    }

    /// Whether anything has been saved.
    pub async fn is_empty(&self) -> bool {
        self.slot.read().await.is_none()
    }
}

#[async_trait]
impl<T> ReferenceStore<T> for MemoryReferenceStore
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    async fn save(&self, value: &T) -> Result<(), StoreError> {
        let bytes = encode(value)?;
        *self.slot.write().await = Some(bytes);
        Ok(())
    }

    async fn load(&self) -> Result<T, StoreError> {
        let slot = self.slot.read().await;
        match slot.as_deref() {
            Some(bytes) => decode(bytes),
            None => Err(StoreError::NotFound("memory reference slot is empty".to_string())),
        }
    }
}
