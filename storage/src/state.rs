//! Key-value state with typed per-user / per-conversation property accessors.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::StoreError;

/// String keys to JSON values.
#[async_trait]
pub trait StateStore: Send + Sync {
    async fn read(&self, key: &str) -> Result<Option<Value>, StoreError>;
    async fn write(&self, key: &str, value: Value) -> Result<(), StoreError>;
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}

/// In-process state; lost on restart.
#[derive(Default)]
pub struct MemoryStateStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn read(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn write(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

/// Which identity a property is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateScope {
    User,
    Conversation,
}

impl StateScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            StateScope::User => "user",
            StateScope::Conversation => "conversation",
        }
    }
}

/// Typed access to one named property in a [`StateStore`].
///
/// Keys look like `conversation/<channel_id>/<conversation_id>/<name>` or
/// `user/<channel_id>/<user_id>/<name>`.
pub struct StatePropertyAccessor<T> {
    store: Arc<dyn StateStore>,
    scope: StateScope,
    name: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for StatePropertyAccessor<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            scope: self.scope,
            name: self.name.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> StatePropertyAccessor<T>
where
    T: Serialize + DeserializeOwned + Default + Send + Sync,
{
    pub fn new(store: Arc<dyn StateStore>, scope: StateScope, name: impl Into<String>) -> Self {
        Self {
            store,
            scope,
            name: name.into(),
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key(&self, channel_id: &str, owner_id: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.scope.as_str(),
            channel_id,
            owner_id,
            self.name
        )
    }

    pub async fn get(&self, channel_id: &str, owner_id: &str) -> Result<Option<T>, StoreError> {
        let key = self.key(channel_id, owner_id);
        match self.store.read(&key).await? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| StoreError::CorruptData(format!("{}: {}", key, e))),
            None => Ok(None),
        }
    }

    /// Stored value, or `T::default()` when nothing was written yet.
    pub async fn get_or_default(&self, channel_id: &str, owner_id: &str) -> Result<T, StoreError> {
        Ok(self.get(channel_id, owner_id).await?.unwrap_or_default())
    }

    pub async fn set(&self, channel_id: &str, owner_id: &str, value: &T) -> Result<(), StoreError> {
        let key = self.key(channel_id, owner_id);
        let value =
            serde_json::to_value(value).map_err(|e| StoreError::CorruptData(format!("{}: {}", key, e)))?;
        self.store.write(&key, value).await
    }

    pub async fn delete(&self, channel_id: &str, owner_id: &str) -> Result<(), StoreError> {
        self.store.delete(&self.key(channel_id, owner_id)).await
    }
}
