//! File-backed reference slot: one JSON file holding the last saved value.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::error::StoreError;
use crate::reference_store::{decode, encode, ReferenceStore};

/// Keeps the slot in a single JSON file (e.g. `./ConversationReference.json`).
///
/// Saves are written to a sibling temp file and renamed over the target, so a concurrent reader
/// sees either the old or the new value. Within the process, saves and loads are serialized by an
/// RwLock; separate processes sharing the file still race (last rename wins).
pub struct FileReferenceStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl FileReferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "reference".to_string());
        self.path
            .with_file_name(format!(".{}.{}.tmp", file_name, Uuid::new_v4()))
    }
}

#[async_trait]
impl<T> ReferenceStore<T> for FileReferenceStore
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    #[instrument(skip(self, value))]
    async fn save(&self, value: &T) -> Result<(), StoreError> {
        let bytes = encode(value)?;
        let _guard = self.lock.write().await;

        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                tokio::fs::create_dir_all(dir).await?;
            }
        }

        let tmp = self.temp_path();
        tokio::fs::write(&tmp, &bytes).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        info!(path = %self.path.display(), bytes = bytes.len(), "Reference saved");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn load(&self) -> Result<T, StoreError> {
        let _guard = self.lock.read().await;

        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::NotFound(format!(
                    "no reference file at {}",
                    self.path.display()
                )));
            }
            Err(e) => return Err(e.into()),
        };

        debug!(path = %self.path.display(), bytes = bytes.len(), "Reference file read");
        decode(&bytes)
    }
}
