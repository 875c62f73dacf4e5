//! Storage crate: conversation reference slot and key-value state.
//!
//! ## Modules
//!
//! - `error` – Storage error types
//! - `reference_store` – ReferenceStore trait, in-memory slot
//! - `file_store` – FileReferenceStore (single JSON file)
//! - `sqlite_store` – SqliteReferenceStore, SqliteStateStore
//! - `state` – StateStore trait, MemoryStateStore, StatePropertyAccessor
//! - `sqlite_pool` – SqlitePoolManager

mod error;
mod file_store;
mod reference_store;
mod sqlite_pool;
mod sqlite_store;
mod state;

pub use error::StoreError;
pub use file_store::FileReferenceStore;
pub use reference_store::{MemoryReferenceStore, ReferenceStore};
pub use sqlite_pool::SqlitePoolManager;
pub use sqlite_store::{SqliteReferenceStore, SqliteStateStore, DEFAULT_REFERENCE_SLOT};
pub use state::{MemoryStateStore, StatePropertyAccessor, StateScope, StateStore};
