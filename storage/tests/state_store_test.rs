//! Integration tests for [`storage::SqliteStateStore`] behind [`storage::StatePropertyAccessor`].

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use storage::{SqliteStateStore, StatePropertyAccessor, StateScope, StateStore};
use tempfile::TempDir;

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
struct Answers {
    choice: Option<String>,
    number: Option<i64>,
}

/// **Test: Values written through an accessor are read back from SQLite.**
///
/// **Setup:** SQLite state store in a temp dir; conversation-scoped accessor.
/// **Action:** set, get, overwrite, get, delete, get.
/// **Expected:** Latest value each time; None after delete.
#[tokio::test]
async fn test_sqlite_state_accessor_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("state.db");
    let store: Arc<dyn StateStore> =
        Arc::new(SqliteStateStore::new(path.to_str().unwrap()).await.unwrap());
    let accessor: StatePropertyAccessor<Answers> =
        StatePropertyAccessor::new(store, StateScope::Conversation, "Answers");

    assert_eq!(accessor.get("telegram", "-100").await.unwrap(), None);

    let first = Answers {
        choice: Some("Yes".to_string()),
        number: None,
    };
    accessor.set("telegram", "-100", &first).await.unwrap();
    assert_eq!(accessor.get("telegram", "-100").await.unwrap(), Some(first));

    let second = Answers {
        choice: Some("No".to_string()),
        number: Some(3),
    };
    accessor.set("telegram", "-100", &second).await.unwrap();
    assert_eq!(
        accessor.get_or_default("telegram", "-100").await.unwrap(),
        second
    );

    accessor.delete("telegram", "-100").await.unwrap();
    assert_eq!(accessor.get("telegram", "-100").await.unwrap(), None);
}

/// **Test: Raw reads return the JSON value that was written.**
#[tokio::test]
async fn test_sqlite_state_raw_read_write() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("state.db");
    let store = SqliteStateStore::new(path.to_str().unwrap()).await.unwrap();

    store
        .write("k", serde_json::json!({"a": 1, "b": [true]}))
        .await
        .unwrap();

    let value = store.read("k").await.unwrap().unwrap();
    assert_eq!(value["a"], 1);
    assert_eq!(value["b"][0], true);
    assert!(store.read("missing").await.unwrap().is_none());
}
