//! Store selection: where the conversation reference and the dialog/user state live.

use anyhow::Result;
use std::env;
use std::str::FromStr;

/// Backend of the conversation reference slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceStoreKind {
    File,
    Sqlite,
    Memory,
}

impl FromStr for ReferenceStoreKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "sqlite" => Ok(Self::Sqlite),
            "memory" => Ok(Self::Memory),
            other => anyhow::bail!(
                "REFERENCE_STORE_TYPE must be one of file, sqlite, memory; got {}",
                other
            ),
        }
    }
}

/// Backend of user / conversation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateStoreKind {
    Memory,
    Sqlite,
}

impl FromStr for StateStoreKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "sqlite" => Ok(Self::Sqlite),
            other => anyhow::bail!(
                "STATE_STORE_TYPE must be one of memory, sqlite; got {}",
                other
            ),
        }
    }
}

/// Raw store settings as read from env; [`StoreConfig::validate`] checks the kinds.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// REFERENCE_STORE_TYPE
    pub reference_store_type: String,
    /// CONVERSATION_REFERENCE_PATH
    pub reference_path: String,
    /// STATE_STORE_TYPE
    pub state_store_type: String,
    /// DATABASE_URL, used by the sqlite backends
    pub database_url: String,
}

impl StoreConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            reference_store_type: env::var("REFERENCE_STORE_TYPE")
                .unwrap_or_else(|_| "file".to_string()),
            reference_path: env::var("CONVERSATION_REFERENCE_PATH")
                .unwrap_or_else(|_| "./ConversationReference.json".to_string()),
            state_store_type: env::var("STATE_STORE_TYPE")
                .unwrap_or_else(|_| "memory".to_string()),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "./proactive_bot.db".to_string()),
        })
    }

    pub fn reference_store_kind(&self) -> Result<ReferenceStoreKind> {
        self.reference_store_type.parse()
    }

    pub fn state_store_kind(&self) -> Result<StateStoreKind> {
        self.state_store_type.parse()
    }

    pub fn validate(&self) -> Result<()> {
        self.reference_store_kind()?;
        self.state_store_kind()?;
        Ok(())
    }
}
