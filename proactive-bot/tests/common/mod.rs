//! Shared helpers for proactive-bot integration tests: a mock adapter, activity builders and a
//! harness that drives the real handler chain.

#![allow(dead_code)]

pub mod mock_adapter;

use std::sync::{Arc, Once};

use bot_core::{
    Activity, ActivityKind, ChannelAccount, ConversationAccount, ConversationReference,
    HandlerResponse, Result, TurnContext,
};
use chrono::Utc;
use handler_chain::HandlerChain;
use proactive_bot::{build_handler_chain, build_proactive_bot, BotAccessors};
use storage::{MemoryReferenceStore, MemoryStateStore, ReferenceStore, StateStore};
use tracing_subscriber::{fmt, EnvFilter};

pub use mock_adapter::{MockAdapter, SentRecord};

pub const BOT_ID: &str = "1000";
pub const APP_ID: &str = "ProactiveBot";

static INIT: Once = Once::new();

/// Test logging to stdout; `RUST_LOG` overrides the default filter.
pub fn init_test_tracing() {
    INIT.call_once(|| {
        let _ = fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_test_writer()
            .try_init();
    });
}

pub fn bot_account() -> ChannelAccount {
    ChannelAccount::new(BOT_ID, Some("proactive_bot".to_string()))
}

fn conversation(conversation_id: &str) -> ConversationAccount {
    let is_group = conversation_id.starts_with('-');
    ConversationAccount {
        id: conversation_id.to_string(),
        is_group,
        conversation_type: Some(if is_group { "group" } else { "private" }.to_string()),
    }
}

/// A text message from `user_id` in `conversation_id`.
pub fn message(conversation_id: &str, user_id: &str, text: &str) -> Activity {
    Activity {
        kind: ActivityKind::Message,
        id: Some(format!("{}-{}", conversation_id, text.len())),
        channel_id: "telegram".to_string(),
        service_url: "https://api.telegram.org".to_string(),
        from: ChannelAccount::new(user_id, None),
        recipient: bot_account(),
        conversation: conversation(conversation_id),
        text: Some(text.to_string()),
        members_added: Vec::new(),
        timestamp: Utc::now(),
    }
}

/// Members joined `conversation_id`.
pub fn members_added(conversation_id: &str, member_ids: &[&str]) -> Activity {
    Activity {
        kind: ActivityKind::ConversationUpdate,
        id: None,
        channel_id: "telegram".to_string(),
        service_url: "https://api.telegram.org".to_string(),
        from: ChannelAccount::new(member_ids.first().copied().unwrap_or(BOT_ID), None),
        recipient: bot_account(),
        conversation: conversation(conversation_id),
        text: None,
        members_added: member_ids
            .iter()
            .map(|id| ChannelAccount::new(*id, None))
            .collect(),
        timestamp: Utc::now(),
    }
}

/// Real bot + chain over in-memory stores and a [`MockAdapter`].
pub struct Harness {
    pub adapter: Arc<MockAdapter>,
    pub references: Arc<MemoryReferenceStore>,
    pub state: Arc<MemoryStateStore>,
    pub accessors: BotAccessors,
    pub chain: HandlerChain,
}

impl Harness {
    pub fn new(with_dialog: bool) -> Self {
        init_test_tracing();
        let adapter = Arc::new(MockAdapter::new());
        let references = Arc::new(MemoryReferenceStore::new());
        let state = Arc::new(MemoryStateStore::new());
        let state_dyn: Arc<dyn StateStore> = state.clone();
        let bot = build_proactive_bot(APP_ID, with_dialog, references.clone(), state_dyn.clone());
        let chain = build_handler_chain(Arc::new(bot));
        Self {
            adapter,
            references,
            state,
            accessors: BotAccessors::new(state_dyn),
            chain,
        }
    }

    pub async fn handle(&self, activity: Activity) -> Result<HandlerResponse> {
        let turn = TurnContext::new(self.adapter.clone(), activity);
        self.chain.handle(&turn).await
    }

    /// Sends `text` and panics on a chain error.
    pub async fn say(&self, conversation_id: &str, user_id: &str, text: &str) -> HandlerResponse {
        self.handle(message(conversation_id, user_id, text))
            .await
            .unwrap_or_else(|e| panic!("turn {:?} in {} failed: {}", text, conversation_id, e))
    }

    pub async fn stored_reference(&self) -> std::result::Result<ConversationReference, storage::StoreError> {
        ReferenceStore::<ConversationReference>::load(self.references.as_ref()).await
    }
}
