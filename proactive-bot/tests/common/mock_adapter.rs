//! Mock implementation of [`bot_core::Adapter`] for integration tests.
//!
//! Records every `send_text` call so tests can assert on what was delivered where, without
//! hitting Telegram. Conversations can be marked unreachable to exercise `DeliveryFailed`.

use async_trait::async_trait;
use bot_core::{Adapter, BotError, ConversationReference, Result};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// One recorded call to `send_text(reference, text)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentRecord {
    pub conversation_id: String,
    pub text: String,
}

#[derive(Default)]
pub struct MockAdapter {
    sent: Mutex<Vec<SentRecord>>,
    unreachable: Mutex<HashSet<String>>,
    checks: AtomicUsize,
}

impl MockAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `check_reference` fail for this conversation.
    pub fn mark_unreachable(&self, conversation_id: &str) {
        self.unreachable
            .lock()
            .unwrap()
            .insert(conversation_id.to_string());
    }

    pub fn sent(&self) -> Vec<SentRecord> {
        self.sent.lock().unwrap().clone()
    }

    /// Texts sent into one conversation, in order.
    pub fn sent_to(&self, conversation_id: &str) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter(|r| r.conversation_id == conversation_id)
            .map(|r| r.text)
            .collect()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }

    pub fn check_count(&self) -> usize {
        self.checks.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Adapter for MockAdapter {
    async fn send_text(&self, reference: &ConversationReference, text: &str) -> Result<()> {
        self.sent.lock().unwrap().push(SentRecord {
            conversation_id: reference.conversation.id.clone(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn check_reference(&self, reference: &ConversationReference) -> Result<()> {
        self.checks.fetch_add(1, Ordering::SeqCst);
        if self
            .unreachable
            .lock()
            .unwrap()
            .contains(&reference.conversation.id)
        {
            return Err(BotError::DeliveryFailed(format!(
                "chat {} not found",
                reference.conversation.id
            )));
        }
        Ok(())
    }
}
