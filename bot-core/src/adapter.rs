//! Transport abstraction and proactive turns.
//!
//! [`Adapter`] is transport-agnostic; the Telegram implementation lives in the bot crate and tests
//! substitute a recording mock. [`TurnContext`] scopes outgoing messages to one conversation, and
//! [`continue_conversation`] opens such a turn for a stored [`ConversationReference`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument, warn};

use crate::activity::{Activity, ConversationReference};
use crate::error::Result;

/// Sends messages into conversations. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Adapter: Send + Sync {
    /// Sends a text message into the referenced conversation.
    async fn send_text(&self, reference: &ConversationReference, text: &str) -> Result<()>;

    /// Checks that the referenced conversation can still receive messages.
    /// Returns [`crate::BotError::DeliveryFailed`] when it cannot.
    async fn check_reference(&self, reference: &ConversationReference) -> Result<()>;
}

/// One turn: the activity being handled plus the adapter to answer through.
#[derive(Clone)]
pub struct TurnContext {
    adapter: Arc<dyn Adapter>,
    activity: Activity,
    reference: ConversationReference,
}

impl TurnContext {
    pub fn new(adapter: Arc<dyn Adapter>, activity: Activity) -> Self {
        let reference = activity.conversation_reference();
        Self {
            adapter,
            activity,
            reference,
        }
    }

    pub fn activity(&self) -> &Activity {
        &self.activity
    }

    pub fn adapter(&self) -> Arc<dyn Adapter> {
        self.adapter.clone()
    }

    /// Reference of the conversation this turn belongs to.
    pub fn conversation_reference(&self) -> &ConversationReference {
        &self.reference
    }

    /// Sends text into this turn's conversation.
    pub async fn send_activity(&self, text: &str) -> Result<()> {
        self.adapter.send_text(&self.reference, text).await
    }
}

/// Work run inside a proactive turn.
#[async_trait]
pub trait TurnCallback: Send + Sync {
    async fn on_turn(&self, turn: &TurnContext) -> Result<()>;
}

/// Resumes the referenced conversation and runs `callback` once inside a turn scoped to it.
///
/// Fails with `DeliveryFailed` without calling `callback` when the adapter reports the reference
/// as unreachable. Errors from the callback are returned as-is; nothing is retried.
#[instrument(skip(adapter, reference, callback), fields(conversation_id = %reference.conversation.id))]
pub async fn continue_conversation(
    adapter: Arc<dyn Adapter>,
    app_id: &str,
    reference: &ConversationReference,
    callback: &dyn TurnCallback,
) -> Result<()> {
    if let Err(e) = adapter.check_reference(reference).await {
        warn!(
            app_id = %app_id,
            channel_id = %reference.channel_id,
            error = %e,
            "Stored conversation reference is not reachable"
        );
        return Err(e);
    }

    let turn = TurnContext::new(adapter, Activity::continuation(reference));
    info!(
        app_id = %app_id,
        channel_id = %reference.channel_id,
        "step: proactive turn started"
    );
    callback.on_turn(&turn).await?;
    info!(app_id = %app_id, "step: proactive turn finished");
    Ok(())
}
