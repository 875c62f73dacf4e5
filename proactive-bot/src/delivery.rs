//! Deferred delivery into the stored conversation.

use std::sync::Arc;

use async_trait::async_trait;
use bot_core::{
    continue_conversation, Adapter, ConversationReference, HandlerError, Result, TurnCallback,
    TurnContext,
};
use storage::ReferenceStore;
use tracing::{info, instrument};

use crate::dialogs::DialogSet;

/// What to deliver into the referenced conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryPayload {
    TextMessage(String),
    /// Begin the named dialog there.
    ResumeDialog(String),
}

/// Runs inside the proactive turn.
pub struct DeliveryCallback {
    payload: DeliveryPayload,
    dialogs: Option<Arc<DialogSet>>,
}

impl DeliveryCallback {
    pub fn new(payload: DeliveryPayload, dialogs: Option<Arc<DialogSet>>) -> Self {
        Self { payload, dialogs }
    }
}

#[async_trait]
impl TurnCallback for DeliveryCallback {
    async fn on_turn(&self, turn: &TurnContext) -> Result<()> {
        match &self.payload {
            DeliveryPayload::TextMessage(text) => turn.send_activity(text).await,
            DeliveryPayload::ResumeDialog(name) => {
                let dialogs = self
                    .dialogs
                    .as_ref()
                    .ok_or_else(|| HandlerError::UnknownDialog(name.clone()))?;
                let mut dc = dialogs.create_context(turn).await?;
                dc.begin_dialog(name).await?;
                Ok(())
            }
        }
    }
}

/// Loads the stored reference and delivers payloads into it.
pub struct Delivery {
    app_id: String,
    store: Arc<dyn ReferenceStore<ConversationReference>>,
    dialogs: Option<Arc<DialogSet>>,
}

impl Delivery {
    pub fn new(
        app_id: impl Into<String>,
        store: Arc<dyn ReferenceStore<ConversationReference>>,
        dialogs: Option<Arc<DialogSet>>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            store,
            dialogs,
        }
    }

    /// Store errors (NotFound, CorruptData, IO) and DeliveryFailed propagate unchanged; no retry.
    #[instrument(skip(self, adapter))]
    pub async fn deliver(&self, adapter: Arc<dyn Adapter>, payload: DeliveryPayload) -> Result<()> {
        let reference = self.store.load().await?;
        info!(
            app_id = %self.app_id,
            channel_id = %reference.channel_id,
            conversation_id = %reference.conversation.id,
            "Delivering into stored conversation"
        );

        let callback = DeliveryCallback::new(payload, self.dialogs.clone());
        continue_conversation(adapter, &self.app_id, &reference, &callback).await
    }
}
