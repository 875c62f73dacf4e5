//! The proactive bot's turn handler.
//!
//! Greets new members, stores the current conversation on `1`, and delivers text or starts the
//! wizard in the stored conversation. With dialogs enabled, answers to a running wizard are routed
//! to it before any command parsing.

use std::sync::Arc;

use async_trait::async_trait;
use bot_core::{ActivityKind, ConversationReference, Handler, HandlerResponse, Result, TurnContext};
use storage::ReferenceStore;
use tracing::{debug, info, instrument};

use crate::commands::Command;
use crate::delivery::{Delivery, DeliveryPayload};
use crate::dialogs::{DialogSet, DialogTurnStatus, EXAMPLE_WATERFALL_DIALOG};

const WELCOME: &str = "Welcome";
const REGISTER_HELP: &str =
    "Send \"1\" to set this conversation as the receiving conversation (store ConversationReference)";
const SEND_HELP: &str = "Send \"2[your message]\" to send a message.";
const DIALOG_HELP: &str = "Send \"3\" to start a dialog.";
const FORWARD_HELP: &str = "Send any other message to forward it to the receiving conversation.";

/// Turn handler for both variants: `with_dialog` adds the `2`/`3` commands and the wizard.
pub struct ProactiveBot {
    store: Arc<dyn ReferenceStore<ConversationReference>>,
    delivery: Delivery,
    dialogs: Option<Arc<DialogSet>>,
}

impl ProactiveBot {
    /// Single-flow variant: `1` registers, every other text is forwarded.
    pub fn new(app_id: impl Into<String>, store: Arc<dyn ReferenceStore<ConversationReference>>) -> Self {
        Self {
            delivery: Delivery::new(app_id, store.clone(), None),
            store,
            dialogs: None,
        }
    }

    /// Dialog variant: `1` registers, `2<text>` sends, `3` starts the wizard.
    pub fn with_dialogs(
        app_id: impl Into<String>,
        store: Arc<dyn ReferenceStore<ConversationReference>>,
        dialogs: Arc<DialogSet>,
    ) -> Self {
        Self {
            delivery: Delivery::new(app_id, store.clone(), Some(dialogs.clone())),
            store,
            dialogs: Some(dialogs),
        }
    }

    pub fn with_dialog(&self) -> bool {
        self.dialogs.is_some()
    }

    /// The instructional text sent to new conversations.
    pub fn greeting(&self) -> Vec<&'static str> {
        if self.with_dialog() {
            vec![WELCOME, REGISTER_HELP, SEND_HELP, DIALOG_HELP]
        } else {
            vec![WELCOME, REGISTER_HELP, FORWARD_HELP]
        }
    }

    async fn on_members_added(&self, turn: &TurnContext) -> Result<HandlerResponse> {
        let activity = turn.activity();
        let newcomers = activity.members_added_excluding_bot().count();
        if newcomers == 0 {
            return Ok(HandlerResponse::Ignore);
        }

        info!(
            conversation_id = %activity.conversation.id,
            newcomers = newcomers,
            "Greeting new members"
        );
        for line in self.greeting() {
            turn.send_activity(line).await?;
        }
        Ok(HandlerResponse::Stop)
    }

    /// Routes the text to a running wizard. Returns false when none is active.
    async fn continue_active_dialog(&self, turn: &TurnContext) -> Result<bool> {
        let Some(dialogs) = &self.dialogs else {
            return Ok(false);
        };
        let mut dc = dialogs.create_context(turn).await?;
        if dc.active_dialog().is_none() {
            return Ok(false);
        }
        let status = dc.continue_dialog().await?;
        debug!(status = ?status, "Dialog turn handled");
        Ok(status != DialogTurnStatus::Empty)
    }

    async fn on_message(&self, turn: &TurnContext, text: &str) -> Result<HandlerResponse> {
        if self.continue_active_dialog(turn).await? {
            return Ok(HandlerResponse::Stop);
        }

        let command = Command::parse(text, self.with_dialog());
        let conversation_id = &turn.activity().conversation.id;
        info!(
            conversation_id = %conversation_id,
            command = %command.name(),
            "Command parsed"
        );

        match command {
            Command::Register => {
                self.store.save(turn.conversation_reference()).await?;
                info!(conversation_id = %conversation_id, "Receiving conversation stored");
            }
            Command::SendText(text) => {
                self.delivery
                    .deliver(turn.adapter(), DeliveryPayload::TextMessage(text))
                    .await?;
            }
            Command::StartDialog => {
                self.delivery
                    .deliver(
                        turn.adapter(),
                        DeliveryPayload::ResumeDialog(EXAMPLE_WATERFALL_DIALOG.to_string()),
                    )
                    .await?;
            }
            Command::Unrecognized => return Ok(HandlerResponse::Ignore),
        }
        Ok(HandlerResponse::Stop)
    }
}

#[async_trait]
impl Handler for ProactiveBot {
    #[instrument(skip(self, turn))]
    async fn handle(&self, turn: &TurnContext) -> Result<HandlerResponse> {
        let activity = turn.activity();
        match &activity.kind {
            ActivityKind::ConversationUpdate => self.on_members_added(turn).await,
            ActivityKind::Message => match activity.text() {
                Some(text) => self.on_message(turn, text).await,
                None => Ok(HandlerResponse::Ignore),
            },
            ActivityKind::Event(_) => Ok(HandlerResponse::Ignore),
        }
    }
}
