//! Handler that logs each activity in before() and the chain's result in after().

use async_trait::async_trait;
use bot_core::{Handler, HandlerResponse, Result, TurnContext};
use tracing::{debug, info, instrument};

/// Logs each inbound activity; always continues.
#[derive(Clone, Default)]
pub struct LoggingHandler;

impl LoggingHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Handler for LoggingHandler {
    #[instrument(skip(self, turn))]
    async fn before(&self, turn: &TurnContext) -> Result<bool> {
        let activity = turn.activity();
        info!(
            channel_id = %activity.channel_id,
            conversation_id = %activity.conversation.id,
            from = %activity.from.id,
            kind = ?activity.kind,
            text = %activity.text().unwrap_or(""),
            members_added = activity.members_added.len(),
            "Received activity"
        );
        Ok(true)
    }

    #[instrument(skip(self, turn, response))]
    async fn after(&self, turn: &TurnContext, response: &HandlerResponse) -> Result<()> {
        debug!(
            activity_id = ?turn.activity().id,
            response = ?response,
            "Processed activity"
        );
        Ok(())
    }
}
