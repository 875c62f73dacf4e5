//! # Handler chain
//!
//! Runs the handlers for each inbound activity. All `before` run in order (any false stops the
//! chain); then `handle` runs until one returns Stop or Reply; then all `after` run in reverse.

use bot_core::{Handler, HandlerResponse, Result, TurnContext};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Chain of handlers: before (all) → handle (until Stop/Reply) → after (reverse).
#[derive(Clone, Default)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handler.
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Runs one turn through the chain. Returns the first Stop or Reply, or Continue.
    #[instrument(skip(self, turn))]
    pub async fn handle(&self, turn: &TurnContext) -> Result<HandlerResponse> {
        let activity = turn.activity();
        let conversation_id = activity.conversation.id.as_str();
        let mut final_response = HandlerResponse::Continue;

        info!(
            channel_id = %activity.channel_id,
            conversation_id = %conversation_id,
            kind = ?activity.kind,
            "step: handler_chain started"
        );

        for h in &self.handlers {
            let name = std::any::type_name_of_val(h.as_ref());
            if !h.before(turn).await? {
                info!(conversation_id = %conversation_id, handler = %name, "step: before returned false, chain stopped");
                return Ok(HandlerResponse::Stop);
            }
            debug!(handler = %name, "step: handler before done");
        }

        for h in &self.handlers {
            let name = std::any::type_name_of_val(h.as_ref());
            let response = h.handle(turn).await?;
            let (response_type, reply_len) = match &response {
                HandlerResponse::Continue => ("Continue", None),
                HandlerResponse::Stop => ("Stop", None),
                HandlerResponse::Ignore => ("Ignore", None),
                HandlerResponse::Reply(s) => ("Reply", Some(s.len())),
            };
            info!(
                conversation_id = %conversation_id,
                handler = %name,
                response_type = %response_type,
                reply_len = ?reply_len,
                "step: handler handle done"
            );

            if matches!(response, HandlerResponse::Stop | HandlerResponse::Reply(_)) {
                final_response = response;
                break;
            }
        }

        for h in self.handlers.iter().rev() {
            h.after(turn, &final_response).await?;
        }

        info!(
            conversation_id = %conversation_id,
            response = ?final_response,
            "step: handler_chain finished"
        );

        Ok(final_response)
    }
}

// Tests live in tests/handler_chain_test.rs
