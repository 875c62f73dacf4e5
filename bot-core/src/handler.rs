//! Handler trait and chain result type.

use async_trait::async_trait;

use crate::adapter::TurnContext;
use crate::error::Result;

/// Handler result for the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; no response body.
    Stop,
    /// Skip this handler, try next.
    Ignore,
    /// Stop the chain and attach the text that was sent back, so `after()` can see it.
    Reply(String),
}

/// Single handler concept: optional before / handle / after. Chain runs all before → handle until Stop/Reply → all after (reverse).
#[async_trait]
pub trait Handler: Send + Sync {
    /// Runs before the handle phase. Return false to stop the chain.
    async fn before(&self, _turn: &TurnContext) -> Result<bool> {
        Ok(true)
    }
    /// Processes the activity. Return Stop or Reply to end the handle phase. Default: Continue.
    async fn handle(&self, _turn: &TurnContext) -> Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }
    /// Runs after the handle phase (reverse order), with the final response.
    async fn after(&self, _turn: &TurnContext, _response: &HandlerResponse) -> Result<()> {
        Ok(())
    }
}
