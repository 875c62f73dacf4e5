//! Wraps teloxide::Bot and implements [`bot_core::Adapter`]. Tests substitute another Adapter impl.

use async_trait::async_trait;
use bot_core::{Adapter, BotError, ConversationReference, Result};
use teloxide::{prelude::*, types::ChatId};
use tracing::{debug, instrument};

use super::adapters::TELEGRAM_CHANNEL_ID;

/// Thin wrapper around teloxide::Bot that implements core's Adapter trait.
#[derive(Clone)]
pub struct TelegramAdapter {
    bot: teloxide::Bot,
}

impl TelegramAdapter {
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Returns the underlying teloxide::Bot for direct API use when needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }
}

/// Chat id of a Telegram reference. Fails with DeliveryFailed for foreign channels or non-numeric ids.
pub fn parse_chat_id(reference: &ConversationReference) -> Result<ChatId> {
    if reference.channel_id != TELEGRAM_CHANNEL_ID {
        return Err(BotError::DeliveryFailed(format!(
            "reference belongs to channel {:?}, not {}",
            reference.channel_id, TELEGRAM_CHANNEL_ID
        )));
    }
    reference
        .conversation
        .id
        .parse::<i64>()
        .map(ChatId)
        .map_err(|_| {
            BotError::DeliveryFailed(format!(
                "invalid Telegram chat id: {}",
                reference.conversation.id
            ))
        })
}

#[async_trait]
impl Adapter for TelegramAdapter {
    async fn send_text(&self, reference: &ConversationReference, text: &str) -> Result<()> {
        let chat_id = parse_chat_id(reference)?;
        self.bot
            .send_message(chat_id, text.to_string())
            .await
            .map_err(|e| BotError::Bot(e.to_string()))?;
        Ok(())
    }

    #[instrument(skip(self, reference), fields(conversation_id = %reference.conversation.id))]
    async fn check_reference(&self, reference: &ConversationReference) -> Result<()> {
        let chat_id = parse_chat_id(reference)?;
        self.bot
            .get_chat(chat_id)
            .await
            .map_err(|e| BotError::DeliveryFailed(e.to_string()))?;
        debug!(chat_id = chat_id.0, "Chat reachable");
        Ok(())
    }
}
