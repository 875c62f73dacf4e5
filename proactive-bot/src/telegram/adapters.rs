//! Converters from teloxide types to bot-core activity types.

use bot_core::{Activity, ActivityKind, ChannelAccount, ConversationAccount};
use chrono::Utc;

/// Channel id written into every activity and reference produced by this transport.
pub const TELEGRAM_CHANNEL_ID: &str = "telegram";
/// Service URL used when no custom Bot API server is configured.
pub const DEFAULT_SERVICE_URL: &str = "https://api.telegram.org";

const START_COMMAND: &str = "/start";

/// Telegram user to channel account.
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> TelegramUserWrapper<'a> {
    pub fn to_account(&self) -> ChannelAccount {
        let name = self
            .0
            .username
            .clone()
            .unwrap_or_else(|| self.0.full_name());
        ChannelAccount::new(self.0.id.0.to_string(), Some(name))
    }
}

/// Telegram message to activity. `bot` is the bot's own account (from `get_me`).
pub struct TelegramMessageWrapper<'a> {
    pub msg: &'a teloxide::types::Message,
    pub bot: &'a ChannelAccount,
    pub service_url: &'a str,
}

impl<'a> TelegramMessageWrapper<'a> {
    pub fn new(
        msg: &'a teloxide::types::Message,
        bot: &'a ChannelAccount,
        service_url: &'a str,
    ) -> Self {
        Self {
            msg,
            bot,
            service_url,
        }
    }

    /// `new_chat_members` and a private `/start` become a conversation update; anything else is a
    /// message.
    pub fn to_activity(&self) -> Activity {
        let msg = self.msg;
        let from = msg
            .from
            .as_ref()
            .map(|u| TelegramUserWrapper(u).to_account())
            .unwrap_or_else(|| ChannelAccount::new(msg.chat.id.0.to_string(), None));

        let new_members: Vec<ChannelAccount> = msg
            .new_chat_members()
            .map(|members| {
                members
                    .iter()
                    .map(|u| TelegramUserWrapper(u).to_account())
                    .collect()
            })
            .unwrap_or_default();

        let (kind, text, members_added) = if !new_members.is_empty() {
            (ActivityKind::ConversationUpdate, None, new_members)
        } else if msg.chat.is_private() && is_start_command(msg.text()) {
            (ActivityKind::ConversationUpdate, None, vec![from.clone()])
        } else {
            (
                ActivityKind::Message,
                msg.text().map(str::to_string),
                Vec::new(),
            )
        };

        Activity {
            kind,
            id: Some(msg.id.0.to_string()),
            channel_id: TELEGRAM_CHANNEL_ID.to_string(),
            service_url: self.service_url.to_string(),
            from,
            recipient: self.bot.clone(),
            conversation: self.conversation(),
            text,
            members_added,
            timestamp: msg.date.with_timezone(&Utc),
        }
    }

    fn conversation(&self) -> ConversationAccount {
        let chat = &self.msg.chat;
        let conversation_type = if chat.is_private() {
            "private"
        } else if chat.is_supergroup() {
            "supergroup"
        } else if chat.is_group() {
            "group"
        } else {
            "channel"
        };
        ConversationAccount {
            id: chat.id.0.to_string(),
            is_group: chat.is_group() || chat.is_supergroup(),
            conversation_type: Some(conversation_type.to_string()),
        }
    }
}

/// `/start`, optionally addressed (`/start@bot`) or with a payload.
pub fn is_start_command(text: Option<&str>) -> bool {
    let Some(first) = text.and_then(|t| t.split_whitespace().next()) else {
        return false;
    };
    first == START_COMMAND
        || first
            .strip_prefix(START_COMMAND)
            .is_some_and(|rest| rest.starts_with('@'))
}
