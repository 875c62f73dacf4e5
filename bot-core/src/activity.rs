//! Activity and conversation reference model.
//!
//! An [`Activity`] is one inbound event in a conversation. A [`ConversationReference`] is the durable
//! handle captured from an activity that lets the bot address the same conversation later, without an
//! inbound request driving the delivery. JSON field names are camelCase.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name of the synthetic event that opens a proactive turn.
pub const CONTINUE_CONVERSATION_EVENT: &str = "continueConversation";

/// Kind of an inbound activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivityKind {
    /// A user sent a message.
    Message,
    /// Membership of the conversation changed (see [`Activity::members_added`]).
    ConversationUpdate,
    /// Named event; proactive turns use [`CONTINUE_CONVERSATION_EVENT`].
    Event(String),
}

/// A participant (user or bot) on a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelAccount {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ChannelAccount {
    pub fn new(id: impl Into<String>, name: Option<String>) -> Self {
        Self {
            id: id.into(),
            name,
        }
    }
}

/// A conversation on a channel (private chat, group, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationAccount {
    pub id: String,
    #[serde(default)]
    pub is_group: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_type: Option<String>,
}

/// Everything a channel needs to resume delivery into a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<ChannelAccount>,
    pub bot: ChannelAccount,
    pub conversation: ConversationAccount,
    pub channel_id: String,
    pub service_url: String,
}

/// One inbound event, already converted from the transport's own type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub kind: ActivityKind,
    #[serde(default)]
    pub id: Option<String>,
    pub channel_id: String,
    pub service_url: String,
    pub from: ChannelAccount,
    /// The bot's own account on this channel.
    pub recipient: ChannelAccount,
    pub conversation: ConversationAccount,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub members_added: Vec<ChannelAccount>,
    pub timestamp: DateTime<Utc>,
}

impl Activity {
    /// Captures the reference of this activity's conversation: bot is the recipient, user is the sender.
    pub fn conversation_reference(&self) -> ConversationReference {
        ConversationReference {
            activity_id: self.id.clone(),
            user: Some(self.from.clone()),
            bot: self.recipient.clone(),
            conversation: self.conversation.clone(),
            channel_id: self.channel_id.clone(),
            service_url: self.service_url.clone(),
        }
    }

    /// Builds the synthetic event that a proactive turn runs on.
    ///
    /// `from` is the referenced user when known, otherwise the bot itself.
    pub fn continuation(reference: &ConversationReference) -> Self {
        Self {
            kind: ActivityKind::Event(CONTINUE_CONVERSATION_EVENT.to_string()),
            id: reference.activity_id.clone(),
            channel_id: reference.channel_id.clone(),
            service_url: reference.service_url.clone(),
            from: reference
                .user
                .clone()
                .unwrap_or_else(|| reference.bot.clone()),
            recipient: reference.bot.clone(),
            conversation: reference.conversation.clone(),
            text: None,
            members_added: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    /// Message text, or None when the activity carries none.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Members added to the conversation, excluding the bot itself.
    pub fn members_added_excluding_bot(&self) -> impl Iterator<Item = &ChannelAccount> {
        self.members_added
            .iter()
            .filter(move |m| m.id != self.recipient.id)
    }
}
