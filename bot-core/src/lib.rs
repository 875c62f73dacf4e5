//! # bot-core
//!
//! Core types and traits for the proactive bot: [`Activity`] and [`ConversationReference`], the
//! [`Adapter`] transport seam, [`TurnContext`] and [`continue_conversation`] for proactive turns,
//! [`Handler`], errors and tracing initialization. Transport-agnostic; used by handler-chain and
//! proactive-bot.

pub mod activity;
pub mod adapter;
pub mod error;
pub mod handler;
pub mod logger;

pub use activity::{
    Activity, ActivityKind, ChannelAccount, ConversationAccount, ConversationReference,
    CONTINUE_CONVERSATION_EVENT,
};
pub use adapter::{continue_conversation, Adapter, TurnCallback, TurnContext};
pub use error::{BotError, HandlerError, Result};
pub use handler::{Handler, HandlerResponse};
pub use logger::init_tracing;
pub use storage::StoreError;
