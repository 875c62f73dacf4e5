//! Error types for the bot core.
//!
//! [`BotError`] is the top-level error; [`HandlerError`] is used for handler failures.
//! Store failures keep their own kind ([`StoreError`]) so callers can tell NotFound from CorruptData.

use storage::StoreError;
use thiserror::Error;

/// Top-level error (store, delivery, transport, handler, config, IO).
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The referenced conversation cannot be reached any more (chat gone, bot removed, bad id).
    #[error("Delivery failed: {0}")]
    DeliveryFailed(String),

    #[error("Bot error: {0}")]
    Bot(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors produced by handlers.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("No text in message")]
    NoText,

    #[error("Unknown dialog: {0}")]
    UnknownDialog(String),

    #[error("State error: {0}")]
    State(String),
}

/// Result type for core operations; uses [`BotError`].
pub type Result<T> = std::result::Result<T, BotError>;
