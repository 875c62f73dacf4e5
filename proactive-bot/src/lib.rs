//! # Proactive bot
//!
//! A Telegram bot that stores one conversation as the "receiving conversation" and later delivers
//! messages, or starts a wizard dialog, in it on request from any conversation. Wires bot-core,
//! handler-chain and storage; loads config from env and runs the REPL.

pub mod bot;
pub mod cli;
pub mod commands;
pub mod components;
pub mod config;
pub mod delivery;
pub mod dialogs;
pub mod handlers;
pub mod runner;
pub mod state;
pub mod telegram;

pub use bot::ProactiveBot;
pub use cli::{load_config, Cli, Commands};
pub use commands::Command;
pub use components::{
    build_bot_components, build_handler_chain, build_proactive_bot, create_stores, BotComponents,
};
pub use config::{BaseConfig, BotConfig, ReferenceStoreKind, StateStoreKind, StoreConfig};
pub use delivery::{Delivery, DeliveryCallback, DeliveryPayload};
pub use dialogs::{
    DialogContext, DialogInstance, DialogSet, DialogState, DialogTurnStatus, WizardStep,
    EXAMPLE_WATERFALL_DIALOG,
};
pub use handlers::LoggingHandler;
pub use runner::{run_bot, show_reference};
pub use state::{BotAccessors, ExampleAnswers, UserProfile};
pub use telegram::{
    run_repl, TelegramAdapter, TelegramMessageWrapper, TelegramUserWrapper, TELEGRAM_CHANNEL_ID,
};
