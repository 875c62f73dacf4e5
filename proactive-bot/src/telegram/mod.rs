//! Telegram transport: activity converters, the Adapter implementation, REPL runner.

mod adapters;
mod bot_adapter;
mod runner;

pub use adapters::{
    is_start_command, TelegramMessageWrapper, TelegramUserWrapper, DEFAULT_SERVICE_URL,
    TELEGRAM_CHANNEL_ID,
};
pub use bot_adapter::{parse_chat_id, TelegramAdapter};
pub use runner::run_repl;
