//! Handler implementations that sit in front of the bot in the chain.

mod logging_handler;

pub use logging_handler::LoggingHandler;
