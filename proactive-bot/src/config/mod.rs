//! Bot configuration: BaseConfig (Telegram + log) + StoreConfig (reference slot, state) + behaviour flags.

mod base;
mod bot_config;
mod stores;


pub use base::BaseConfig;
pub use bot_config::BotConfig;
pub use stores::{ReferenceStoreKind, StateStoreKind, StoreConfig};
