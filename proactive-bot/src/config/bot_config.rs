//! BotConfig: BaseConfig + StoreConfig + bot behaviour. Use load() for env-based loading.

use anyhow::Result;
use std::env;

use super::{BaseConfig, StoreConfig};

/// Full bot config. Call validate() after load to fail fast before init.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub base: BaseConfig,
    pub stores: StoreConfig,
    /// BOT_APP_ID; passed along when resuming a stored conversation.
    pub app_id: String,
    /// BOT_WITH_DIALOG; false selects the single-flow variant.
    pub with_dialog: bool,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides BOT_TOKEN.
    pub fn load(token: Option<String>) -> Result<Self> {
        let base = BaseConfig::load(token)?;
        let stores = StoreConfig::from_env()?;
        let app_id = env::var("BOT_APP_ID")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "ProactiveBot".to_string());
        let with_dialog = env::var("BOT_WITH_DIALOG")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(true);
        Ok(Self {
            base,
            stores,
            app_id,
            with_dialog,
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.stores.validate()
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }
    pub fn stores(&self) -> &StoreConfig {
        &self.stores
    }

    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
}
