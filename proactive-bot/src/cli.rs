//! CLI parser and config loading.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::BotConfig;

#[derive(Parser)]
#[command(name = "proactive-bot")]
#[command(about = "Telegram bot that stores a conversation reference and delivers into it later", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
        /// Single flow: "1" registers, any other text is forwarded. Overrides BOT_WITH_DIALOG.
        #[arg(long)]
        single_flow: bool,
    },
    /// Print the stored conversation reference as JSON.
    ShowReference,
}

/// Load BotConfig from environment. If `token` is provided it overrides BOT_TOKEN.
pub fn load_config(token: Option<String>, single_flow: bool) -> Result<BotConfig> {
    let mut config = BotConfig::load(token)?;
    if single_flow {
        config.with_dialog = false;
    }
    Ok(config)
}
