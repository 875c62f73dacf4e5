//! Entry points used by the CLI: run the bot, inspect the stored reference.

use anyhow::Result;
use bot_core::init_tracing;
use tracing::{info, instrument};

use crate::components::{build_bot_components, build_handler_chain, create_stores};
use crate::config::{BotConfig, StoreConfig};
use crate::telegram::run_repl;

/// Main entry: validate config, init logging, build components, then run REPL.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    info!(
        app_id = %config.app_id,
        with_dialog = config.with_dialog,
        reference_store_type = %config.stores().reference_store_type,
        state_store_type = %config.stores().state_store_type,
        "Initializing bot"
    );

    let components = build_bot_components(&config).await?;
    let handler_chain = build_handler_chain(components.proactive_bot.clone());

    info!("Bot started successfully");

    run_repl(
        components.teloxide_bot.clone(),
        handler_chain,
        components.service_url.clone(),
    )
    .await
}

/// Loads the stored conversation reference and renders it as pretty JSON.
///
/// NotFound / CorruptData / IO errors are returned as-is.
pub async fn show_reference(stores: &StoreConfig) -> Result<String> {
    stores.validate()?;
    let (reference_store, _) = create_stores(stores).await?;
    let reference = reference_store.load().await?;
    Ok(serde_json::to_string_pretty(&reference)?)
}

