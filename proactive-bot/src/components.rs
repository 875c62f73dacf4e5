//! Component factory: builds BotComponents from config. Isolates assembly logic from runner.

use anyhow::Result;
use bot_core::{ConversationReference, Handler};
use handler_chain::HandlerChain;
use std::sync::Arc;
use storage::{
    FileReferenceStore, MemoryReferenceStore, MemoryStateStore, ReferenceStore,
    SqlitePoolManager, SqliteReferenceStore, SqliteStateStore, StateStore,
    DEFAULT_REFERENCE_SLOT,
};
use teloxide::prelude::*;
use tracing::{error, info, instrument};

use crate::bot::ProactiveBot;
use crate::config::{BotConfig, ReferenceStoreKind, StateStoreKind, StoreConfig};
use crate::dialogs::DialogSet;
use crate::handlers::LoggingHandler;
use crate::state::BotAccessors;
use crate::telegram::DEFAULT_SERVICE_URL;

/// Everything the runner needs; produced by the component factory.
pub struct BotComponents {
    pub teloxide_bot: Bot,
    /// Written into every activity and stored reference.
    pub service_url: String,
    pub reference_store: Arc<dyn ReferenceStore<ConversationReference>>,
    pub state_store: Arc<dyn StateStore>,
    pub proactive_bot: Arc<ProactiveBot>,
}

/// Creates the reference slot and the state store from config.
///
/// When both are SQLite they share one pool on `DATABASE_URL`.
#[instrument(skip(config))]
pub async fn create_stores(
    config: &StoreConfig,
) -> Result<(
    Arc<dyn ReferenceStore<ConversationReference>>,
    Arc<dyn StateStore>,
)> {
    let reference_kind = config.reference_store_kind()?;
    let state_kind = config.state_store_kind()?;

    let pool = if reference_kind == ReferenceStoreKind::Sqlite
        || state_kind == StateStoreKind::Sqlite
    {
        Some(
            SqlitePoolManager::new(&config.database_url)
                .await
                .map_err(|e| {
                    error!(
                        error = %e,
                        database_url = %config.database_url,
                        "Failed to open SQLite database"
                    );
                    anyhow::anyhow!("Failed to open SQLite database: {}", e)
                })?,
        )
    } else {
        None
    };

    let reference_store: Arc<dyn ReferenceStore<ConversationReference>> = match (reference_kind, &pool) {
        (ReferenceStoreKind::Sqlite, Some(pool)) => {
            info!(database_url = %config.database_url, "Using SQLite reference store");
            Arc::new(SqliteReferenceStore::with_pool(pool.clone(), DEFAULT_REFERENCE_SLOT).await?)
        }
        (ReferenceStoreKind::Memory, _) => {
            info!("Using in-memory reference store");
            Arc::new(MemoryReferenceStore::new())
        }
        _ => {
            info!(path = %config.reference_path, "Using file reference store");
            Arc::new(FileReferenceStore::new(&config.reference_path))
        }
    };

    let state_store: Arc<dyn StateStore> = match (state_kind, &pool) {
        (StateStoreKind::Sqlite, Some(pool)) => {
            info!(database_url = %config.database_url, "Using SQLite state store");
            Arc::new(SqliteStateStore::with_pool(pool.clone()).await?)
        }
        _ => {
            info!("Using in-memory state store");
            Arc::new(MemoryStateStore::new())
        }
    };

    Ok((reference_store, state_store))
}

/// Builds the bot for either variant. The dialog variant gets the wizard on `state_store`.
pub fn build_proactive_bot(
    app_id: &str,
    with_dialog: bool,
    reference_store: Arc<dyn ReferenceStore<ConversationReference>>,
    state_store: Arc<dyn StateStore>,
) -> ProactiveBot {
    if with_dialog {
        let accessors = BotAccessors::new(state_store);
        let dialogs = Arc::new(DialogSet::new(&accessors));
        ProactiveBot::with_dialogs(app_id, reference_store, dialogs)
    } else {
        ProactiveBot::new(app_id, reference_store)
    }
}

/// Builds BotComponents: stores, teloxide Bot (custom API URL if set), and the bot handler.
#[instrument(skip(config))]
pub async fn build_bot_components(config: &BotConfig) -> Result<BotComponents> {
    let (reference_store, state_store) = create_stores(config.stores()).await?;

    let (teloxide_bot, service_url) = {
        let bot = Bot::new(config.bot_token());
        match config.telegram_api_url() {
            Some(url_str) => match reqwest::Url::parse(url_str) {
                Ok(url) => (bot.set_api_url(url), url_str.to_string()),
                Err(e) => {
                    error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                    (bot, DEFAULT_SERVICE_URL.to_string())
                }
            },
            None => (bot, DEFAULT_SERVICE_URL.to_string()),
        }
    };

    let proactive_bot = Arc::new(build_proactive_bot(
        &config.app_id,
        config.with_dialog,
        reference_store.clone(),
        state_store.clone(),
    ));

    Ok(BotComponents {
        teloxide_bot,
        service_url,
        reference_store,
        state_store,
        proactive_bot,
    })
}

/// Builds the handler chain (logging → proactive bot).
pub fn build_handler_chain(bot: Arc<dyn Handler>) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler::new()))
        .add_handler(bot)
}
