//! REPL runner: converts teloxide messages to activities and passes each turn to the HandlerChain.

use anyhow::Result;
use bot_core::{Adapter, TurnContext};
use handler_chain::HandlerChain;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{error, info, instrument};

use super::adapters::{TelegramMessageWrapper, TelegramUserWrapper};
use super::bot_adapter::TelegramAdapter;

/// Starts the REPL with the given teloxide Bot and HandlerChain.
/// Calls get_me() first to learn the bot's own account; each message becomes a turn handled in a
/// spawned task.
#[instrument(skip(bot, handler_chain))]
pub async fn run_repl(
    bot: teloxide::Bot,
    handler_chain: HandlerChain,
    service_url: String,
) -> Result<()> {
    let me = bot.get_me().await?;
    let bot_account = TelegramUserWrapper(&me.user).to_account();
    info!(
        bot_id = %bot_account.id,
        username = ?me.user.username,
        "Bot account resolved before repl"
    );

    let adapter: Arc<dyn Adapter> = Arc::new(TelegramAdapter::new(bot.clone()));
    let bot_account = Arc::new(bot_account);
    let service_url = Arc::new(service_url);
    let chain = handler_chain;

    teloxide::repl(bot, move |_bot: Bot, msg: teloxide::types::Message| {
        let chain = chain.clone();
        let adapter = adapter.clone();
        let bot_account = bot_account.clone();
        let service_url = service_url.clone();

        async move {
            let activity =
                TelegramMessageWrapper::new(&msg, &bot_account, &service_url).to_activity();

            info!(
                user_id = %activity.from.id,
                chat_id = %activity.conversation.id,
                kind = ?activity.kind,
                "Received message"
            );

            // Run handler chain in a spawned task so REPL returns immediately
            tokio::spawn(async move {
                let turn = TurnContext::new(adapter, activity);
                info!(
                    chat_id = %turn.activity().conversation.id,
                    message_id = ?turn.activity().id,
                    "step: processing activity (handler chain started)"
                );
                if let Err(e) = chain.handle(&turn).await {
                    error!(
                        error = %e,
                        chat_id = %turn.activity().conversation.id,
                        "Handler chain failed"
                    );
                }
            });

            Ok(())
        }
    })
    .await;

    Ok(())
}
