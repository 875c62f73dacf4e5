//! proactive-bot binary: run the bot or inspect the stored conversation reference.

use anyhow::Result;
use clap::Parser;
use proactive_bot::{load_config, run_bot, show_reference, Cli, Commands, StoreConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token, single_flow } => {
            let config = load_config(token, single_flow)?;
            run_bot(config).await
        }
        Commands::ShowReference => {
            let stores = StoreConfig::from_env()?;
            println!("{}", show_reference(&stores).await?);
            Ok(())
        }
    }
}
