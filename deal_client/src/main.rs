use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use deal_client::{
    controller::settle_time,
    interactive::{BrowseApp, ConsolePresenter, TerminalCheckout, TerminalController},
    view::CardKey,
    ClientConfig,
    DealController,
    DealServerClient,
    LoadOutcome,
    UnlockOutcome,
};
use deal_engine::{
    deal_types::{DealId, Platform},
    filter::PlatformFilter,
};
use log::*;

#[derive(Parser, Debug)]
#[command(version = "0.1.0", about = "Browse and unlock DealStream deals from the terminal")]
pub struct Arguments {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the current deals
    #[clap(name = "list")]
    List {
        /// Only show deals from this platform ("all" for every platform)
        #[arg(short = 'p', long = "platform", default_value = "all")]
        platform: PlatformFilter,
        /// Bypass the server's deal cache
        #[arg(short = 'r', long = "refresh")]
        refresh: bool,
    },
    /// Pay the unlock fee for a deal and receive its link
    #[clap(name = "unlock")]
    Unlock { deal_id: String, platform: Platform },
    /// Check that the DealStream server is up
    #[clap(name = "health")]
    Health,
    /// Browse deals interactively
    #[clap(name = "browse")]
    Browse,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();
    let cli = Arguments::parse();
    let config = ClientConfig::from_env_or_default();
    let client = DealServerClient::new(config.server_url.clone())?;
    info!("Using DealStream server at {client}");
    match cli.command {
        Command::List { platform, refresh } => {
            let controller = terminal_controller(client, &config).with_filter(platform);
            match controller.load_deals(refresh).await {
                LoadOutcome::Failed => Err(anyhow!("Could not load deals from {}", config.server_url)),
                _ => Ok(()),
            }
        },
        Command::Unlock { deal_id, platform } => {
            let controller = terminal_controller(client, &config).with_filter(PlatformFilter::Only(platform));
            controller.load_deals(false).await;
            let key = CardKey::new(DealId::new(deal_id), platform);
            match controller.unlock(&key).await {
                UnlockOutcome::Unlocked { .. } => {
                    tokio::time::sleep(settle_time(controller.timings())).await;
                    Ok(())
                },
                UnlockOutcome::Failed => Err(anyhow!("The deal was not unlocked")),
                outcome => {
                    debug!("Unlock finished with {outcome:?}");
                    Ok(())
                },
            }
        },
        Command::Health => {
            let health = client.health().await?;
            println!("{} is {} ({})", client, health.status, health.timestamp);
            Ok(())
        },
        Command::Browse => BrowseApp::new(terminal_controller(client, &config)).run().await,
    }
}

fn terminal_controller(client: DealServerClient, config: &ClientConfig) -> TerminalController {
    DealController::from_config(client, TerminalCheckout, ConsolePresenter::default(), config)
}
