use anyhow::Result;
use clap::Parser;

use ownership_handoff::cli::commands::accept::AcceptCommand;
use ownership_handoff::cli::commands::init_config::InitConfigCommand;
use ownership_handoff::cli::commands::status::StatusCommand;
use ownership_handoff::cli::commands::transfer::TransferCommand;
use ownership_handoff::cli::commands::Command;
use ownership_handoff::cli::{Cli, Commands};
use ownership_handoff::config::HandoffConfig;
use ownership_handoff::telemetry::init_telemetry;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Writing a fresh config must not depend on an existing one loading cleanly
    if let Some(Commands::InitConfig { path, force }) = cli.command {
        return tokio::runtime::Runtime::new()?
            .block_on(async { InitConfigCommand::new(path, force).execute().await });
    }

    let loaded_env_file = HandoffConfig::load_env_file()?;
    let config = HandoffConfig::load(cli.config.as_deref())?;
    init_telemetry(&config.observability)?;
    if loaded_env_file {
        tracing::info!("Loaded environment variables from .env file");
    }

    match cli.command {
        None => tokio::runtime::Runtime::new()?
            .block_on(async { TransferCommand::new(config).execute().await }),
        Some(Commands::Transfer {
            contract,
            priority_fee,
            dry_run,
            json,
        }) => tokio::runtime::Runtime::new()?.block_on(async {
            TransferCommand::new(config)
                .with_contract(contract)
                .with_priority_fee(priority_fee)
                .with_dry_run(dry_run)
                .with_json(json)
                .execute()
                .await
        }),
        Some(Commands::Accept {
            contract,
            priority_fee,
        }) => tokio::runtime::Runtime::new()?.block_on(async {
            AcceptCommand::new(config)
                .with_contract(contract)
                .with_priority_fee(priority_fee)
                .execute()
                .await
        }),
        Some(Commands::Status { contract, json }) => {
            tokio::runtime::Runtime::new()?.block_on(async {
                StatusCommand::new(config)
                    .with_contract(contract)
                    .with_json(json)
                    .execute()
                    .await
            })
        }
        Some(Commands::InitConfig { .. }) => Ok(()),
    }
}
