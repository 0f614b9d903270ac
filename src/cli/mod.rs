use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

#[derive(Parser)]
#[command(name = "ownership-handoff")]
#[command(about = "Two-step ownership handoff for a deployed contract")]
#[command(long_about = "Transfers ownership of a deployed contract: the current owner nominates \
                       a pending owner with setPendingOwner, then the nominee calls acceptOwnership. \
                       Run without a subcommand to perform the configured transfer once.")]
pub struct Cli {
    /// Configuration file (defaults to ./ownership-handoff.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Nominate the new owner and accept ownership as the new owner
    Transfer {
        /// Contract address, overriding the configured one
        #[arg(long, help = "Address of the contract to hand over")]
        contract: Option<String>,
        /// Priority fee, e.g. "100 gwei"
        #[arg(long, help = "Max priority fee per gas, e.g. '100 gwei' or a wei amount")]
        priority_fee: Option<String>,
        /// Run against an in-memory contract instead of the network
        #[arg(long, help = "Preview the calls against an in-memory contract; nothing is sent")]
        dry_run: bool,
        /// Print the transfer report as JSON
        #[arg(long, help = "Print the transfer report as JSON")]
        json: bool,
    },
    /// Accept a nomination left pending by an earlier, interrupted transfer
    Accept {
        /// Contract address, overriding the configured one
        #[arg(long, help = "Address of the contract to hand over")]
        contract: Option<String>,
        /// Priority fee, e.g. "100 gwei"
        #[arg(long, help = "Max priority fee per gas, e.g. '100 gwei' or a wei amount")]
        priority_fee: Option<String>,
    },
    /// Show the contract's owner and pending owner
    Status {
        /// Contract address, overriding the configured one
        #[arg(long, help = "Address of the contract to inspect")]
        contract: Option<String>,
        /// Print the ownership snapshot as JSON
        #[arg(long, help = "Print the ownership snapshot as JSON")]
        json: bool,
    },
    /// Write the default configuration to a file
    InitConfig {
        /// Destination file
        #[arg(long, default_value = crate::config::CONFIG_FILE, help = "Where to write the configuration")]
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long, help = "Overwrite the file if it already exists")]
        force: bool,
    },
}
