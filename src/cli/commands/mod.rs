use alloy::primitives::Address;
use anyhow::{Context, Result};
use std::sync::Arc;

use crate::chain::{
    AlloyContractClient, ClientError, ContractClient, InMemoryOwnableContract, Signer,
};
use crate::config::HandoffConfig;
use crate::fees::PriorityFee;
use crate::keys::{Keyring, CURRENT_OWNER, NEW_OWNER};

pub mod accept;
pub mod init_config;
pub mod status;
pub mod transfer;

#[allow(async_fn_in_trait)]
pub trait Command {
    async fn execute(&self) -> Result<()>;
}

/// Inputs shared by every command that talks to the contract
pub struct CommandContext {
    pub config: HandoffConfig,
    /// Keep stdout clean for machine-readable output
    pub quiet: bool,
}

impl CommandContext {
    pub fn new(config: HandoffConfig) -> Self {
        Self {
            config,
            quiet: false,
        }
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Progress line on stdout, suppressed in quiet mode
    pub fn progress(&self, line: &str) {
        if !self.quiet {
            println!("{line}");
        }
    }

    /// `--contract` when given, the configured address otherwise
    pub fn contract_address(&self, contract: Option<&str>) -> Result<Address> {
        let raw = contract.unwrap_or(&self.config.contract.address);
        raw.trim()
            .parse::<Address>()
            .with_context(|| format!("Invalid contract address '{raw}'"))
    }

    /// `--priority-fee` when given, the configured fee otherwise
    pub fn priority_fee(&self, priority_fee: Option<&str>) -> Result<PriorityFee> {
        let raw = priority_fee.unwrap_or(&self.config.fees.priority_fee);
        raw.parse::<PriorityFee>()
            .with_context(|| format!("Invalid priority fee '{raw}'"))
    }

    pub fn keyring(&self) -> Result<Keyring> {
        Keyring::from_env(&self.config.accounts).context("Failed to load signing keys")
    }

    /// Only the new owner's key, for finishing a pending handoff
    pub fn nominee_keyring(&self) -> Result<Keyring> {
        let mut keyring = Keyring::new();
        keyring
            .load_env(NEW_OWNER, &self.config.accounts.new_owner_key_env)
            .context("Failed to load the new owner's signing key")?;
        Ok(keyring)
    }

    pub fn signers(&self, keyring: &Keyring) -> Result<(Signer, Signer)> {
        Ok((keyring.signer(CURRENT_OWNER)?, keyring.signer(NEW_OWNER)?))
    }

    /// JSON-RPC client for the configured node, signing with `keyring`
    pub fn rpc_client(&self, keyring: &Keyring) -> Result<Arc<dyn ContractClient>> {
        self.connect(|url| AlloyContractClient::connect(url, keyring))
    }

    /// JSON-RPC client that only reads contract state
    pub fn read_only_client(&self) -> Result<Arc<dyn ContractClient>> {
        self.connect(AlloyContractClient::read_only)
    }

    fn connect<F>(&self, build: F) -> Result<Arc<dyn ContractClient>>
    where
        F: FnOnce(&str) -> Result<AlloyContractClient, ClientError>,
    {
        let rpc_url = &self.config.network.rpc_url;
        if !self.quiet {
            print!("🔄 Connecting to {rpc_url}... ");
            std::io::Write::flush(&mut std::io::stdout())?;
        }

        match build(rpc_url) {
            Ok(client) => {
                self.progress("✅");
                Ok(Arc::new(client))
            }
            Err(e) => {
                self.progress("❌");
                Err(e).context("Failed to create contract client")
            }
        }
    }

    /// In-memory contract owned by `owner` that accepts both signers
    pub fn dry_run_client(
        &self,
        contract: Address,
        owner: &Signer,
        nominee: &Signer,
    ) -> Arc<dyn ContractClient> {
        self.progress("🧪 Dry run: using an in-memory contract, nothing is sent to the network");
        Arc::new(
            InMemoryOwnableContract::new(contract, owner.address())
                .with_signers(&[owner.address(), nominee.address()]),
        )
    }
}
