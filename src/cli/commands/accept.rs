use anyhow::Result;

use super::{Command, CommandContext};
use crate::config::HandoffConfig;
use crate::keys::NEW_OWNER;
use crate::workflows::OwnershipTransfer;

/// Finish a handoff whose `setPendingOwner` already landed
pub struct AcceptCommand {
    context: CommandContext,
    contract: Option<String>,
    priority_fee: Option<String>,
}

impl AcceptCommand {
    pub fn new(config: HandoffConfig) -> Self {
        Self {
            context: CommandContext::new(config),
            contract: None,
            priority_fee: None,
        }
    }

    pub fn with_contract(mut self, contract: Option<String>) -> Self {
        self.contract = contract;
        self
    }

    pub fn with_priority_fee(mut self, priority_fee: Option<String>) -> Self {
        self.priority_fee = priority_fee;
        self
    }
}

impl Command for AcceptCommand {
    async fn execute(&self) -> Result<()> {
        let contract = self.context.contract_address(self.contract.as_deref())?;
        let priority_fee = self.context.priority_fee(self.priority_fee.as_deref())?;
        let keyring = self.context.nominee_keyring()?;
        let new_owner = keyring.signer(NEW_OWNER)?;

        let workflow = OwnershipTransfer::new(self.context.rpc_client(&keyring)?);
        let handle = workflow.resolve(contract).await?;
        self.context
            .progress(&format!("🔑 Accepting ownership of {handle} as {new_owner}"));

        let receipt = workflow
            .accept_pending(&handle, &new_owner, priority_fee)
            .await?;

        println!("✅ {} now owns {handle}", new_owner.address());
        println!("   📝 {}: {}", receipt.method, receipt.tx_hash);
        if let Some(block) = receipt.block_number {
            println!("   📦 Block: {block}");
        }
        Ok(())
    }
}
