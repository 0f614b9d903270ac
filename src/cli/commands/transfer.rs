use anyhow::Result;

use super::{Command, CommandContext};
use crate::config::HandoffConfig;
use crate::workflows::{OwnershipTransfer, TransferReport};

pub struct TransferCommand {
    context: CommandContext,
    contract: Option<String>,
    priority_fee: Option<String>,
    dry_run: bool,
    json: bool,
}

impl TransferCommand {
    pub fn new(config: HandoffConfig) -> Self {
        Self {
            context: CommandContext::new(config),
            contract: None,
            priority_fee: None,
            dry_run: false,
            json: false,
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

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self.context = self.context.with_quiet(json);
        self
    }

    fn print_report(&self, report: &TransferReport) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(report)?);
            return Ok(());
        }

        println!();
        println!("✅ OWNERSHIP TRANSFERRED");
        println!("════════════════════════");
        println!("   📜 Contract:       {}", report.contract);
        println!("   👤 Previous owner: {}", report.previous_owner);
        println!("   👑 New owner:      {}", report.new_owner);
        println!("   ⛽ Priority fee:   {}", report.priority_fee);
        println!(
            "   📝 {}: {}{}",
            report.nomination.method,
            report.nomination.tx_hash,
            block_suffix(report.nomination.block_number)
        );
        println!(
            "   📝 {}: {}{}",
            report.acceptance.method,
            report.acceptance.tx_hash,
            block_suffix(report.acceptance.block_number)
        );
        println!("   🔖 Correlation ID: {}", report.correlation_id);
        Ok(())
    }
}

impl Command for TransferCommand {
    async fn execute(&self) -> Result<()> {
        let contract = self.context.contract_address(self.contract.as_deref())?;
        let priority_fee = self.context.priority_fee(self.priority_fee.as_deref())?;
        let keyring = self.context.keyring()?;
        let (current_owner, new_owner) = self.context.signers(&keyring)?;

        let client = if self.dry_run {
            self.context
                .dry_run_client(contract, &current_owner, &new_owner)
        } else {
            self.context.rpc_client(&keyring)?
        };
        let workflow = OwnershipTransfer::new(client);

        let handle = workflow.resolve(contract).await?;
        self.context.progress(&format!(
            "🔑 Handing {handle} from {current_owner} to {new_owner} at {priority_fee}"
        ));

        match workflow
            .transfer_ownership(&handle, &current_owner, &new_owner, priority_fee)
            .await
        {
            Ok(report) => self.print_report(&report),
            Err(e) => {
                if e.left_pending() {
                    eprintln!(
                        "⚠️  {} is now the pending owner of {handle}; run 'ownership-handoff accept' once its key is available",
                        new_owner.address()
                    );
                }
                Err(e.into())
            }
        }
    }
}

fn block_suffix(block_number: Option<u64>) -> String {
    match block_number {
        Some(block) => format!(" (block {block})"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_suffix_is_omitted_when_unknown() {
        assert_eq!(block_suffix(Some(7)), " (block 7)");
        assert_eq!(block_suffix(None), "");
    }

    #[test]
    fn json_output_silences_progress() {
        let command = TransferCommand::new(HandoffConfig::default()).with_json(true);
        assert!(command.context.quiet);

        let command = TransferCommand::new(HandoffConfig::default()).with_dry_run(true);
        assert!(!command.context.quiet);
        assert!(command.dry_run);
    }
}
