use anyhow::Result;
use std::path::PathBuf;

use super::Command;
use crate::config::HandoffConfig;

/// Writes the built-in defaults as a starting configuration file
pub struct InitConfigCommand {
    path: PathBuf,
    force: bool,
}

impl InitConfigCommand {
    pub fn new(path: PathBuf, force: bool) -> Self {
        Self { path, force }
    }
}

impl Command for InitConfigCommand {
    async fn execute(&self) -> Result<()> {
        if self.path.exists() && !self.force {
            anyhow::bail!(
                "{} already exists; pass --force to overwrite it",
                self.path.display()
            );
        }

        HandoffConfig::default().save_to_file(&self.path)?;
        println!("📝 Wrote default configuration to {}", self.path.display());
        println!("   🔐 Keys are read from the environment variables named under [accounts]");
        Ok(())
    }
}
