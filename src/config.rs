use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::fees::DEFAULT_PRIORITY_FEE;

pub const CONFIG_FILE: &str = "ownership-handoff.toml";
pub const ENV_PREFIX: &str = "OWNERSHIP_HANDOFF";

/// Main configuration structure for an ownership handoff
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HandoffConfig {
    /// Node connection
    pub network: NetworkConfig,
    /// Contract whose ownership is handed over
    pub contract: ContractConfig,
    /// Where the two signing keys come from
    pub accounts: AccountsConfig,
    /// Transaction fee settings
    pub fees: FeeConfig,
    /// Logging settings
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NetworkConfig {
    /// JSON-RPC endpoint
    pub rpc_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContractConfig {
    /// Deployed contract address (hex)
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AccountsConfig {
    /// Environment variable holding the current owner's private key
    pub current_owner_key_env: String,
    /// Environment variable holding the new owner's private key
    pub new_owner_key_env: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FeeConfig {
    /// Max priority fee per gas, e.g. "100 gwei"
    pub priority_fee: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level or `EnvFilter` directives
    pub log_level: String,
    /// Emit JSON log lines instead of human-readable ones
    pub json_logs: bool,
}

impl Default for HandoffConfig {
    fn default() -> Self {
        Self {
            network: NetworkConfig {
                rpc_url: "http://127.0.0.1:8545".to_string(),
            },
            contract: ContractConfig {
                address: "0xdc64a140aa3e981100a9beca4e685f962f0cf6c9".to_string(),
            },
            accounts: AccountsConfig {
                current_owner_key_env: "CURRENT_OWNER_PRIVATE_KEY".to_string(),
                new_owner_key_env: "NEW_OWNER_PRIVATE_KEY".to_string(),
            },
            fees: FeeConfig {
                priority_fee: DEFAULT_PRIORITY_FEE.to_string(),
            },
            observability: ObservabilityConfig {
                log_level: "info".to_string(),
                json_logs: true,
            },
        }
    }
}

impl HandoffConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration file (`explicit`, or ownership-handoff.toml when present)
    /// 3. Environment variables (prefixed with OWNERSHIP_HANDOFF__)
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::load_with_env(explicit, None)
    }

    /// `load`, reading the environment layer from `env_vars` instead of the
    /// process environment when given
    pub fn load_with_env(
        explicit: Option<&Path>,
        env_vars: Option<HashMap<String, String>>,
    ) -> Result<Self> {
        let defaults = Config::try_from(&HandoffConfig::default())?;
        let mut builder = Config::builder().add_source(defaults);

        match explicit {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("configuration file {} does not exist", path.display());
                }
                builder = builder.add_source(File::from(path));
            }
            None => {
                if Path::new(CONFIG_FILE).exists() {
                    builder = builder.add_source(File::with_name(CONFIG_FILE));
                }
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .source(env_vars),
        );

        let config = builder.build().context("Failed to build configuration")?;
        let handoff_config: HandoffConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        Ok(handoff_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_content = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_content)?;
        Ok(())
    }

    /// Load ./.env if it exists. Returns whether a file was loaded.
    pub fn load_env_file() -> Result<bool> {
        Self::load_env_file_from(Path::new("."))
    }

    /// Load `.env` from `dir` if it exists, without overriding set variables
    pub fn load_env_file_from(dir: &Path) -> Result<bool> {
        let path = dir.join(".env");
        if !path.exists() {
            return Ok(false);
        }
        dotenvy::from_path(&path)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_operator_script() {
        let config = HandoffConfig::default();
        assert_eq!(config.contract.address, "0xdc64a140aa3e981100a9beca4e685f962f0cf6c9");
        assert_eq!(config.fees.priority_fee, "100 gwei");
        assert_eq!(config.network.rpc_url, "http://127.0.0.1:8545");
    }

    #[test]
    fn file_overrides_defaults_and_keeps_the_rest() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("handoff.toml");
        std::fs::write(
            &path,
            "[contract]\naddress = \"0x5FbDB2315678afecb367f032d93F642f64180aa3\"\n\n[fees]\npriority_fee = \"2 gwei\"\n",
        )
        .unwrap();

        let config = HandoffConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(config.contract.address, "0x5FbDB2315678afecb367f032d93F642f64180aa3");
        assert_eq!(config.fees.priority_fee, "2 gwei");
        assert_eq!(config.accounts, HandoffConfig::default().accounts);
    }

    #[test]
    fn environment_overrides_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("handoff.toml");
        std::fs::write(&path, "[fees]\npriority_fee = \"2 gwei\"\n").unwrap();

        let env_vars = HashMap::from([
            (
                "OWNERSHIP_HANDOFF__FEES__PRIORITY_FEE".to_string(),
                "9 gwei".to_string(),
            ),
            (
                "OWNERSHIP_HANDOFF__CONTRACT__ADDRESS".to_string(),
                "0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string(),
            ),
        ]);
        let config = HandoffConfig::load_with_env(Some(path.as_path()), Some(env_vars)).unwrap();

        assert_eq!(config.fees.priority_fee, "9 gwei");
        assert_eq!(config.contract.address, "0x5FbDB2315678afecb367f032d93F642f64180aa3");
        assert_eq!(config.network, HandoffConfig::default().network);
    }

    #[test]
    fn env_file_is_loaded_only_when_present() {
        let dir = TempDir::new().unwrap();
        assert!(!HandoffConfig::load_env_file_from(dir.path()).unwrap());

        std::fs::write(
            dir.path().join(".env"),
            "OWNERSHIP_HANDOFF_TEST_DOTENV_MARKER=loaded\n",
        )
        .unwrap();
        assert!(HandoffConfig::load_env_file_from(dir.path()).unwrap());
        assert_eq!(
            std::env::var("OWNERSHIP_HANDOFF_TEST_DOTENV_MARKER").unwrap(),
            "loaded"
        );
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = HandoffConfig::load(Some(dir.path().join("absent.toml").as_path())).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn saved_config_round_trips_through_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("saved.toml");
        let mut config = HandoffConfig::default();
        config.observability.json_logs = false;
        config.save_to_file(&path).unwrap();

        assert_eq!(HandoffConfig::load(Some(path.as_path())).unwrap(), config);
    }
}
