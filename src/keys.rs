//! Key management for the two accounts taking part in a handoff
//!
//! Private keys are never written to configuration files. The config names an
//! environment variable per account and the keyring reads it at startup.

use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use thiserror::Error;
use tracing::debug;

use crate::chain::Signer;
use crate::config::AccountsConfig;

pub const CURRENT_OWNER: &str = "current-owner";
pub const NEW_OWNER: &str = "new-owner";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("environment variable {var} for {label} is not set")]
    MissingVariable { label: String, var: String },
    #[error("private key for {label} is invalid: {message}")]
    InvalidKey { label: String, message: String },
    #[error("no key loaded for {label}")]
    UnknownLabel { label: String },
    #[error("keyring is empty")]
    Empty,
}

/// Labelled signing keys
#[derive(Debug, Clone, Default)]
pub struct Keyring {
    keys: Vec<(String, PrivateKeySigner)>,
}

impl Keyring {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read both account keys from the environment variables named in `accounts`
    pub fn from_env(accounts: &AccountsConfig) -> Result<Self, KeyError> {
        let mut keyring = Self::new();
        keyring.load_env(CURRENT_OWNER, &accounts.current_owner_key_env)?;
        keyring.load_env(NEW_OWNER, &accounts.new_owner_key_env)?;
        Ok(keyring)
    }

    /// Read the key in `var` and register it under `label`
    pub fn load_env(&mut self, label: &str, var: &str) -> Result<Signer, KeyError> {
        let key = std::env::var(var).map_err(|_| KeyError::MissingVariable {
            label: label.to_string(),
            var: var.to_string(),
        })?;
        self.insert(label, &key)
    }

    /// Parse a hex private key and register it under `label`
    pub fn insert(&mut self, label: &str, hex_key: &str) -> Result<Signer, KeyError> {
        let key = hex_key
            .trim()
            .parse::<PrivateKeySigner>()
            .map_err(|e| KeyError::InvalidKey {
                label: label.to_string(),
                message: e.to_string(),
            })?;
        let signer = Signer::new(label, key.address());
        debug!(label = %label, address = %signer.address, "Loaded signing key");

        self.keys.retain(|(existing, _)| existing != label);
        self.keys.push((label.to_string(), key));
        Ok(signer)
    }

    pub fn signer(&self, label: &str) -> Result<Signer, KeyError> {
        self.keys
            .iter()
            .find(|(existing, _)| existing == label)
            .map(|(label, key)| Signer::new(label, key.address()))
            .ok_or_else(|| KeyError::UnknownLabel {
                label: label.to_string(),
            })
    }

    pub fn addresses(&self) -> Vec<Address> {
        self.keys.iter().map(|(_, key)| key.address()).collect()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Wallet holding every key; the first one is the default sender
    pub fn wallet(&self) -> Result<EthereumWallet, KeyError> {
        let mut keys = self.keys.iter().map(|(_, key)| key.clone());
        let first = keys.next().ok_or(KeyError::Empty)?;
        let mut wallet = EthereumWallet::new(first);
        for key in keys {
            wallet.register_signer(key);
        }
        Ok(wallet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    // Well-known development keys (anvil/hardhat accounts 0 and 1)
    const KEY_0: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const KEY_1: &str = "59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";

    #[test]
    fn derives_addresses_from_keys() {
        let mut keyring = Keyring::new();
        let owner = keyring.insert(CURRENT_OWNER, KEY_0).unwrap();
        let nominee = keyring.insert(NEW_OWNER, KEY_1).unwrap();

        assert_eq!(owner.address, address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"));
        assert_eq!(nominee.address, address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8"));
        assert_eq!(keyring.signer(NEW_OWNER).unwrap(), nominee);
        assert_eq!(keyring.len(), 2);
        assert!(keyring.wallet().is_ok());
    }

    #[test]
    fn reinserting_a_label_replaces_the_key() {
        let mut keyring = Keyring::new();
        keyring.insert(CURRENT_OWNER, KEY_0).unwrap();
        let replaced = keyring.insert(CURRENT_OWNER, KEY_1).unwrap();

        assert_eq!(keyring.len(), 1);
        assert_eq!(keyring.signer(CURRENT_OWNER).unwrap(), replaced);
    }

    #[test]
    fn rejects_malformed_keys() {
        let mut keyring = Keyring::new();
        let err = keyring.insert(NEW_OWNER, "0xnot-a-key").unwrap_err();
        assert!(matches!(err, KeyError::InvalidKey { ref label, .. } if label == NEW_OWNER));
        assert!(keyring.is_empty());
    }

    #[test]
    fn empty_keyring_has_no_wallet_or_signers() {
        let keyring = Keyring::new();
        assert!(matches!(keyring.wallet(), Err(KeyError::Empty)));
        assert!(matches!(keyring.signer(CURRENT_OWNER), Err(KeyError::UnknownLabel { .. })));
    }

    #[test]
    fn missing_environment_variable_is_reported() {
        let accounts = AccountsConfig {
            current_owner_key_env: "OWNERSHIP_HANDOFF_TEST_UNSET_OWNER_KEY".to_string(),
            new_owner_key_env: "OWNERSHIP_HANDOFF_TEST_UNSET_NOMINEE_KEY".to_string(),
        };
        let err = Keyring::from_env(&accounts).unwrap_err();
        assert_eq!(
            err,
            KeyError::MissingVariable {
                label: CURRENT_OWNER.to_string(),
                var: "OWNERSHIP_HANDOFF_TEST_UNSET_OWNER_KEY".to_string(),
            }
        );
    }
}
