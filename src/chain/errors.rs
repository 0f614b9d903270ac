use alloy::primitives::{Address, TxHash};
use thiserror::Error;

/// Failures reported by a contract client
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("no key registered for signer {address}")]
    UnknownSigner { address: Address },
    #[error("signing unavailable: {message}")]
    Signing { message: String },
    #[error("no contract code deployed at {address}")]
    NoCode { address: Address },
    #[error("invalid RPC endpoint '{url}': {message}")]
    InvalidEndpoint { url: String, message: String },
    #[error("transport error: {message}")]
    Transport { message: String },
    #[error("{method} rejected: {message}")]
    Rejected { method: String, message: String },
    #[error("{method} reverted{}: {reason}", in_tx(.tx_hash))]
    Reverted {
        method: String,
        tx_hash: Option<TxHash>,
        reason: String,
    },
}

impl ClientError {
    pub fn reverted(method: &str, tx_hash: Option<TxHash>, reason: &str) -> Self {
        ClientError::Reverted {
            method: method.to_string(),
            tx_hash,
            reason: reason.to_string(),
        }
    }

    /// Whether the call reached the contract and was refused by it
    pub fn is_revert(&self) -> bool {
        matches!(self, ClientError::Reverted { .. })
    }
}

fn in_tx(tx_hash: &Option<TxHash>) -> String {
    match tx_hash {
        Some(hash) => format!(" in {hash}"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revert_message_mentions_transaction_when_known() {
        let err = ClientError::reverted("acceptOwnership", Some(TxHash::ZERO), "caller is not pending owner");
        let message = err.to_string();
        assert!(message.starts_with("acceptOwnership reverted in 0x"));
        assert!(message.ends_with(": caller is not pending owner"));
        assert!(err.is_revert());

        let err = ClientError::reverted("setPendingOwner", None, "caller is not the owner");
        assert_eq!(err.to_string(), "setPendingOwner reverted: caller is not the owner");
    }
}
