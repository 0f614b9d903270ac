use alloy::primitives::{Address, TxHash};
use thiserror::Error;

use crate::chain::ClientError;

/// A transfer step failed; remaining steps were not attempted
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransferError {
    #[error("could not resolve contract {address}: {source}")]
    Resolve {
        address: Address,
        #[source]
        source: ClientError,
    },
    #[error("could not read ownership of {contract}: {source}")]
    Snapshot {
        contract: Address,
        #[source]
        source: ClientError,
    },
    #[error("nomination of {pending_owner} failed, ownership unchanged: {source}")]
    Nomination {
        pending_owner: Address,
        #[source]
        source: ClientError,
    },
    #[error(
        "acceptance by {new_owner} failed{}; contract is left with a pending owner: {source}",
        after_nomination(.nomination_tx)
    )]
    Acceptance {
        new_owner: Address,
        nomination_tx: Option<TxHash>,
        #[source]
        source: ClientError,
    },
    #[error("{new_owner} is not the pending owner of {contract} (pending: {pending_owner})")]
    NotNominated {
        contract: Address,
        new_owner: Address,
        pending_owner: Address,
    },
}

impl TransferError {
    /// Underlying client failure, if any
    pub fn client_error(&self) -> Option<&ClientError> {
        match self {
            TransferError::Resolve { source, .. }
            | TransferError::Snapshot { source, .. }
            | TransferError::Nomination { source, .. }
            | TransferError::Acceptance { source, .. } => Some(source),
            TransferError::NotNominated { .. } => None,
        }
    }

    /// The contract holds a nomination that still needs accepting
    pub fn left_pending(&self) -> bool {
        matches!(self, TransferError::Acceptance { .. })
    }
}

fn after_nomination(nomination_tx: &Option<TxHash>) -> String {
    match nomination_tx {
        Some(hash) => format!(" after nomination {hash}"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acceptance_failure_is_flagged_as_pending() {
        let err = TransferError::Acceptance {
            new_owner: Address::repeat_byte(0x70),
            nomination_tx: Some(TxHash::ZERO),
            source: ClientError::UnknownSigner {
                address: Address::repeat_byte(0x70),
            },
        };
        assert!(err.left_pending());
        assert!(err.to_string().contains("after nomination 0x"));
        assert!(err.to_string().contains("left with a pending owner"));
        assert!(matches!(err.client_error(), Some(ClientError::UnknownSigner { .. })));
    }

    #[test]
    fn nomination_failure_leaves_nothing_pending() {
        let err = TransferError::Nomination {
            pending_owner: Address::ZERO,
            source: ClientError::reverted("setPendingOwner", None, "new owner is the zero address"),
        };
        assert!(!err.left_pending());
        assert!(err.to_string().contains("ownership unchanged"));
    }
}
