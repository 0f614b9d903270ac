use alloy::primitives::{Address, TxHash};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::fees::PriorityFee;

/// A deployed contract, identified by its on-chain address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractHandle {
    address: Address,
}

impl ContractHandle {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    pub fn address(&self) -> Address {
        self.address
    }
}

impl fmt::Display for ContractHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address)
    }
}

/// An account that can authorize calls. Carries no key material.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signer {
    pub label: String,
    pub address: Address,
}

impl Signer {
    pub fn new(label: &str, address: Address) -> Self {
        Self {
            label: label.to_string(),
            address,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }
}

impl fmt::Display for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.address)
    }
}

/// Per-call settings, built fresh for every submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallOptions {
    pub sender: Signer,
    pub priority_fee: PriorityFee,
}

impl CallOptions {
    pub fn new(sender: &Signer, priority_fee: PriorityFee) -> Self {
        Self {
            sender: sender.clone(),
            priority_fee,
        }
    }
}

/// State-changing calls understood by a two-step ownable contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractCall {
    SetPendingOwner { pending_owner: Address },
    AcceptOwnership,
}

impl ContractCall {
    /// Solidity method name
    pub fn method(&self) -> &'static str {
        match self {
            ContractCall::SetPendingOwner { .. } => "setPendingOwner",
            ContractCall::AcceptOwnership => "acceptOwnership",
        }
    }
}

impl fmt::Display for ContractCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractCall::SetPendingOwner { pending_owner } => {
                write!(f, "setPendingOwner({pending_owner})")
            }
            ContractCall::AcceptOwnership => write!(f, "acceptOwnership()"),
        }
    }
}

/// A call that was finalized successfully
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallReceipt {
    pub method: String,
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
}

/// Ownership slots as read from the contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipSnapshot {
    pub owner: Address,
    pub pending_owner: Address,
}

impl OwnershipSnapshot {
    /// Pending owner, if a transfer is in flight
    pub fn pending(&self) -> Option<Address> {
        if self.pending_owner == Address::ZERO {
            None
        } else {
            Some(self.pending_owner)
        }
    }
}
