//! Contract client abstraction
//!
//! The ownership workflow never talks to a node directly. It goes through
//! [`ContractClient`], which resolves a contract by address and submits signed
//! calls, blocking until each one is finalized. The RPC implementation lives in
//! [`client`]; [`memory`] provides an in-memory two-step ownable contract.

pub mod client;
pub mod errors;
pub mod memory;
pub mod types;

pub use client::AlloyContractClient;
pub use errors::ClientError;
pub use memory::{InMemoryOwnableContract, RecordedCall};
pub use types::{CallOptions, CallReceipt, ContractCall, ContractHandle, OwnershipSnapshot, Signer};

use alloy::primitives::Address;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

/// Capability to reach a deployed two-step ownable contract
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ContractClient: Send + Sync {
    /// Resolve the contract deployed at `address`
    async fn at(&self, address: Address) -> Result<ContractHandle, ClientError>;

    /// Sign and submit `call`, waiting until it is finalized
    async fn submit(
        &self,
        contract: &ContractHandle,
        call: &ContractCall,
        options: &CallOptions,
    ) -> Result<CallReceipt, ClientError>;

    /// Current owner
    async fn owner(&self, contract: &ContractHandle) -> Result<Address, ClientError>;

    /// Nominated owner, zero when none
    async fn pending_owner(&self, contract: &ContractHandle) -> Result<Address, ClientError>;
}
