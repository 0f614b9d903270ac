// In-memory two-step ownable contract - no network, no side effects

use alloy::primitives::{keccak256, Address};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

use super::{
    CallOptions, CallReceipt, ClientError, ContractCall, ContractClient, ContractHandle,
    OwnershipSnapshot,
};
use crate::fees::PriorityFee;

/// A call that reached the contract, whether or not it succeeded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub contract: Address,
    pub call: ContractCall,
    pub from: Address,
    pub priority_fee: PriorityFee,
}

#[derive(Debug)]
struct LedgerState {
    owner: Address,
    pending_owner: Address,
    signers: HashSet<Address>,
    failures: HashMap<String, ClientError>,
    calls: Vec<RecordedCall>,
    block_number: u64,
}

/// Single contract with `setPendingOwner` / `acceptOwnership` semantics
#[derive(Debug)]
pub struct InMemoryOwnableContract {
    address: Address,
    state: Mutex<LedgerState>,
}

impl InMemoryOwnableContract {
    pub fn new(address: Address, owner: Address) -> Self {
        Self {
            address,
            state: Mutex::new(LedgerState {
                owner,
                pending_owner: Address::ZERO,
                signers: HashSet::new(),
                failures: HashMap::new(),
                calls: Vec::new(),
                block_number: 0,
            }),
        }
    }

    pub fn with_signers(self, signers: &[Address]) -> Self {
        for signer in signers {
            self.register_signer(*signer);
        }
        self
    }

    /// Make `signer` able to authorize calls
    pub fn register_signer(&self, signer: Address) {
        self.state().signers.insert(signer);
    }

    /// The next submission of `method` fails with `error` after reaching the contract
    pub fn fail_next(&self, method: &str, error: ClientError) {
        self.state().failures.insert(method.to_string(), error);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state().calls.clone()
    }

    pub fn snapshot(&self) -> OwnershipSnapshot {
        let state = self.state();
        OwnershipSnapshot {
            owner: state.owner,
            pending_owner: state.pending_owner,
        }
    }

    fn state(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_contract(&self, contract: &ContractHandle) -> Result<(), ClientError> {
        if contract.address() != self.address {
            return Err(ClientError::NoCode {
                address: contract.address(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ContractClient for InMemoryOwnableContract {
    async fn at(&self, address: Address) -> Result<ContractHandle, ClientError> {
        let handle = ContractHandle::new(address);
        self.check_contract(&handle)?;
        Ok(handle)
    }

    async fn submit(
        &self,
        contract: &ContractHandle,
        call: &ContractCall,
        options: &CallOptions,
    ) -> Result<CallReceipt, ClientError> {
        self.check_contract(contract)?;
        let from = options.sender.address();
        let method = call.method();

        let mut state = self.state();
        if !state.signers.contains(&from) {
            return Err(ClientError::UnknownSigner { address: from });
        }

        state.calls.push(RecordedCall {
            contract: self.address,
            call: call.clone(),
            from,
            priority_fee: options.priority_fee,
        });
        let nonce = state.calls.len() as u64;
        let tx_hash = keccak256(nonce.to_be_bytes());

        if let Some(error) = state.failures.remove(method) {
            debug!(method, %from, "Injected failure");
            return Err(error);
        }

        match call {
            ContractCall::SetPendingOwner { pending_owner } => {
                if from != state.owner {
                    return Err(ClientError::reverted(method, Some(tx_hash), "caller is not the owner"));
                }
                if *pending_owner == Address::ZERO {
                    return Err(ClientError::reverted(
                        method,
                        Some(tx_hash),
                        "new owner is the zero address",
                    ));
                }
                state.pending_owner = *pending_owner;
            }
            ContractCall::AcceptOwnership => {
                if state.pending_owner == Address::ZERO || from != state.pending_owner {
                    return Err(ClientError::reverted(
                        method,
                        Some(tx_hash),
                        "caller is not pending owner",
                    ));
                }
                state.owner = state.pending_owner;
                state.pending_owner = Address::ZERO;
            }
        }

        state.block_number += 1;
        debug!(method, %from, block = state.block_number, "Call applied");
        Ok(CallReceipt {
            method: method.to_string(),
            tx_hash,
            block_number: Some(state.block_number),
        })
    }

    async fn owner(&self, contract: &ContractHandle) -> Result<Address, ClientError> {
        self.check_contract(contract)?;
        Ok(self.state().owner)
    }

    async fn pending_owner(&self, contract: &ContractHandle) -> Result<Address, ClientError> {
        self.check_contract(contract)?;
        Ok(self.state().pending_owner)
    }
}
