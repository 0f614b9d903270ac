use alloy::primitives::{Address, TxHash};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use statig::prelude::*;
use std::sync::Arc;
use tracing::Instrument;

use super::errors::TransferError;
use super::state_machine::{TransferEvent, TransferPhase, TransferStateMachine};
use crate::chain::{
    CallOptions, CallReceipt, ContractCall, ContractClient, ContractHandle, OwnershipSnapshot,
    Signer,
};
use crate::fees::PriorityFee;
use crate::telemetry::{create_transfer_span, generate_correlation_id};

/// Outcome of a completed handoff. Printed, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReport {
    pub correlation_id: String,
    pub contract: Address,
    pub previous_owner: Address,
    pub new_owner: Address,
    pub priority_fee: PriorityFee,
    pub nomination: CallReceipt,
    pub acceptance: CallReceipt,
    pub phase: TransferPhase,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Two-step ownership handoff against one contract
pub struct OwnershipTransfer {
    client: Arc<dyn ContractClient>,
}

impl OwnershipTransfer {
    pub fn new(client: Arc<dyn ContractClient>) -> Self {
        Self { client }
    }

    /// Resolve the contract at `address`
    pub async fn resolve(&self, address: Address) -> Result<ContractHandle, TransferError> {
        self.client
            .at(address)
            .await
            .map_err(|source| TransferError::Resolve { address, source })
    }

    /// Read the owner and pending owner slots
    pub async fn snapshot(&self, contract: &ContractHandle) -> Result<OwnershipSnapshot, TransferError> {
        let snapshot_error = |source| TransferError::Snapshot {
            contract: contract.address(),
            source,
        };
        let owner = self.client.owner(contract).await.map_err(snapshot_error)?;
        let pending_owner = self
            .client
            .pending_owner(contract)
            .await
            .map_err(snapshot_error)?;
        Ok(OwnershipSnapshot {
            owner,
            pending_owner,
        })
    }

    /// Nominate `new_owner` as `current_owner`, then accept as `new_owner`.
    ///
    /// Each call is awaited until finalized before the next one is issued. A
    /// failed nomination leaves ownership untouched; a failed acceptance leaves
    /// the contract with `new_owner` pending, which is reported and not undone.
    pub async fn transfer_ownership(
        &self,
        contract: &ContractHandle,
        current_owner: &Signer,
        new_owner: &Signer,
        priority_fee: PriorityFee,
    ) -> Result<TransferReport, TransferError> {
        let correlation_id = generate_correlation_id();
        let span = create_transfer_span(
            "transfer_ownership",
            &contract.address().to_string(),
            &correlation_id,
        );

        async move {
            let started_at = Utc::now();
            let previous_owner = self.snapshot(contract).await?.owner;
            let mut sm = TransferStateMachine::new(contract.address()).state_machine();

            tracing::info!(
                from = %current_owner,
                to = %new_owner,
                priority_fee = %priority_fee,
                "Starting ownership transfer"
            );

            sm.handle(&TransferEvent::Begin {
                pending_owner: new_owner.address(),
            });
            let nomination = match self
                .client
                .submit(
                    contract,
                    &ContractCall::SetPendingOwner {
                        pending_owner: new_owner.address(),
                    },
                    &CallOptions::new(current_owner, priority_fee),
                )
                .await
            {
                Ok(receipt) => {
                    sm.handle(&TransferEvent::NominationFinalized {
                        tx_hash: receipt.tx_hash,
                    });
                    receipt
                }
                Err(source) => {
                    sm.handle(&TransferEvent::NominationFailed {
                        reason: source.to_string(),
                    });
                    return Err(TransferError::Nomination {
                        pending_owner: new_owner.address(),
                        source,
                    });
                }
            };

            let acceptance = self
                .accept(&mut sm, contract, new_owner, priority_fee, Some(nomination.tx_hash))
                .await?;

            Ok(TransferReport {
                correlation_id: correlation_id.clone(),
                contract: contract.address(),
                previous_owner,
                new_owner: new_owner.address(),
                priority_fee,
                nomination,
                acceptance,
                phase: sm.state().phase(),
                started_at,
                finished_at: Utc::now(),
            })
        }
        .instrument(span)
        .await
    }

    /// Complete a handoff whose nomination is already on-chain.
    ///
    /// Issues a single `acceptOwnership()` as `new_owner`. Refuses to submit
    /// when the contract's pending owner is someone else.
    pub async fn accept_pending(
        &self,
        contract: &ContractHandle,
        new_owner: &Signer,
        priority_fee: PriorityFee,
    ) -> Result<CallReceipt, TransferError> {
        let correlation_id = generate_correlation_id();
        let span = create_transfer_span(
            "accept_pending",
            &contract.address().to_string(),
            &correlation_id,
        );

        async move {
            let snapshot = self.snapshot(contract).await?;
            if snapshot.pending_owner != new_owner.address() {
                return Err(TransferError::NotNominated {
                    contract: contract.address(),
                    new_owner: new_owner.address(),
                    pending_owner: snapshot.pending_owner,
                });
            }

            let mut sm = TransferStateMachine::new(contract.address()).state_machine();
            sm.handle(&TransferEvent::Resume {
                pending_owner: new_owner.address(),
            });
            self.accept(&mut sm, contract, new_owner, priority_fee, None)
                .await
        }
        .instrument(span)
        .await
    }

    async fn accept(
        &self,
        sm: &mut StateMachine<TransferStateMachine>,
        contract: &ContractHandle,
        new_owner: &Signer,
        priority_fee: PriorityFee,
        nomination_tx: Option<TxHash>,
    ) -> Result<CallReceipt, TransferError> {
        match self
            .client
            .submit(
                contract,
                &ContractCall::AcceptOwnership,
                &CallOptions::new(new_owner, priority_fee),
            )
            .await
        {
            Ok(receipt) => {
                sm.handle(&TransferEvent::AcceptanceFinalized {
                    tx_hash: receipt.tx_hash,
                });
                Ok(receipt)
            }
            Err(source) => {
                sm.handle(&TransferEvent::AcceptanceFailed {
                    reason: source.to_string(),
                });
                Err(TransferError::Acceptance {
                    new_owner: new_owner.address(),
                    nomination_tx,
                    source,
                })
            }
        }
    }
}
