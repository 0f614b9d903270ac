use alloy::primitives::{Address, TxHash};
use serde::{Deserialize, Serialize};
use statig::prelude::*;

/// Events fed to a transfer as each remote call finalizes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferEvent {
    Begin { pending_owner: Address },
    /// A nomination found already on-chain, e.g. left by an earlier run
    Resume { pending_owner: Address },
    NominationFinalized { tx_hash: TxHash },
    NominationFailed { reason: String },
    AcceptanceFinalized { tx_hash: TxHash },
    AcceptanceFailed { reason: String },
}

/// Coarse phase of a transfer, for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferPhase {
    NotStarted,
    PendingNomination,
    Nominated,
    Accepted,
    /// Nominated but the acceptance never finalized
    Stalled,
}

impl std::fmt::Display for TransferPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TransferPhase::NotStarted => "not started",
            TransferPhase::PendingNomination => "pending nomination",
            TransferPhase::Nominated => "nominated",
            TransferPhase::Accepted => "accepted",
            TransferPhase::Stalled => "nominated but unaccepted",
        };
        f.write_str(name)
    }
}

/// Progress of a single ownership handoff
#[derive(Debug, Default)]
pub struct TransferStateMachine {
    pub contract: Address,
    pub pending_owner: Option<Address>,
    pub nomination_tx: Option<TxHash>,
    pub acceptance_tx: Option<TxHash>,
    pub last_failure: Option<String>,
}

impl TransferStateMachine {
    pub fn new(contract: Address) -> Self {
        Self {
            contract,
            ..Default::default()
        }
    }
}

#[state_machine(
    initial = "State::not_started()",
    state(derive(Debug, Clone, PartialEq, Eq))
)]
impl TransferStateMachine {
    #[state]
    fn not_started(&mut self, event: &TransferEvent) -> Outcome<State> {
        match event {
            TransferEvent::Begin { pending_owner } => {
                self.pending_owner = Some(*pending_owner);
                self.last_failure = None;
                tracing::info!(
                    contract = %self.contract,
                    pending_owner = %pending_owner,
                    "Submitting nomination"
                );
                Transition(State::pending_nomination())
            }
            TransferEvent::Resume { pending_owner } => {
                self.pending_owner = Some(*pending_owner);
                tracing::info!(
                    contract = %self.contract,
                    pending_owner = %pending_owner,
                    "Resuming from an existing nomination"
                );
                Transition(State::nominated())
            }
            _ => Handled,
        }
    }

    #[state]
    fn pending_nomination(&mut self, event: &TransferEvent) -> Outcome<State> {
        match event {
            TransferEvent::NominationFinalized { tx_hash } => {
                self.nomination_tx = Some(*tx_hash);
                tracing::info!(
                    contract = %self.contract,
                    tx_hash = %tx_hash,
                    "Nomination finalized"
                );
                Transition(State::nominated())
            }
            TransferEvent::NominationFailed { reason } => {
                self.last_failure = Some(reason.clone());
                self.pending_owner = None;
                tracing::error!(contract = %self.contract, reason = %reason, "Nomination failed");
                Transition(State::not_started())
            }
            _ => Handled,
        }
    }

    #[state]
    fn nominated(&mut self, event: &TransferEvent) -> Outcome<State> {
        match event {
            TransferEvent::AcceptanceFinalized { tx_hash } => {
                self.acceptance_tx = Some(*tx_hash);
                tracing::info!(
                    contract = %self.contract,
                    tx_hash = %tx_hash,
                    "Ownership accepted"
                );
                Transition(State::accepted())
            }
            TransferEvent::AcceptanceFailed { reason } => {
                self.last_failure = Some(reason.clone());
                tracing::error!(
                    contract = %self.contract,
                    pending_owner = ?self.pending_owner,
                    reason = %reason,
                    "Acceptance failed, contract left with a pending owner"
                );
                Transition(State::stalled())
            }
            _ => Handled,
        }
    }

    #[state]
    fn stalled(&mut self, event: &TransferEvent) -> Outcome<State> {
        match event {
            // An operator-driven accept can still complete a stalled handoff
            TransferEvent::AcceptanceFinalized { tx_hash } => {
                self.acceptance_tx = Some(*tx_hash);
                self.last_failure = None;
                tracing::info!(
                    contract = %self.contract,
                    tx_hash = %tx_hash,
                    "Stalled transfer accepted"
                );
                Transition(State::accepted())
            }
            _ => Handled,
        }
    }

    #[state]
    fn accepted(&mut self, event: &TransferEvent) -> Outcome<State> {
        tracing::debug!(contract = %self.contract, event = ?event, "Transfer already accepted");
        Handled
    }
}

impl State {
    pub fn phase(&self) -> TransferPhase {
        match self {
            State::NotStarted {} => TransferPhase::NotStarted,
            State::PendingNomination {} => TransferPhase::PendingNomination,
            State::Nominated {} => TransferPhase::Nominated,
            State::Stalled {} => TransferPhase::Stalled,
            State::Accepted {} => TransferPhase::Accepted,
        }
    }
}
