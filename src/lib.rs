// Ownership Handoff - two-step contract ownership transfer
// This exposes the core components for testing and integration

pub mod chain;
pub mod cli;
pub mod config;
pub mod fees;
pub mod keys;
pub mod telemetry;
pub mod workflows;

// Re-export key types for easy access
pub use chain::{
    AlloyContractClient, CallOptions, CallReceipt, ClientError, ContractCall, ContractClient,
    ContractHandle, InMemoryOwnableContract, OwnershipSnapshot, RecordedCall, Signer,
};
pub use config::HandoffConfig;
pub use fees::{FeeError, PriorityFee};
pub use keys::{KeyError, Keyring};
pub use telemetry::{create_transfer_span, generate_correlation_id, init_telemetry};
pub use workflows::{
    OwnershipTransfer, TransferError, TransferEvent, TransferPhase, TransferReport,
    TransferStateMachine,
};
