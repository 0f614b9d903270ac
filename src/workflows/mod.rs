// Ownership handoff workflow: nominate, then accept, one finalized call at a time

pub mod errors;
pub mod state_machine;
pub mod transfer;

pub use errors::TransferError;
pub use state_machine::{TransferEvent, TransferPhase, TransferStateMachine};
pub use transfer::{OwnershipTransfer, TransferReport};
