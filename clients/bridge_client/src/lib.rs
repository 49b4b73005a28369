//! Client for bridging NFT mints from Solana to ZetaChain.
//!
//! An [`UninitializedClient`] is turned into a [`BridgeClient`] once the bridge
//! program is confirmed to exist. The client derives the accounts each
//! instruction needs, encodes the cross-chain mint message, submits the
//! instructions in order and reports every step on a [`ProgressTracker`].

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod instructions;
pub mod progress;
pub mod record;
pub mod rpc;
pub mod signer;

#[cfg(test)]
mod test_utils;

pub use client::{BridgeClient, DepositRequest, UninitializedClient};
pub use config::{BridgeConfig, Commitment, NetworkProfile};
pub use error::{BridgeError, Result};
pub use progress::{
    ProgressError, ProgressTracker, StepStatus, TrackerSnapshot, TrackerState, TransactionStep,
};
pub use record::{TransferKind, TransferOutcome, TransferRecord};
pub use rpc::{RpcConnection, SolanaRpc};
pub use signer::TransactionSigner;
