use anchor_lang::prelude::Pubkey;
use chrono::{DateTime, Utc};
use common::UniqueId;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransferKind {
    NativeDeposit,
    TokenDeposit,
    Withdraw,
    RemoteMint,
    DepositAndMint,
    InboundCall,
    RevertedCall,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum TransferOutcome {
    Success,
    /// An earlier phase landed on chain and stays there.
    PartialFailure { failed_phase: String, reason: String },
    Failure { reason: String },
}

/// One entry of the client's transfer history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferRecord {
    pub kind: TransferKind,
    pub amount: u64,
    /// Hex EVM address for outbound transfers, base58 Solana key otherwise.
    pub recipient: String,
    pub mint: Option<String>,
    /// Signatures of every confirmed phase, in submission order.
    pub tx_hashes: Vec<String>,
    pub unique_id: Option<UniqueId>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcome: TransferOutcome,
}

impl TransferRecord {
    pub fn is_success(&self) -> bool {
        self.outcome == TransferOutcome::Success
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// A transfer that started but has no outcome yet.
pub(crate) struct PendingRecord {
    kind: TransferKind,
    amount: u64,
    recipient: String,
    mint: Option<String>,
    unique_id: Option<UniqueId>,
    started_at: DateTime<Utc>,
}

impl PendingRecord {
    pub(crate) fn new(kind: TransferKind, amount: u64, recipient: impl Into<String>) -> Self {
        Self {
            kind,
            amount,
            recipient: recipient.into(),
            mint: None,
            unique_id: None,
            started_at: Utc::now(),
        }
    }

    pub(crate) fn mint(mut self, mint: Option<Pubkey>) -> Self {
        self.mint = mint.map(|m| m.to_string());
        self
    }

    pub(crate) fn unique_id(mut self, unique_id: UniqueId) -> Self {
        self.unique_id = Some(unique_id);
        self
    }

    pub(crate) fn finish(self, tx_hashes: Vec<String>, outcome: TransferOutcome) -> TransferRecord {
        TransferRecord {
            kind: self.kind,
            amount: self.amount,
            recipient: self.recipient,
            mint: self.mint,
            tx_hashes,
            unique_id: self.unique_id,
            started_at: self.started_at,
            finished_at: Utc::now(),
            outcome,
        }
    }
}
