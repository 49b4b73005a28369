use std::time::Duration;

use common::{CodecError, DerivationError, MetadataError};
use solana_signature::Signature;

use crate::progress::ProgressError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BridgeError {
    #[error("Client not initialized: {0}")]
    ClientNotInitialized(String),
    #[error("Invalid hex address: {0}")]
    InvalidHexAddress(String),
    #[error("Metadata URI is {len} bytes, the limit is {max}")]
    EncodingTooLarge { len: usize, max: usize },
    #[error("Malformed message: {0}")]
    MalformedMessage(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid metadata: {0}")]
    InvalidMetadata(String),
    #[error("No valid bump seed found for the given seeds")]
    DerivationExhausted,
    #[error("Invalid seeds: {0}")]
    InvalidSeeds(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Failed to serialize instruction: {0}")]
    Serialization(String),
    #[error("Failed to sign transaction: {0}")]
    Signing(String),
    /// The node or the runtime refused the transaction.
    #[error("Transaction rejected: {reason}")]
    SubmissionRejected {
        reason: String,
        signature: Option<Signature>,
    },
    /// The transaction was signed but its confirmation did not arrive in time.
    /// It may still land.
    #[error("Transaction not confirmed within {limit:?}")]
    SubmissionTimedOut {
        limit: Duration,
        signature: Option<Signature>,
    },
    /// The connection broke while sending. The transaction may still land.
    #[error("Transaction status unknown: {reason}")]
    SubmissionUnconfirmed {
        reason: String,
        signature: Option<Signature>,
    },
    #[error("RPC query failed: {0}")]
    QueryFailed(String),
    #[error(transparent)]
    Progress(#[from] ProgressError),
}

impl BridgeError {
    /// True for errors raised before anything was sent to the network.
    pub fn is_validation(&self) -> bool {
        !matches!(
            self,
            Self::Signing(_)
                | Self::SubmissionRejected { .. }
                | Self::SubmissionTimedOut { .. }
                | Self::SubmissionUnconfirmed { .. }
                | Self::QueryFailed(_)
                | Self::ClientNotInitialized(_)
        )
    }

    /// Signature of the transaction a submission error refers to, when it got
    /// as far as being signed.
    pub fn signature(&self) -> Option<Signature> {
        match self {
            Self::SubmissionRejected { signature, .. }
            | Self::SubmissionTimedOut { signature, .. }
            | Self::SubmissionUnconfirmed { signature, .. } => *signature,
            _ => None,
        }
    }

    /// Attaches the signature of the transaction that was being sent. A failed
    /// read during the send becomes `SubmissionUnconfirmed`.
    pub(crate) fn with_signature(self, signed: Signature) -> Self {
        match self {
            Self::SubmissionRejected { reason, .. } => Self::SubmissionRejected {
                reason,
                signature: Some(signed),
            },
            Self::SubmissionTimedOut { limit, .. } => Self::SubmissionTimedOut {
                limit,
                signature: Some(signed),
            },
            Self::SubmissionUnconfirmed { reason, .. } | Self::QueryFailed(reason) => {
                Self::SubmissionUnconfirmed {
                    reason,
                    signature: Some(signed),
                }
            }
            other => other,
        }
    }
}

impl From<CodecError> for BridgeError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::InvalidHexAddress(reason) => Self::InvalidHexAddress(reason),
            CodecError::EncodingTooLarge { len, max } => Self::EncodingTooLarge { len, max },
            CodecError::MalformedMessage(reason) => Self::MalformedMessage(reason),
            CodecError::InvalidAmount(reason) => Self::InvalidAmount(reason),
        }
    }
}

impl From<DerivationError> for BridgeError {
    fn from(err: DerivationError) -> Self {
        match err {
            DerivationError::DerivationExhausted => Self::DerivationExhausted,
            DerivationError::InvalidSeeds(reason) => Self::InvalidSeeds(reason),
        }
    }
}

impl From<MetadataError> for BridgeError {
    fn from(err: MetadataError) -> Self {
        Self::InvalidMetadata(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
