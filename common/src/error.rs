#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("Invalid hex address: {0}")]
    InvalidHexAddress(String),
    #[error("Metadata URI is {len} bytes, the limit is {max}")]
    EncodingTooLarge { len: usize, max: usize },
    #[error("Malformed message: {0}")]
    MalformedMessage(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

pub type Result<T> = std::result::Result<T, CodecError>;
