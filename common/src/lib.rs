//! Network-free building blocks shared by the bridge client: seeds and program
//! constants, program derived addresses, the cross-chain mint message codec,
//! strict hex parsing, amount parsing and NFT metadata documents.

pub mod address;
pub mod amount;
pub mod constants;
pub mod error;
pub mod message;
pub mod metadata;
pub mod pda;

pub use address::*;
pub use amount::*;
pub use error::CodecError;
pub use message::{CrossChainMessage, UniqueId};
pub use metadata::*;
pub use pda::DerivationError;
