use anchor_lang::{prelude::*, ToAccountMetas};
use solana_instruction::Instruction;

use crate::error::{BridgeError, Result};

pub mod deposit_and_call;
pub use deposit_and_call::*;
pub mod deposit_spl_token_and_call;
pub use deposit_spl_token_and_call::*;
pub mod withdraw_and_call;
pub use withdraw_and_call::*;
pub mod mint_nft_on_zetachain;
pub use mint_nft_on_zetachain::*;
pub mod on_call;
pub use on_call::*;
pub mod on_revert;
pub use on_revert::*;

/// Arguments of one bridge program instruction, laid out the Anchor way.
pub trait GatewayInstruction: AnchorSerialize {
    /// `sha256("global:<instruction name>")[..8]`
    const DISCRIMINATOR: [u8; 8];

    /// Discriminator followed by the Borsh encoded arguments.
    fn data(&self) -> Result<Vec<u8>> {
        let mut data = Vec::with_capacity(256);
        data.extend_from_slice(&Self::DISCRIMINATOR);
        self.serialize(&mut data)
            .map_err(|e| BridgeError::Serialization(e.to_string()))?;
        Ok(data)
    }
}

/// Assembles an instruction for `program_id` from its account list and arguments.
pub fn build_instruction(
    program_id: Pubkey,
    accounts: &impl ToAccountMetas,
    args: &impl GatewayInstruction,
) -> Result<Instruction> {
    Ok(Instruction {
        program_id,
        accounts: accounts.to_account_metas(None),
        data: args.data()?,
    })
}
