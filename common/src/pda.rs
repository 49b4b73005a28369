use anchor_lang::{
    prelude::Pubkey,
    solana_program::pubkey::{MAX_SEEDS, MAX_SEED_LEN},
};

use crate::constants::{CONFIG_SEED, CUSTODY_SEED_CONSTANT};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DerivationError {
    #[error("No valid bump seed found for the given seeds")]
    DerivationExhausted,
    #[error("Invalid seeds: {0}")]
    InvalidSeeds(String),
}

pub type Result<T> = std::result::Result<T, DerivationError>;

/// Finds the program derived address for `seeds` under `owner`.
///
/// Bumps are searched from 255 down to 0 and the first one yielding an off-curve
/// point wins, so the result is stable for identical inputs.
///
/// # Arguments
/// * `seeds` - Ordered seed byte sequences, the bump is appended internally
/// * `owner` - Program that owns the derived address
pub fn derive(seeds: &[&[u8]], owner: &Pubkey) -> Result<(Pubkey, u8)> {
    // One slot is reserved for the bump seed.
    if seeds.len() >= MAX_SEEDS {
        return Err(DerivationError::InvalidSeeds(format!(
            "{} seeds given, at most {} allowed",
            seeds.len(),
            MAX_SEEDS - 1
        )));
    }

    if let Some(seed) = seeds.iter().find(|seed| seed.len() > MAX_SEED_LEN) {
        return Err(DerivationError::InvalidSeeds(format!(
            "seed of {} bytes exceeds {} bytes",
            seed.len(),
            MAX_SEED_LEN
        )));
    }

    Pubkey::try_find_program_address(seeds, owner).ok_or(DerivationError::DerivationExhausted)
}

/// Config account of the bridge program.
pub fn config_address(program_id: &Pubkey) -> Result<(Pubkey, u8)> {
    derive(&[CONFIG_SEED], program_id)
}

/// Canonical token account of `owner` for `mint`, as created by
/// `associated_token_program` for accounts owned by `token_program`.
pub fn associated_token_address(
    owner: &Pubkey,
    mint: &Pubkey,
    token_program: &Pubkey,
    associated_token_program: &Pubkey,
) -> Result<(Pubkey, u8)> {
    derive(
        &[owner.as_ref(), token_program.as_ref(), mint.as_ref()],
        associated_token_program,
    )
}

/// Custody account escrowing deposited `mint` tokens for the bridge `config`.
pub fn custody_token_address(
    config: &Pubkey,
    mint: &Pubkey,
    token_program: &Pubkey,
) -> Result<(Pubkey, u8)> {
    derive(
        &[config.as_ref(), CUSTODY_SEED_CONSTANT.as_ref(), mint.as_ref()],
        token_program,
    )
}
