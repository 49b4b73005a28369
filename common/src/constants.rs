use anchor_lang::prelude::*;

// Seeds (must match the deployed bridge program)

pub const CONFIG_SEED: &[u8] = b"config";

/// Middle seed of the custody token account PDA, derived under the token program.
pub const CUSTODY_SEED_CONSTANT: [u8; 32] = [
    6, 221, 246, 225, 215, 101, 161, 147, 217, 203, 225, 70, 206, 235, 121, 172, 28, 180, 133,
    237, 95, 91, 55, 145, 58, 140, 245, 133, 126, 255, 0, 169,
];

// Cross-chain message layout

/// ASCII tag opening every NFT mint message.
pub const MINT_MESSAGE_TAG: [u8; 8] = *b"ZNFTMINT";

pub const MESSAGE_TAG_LEN: usize = 8;

pub const MESSAGE_LEN_PREFIX_LEN: usize = 4;

pub const UNIQUE_ID_LEN: usize = 32;

pub const MAX_METADATA_URI_LEN: usize = 2048;

pub const EVM_ADDRESS_LEN: usize = 20;

// Remote chain identifiers

pub const ZETACHAIN_MAINNET_CHAIN_ID: u64 = 7000;

pub const ZETACHAIN_TESTNET_CHAIN_ID: u64 = 7001;

// Well-known programs

pub const TOKEN_PROGRAM_ID: Pubkey = anchor_spl::token::ID;

pub const TOKEN_2022_PROGRAM_ID: Pubkey = anchor_spl::token_2022::ID;

pub const ASSOCIATED_TOKEN_PROGRAM_ID: Pubkey = anchor_spl::associated_token::ID;

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

pub const SOL_DECIMALS: u8 = 9;
