use anchor_lang::prelude::*;

/// Bridge program the instructions are built for.
pub const DEFAULT_PROGRAM_ID: Pubkey = pubkey!("4fGrHJbLbG5pRHQsvkMpFWPZ5QEY89RW1goNDAEm7u5w");

/// ZetaChain gateway, deployed at the same address on every cluster.
pub const GATEWAY_PROGRAM_ID: Pubkey = pubkey!("ZETAjseVjuFsxdRxo6MmTCvqFwb3ZHUx56Co3vCmGis");

// RPC endpoints

pub const DEVNET_RPC_URL: &str = "https://api.devnet.solana.com";

pub const MAINNET_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

pub const LOCALNET_RPC_URL: &str = "http://127.0.0.1:8899";

pub const DEFAULT_CONFIRMATION_TIMEOUT_SECS: u64 = 60;

/// All-ones key, used by templates as an "unset" marker.
pub const ALL_ONES_PUBKEY: Pubkey = Pubkey::new_from_array([0xFF; 32]);

// Environment overrides

pub const ENV_NETWORK: &str = "BRIDGE_NETWORK";
pub const ENV_RPC_URL: &str = "BRIDGE_RPC_URL";
pub const ENV_COMMITMENT: &str = "BRIDGE_COMMITMENT";
pub const ENV_PROGRAM_ID: &str = "BRIDGE_PROGRAM_ID";
pub const ENV_GATEWAY_PROGRAM_ID: &str = "BRIDGE_GATEWAY_PROGRAM_ID";
pub const ENV_REMOTE_CHAIN_ID: &str = "BRIDGE_REMOTE_CHAIN_ID";
pub const ENV_CONFIRMATION_TIMEOUT_SECS: &str = "BRIDGE_CONFIRMATION_TIMEOUT_SECS";
