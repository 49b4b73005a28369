use std::{fmt, str::FromStr, time::Duration};

use anchor_lang::prelude::Pubkey;
use common::constants::{
    ASSOCIATED_TOKEN_PROGRAM_ID, TOKEN_PROGRAM_ID, ZETACHAIN_MAINNET_CHAIN_ID,
    ZETACHAIN_TESTNET_CHAIN_ID,
};
use serde::{Deserialize, Serialize};
use solana_commitment_config::CommitmentConfig;

use crate::{
    constants::{
        ALL_ONES_PUBKEY, DEFAULT_CONFIRMATION_TIMEOUT_SECS, DEFAULT_PROGRAM_ID, DEVNET_RPC_URL,
        ENV_COMMITMENT, ENV_CONFIRMATION_TIMEOUT_SECS, ENV_GATEWAY_PROGRAM_ID, ENV_NETWORK,
        ENV_PROGRAM_ID, ENV_REMOTE_CHAIN_ID, ENV_RPC_URL, GATEWAY_PROGRAM_ID, LOCALNET_RPC_URL,
        MAINNET_RPC_URL,
    },
    error::{BridgeError, Result},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    Processed,
    #[default]
    Confirmed,
    Finalized,
}

impl From<Commitment> for CommitmentConfig {
    fn from(commitment: Commitment) -> Self {
        match commitment {
            Commitment::Processed => CommitmentConfig::processed(),
            Commitment::Confirmed => CommitmentConfig::confirmed(),
            Commitment::Finalized => CommitmentConfig::finalized(),
        }
    }
}

impl FromStr for Commitment {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "processed" => Ok(Self::Processed),
            "confirmed" => Ok(Self::Confirmed),
            "finalized" => Ok(Self::Finalized),
            other => Err(BridgeError::InvalidConfig(format!(
                "unknown commitment level {other:?}"
            ))),
        }
    }
}

/// Cluster preset selecting endpoint, commitment and the paired ZetaChain network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkProfile {
    Localnet,
    Devnet,
    Mainnet,
}

impl NetworkProfile {
    pub fn rpc_url(&self) -> &'static str {
        match self {
            Self::Localnet => LOCALNET_RPC_URL,
            Self::Devnet => DEVNET_RPC_URL,
            Self::Mainnet => MAINNET_RPC_URL,
        }
    }

    pub fn commitment(&self) -> Commitment {
        match self {
            Self::Localnet => Commitment::Processed,
            Self::Devnet => Commitment::Confirmed,
            Self::Mainnet => Commitment::Finalized,
        }
    }

    pub fn remote_chain_id(&self) -> u64 {
        match self {
            Self::Localnet | Self::Devnet => ZETACHAIN_TESTNET_CHAIN_ID,
            Self::Mainnet => ZETACHAIN_MAINNET_CHAIN_ID,
        }
    }
}

impl Default for NetworkProfile {
    #[cfg(feature = "mainnet")]
    fn default() -> Self {
        Self::Mainnet
    }

    #[cfg(not(feature = "mainnet"))]
    fn default() -> Self {
        Self::Devnet
    }
}

impl FromStr for NetworkProfile {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "localnet" | "localhost" => Ok(Self::Localnet),
            "devnet" => Ok(Self::Devnet),
            "mainnet" | "mainnet-beta" => Ok(Self::Mainnet),
            other => Err(BridgeError::InvalidConfig(format!("unknown network {other:?}"))),
        }
    }
}

impl fmt::Display for NetworkProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Localnet => "localnet",
            Self::Devnet => "devnet",
            Self::Mainnet => "mainnet",
        };
        f.write_str(name)
    }
}

/// Connection and program settings handed to the client at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    pub rpc_url: String,
    pub commitment: Commitment,
    pub remote_chain_id: u64,
    pub program_id: Pubkey,
    pub gateway_program: Pubkey,
    pub token_program: Pubkey,
    pub associated_token_program: Pubkey,
    /// Upper bound on a single submission, confirmation included.
    pub confirmation_timeout: Duration,
}

impl BridgeConfig {
    pub fn new(profile: NetworkProfile) -> Self {
        Self {
            rpc_url: profile.rpc_url().to_string(),
            commitment: profile.commitment(),
            remote_chain_id: profile.remote_chain_id(),
            program_id: DEFAULT_PROGRAM_ID,
            gateway_program: GATEWAY_PROGRAM_ID,
            token_program: TOKEN_PROGRAM_ID,
            associated_token_program: ASSOCIATED_TOKEN_PROGRAM_ID,
            confirmation_timeout: Duration::from_secs(DEFAULT_CONFIRMATION_TIMEOUT_SECS),
        }
    }

    /// Starts from the `BRIDGE_NETWORK` profile (or the compiled-in default) and
    /// applies the remaining `BRIDGE_*` overrides.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let profile = match lookup(ENV_NETWORK) {
            Some(network) => network.parse()?,
            None => NetworkProfile::default(),
        };
        let mut config = Self::new(profile);

        if let Some(rpc_url) = lookup(ENV_RPC_URL) {
            config.rpc_url = rpc_url;
        }
        if let Some(commitment) = lookup(ENV_COMMITMENT) {
            config.commitment = commitment.parse()?;
        }
        if let Some(program_id) = lookup(ENV_PROGRAM_ID) {
            config.program_id = parse_pubkey(ENV_PROGRAM_ID, &program_id)?;
        }
        if let Some(gateway) = lookup(ENV_GATEWAY_PROGRAM_ID) {
            config.gateway_program = parse_pubkey(ENV_GATEWAY_PROGRAM_ID, &gateway)?;
        }
        if let Some(chain_id) = lookup(ENV_REMOTE_CHAIN_ID) {
            config.remote_chain_id = parse_u64(ENV_REMOTE_CHAIN_ID, &chain_id)?;
        }
        if let Some(secs) = lookup(ENV_CONFIRMATION_TIMEOUT_SECS) {
            config.confirmation_timeout =
                Duration::from_secs(parse_u64(ENV_CONFIRMATION_TIMEOUT_SECS, &secs)?);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.rpc_url = rpc_url.into();
        self
    }

    pub fn with_program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = program_id;
        self
    }

    pub fn with_gateway_program(mut self, gateway_program: Pubkey) -> Self {
        self.gateway_program = gateway_program;
        self
    }

    pub fn with_confirmation_timeout(mut self, timeout: Duration) -> Self {
        self.confirmation_timeout = timeout;
        self
    }

    /// Refuses unset or placeholder program ids and degenerate values.
    pub fn validate(&self) -> Result<()> {
        if self.rpc_url.trim().is_empty() {
            return Err(BridgeError::InvalidConfig("rpc url is empty".to_string()));
        }
        if self.remote_chain_id == 0 {
            return Err(BridgeError::InvalidConfig(
                "remote chain id must be non-zero".to_string(),
            ));
        }
        if self.confirmation_timeout.is_zero() {
            return Err(BridgeError::InvalidConfig(
                "confirmation timeout must be non-zero".to_string(),
            ));
        }

        for (name, key) in [
            ("program id", &self.program_id),
            ("gateway program", &self.gateway_program),
            ("token program", &self.token_program),
            ("associated token program", &self.associated_token_program),
        ] {
            if is_placeholder(key) {
                return Err(BridgeError::InvalidConfig(format!(
                    "{name} is a placeholder ({key})"
                )));
            }
        }

        Ok(())
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self::new(NetworkProfile::default())
    }
}

fn is_placeholder(key: &Pubkey) -> bool {
    *key == Pubkey::default() || *key == ALL_ONES_PUBKEY
}

fn parse_pubkey(var: &str, value: &str) -> Result<Pubkey> {
    value
        .trim()
        .parse()
        .map_err(|e| BridgeError::InvalidConfig(format!("{var}={value:?}: {e}")))
}

fn parse_u64(var: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|e| BridgeError::InvalidConfig(format!("{var}={value:?}: {e}")))
}
