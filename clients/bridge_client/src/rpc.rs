use anchor_lang::prelude::Pubkey;
use async_trait::async_trait;
use solana_client::{
    client_error::{ClientError, ClientErrorKind},
    nonblocking::rpc_client::RpcClient,
};
use solana_commitment_config::CommitmentConfig;
use solana_hash::Hash;
use solana_signature::Signature;
use solana_transaction::Transaction;

use crate::{
    config::BridgeConfig,
    error::{BridgeError, Result},
};

/// The slice of a Solana node the client talks to.
#[async_trait]
pub trait RpcConnection: Send + Sync {
    async fn latest_blockhash(&self) -> Result<Hash>;

    /// Sends a signed transaction and waits until it reaches the configured
    /// commitment. Chain-side failures come back as `SubmissionRejected`,
    /// transport failures as `QueryFailed`.
    async fn send_transaction(&self, transaction: &Transaction) -> Result<Signature>;

    async fn get_balance(&self, address: &Pubkey) -> Result<u64>;

    async fn account_exists(&self, address: &Pubkey) -> Result<bool>;
}

/// `RpcConnection` over a JSON-RPC endpoint.
pub struct SolanaRpc {
    client: RpcClient,
}

impl SolanaRpc {
    pub fn new(config: &BridgeConfig) -> Self {
        let commitment: CommitmentConfig = config.commitment.into();
        Self {
            client: RpcClient::new_with_timeout_and_commitment(
                config.rpc_url.clone(),
                config.confirmation_timeout,
                commitment,
            ),
        }
    }

    pub fn client(&self) -> &RpcClient {
        &self.client
    }
}

#[async_trait]
impl RpcConnection for SolanaRpc {
    async fn latest_blockhash(&self) -> Result<Hash> {
        self.client
            .get_latest_blockhash()
            .await
            .map_err(|e| BridgeError::QueryFailed(e.to_string()))
    }

    async fn send_transaction(&self, transaction: &Transaction) -> Result<Signature> {
        self.client
            .send_and_confirm_transaction(transaction)
            .await
            .map_err(send_error)
    }

    async fn get_balance(&self, address: &Pubkey) -> Result<u64> {
        self.client
            .get_balance(address)
            .await
            .map_err(|e| BridgeError::QueryFailed(e.to_string()))
    }

    async fn account_exists(&self, address: &Pubkey) -> Result<bool> {
        let response = self
            .client
            .get_account_with_commitment(address, self.client.commitment())
            .await
            .map_err(|e| BridgeError::QueryFailed(e.to_string()))?;

        Ok(response.value.is_some())
    }
}

fn send_error(err: ClientError) -> BridgeError {
    match err.kind() {
        ClientErrorKind::TransactionError(_) | ClientErrorKind::RpcError(_) => {
            BridgeError::SubmissionRejected {
                reason: err.to_string(),
                signature: None,
            }
        }
        _ => BridgeError::QueryFailed(err.to_string()),
    }
}
