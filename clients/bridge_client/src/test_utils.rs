use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
    time::Duration,
};

use anchor_lang::prelude::Pubkey;
use async_trait::async_trait;
use solana_hash::Hash;
use solana_keypair::Keypair;
use solana_signature::Signature;
use solana_transaction::Transaction;

use crate::{
    client::{BridgeClient, UninitializedClient},
    config::BridgeConfig,
    error::{BridgeError, Result},
    instructions::GatewayInstruction,
    rpc::RpcConnection,
};

pub const TEST_RECIPIENT: &str = "0x1111111111111111111111111111111111111111";
pub const TEST_METADATA_URI: &str = "https://example/1.json";

/// Scripted in-memory node. Records every transaction it is asked to send.
pub struct MockConnection {
    program_deployed: bool,
    balance: Option<u64>,
    send_delay: Option<Duration>,
    send_reachable: bool,
    rejections: Mutex<HashMap<[u8; 8], String>>,
    sent: Mutex<Vec<Transaction>>,
    blockhash_calls: AtomicUsize,
}

impl Default for MockConnection {
    fn default() -> Self {
        Self {
            program_deployed: true,
            balance: Some(0),
            send_delay: None,
            send_reachable: true,
            rejections: Mutex::new(HashMap::new()),
            sent: Mutex::new(Vec::new()),
            blockhash_calls: AtomicUsize::new(0),
        }
    }
}

impl MockConnection {
    /// A node where the bridge program was never deployed.
    pub fn undeployed() -> Self {
        Self {
            program_deployed: false,
            ..Self::default()
        }
    }

    /// `None` makes every balance query fail.
    pub fn with_balance(mut self, balance: Option<u64>) -> Self {
        self.balance = balance;
        self
    }

    /// Holds every send for `delay` before answering.
    pub fn with_send_delay(mut self, delay: Duration) -> Self {
        self.send_delay = Some(delay);
        self
    }

    /// Records sends, then drops the connection instead of answering.
    pub fn with_broken_sends(mut self) -> Self {
        self.send_reachable = false;
        self
    }

    /// Makes every transaction carrying instruction `I` fail with `reason`.
    pub fn reject<I: GatewayInstruction>(&self, reason: &str) {
        self.rejections
            .lock()
            .unwrap()
            .insert(I::DISCRIMINATOR, reason.to_string());
    }

    pub fn sent(&self) -> Vec<Transaction> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    /// Discriminators of every instruction sent, in order.
    pub fn sent_discriminators(&self) -> Vec<[u8; 8]> {
        self.sent()
            .iter()
            .flat_map(|tx| tx.message.instructions.iter())
            .map(|ix| discriminator(&ix.data))
            .collect()
    }

    pub fn blockhash_calls(&self) -> usize {
        self.blockhash_calls.load(Ordering::SeqCst)
    }
}

fn discriminator(data: &[u8]) -> [u8; 8] {
    let mut out = [0u8; 8];
    out.copy_from_slice(&data[..8]);
    out
}

#[async_trait]
impl RpcConnection for MockConnection {
    async fn latest_blockhash(&self) -> Result<Hash> {
        self.blockhash_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Hash::new_unique())
    }

    async fn send_transaction(&self, transaction: &Transaction) -> Result<Signature> {
        if let Some(delay) = self.send_delay {
            tokio::time::sleep(delay).await;
        }

        self.sent.lock().unwrap().push(transaction.clone());
        if !self.send_reachable {
            return Err(BridgeError::QueryFailed("connection reset".to_string()));
        }

        let rejections = self.rejections.lock().unwrap();
        for ix in &transaction.message.instructions {
            if let Some(reason) = rejections.get(&discriminator(&ix.data)) {
                return Err(BridgeError::SubmissionRejected {
                    reason: reason.clone(),
                    signature: None,
                });
            }
        }

        Ok(transaction.signatures[0])
    }

    async fn get_balance(&self, _address: &Pubkey) -> Result<u64> {
        self.balance
            .ok_or_else(|| BridgeError::QueryFailed("connection refused".to_string()))
    }

    async fn account_exists(&self, address: &Pubkey) -> Result<bool> {
        Ok(self.program_deployed && *address == BridgeConfig::default().program_id)
    }
}

pub async fn setup_client(connection: MockConnection) -> BridgeClient<MockConnection, Keypair> {
    setup_client_with_config(BridgeConfig::default(), connection).await
}

pub async fn setup_client_with_config(
    config: BridgeConfig,
    connection: MockConnection,
) -> BridgeClient<MockConnection, Keypair> {
    UninitializedClient::new(config, connection, Keypair::new())
        .initialize()
        .await
        .unwrap()
}
