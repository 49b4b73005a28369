use std::thread;

use anchor_lang::prelude::Pubkey;
use async_trait::async_trait;
use bridge_client::{BridgeError, Result, RpcConnection};
use litesvm::LiteSVM;
use solana_account::Account;
use solana_hash::Hash;
use solana_signature::Signature;
use solana_transaction::Transaction;
use tokio::sync::{mpsc, oneshot};

enum Request {
    LatestBlockhash(oneshot::Sender<Hash>),
    Send(Box<Transaction>, oneshot::Sender<Result<Signature>>),
    Balance(Pubkey, oneshot::Sender<Option<u64>>),
    AccountExists(Pubkey, oneshot::Sender<bool>),
    Airdrop(Pubkey, u64, oneshot::Sender<Result<()>>),
    SetAccount(Pubkey, Account, oneshot::Sender<Result<()>>),
}

/// In-process chain behind the `RpcConnection` seam.
///
/// The `LiteSVM` instance lives on its own thread and is driven over a channel,
/// so the connection itself stays `Send + Sync`.
pub struct SvmConnection {
    requests: mpsc::UnboundedSender<Request>,
}

impl SvmConnection {
    pub fn start() -> Self {
        let (requests, mut rx) = mpsc::unbounded_channel();

        thread::spawn(move || {
            let mut svm = LiteSVM::new();
            while let Some(request) = rx.blocking_recv() {
                match request {
                    Request::LatestBlockhash(reply) => {
                        let _ = reply.send(svm.latest_blockhash());
                    }
                    Request::Send(tx, reply) => {
                        let result = svm
                            .send_transaction(*tx)
                            .map(|meta| meta.signature)
                            .map_err(|e| BridgeError::SubmissionRejected {
                                reason: e.err.to_string(),
                                signature: None,
                            });
                        let _ = reply.send(result);
                    }
                    Request::Balance(address, reply) => {
                        let _ = reply.send(svm.get_balance(&address));
                    }
                    Request::AccountExists(address, reply) => {
                        let _ = reply.send(svm.get_account(&address).is_some());
                    }
                    Request::Airdrop(address, lamports, reply) => {
                        let result = svm
                            .airdrop(&address, lamports)
                            .map(|_| ())
                            .map_err(|e| BridgeError::SubmissionRejected {
                                reason: e.err.to_string(),
                                signature: None,
                            });
                        let _ = reply.send(result);
                    }
                    Request::SetAccount(address, account, reply) => {
                        let result = svm
                            .set_account(address, account)
                            .map_err(|e| BridgeError::QueryFailed(e.to_string()));
                        let _ = reply.send(result);
                    }
                }
            }
        });

        Self { requests }
    }

    pub async fn airdrop(&self, address: &Pubkey, lamports: u64) -> Result<()> {
        self.call(|reply| Request::Airdrop(*address, lamports, reply))
            .await?
    }

    pub async fn set_account(&self, address: Pubkey, account: Account) -> Result<()> {
        self.call(|reply| Request::SetAccount(address, account, reply))
            .await?
    }

    async fn call<T>(&self, request: impl FnOnce(oneshot::Sender<T>) -> Request) -> Result<T> {
        let (reply, response) = oneshot::channel();
        self.requests
            .send(request(reply))
            .map_err(|_| BridgeError::QueryFailed("svm thread stopped".to_string()))?;
        response
            .await
            .map_err(|_| BridgeError::QueryFailed("svm thread dropped the request".to_string()))
    }
}

#[async_trait]
impl RpcConnection for SvmConnection {
    async fn latest_blockhash(&self) -> Result<Hash> {
        self.call(Request::LatestBlockhash).await
    }

    async fn send_transaction(&self, transaction: &Transaction) -> Result<Signature> {
        let transaction = Box::new(transaction.clone());
        self.call(|reply| Request::Send(transaction, reply)).await?
    }

    async fn get_balance(&self, address: &Pubkey) -> Result<u64> {
        let address = *address;
        Ok(self
            .call(|reply| Request::Balance(address, reply))
            .await?
            .unwrap_or(0))
    }

    async fn account_exists(&self, address: &Pubkey) -> Result<bool> {
        let address = *address;
        self.call(|reply| Request::AccountExists(address, reply))
            .await
    }
}
