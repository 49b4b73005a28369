use std::{
    collections::HashSet,
    sync::{Mutex, MutexGuard, PoisonError},
};

use anchor_lang::prelude::Pubkey;
use common::{
    constants::SOL_DECIMALS,
    format_amount, message, parse_amount, parse_evm_address,
    pda::{associated_token_address, config_address, custody_token_address},
    NftMetadata, UniqueId,
};
use solana_instruction::Instruction;
use solana_message::Message;
use solana_signature::Signature;
use solana_transaction::Transaction;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use crate::{
    config::BridgeConfig,
    error::{BridgeError, Result},
    instructions::{
        build_instruction, DepositAndCall, DepositAndCallAccounts, DepositSplTokenAndCall,
        DepositSplTokenAndCallAccounts, MintNftOnZetachain, MintNftOnZetachainAccounts, OnCall,
        OnCallAccounts, OnRevert, OnRevertAccounts, WithdrawAndCall, WithdrawAndCallAccounts,
    },
    progress::{ProgressError, ProgressTracker, StepStatus, DEPOSIT_STEP, MINT_STEP},
    record::{PendingRecord, TransferKind, TransferOutcome, TransferRecord},
    rpc::RpcConnection,
    signer::TransactionSigner,
};

/// Funds and mint instructions for one NFT delivered on ZetaChain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositRequest {
    /// 20 byte EVM address, hex with optional `0x`.
    pub recipient: String,
    pub metadata_uri: String,
    /// Lamports for SOL, base units of `mint` otherwise.
    pub amount: u64,
    /// SPL token to deposit instead of SOL.
    pub mint: Option<Pubkey>,
    /// Document served at `metadata_uri`, checked before anything is sent.
    pub metadata: Option<NftMetadata>,
}

impl DepositRequest {
    pub fn native(
        recipient: impl Into<String>,
        metadata_uri: impl Into<String>,
        amount: u64,
    ) -> Self {
        Self {
            recipient: recipient.into(),
            metadata_uri: metadata_uri.into(),
            amount,
            mint: None,
            metadata: None,
        }
    }

    /// Native deposit with a decimal SOL amount such as `"0.01"`.
    pub fn sol(
        recipient: impl Into<String>,
        metadata_uri: impl Into<String>,
        sol: &str,
    ) -> Result<Self> {
        let lamports = parse_amount(sol, SOL_DECIMALS)?;
        Ok(Self::native(recipient, metadata_uri, lamports))
    }

    pub fn token(
        mint: Pubkey,
        recipient: impl Into<String>,
        metadata_uri: impl Into<String>,
        amount: u64,
    ) -> Self {
        Self {
            mint: Some(mint),
            ..Self::native(recipient, metadata_uri, amount)
        }
    }

    pub fn with_metadata(mut self, metadata: NftMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Validated request, ready to go on chain.
struct PreparedDeposit {
    receiver: [u8; 20],
    unique_id: UniqueId,
    message: Vec<u8>,
    amount: u64,
}

/// A client that has not confirmed the bridge program is reachable yet.
pub struct UninitializedClient<C, S> {
    config: BridgeConfig,
    connection: C,
    signer: S,
}

impl<C: RpcConnection, S: TransactionSigner> UninitializedClient<C, S> {
    pub fn new(config: BridgeConfig, connection: C, signer: S) -> Self {
        Self {
            config,
            connection,
            signer,
        }
    }

    pub fn is_ready(&self) -> bool {
        false
    }

    /// Checks the configuration and that the bridge program exists on chain.
    pub async fn initialize(self) -> Result<BridgeClient<C, S>> {
        self.config.validate()?;

        let program_id = self.config.program_id;
        if !self.connection.account_exists(&program_id).await? {
            return Err(BridgeError::ClientNotInitialized(format!(
                "bridge program {program_id} not found at {}",
                self.config.rpc_url
            )));
        }

        let (config_address, _) = config_address(&program_id)?;
        info!(
            %program_id,
            %config_address,
            payer = %self.signer.public_key(),
            "Bridge client ready"
        );

        Ok(BridgeClient {
            config: self.config,
            connection: self.connection,
            signer: self.signer,
            config_address,
            history: Mutex::new(Vec::new()),
            issued_ids: Mutex::new(HashSet::new()),
        })
    }
}

/// Builds, signs and submits bridge instructions.
///
/// Every operation that reaches the network appends one `TransferRecord` to the
/// history, whatever its outcome. Requests rejected during validation leave no
/// trace.
pub struct BridgeClient<C, S> {
    config: BridgeConfig,
    connection: C,
    signer: S,
    config_address: Pubkey,
    history: Mutex<Vec<TransferRecord>>,
    /// Every id this client has put in a message. Kept for the client's
    /// lifetime, like `history`.
    issued_ids: Mutex<HashSet<UniqueId>>,
}

impl<C: RpcConnection, S: TransactionSigner> BridgeClient<C, S> {
    pub fn is_ready(&self) -> bool {
        true
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn connection(&self) -> &C {
        &self.connection
    }

    pub fn payer(&self) -> Pubkey {
        self.signer.public_key()
    }

    pub fn program_id(&self) -> Pubkey {
        self.config.program_id
    }

    pub fn config_address(&self) -> Pubkey {
        self.config_address
    }

    /// The payer's associated token account for `mint` under the configured
    /// token programs.
    pub fn associated_token_address(&self, mint: &Pubkey) -> Result<Pubkey> {
        let (address, _) = associated_token_address(
            &self.payer(),
            mint,
            &self.config.token_program,
            &self.config.associated_token_program,
        )?;
        Ok(address)
    }

    pub fn custody_address(&self, mint: &Pubkey) -> Result<Pubkey> {
        let (address, _) =
            custody_token_address(&self.config_address, mint, &self.config.token_program)?;
        Ok(address)
    }

    /// Payer balance in lamports. Reads that fail are logged and count as zero.
    pub async fn get_balance(&self) -> u64 {
        let payer = self.payer();
        match self.connection.get_balance(&payer).await {
            Ok(lamports) => lamports,
            Err(e) => {
                warn!(%payer, error = %e, "Balance query failed, reporting 0");
                0
            }
        }
    }

    pub fn history(&self) -> Vec<TransferRecord> {
        lock(&self.history).clone()
    }

    /// Deposits SOL or, when the request names a mint, SPL tokens.
    pub async fn deposit(&self, request: &DepositRequest) -> Result<Signature> {
        match request.mint {
            Some(mint) => self.deposit_token(request, mint).await,
            None => self.deposit_native(request).await,
        }
    }

    /// Locks `request.amount` lamports with the gateway and forwards the
    /// encoded mint message.
    pub async fn deposit_native(&self, request: &DepositRequest) -> Result<Signature> {
        let prepared = self.prepare(request)?;
        let pending = PendingRecord::new(
            TransferKind::NativeDeposit,
            prepared.amount,
            &request.recipient,
        )
        .unique_id(prepared.unique_id);
        debug!(
            sol = %format_amount(prepared.amount, SOL_DECIMALS),
            recipient = %request.recipient,
            "Depositing SOL"
        );

        let result = self.submit_deposit(&prepared, None).await;
        self.finish_single(pending, &result);
        result
    }

    /// Moves `request.amount` base units of `mint` from the payer's associated
    /// account into bridge custody. An insufficient token balance is reported by
    /// the chain.
    pub async fn deposit_token(
        &self,
        request: &DepositRequest,
        mint: Pubkey,
    ) -> Result<Signature> {
        let prepared = self.prepare(request)?;
        let pending = PendingRecord::new(
            TransferKind::TokenDeposit,
            prepared.amount,
            &request.recipient,
        )
        .mint(Some(mint))
        .unique_id(prepared.unique_id);

        let result = self.submit_deposit(&prepared, Some(mint)).await;
        self.finish_single(pending, &result);
        result
    }

    /// Requests `amount` back from ZetaChain to the Solana account `recipient`.
    pub async fn withdraw(
        &self,
        recipient: Pubkey,
        amount: u64,
        message: &str,
    ) -> Result<Signature> {
        check_amount(amount)?;

        let accounts = WithdrawAndCallAccounts {
            user: self.payer(),
            config: self.config_address,
            gateway_program: self.config.gateway_program,
        };
        let args = WithdrawAndCall {
            recipient,
            amount,
            message: message.as_bytes().to_vec(),
        };
        let instruction = build_instruction(self.config.program_id, &accounts, &args)?;

        let pending = PendingRecord::new(TransferKind::Withdraw, amount, recipient.to_string());
        let result = self.submit("withdraw_and_call", instruction).await;
        self.finish_single(pending, &result);
        result
    }

    /// Sends the mint message on its own, for example to retry a mint whose
    /// deposit already landed. Reusing the first `unique_id` lets the remote
    /// side deduplicate.
    pub async fn trigger_remote_mint(
        &self,
        recipient: &str,
        metadata_uri: &str,
        unique_id: UniqueId,
    ) -> Result<Signature> {
        let receiver = parse_evm_address(recipient)?.into_array();
        let message = message::encode(metadata_uri, &unique_id)?;

        let pending =
            PendingRecord::new(TransferKind::RemoteMint, 0, recipient).unique_id(unique_id);
        let result = self.submit_mint(receiver, message).await;
        self.finish_single(pending, &result);
        result
    }

    /// Deposit, then mint trigger, reported on `tracker`.
    ///
    /// The mint is only attempted once the deposit is confirmed. A failed mint
    /// leaves the deposit in place and yields a `PartialFailure` record holding
    /// the deposit signature. Validation problems are returned as errors before
    /// anything is sent; chain failures are returned inside the record.
    ///
    /// # Arguments
    /// * `request` - What to deposit and what to mint
    /// * `tracker` - Tracker with a `deposit` and a `mint` step, both pending
    pub async fn deposit_and_mint(
        &self,
        request: &DepositRequest,
        tracker: &mut ProgressTracker,
    ) -> Result<TransferRecord> {
        if tracker.step(MINT_STEP).is_none() {
            return Err(ProgressError::UnknownStep(MINT_STEP.to_string()).into());
        }
        let prepared = self.prepare(request)?;
        tracker.advance(DEPOSIT_STEP, StepStatus::Processing, None, None)?;

        let pending = PendingRecord::new(
            TransferKind::DepositAndMint,
            prepared.amount,
            &request.recipient,
        )
        .mint(request.mint)
        .unique_id(prepared.unique_id);

        let deposit_sig = match self.submit_deposit(&prepared, request.mint).await {
            Ok(sig) => {
                track(tracker.advance(
                    DEPOSIT_STEP,
                    StepStatus::Completed,
                    Some(sig.to_string()),
                    None,
                ));
                sig
            }
            Err(e) => {
                let signed = e.signature().map(|sig| sig.to_string());
                track(tracker.fail(DEPOSIT_STEP, e.to_string(), signed.clone()));
                let record = pending.finish(
                    signed.into_iter().collect(),
                    TransferOutcome::Failure {
                        reason: e.to_string(),
                    },
                );
                return Ok(self.push_history(record));
            }
        };

        track(tracker.advance(MINT_STEP, StepStatus::Processing, None, None));

        let record = match self.submit_mint(prepared.receiver, prepared.message).await {
            Ok(mint_sig) => {
                track(tracker.advance(
                    MINT_STEP,
                    StepStatus::Completed,
                    Some(mint_sig.to_string()),
                    None,
                ));
                pending.finish(
                    vec![deposit_sig.to_string(), mint_sig.to_string()],
                    TransferOutcome::Success,
                )
            }
            Err(e) => {
                warn!(
                    deposit = %deposit_sig,
                    unique_id = %prepared.unique_id,
                    error = %e,
                    "Mint trigger failed after a confirmed deposit"
                );
                let signed = e.signature().map(|sig| sig.to_string());
                track(tracker.fail(MINT_STEP, e.to_string(), signed.clone()));
                pending.finish(
                    std::iter::once(deposit_sig.to_string()).chain(signed).collect(),
                    TransferOutcome::PartialFailure {
                        failed_phase: MINT_STEP.to_string(),
                        reason: e.to_string(),
                    },
                )
            }
        };

        Ok(self.push_history(record))
    }

    /// Submits `on_call` on behalf of the ZetaChain account `sender`.
    pub async fn handle_inbound_call(
        &self,
        sender: &str,
        amount: u64,
        data: Vec<u8>,
    ) -> Result<Signature> {
        let sender_bytes = parse_evm_address(sender)?.into_array();
        let accounts = OnCallAccounts {
            user: self.payer(),
            config: self.config_address,
            gateway_program: self.config.gateway_program,
        };
        let args = OnCall {
            amount,
            sender: sender_bytes,
            data,
        };
        let instruction = build_instruction(self.config.program_id, &accounts, &args)?;

        let pending = PendingRecord::new(TransferKind::InboundCall, amount, sender);
        let result = self.submit("on_call", instruction).await;
        self.finish_single(pending, &result);
        result
    }

    /// Submits `on_revert` for a call from `sender` that failed on ZetaChain.
    pub async fn handle_failed_call(
        &self,
        sender: Pubkey,
        amount: u64,
        data: Vec<u8>,
    ) -> Result<Signature> {
        let accounts = OnRevertAccounts {
            user: self.payer(),
            config: self.config_address,
            gateway_program: self.config.gateway_program,
        };
        let args = OnRevert {
            amount,
            sender,
            data,
        };
        let instruction = build_instruction(self.config.program_id, &accounts, &args)?;

        let pending = PendingRecord::new(TransferKind::RevertedCall, amount, sender.to_string());
        let result = self.submit("on_revert", instruction).await;
        self.finish_single(pending, &result);
        result
    }

    fn prepare(&self, request: &DepositRequest) -> Result<PreparedDeposit> {
        check_amount(request.amount)?;
        let receiver = parse_evm_address(&request.recipient)?.into_array();
        if let Some(metadata) = &request.metadata {
            metadata.validate()?;
            debug!(name = %metadata.name, uri = %request.metadata_uri, "Metadata checked");
        }

        let unique_id = self.issue_unique_id();
        let message = message::encode(&request.metadata_uri, &unique_id)?;
        debug!(%unique_id, message_len = message.len(), "Encoded mint message");

        Ok(PreparedDeposit {
            receiver,
            unique_id,
            message,
            amount: request.amount,
        })
    }

    /// Fresh id, never handed out before by this client.
    fn issue_unique_id(&self) -> UniqueId {
        let mut issued = lock(&self.issued_ids);
        loop {
            let unique_id = UniqueId::generate();
            if issued.insert(unique_id) {
                return unique_id;
            }
        }
    }

    async fn submit_deposit(
        &self,
        prepared: &PreparedDeposit,
        mint: Option<Pubkey>,
    ) -> Result<Signature> {
        let user = self.payer();
        let program_id = self.config.program_id;

        let instruction = match mint {
            None => build_instruction(
                program_id,
                &DepositAndCallAccounts {
                    user,
                    config: self.config_address,
                    gateway_program: self.config.gateway_program,
                },
                &DepositAndCall {
                    chain_id: self.config.remote_chain_id,
                    receiver: prepared.receiver,
                    amount: prepared.amount,
                    message: prepared.message.clone(),
                },
            )?,
            Some(mint) => {
                let source_token_account = self.associated_token_address(&mint)?;
                let custody_token_account = self.custody_address(&mint)?;
                debug!(
                    %mint,
                    %source_token_account,
                    %custody_token_account,
                    "Derived token accounts"
                );

                build_instruction(
                    program_id,
                    &DepositSplTokenAndCallAccounts {
                        user,
                        config: self.config_address,
                        mint,
                        source_token_account,
                        custody_token_account,
                        gateway_program: self.config.gateway_program,
                        token_program: self.config.token_program,
                        associated_token_program: self.config.associated_token_program,
                    },
                    &DepositSplTokenAndCall {
                        mint,
                        chain_id: self.config.remote_chain_id,
                        receiver: prepared.receiver,
                        amount: prepared.amount,
                        message: prepared.message.clone(),
                    },
                )?
            }
        };

        let label = if mint.is_some() {
            "deposit_spl_token_and_call"
        } else {
            "deposit_and_call"
        };
        self.submit(label, instruction).await
    }

    async fn submit_mint(&self, receiver: [u8; 20], message: Vec<u8>) -> Result<Signature> {
        let accounts = MintNftOnZetachainAccounts {
            user: self.payer(),
            config: self.config_address,
            gateway_program: self.config.gateway_program,
        };
        let args = MintNftOnZetachain {
            chain_id: self.config.remote_chain_id,
            receiver,
            message,
        };
        let instruction = build_instruction(self.config.program_id, &accounts, &args)?;

        self.submit("mint_nft_on_zetachain", instruction).await
    }

    /// Signs `instruction` into a transaction paid by the signer and waits for
    /// confirmation, bounded by the configured timeout.
    ///
    /// Failures after signing carry the transaction signature, since the
    /// transaction may already be on its way.
    async fn submit(&self, name: &'static str, instruction: Instruction) -> Result<Signature> {
        let payer = self.payer();
        let mut signed = None;
        let send = async {
            let blockhash = self.connection.latest_blockhash().await?;
            let mut tx = Transaction::new_unsigned(Message::new(&[instruction], Some(&payer)));
            self.signer.sign_transaction(&mut tx, blockhash)?;
            let signature = tx.signatures[0];
            signed = Some(signature);
            self.connection
                .send_transaction(&tx)
                .await
                .map_err(|e| e.with_signature(signature))
        };

        let limit = self.config.confirmation_timeout;
        let outcome = timeout(limit, send).await;
        match outcome {
            Ok(Ok(signature)) => {
                info!(instruction = name, %signature, "Transaction confirmed");
                Ok(signature)
            }
            Ok(Err(e)) => {
                error!(
                    instruction = name,
                    signature = ?e.signature(),
                    error = %e,
                    "Transaction failed"
                );
                Err(e)
            }
            Err(_) => {
                error!(
                    instruction = name,
                    signature = ?signed,
                    timeout = ?limit,
                    "Transaction timed out"
                );
                Err(BridgeError::SubmissionTimedOut {
                    limit,
                    signature: signed,
                })
            }
        }
    }

    fn finish_single(&self, pending: PendingRecord, result: &Result<Signature>) {
        let record = match result {
            Ok(signature) => {
                pending.finish(vec![signature.to_string()], TransferOutcome::Success)
            }
            Err(e) => pending.finish(
                e.signature().iter().map(ToString::to_string).collect(),
                TransferOutcome::Failure {
                    reason: e.to_string(),
                },
            ),
        };
        self.push_history(record);
    }

    fn push_history(&self, record: TransferRecord) -> TransferRecord {
        lock(&self.history).push(record.clone());
        record
    }
}

fn check_amount(amount: u64) -> Result<()> {
    if amount == 0 {
        return Err(BridgeError::InvalidAmount(
            "amount must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

/// Logs a rejected tracker update. The submission outcome stands regardless.
fn track(update: std::result::Result<(), ProgressError>) {
    if let Err(e) = update {
        warn!(error = %e, "Progress update rejected");
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
