use anchor_lang::prelude::Pubkey;
use solana_hash::Hash;
use solana_keypair::Keypair;
use solana_signer::Signer;
use solana_transaction::Transaction;

use crate::error::{BridgeError, Result};

/// Anything able to authorize transactions for a single account.
///
/// The client only ever asks for the public key and a signature; key material
/// stays with the implementor.
pub trait TransactionSigner: Send + Sync {
    fn public_key(&self) -> Pubkey;

    /// Signs `transaction` as its fee payer against `recent_blockhash`.
    fn sign_transaction(&self, transaction: &mut Transaction, recent_blockhash: Hash)
        -> Result<()>;
}

impl TransactionSigner for Keypair {
    fn public_key(&self) -> Pubkey {
        self.pubkey()
    }

    fn sign_transaction(
        &self,
        transaction: &mut Transaction,
        recent_blockhash: Hash,
    ) -> Result<()> {
        transaction
            .try_sign(&[self], recent_blockhash)
            .map_err(|e| BridgeError::Signing(e.to_string()))
    }
}
