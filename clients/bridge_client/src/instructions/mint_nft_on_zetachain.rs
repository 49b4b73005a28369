use anchor_lang::{prelude::*, system_program, ToAccountMetas};

/// Accounts for the mint_nft_on_zetachain instruction which carries an encoded
/// mint message to ZetaChain without moving funds.
#[derive(Debug, Clone, Copy)]
pub struct MintNftOnZetachainAccounts {
    /// Fee payer and signer of the mint request.
    pub user: Pubkey,

    /// Bridge config PDA. Read only here.
    pub config: Pubkey,

    pub gateway_program: Pubkey,
}

impl ToAccountMetas for MintNftOnZetachainAccounts {
    fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.user, true),
            AccountMeta::new_readonly(self.config, false),
            AccountMeta::new_readonly(self.gateway_program, false),
            AccountMeta::new_readonly(system_program::ID, false),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct MintNftOnZetachain {
    pub chain_id: u64,
    pub receiver: [u8; 20],
    /// Encoded `CrossChainMessage`.
    pub message: Vec<u8>,
}

impl super::GatewayInstruction for MintNftOnZetachain {
    const DISCRIMINATOR: [u8; 8] = [89, 1, 181, 92, 77, 94, 153, 252];
}
