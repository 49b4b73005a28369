use anchor_lang::{prelude::*, system_program, ToAccountMetas};

/// Accounts for the deposit_spl_token_and_call instruction that moves SPL tokens
/// from the depositor's associated account into the bridge custody account.
#[derive(Debug, Clone, Copy)]
pub struct DepositSplTokenAndCallAccounts {
    /// The depositor. Owns `source_token_account` and pays the fees.
    pub user: Pubkey,

    /// Bridge config PDA derived from `CONFIG_SEED`.
    pub config: Pubkey,

    /// Mint of the token being deposited.
    pub mint: Pubkey,

    /// Depositor's associated token account for `mint`, debited by `amount`.
    pub source_token_account: Pubkey,

    /// Custody PDA derived from (config, custody seed, mint) under the token program.
    /// Credited by `amount`.
    pub custody_token_account: Pubkey,

    pub gateway_program: Pubkey,

    pub token_program: Pubkey,

    pub associated_token_program: Pubkey,
}

impl ToAccountMetas for DepositSplTokenAndCallAccounts {
    fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.user, true),
            AccountMeta::new(self.config, false),
            AccountMeta::new_readonly(self.mint, false),
            AccountMeta::new(self.source_token_account, false),
            AccountMeta::new(self.custody_token_account, false),
            AccountMeta::new_readonly(self.gateway_program, false),
            AccountMeta::new_readonly(self.token_program, false),
            AccountMeta::new_readonly(self.associated_token_program, false),
            AccountMeta::new_readonly(system_program::ID, false),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct DepositSplTokenAndCall {
    pub mint: Pubkey,
    pub chain_id: u64,
    pub receiver: [u8; 20],
    pub amount: u64,
    pub message: Vec<u8>,
}

impl super::GatewayInstruction for DepositSplTokenAndCall {
    const DISCRIMINATOR: [u8; 8] = [14, 181, 27, 187, 171, 61, 237, 147];
}
