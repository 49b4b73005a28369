use anchor_lang::{prelude::*, ToAccountMetas};

/// Accounts for the withdraw_and_call instruction.
#[derive(Debug, Clone, Copy)]
pub struct WithdrawAndCallAccounts {
    pub user: Pubkey,
    pub config: Pubkey,
    pub gateway_program: Pubkey,
}

impl ToAccountMetas for WithdrawAndCallAccounts {
    fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.user, true),
            AccountMeta::new(self.config, false),
            AccountMeta::new_readonly(self.gateway_program, false),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct WithdrawAndCall {
    /// Solana account credited with the withdrawn funds.
    pub recipient: Pubkey,
    pub amount: u64,
    pub message: Vec<u8>,
}

impl super::GatewayInstruction for WithdrawAndCall {
    const DISCRIMINATOR: [u8; 8] = [241, 155, 207, 181, 108, 223, 231, 29];
}
