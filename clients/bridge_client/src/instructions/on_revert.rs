use anchor_lang::{
    prelude::*,
    solana_program::sysvar::instructions::ID as INSTRUCTIONS_SYSVAR_ID,
    system_program, ToAccountMetas,
};

/// Accounts for the on_revert instruction, run when a call sent to ZetaChain
/// failed and the gateway returns the funds.
#[derive(Debug, Clone, Copy)]
pub struct OnRevertAccounts {
    pub user: Pubkey,
    pub config: Pubkey,
    pub gateway_program: Pubkey,
}

impl ToAccountMetas for OnRevertAccounts {
    fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.user, true),
            AccountMeta::new(self.config, false),
            AccountMeta::new_readonly(self.gateway_program, false),
            AccountMeta::new_readonly(INSTRUCTIONS_SYSVAR_ID, false),
            AccountMeta::new_readonly(system_program::ID, false),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct OnRevert {
    pub amount: u64,
    /// Solana account that originated the reverted call.
    pub sender: Pubkey,
    pub data: Vec<u8>,
}

impl super::GatewayInstruction for OnRevert {
    const DISCRIMINATOR: [u8; 8] = [226, 44, 101, 52, 224, 214, 41, 9];
}
