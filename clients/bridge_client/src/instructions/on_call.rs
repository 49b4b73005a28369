use anchor_lang::{
    prelude::*,
    solana_program::sysvar::instructions::ID as INSTRUCTIONS_SYSVAR_ID,
    system_program, ToAccountMetas,
};

/// Accounts for the on_call instruction, the handler the gateway expects to be
/// invoked when ZetaChain calls into the bridge program.
#[derive(Debug, Clone, Copy)]
pub struct OnCallAccounts {
    pub user: Pubkey,
    pub config: Pubkey,
    pub gateway_program: Pubkey,
}

impl ToAccountMetas for OnCallAccounts {
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
pub struct OnCall {
    pub amount: u64,
    /// EVM address of the ZetaChain caller.
    pub sender: [u8; 20],
    pub data: Vec<u8>,
}

impl super::GatewayInstruction for OnCall {
    const DISCRIMINATOR: [u8; 8] = [16, 136, 66, 32, 254, 40, 181, 8];
}
