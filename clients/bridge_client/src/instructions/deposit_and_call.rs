use anchor_lang::{prelude::*, system_program, ToAccountMetas};

/// Accounts for the deposit_and_call instruction that locks native SOL with the
/// gateway and forwards a message to the receiver on ZetaChain.
#[derive(Debug, Clone, Copy)]
pub struct DepositAndCallAccounts {
    /// The depositor. Signs and pays both the deposit and the fees.
    pub user: Pubkey,

    /// Bridge config PDA derived from `CONFIG_SEED`.
    pub config: Pubkey,

    /// ZetaChain gateway program the deposit is forwarded to.
    pub gateway_program: Pubkey,
}

impl ToAccountMetas for DepositAndCallAccounts {
    fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.user, true),
            AccountMeta::new(self.config, false),
            AccountMeta::new_readonly(self.gateway_program, false),
            AccountMeta::new_readonly(system_program::ID, false),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct DepositAndCall {
    pub chain_id: u64,
    pub receiver: [u8; 20],
    pub amount: u64,
    pub message: Vec<u8>,
}

impl super::GatewayInstruction for DepositAndCall {
    const DISCRIMINATOR: [u8; 8] = [65, 33, 186, 198, 114, 223, 133, 57];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_order_and_flags() {
        let accounts = DepositAndCallAccounts {
            user: Pubkey::new_unique(),
            config: Pubkey::new_unique(),
            gateway_program: Pubkey::new_unique(),
        };

        let metas = accounts.to_account_metas(None);

        assert_eq!(metas.len(), 4);
        assert_eq!(metas[0].pubkey, accounts.user);
        assert!(metas[0].is_signer && metas[0].is_writable);
        assert!(metas[1].is_writable && !metas[1].is_signer);
        assert!(!metas[2].is_writable);
        assert_eq!(metas[3].pubkey, system_program::ID);
    }
}
