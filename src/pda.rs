use ephemeral_rollups_sdk::consts::DELEGATION_PROGRAM_ID;
use ephemeral_rollups_sdk::pda::{
    delegate_buffer_pda_from_delegated_account_and_owner_program,
    delegation_metadata_pda_from_delegated_account, delegation_record_pda_from_delegated_account,
};
use solana_program::pubkey::Pubkey;

use crate::error::DerivationError;
use crate::TEST_PDA_SEED;

/// Address of the counter account owned by `program_id`.
pub fn counter_pda(program_id: &Pubkey) -> Result<(Pubkey, u8), DerivationError> {
    Pubkey::try_find_program_address(&[TEST_PDA_SEED], program_id).ok_or_else(|| {
        DerivationError {
            seed: TEST_PDA_SEED.to_vec(),
            program_id: *program_id,
        }
    })
}

pub fn counter_address(program_id: &Pubkey) -> Result<Pubkey, DerivationError> {
    counter_pda(program_id).map(|(address, _bump)| address)
}

/// Delegation program accounts touched when delegating `delegated_account`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelegationAccounts {
    pub buffer: Pubkey,
    pub delegation_record: Pubkey,
    pub delegation_metadata: Pubkey,
    pub delegation_program: Pubkey,
}

impl DelegationAccounts {
    pub fn for_account(delegated_account: &Pubkey, owner_program: &Pubkey) -> Self {
        Self {
            buffer: delegate_buffer_pda_from_delegated_account_and_owner_program(
                delegated_account,
                owner_program,
            ),
            delegation_record: delegation_record_pda_from_delegated_account(delegated_account),
            delegation_metadata: delegation_metadata_pda_from_delegated_account(
                delegated_account,
            ),
            delegation_program: DELEGATION_PROGRAM_ID,
        }
    }
}
