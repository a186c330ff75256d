// instruction.rs
use ephemeral_rollups_sdk::consts::{MAGIC_CONTEXT_ID, MAGIC_PROGRAM_ID};
use solana_program::hash::hash;
use solana_program::instruction::{AccountMeta, Instruction};
use solana_program::pubkey::Pubkey;
use solana_program::system_program;

use crate::pda::DelegationAccounts;
use crate::state::Operation;

/// One variant per program instruction, each carrying exactly the accounts
/// the program declares for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CounterInstruction {
    Initialize {
        counter: Pubkey,
        user: Pubkey,
    },
    Increment {
        counter: Pubkey,
    },
    Delegate {
        payer: Pubkey,
        pda: Pubkey,
        delegation: DelegationAccounts,
    },
    Commit {
        payer: Pubkey,
        counter: Pubkey,
    },
    IncrementAndUndelegate {
        payer: Pubkey,
        counter: Pubkey,
    },
}

impl CounterInstruction {
    pub fn initialize(counter: Pubkey, user: Pubkey) -> Self {
        Self::Initialize { counter, user }
    }

    pub fn increment(counter: Pubkey) -> Self {
        Self::Increment { counter }
    }

    pub fn delegate(program_id: &Pubkey, payer: Pubkey, pda: Pubkey) -> Self {
        Self::Delegate {
            payer,
            pda,
            delegation: DelegationAccounts::for_account(&pda, program_id),
        }
    }

    pub fn commit(payer: Pubkey, counter: Pubkey) -> Self {
        Self::Commit { payer, counter }
    }

    pub fn increment_and_undelegate(payer: Pubkey, counter: Pubkey) -> Self {
        Self::IncrementAndUndelegate { payer, counter }
    }

    pub fn operation(&self) -> Operation {
        match self {
            Self::Initialize { .. } => Operation::Initialize,
            Self::Increment { .. } => Operation::Increment,
            Self::Delegate { .. } => Operation::Delegate,
            Self::Commit { .. } => Operation::Commit,
            Self::IncrementAndUndelegate { .. } => Operation::UndelegateAndIncrement,
        }
    }

    /// Instruction name as declared by the program.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Initialize { .. } => "initialize",
            Self::Increment { .. } => "increment",
            Self::Delegate { .. } => "delegate",
            Self::Commit { .. } => "commit",
            Self::IncrementAndUndelegate { .. } => "increment_and_undelegate",
        }
    }

    pub fn discriminator(&self) -> [u8; 8] {
        instruction_discriminator(self.name())
    }

    pub fn accounts(&self, program_id: &Pubkey) -> Vec<AccountMeta> {
        match self {
            Self::Initialize { counter, user } => vec![
                AccountMeta::new(*counter, false),
                AccountMeta::new(*user, true),
                AccountMeta::new_readonly(system_program::ID, false),
            ],
            Self::Increment { counter } => vec![AccountMeta::new(*counter, false)],
            Self::Delegate {
                payer,
                pda,
                delegation,
            } => vec![
                AccountMeta::new(*payer, true),
                AccountMeta::new(*pda, false),
                AccountMeta::new_readonly(*program_id, false),
                AccountMeta::new(delegation.buffer, false),
                AccountMeta::new(delegation.delegation_record, false),
                AccountMeta::new(delegation.delegation_metadata, false),
                AccountMeta::new_readonly(delegation.delegation_program, false),
                AccountMeta::new_readonly(system_program::ID, false),
            ],
            Self::Commit { payer, counter } | Self::IncrementAndUndelegate { payer, counter } => {
                vec![
                    AccountMeta::new(*payer, true),
                    AccountMeta::new(*counter, false),
                    AccountMeta::new_readonly(MAGIC_PROGRAM_ID, false),
                    AccountMeta::new(MAGIC_CONTEXT_ID, false),
                ]
            }
        }
    }

    pub fn to_instruction(&self, program_id: &Pubkey) -> Instruction {
        Instruction {
            program_id: *program_id,
            accounts: self.accounts(program_id),
            data: self.discriminator().to_vec(),
        }
    }
}

/// Anchor discriminator: first 8 bytes of `sha256("global:<name>")`.
pub fn instruction_discriminator(name: &str) -> [u8; 8] {
    let digest = hash(format!("global:{name}").as_bytes()).to_bytes();
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&digest[..8]);
    discriminator
}
