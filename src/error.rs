use solana_client::client_error::ClientError;
use solana_program::pubkey::Pubkey;
use solana_sdk::signer::SignerError;
use thiserror::Error;

use crate::state::{LifecycleState, Operation};

/// No bump seed produced an off-curve address for the seed/program pair.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no program address for seed {seed:?} under program {program_id}")]
pub struct DerivationError {
    pub seed: Vec<u8>,
    pub program_id: Pubkey,
}

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("rpc error: {0}")]
    Rpc(#[from] Box<ClientError>),
    #[error("signing failed: {0}")]
    Signer(#[from] SignerError),
    #[error("wallet {0} cannot sign for this provider")]
    UnknownSigner(Pubkey),
    /// Raised by providers that do not talk to a real cluster.
    #[error("{0}")]
    Rejected(String),
}

impl From<ClientError> for ProviderError {
    fn from(err: ClientError) -> Self {
        Self::Rpc(Box::new(err))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CounterError {
    #[error("no wallet is connected")]
    SignerUnavailable,
    #[error(transparent)]
    Derivation(#[from] DerivationError),
    #[error("operation failed: {0}")]
    OperationFailed(String),
    #[error("{operation} is not available while {state}")]
    InvalidTransition {
        operation: Operation,
        state: LifecycleState,
    },
    #[error("another operation is still in flight")]
    Busy,
    #[error("invalid counter account data: {0}")]
    InvalidAccountData(String),
}

impl From<ProviderError> for CounterError {
    fn from(err: ProviderError) -> Self {
        Self::OperationFailed(err.to_string())
    }
}
