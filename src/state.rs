// state.rs
use std::fmt;

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::hash::hash;

use crate::error::CounterError;

/// On-chain layout of the counter account, without the Anchor discriminator.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counter {
    pub count: u64,
}

impl Counter {
    pub const SIZE: usize = 8;
    pub const DISCRIMINATOR_LEN: usize = 8;

    pub fn discriminator() -> [u8; 8] {
        let digest = hash(b"account:Counter").to_bytes();
        let mut discriminator = [0u8; 8];
        discriminator.copy_from_slice(&digest[..8]);
        discriminator
    }

    /// Decodes the raw account data, discriminator included.
    pub fn try_from_account_data(data: &[u8]) -> Result<Self, CounterError> {
        if data.len() < Self::DISCRIMINATOR_LEN + Self::SIZE {
            return Err(CounterError::InvalidAccountData(format!(
                "expected at least {} bytes, got {}",
                Self::DISCRIMINATOR_LEN + Self::SIZE,
                data.len()
            )));
        }
        let (discriminator, rest) = data.split_at(Self::DISCRIMINATOR_LEN);
        if discriminator != Self::discriminator() {
            return Err(CounterError::InvalidAccountData(
                "account discriminator mismatch".to_string(),
            ));
        }
        Self::try_from_slice(&rest[..Self::SIZE])
            .map_err(|e| CounterError::InvalidAccountData(e.to_string()))
    }

    pub fn to_account_data(&self) -> Vec<u8> {
        let mut data = Self::discriminator().to_vec();
        data.extend_from_slice(&self.count.to_le_bytes());
        data
    }
}

/// Where the counter account currently lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Venue {
    Base,
    Ephemeral,
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Venue::Base => write!(f, "base layer"),
            Venue::Ephemeral => write!(f, "ephemeral rollup"),
        }
    }
}

/// Counter state as read back from chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterSnapshot {
    pub count: u64,
    pub venue: Venue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Initialize,
    Increment,
    Delegate,
    Commit,
    UndelegateAndIncrement,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Initialize,
        Operation::Increment,
        Operation::Delegate,
        Operation::Commit,
        Operation::UndelegateAndIncrement,
    ];

    /// Venue the instruction has to be submitted to.
    pub fn venue(&self) -> Venue {
        match self {
            Operation::Initialize | Operation::Increment | Operation::Delegate => Venue::Base,
            Operation::Commit | Operation::UndelegateAndIncrement => Venue::Ephemeral,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Initialize => "initialize",
            Operation::Increment => "increment",
            Operation::Delegate => "delegate",
            Operation::Commit => "commit",
            Operation::UndelegateAndIncrement => "undelegate",
        };
        f.write_str(name)
    }
}

/// Local mirror of the counter's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    #[default]
    Uninitialized,
    Owned(u64),
    Delegated(u64),
}

impl LifecycleState {
    pub fn count(&self) -> u64 {
        match self {
            LifecycleState::Uninitialized => 0,
            LifecycleState::Owned(count) | LifecycleState::Delegated(count) => *count,
        }
    }

    pub fn is_delegated(&self) -> bool {
        matches!(self, LifecycleState::Delegated(_))
    }

    /// State reached when `operation` is confirmed, or `None` if the
    /// operation is not allowed from here.
    pub fn transition(&self, operation: Operation) -> Option<LifecycleState> {
        match (*self, operation) {
            (_, Operation::Initialize) => Some(LifecycleState::Owned(0)),
            (LifecycleState::Owned(n), Operation::Increment) => {
                Some(LifecycleState::Owned(n.checked_add(1)?))
            }
            (LifecycleState::Owned(n), Operation::Delegate) => Some(LifecycleState::Delegated(n)),
            (LifecycleState::Delegated(n), Operation::Commit) => {
                Some(LifecycleState::Delegated(n))
            }
            (LifecycleState::Delegated(n), Operation::UndelegateAndIncrement) => {
                Some(LifecycleState::Owned(n.checked_add(1)?))
            }
            _ => None,
        }
    }

    pub fn available_operations(&self) -> Vec<Operation> {
        Operation::ALL
            .into_iter()
            .filter(|op| self.transition(*op).is_some())
            .collect()
    }
}

impl From<Option<CounterSnapshot>> for LifecycleState {
    fn from(snapshot: Option<CounterSnapshot>) -> Self {
        match snapshot {
            None => LifecycleState::Uninitialized,
            Some(CounterSnapshot {
                count,
                venue: Venue::Base,
            }) => LifecycleState::Owned(count),
            Some(CounterSnapshot {
                count,
                venue: Venue::Ephemeral,
            }) => LifecycleState::Delegated(count),
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleState::Uninitialized => write!(f, "uninitialized"),
            LifecycleState::Owned(count) => write!(f, "owned on base layer (count {count})"),
            LifecycleState::Delegated(count) => write!(f, "delegated (count {count})"),
        }
    }
}
