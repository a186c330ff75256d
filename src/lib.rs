pub mod client; // submits counter instructions to the venue that owns the account
pub mod controller; // delegation lifecycle state machine
pub mod error; // error taxonomy shared by every layer
pub mod instruction; // typed instruction builders matching the program interface
pub mod pda; // counter and delegation program-derived addresses
pub mod provider; // connection and signer boundary
pub mod state; // counter account layout, venues and lifecycle states

use solana_program::pubkey::Pubkey;
use solana_sdk::pubkey;

/// Counter program deployed on devnet.
pub const PROGRAM_ID: Pubkey = pubkey!("CodYjPSj9JePDk1wqiKWn4qQJxnKgxV8tY59DSiT1dR7");

pub const TEST_PDA_SEED: &[u8] = b"test-pda";

pub use crate::client::CounterClient;
pub use crate::controller::{LifecycleController, Outcome};
pub use crate::error::{CounterError, DerivationError, ProviderError};
pub use crate::provider::{ChainProvider, RpcProvider};
pub use crate::state::{CounterSnapshot, LifecycleState, Operation, Venue};
