#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ephemeral_rollups_sdk::consts::DELEGATION_PROGRAM_ID;
use magic_counter::instruction::instruction_discriminator;
use magic_counter::state::Counter;
use magic_counter::{
    ChainProvider, CounterClient, LifecycleController, ProviderError, Venue, PROGRAM_ID,
};
use solana_program::instruction::Instruction;
use solana_program::pubkey::Pubkey;
use solana_sdk::account::Account;
use solana_sdk::signature::Signature;
use tokio::sync::Notify;

/// What the counter program would hold on chain.
#[derive(Debug, Default, Clone)]
pub struct Ledger {
    pub count: Option<u64>,
    /// Count visible on the base layer, only refreshed by commits while
    /// delegated.
    pub committed: u64,
    pub delegated: bool,
}

/// In-memory stand-in for the base layer, the rollup and the wallet.
#[derive(Default)]
pub struct MockChain {
    pub signer: Option<Pubkey>,
    pub ledger: Mutex<Ledger>,
    pub submitted: Mutex<Vec<(Venue, Instruction)>>,
    pub fail_next: Mutex<Option<String>>,
    pub gate: Option<Arc<Notify>>,
}

impl MockChain {
    pub fn with_signer() -> Self {
        Self {
            signer: Some(Pubkey::new_unique()),
            ..Default::default()
        }
    }

    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::with_signer()
        }
    }

    pub fn ledger(&self) -> Ledger {
        self.ledger.lock().unwrap().clone()
    }

    pub fn submitted(&self) -> Vec<(Venue, Instruction)> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn fail_next(&self, reason: &str) {
        *self.fail_next.lock().unwrap() = Some(reason.to_string());
    }

    /// Mimics the program: every guard lives on chain.
    fn execute(&self, venue: Venue, ix: &Instruction) -> Result<(), String> {
        let mut ledger = self.ledger.lock().unwrap();
        let discriminator = &ix.data[..8];
        let expected_venue = if ledger.delegated {
            Venue::Ephemeral
        } else {
            Venue::Base
        };

        if discriminator == instruction_discriminator("initialize") {
            if ledger.count.is_some() {
                return Err("account already in use".to_string());
            }
            ledger.count = Some(0);
            ledger.committed = 0;
            return Ok(());
        }

        let Some(count) = ledger.count else {
            return Err("AccountNotInitialized".to_string());
        };

        if discriminator == instruction_discriminator("increment") {
            if venue != Venue::Base || ledger.delegated {
                return Err("AccountOwnedByWrongProgram".to_string());
            }
            ledger.count = Some(count + 1);
            ledger.committed = count + 1;
        } else if discriminator == instruction_discriminator("delegate") {
            if venue != expected_venue || ledger.delegated {
                return Err("AccountOwnedByWrongProgram".to_string());
            }
            ledger.delegated = true;
        } else if discriminator == instruction_discriminator("commit") {
            if venue != expected_venue || !ledger.delegated {
                return Err("account is not delegated".to_string());
            }
            ledger.committed = count;
        } else if discriminator == instruction_discriminator("increment_and_undelegate") {
            if venue != expected_venue || !ledger.delegated {
                return Err("account is not delegated".to_string());
            }
            ledger.count = Some(count + 1);
            ledger.committed = count + 1;
            ledger.delegated = false;
        } else {
            return Err("InstructionFallbackNotFound".to_string());
        }
        Ok(())
    }

    fn counter_account(owner: Pubkey, count: u64) -> Account {
        Account {
            lamports: 1_000_000,
            data: Counter { count }.to_account_data(),
            owner,
            executable: false,
            rent_epoch: 0,
        }
    }
}

#[async_trait]
impl ChainProvider for MockChain {
    fn current_signer(&self) -> Option<Pubkey> {
        self.signer
    }

    async fn submit(
        &self,
        venue: Venue,
        instruction: Instruction,
        signer: &Pubkey,
    ) -> Result<Signature, ProviderError> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.signer != Some(*signer) {
            return Err(ProviderError::UnknownSigner(*signer));
        }
        self.submitted
            .lock()
            .unwrap()
            .push((venue, instruction.clone()));
        if let Some(reason) = self.fail_next.lock().unwrap().take() {
            return Err(ProviderError::Rejected(reason));
        }
        self.execute(venue, &instruction)
            .map_err(ProviderError::Rejected)?;
        Ok(Signature::new_unique())
    }

    async fn fetch_account(
        &self,
        venue: Venue,
        _address: &Pubkey,
    ) -> Result<Option<Account>, ProviderError> {
        let ledger = self.ledger();
        let Some(count) = ledger.count else {
            return Ok(None);
        };
        Ok(match (venue, ledger.delegated) {
            (Venue::Base, false) => Some(Self::counter_account(PROGRAM_ID, count)),
            (Venue::Base, true) => Some(Self::counter_account(
                DELEGATION_PROGRAM_ID,
                ledger.committed,
            )),
            (Venue::Ephemeral, true) => Some(Self::counter_account(PROGRAM_ID, count)),
            (Venue::Ephemeral, false) => None,
        })
    }
}

pub fn controller(chain: MockChain) -> LifecycleController<MockChain> {
    LifecycleController::new(CounterClient::new(chain, PROGRAM_ID).unwrap())
}

pub fn chain(controller: &LifecycleController<MockChain>) -> &MockChain {
    controller.client().provider()
}
