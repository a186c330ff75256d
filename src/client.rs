use ephemeral_rollups_sdk::consts::DELEGATION_PROGRAM_ID;
use solana_program::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use tracing::{debug, info};

use crate::error::CounterError;
use crate::instruction::CounterInstruction;
use crate::pda::counter_address;
use crate::provider::ChainProvider;
use crate::state::{Counter, CounterSnapshot, Venue};

/// Builds counter instructions and submits them to the venue that owns the
/// account.
pub struct CounterClient<P> {
    provider: P,
    program_id: Pubkey,
    counter: Pubkey,
}

impl<P: ChainProvider> CounterClient<P> {
    pub fn new(provider: P, program_id: Pubkey) -> Result<Self, CounterError> {
        let counter = counter_address(&program_id)?;
        Ok(Self {
            provider,
            program_id,
            counter,
        })
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    pub fn counter(&self) -> &Pubkey {
        &self.counter
    }

    pub async fn initialize(&self, user: &Pubkey) -> Result<Signature, CounterError> {
        self.send(CounterInstruction::initialize(self.counter, *user), user)
            .await
    }

    pub async fn increment(&self, signer: &Pubkey) -> Result<Signature, CounterError> {
        self.send(CounterInstruction::increment(self.counter), signer)
            .await
    }

    pub async fn delegate(&self, payer: &Pubkey) -> Result<Signature, CounterError> {
        let ix = CounterInstruction::delegate(&self.program_id, *payer, self.counter);
        self.send(ix, payer).await
    }

    pub async fn commit(&self, payer: &Pubkey) -> Result<Signature, CounterError> {
        self.send(CounterInstruction::commit(*payer, self.counter), payer)
            .await
    }

    pub async fn undelegate_and_increment(
        &self,
        payer: &Pubkey,
    ) -> Result<Signature, CounterError> {
        let ix = CounterInstruction::increment_and_undelegate(*payer, self.counter);
        self.send(ix, payer).await
    }

    /// Reads the counter from whichever venue currently owns it.
    pub async fn fetch_counter(&self) -> Result<Option<CounterSnapshot>, CounterError> {
        let Some(base_account) = self
            .provider
            .fetch_account(Venue::Base, &self.counter)
            .await?
        else {
            debug!(counter = %self.counter, "Counter account does not exist");
            return Ok(None);
        };

        if base_account.owner == self.program_id {
            let counter = Counter::try_from_account_data(&base_account.data)?;
            return Ok(Some(CounterSnapshot {
                count: counter.count,
                venue: Venue::Base,
            }));
        }

        if base_account.owner != DELEGATION_PROGRAM_ID {
            return Err(CounterError::InvalidAccountData(format!(
                "counter is owned by unexpected program {}",
                base_account.owner
            )));
        }

        // Base data only reflects the last commit while delegated.
        let data = match self
            .provider
            .fetch_account(Venue::Ephemeral, &self.counter)
            .await?
        {
            Some(account) => account.data,
            None => base_account.data,
        };
        let counter = Counter::try_from_account_data(&data)?;
        Ok(Some(CounterSnapshot {
            count: counter.count,
            venue: Venue::Ephemeral,
        }))
    }

    async fn send(
        &self,
        ix: CounterInstruction,
        signer: &Pubkey,
    ) -> Result<Signature, CounterError> {
        let operation = ix.operation();
        let venue = operation.venue();
        debug!(%operation, %venue, counter = %self.counter, "Submitting instruction");
        let signature = self
            .provider
            .submit(venue, ix.to_instruction(&self.program_id), signer)
            .await?;
        info!(%operation, %signature, "Instruction confirmed");
        Ok(signature)
    }
}
