use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use solana_program::pubkey::Pubkey;
use tracing::{debug, info, warn};

use crate::client::CounterClient;
use crate::error::CounterError;
use crate::provider::ChainProvider;
use crate::state::{LifecycleState, Operation};

/// Result of a lifecycle operation that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Confirmed on chain; carries the new local state.
    Applied(LifecycleState),
    /// No wallet connected, nothing was sent.
    Suppressed,
}

/// Snapshot handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterView {
    pub count: u64,
    pub delegated: bool,
    pub wallet_connected: bool,
    pub busy: bool,
    pub available: Vec<Operation>,
}

/// Tracks which venue owns the counter and serializes lifecycle operations.
///
/// Local state is only a cache of confirmed results: it advances after the
/// network confirms an operation and is never touched when one fails. At most
/// one operation (or sync) runs at a time; overlapping calls get
/// [`CounterError::Busy`].
pub struct LifecycleController<P> {
    client: CounterClient<P>,
    state: Mutex<LifecycleState>,
    in_flight: AtomicBool,
}

struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<P: ChainProvider> LifecycleController<P> {
    pub fn new(client: CounterClient<P>) -> Self {
        Self {
            client,
            state: Mutex::new(LifecycleState::Uninitialized),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn client(&self) -> &CounterClient<P> {
        &self.client
    }

    pub fn state(&self) -> LifecycleState {
        *self.lock_state()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn view(&self) -> CounterView {
        let state = self.state();
        let wallet_connected = self.client.provider().current_signer().is_some();
        let busy = self.is_busy();
        let available = if wallet_connected && !busy {
            state.available_operations()
        } else {
            Vec::new()
        };
        CounterView {
            count: state.count(),
            delegated: state.is_delegated(),
            wallet_connected,
            busy,
            available,
        }
    }

    pub async fn initialize(&self) -> Result<Outcome, CounterError> {
        self.run(Operation::Initialize).await
    }

    pub async fn increment(&self) -> Result<Outcome, CounterError> {
        self.run(Operation::Increment).await
    }

    pub async fn delegate(&self) -> Result<Outcome, CounterError> {
        self.run(Operation::Delegate).await
    }

    pub async fn commit(&self) -> Result<Outcome, CounterError> {
        self.run(Operation::Commit).await
    }

    pub async fn undelegate_and_increment(&self) -> Result<Outcome, CounterError> {
        self.run(Operation::UndelegateAndIncrement).await
    }

    /// Replaces the local state with what is currently on chain.
    pub async fn sync(&self) -> Result<LifecycleState, CounterError> {
        let _guard = self.begin()?;
        let snapshot = self.client.fetch_counter().await.map_err(|e| {
            warn!(error = %e, "Failed to fetch counter");
            e
        })?;
        let state = LifecycleState::from(snapshot);
        *self.lock_state() = state;
        info!(%state, "Synchronized counter state");
        Ok(state)
    }

    pub async fn run(&self, operation: Operation) -> Result<Outcome, CounterError> {
        let Some(signer) = self.client.provider().current_signer() else {
            debug!(%operation, "No wallet connected, skipping");
            return Ok(Outcome::Suppressed);
        };
        let _guard = self.begin()?;

        let current = self.state();
        let Some(next) = current.transition(operation) else {
            let err = CounterError::InvalidTransition {
                operation,
                state: current,
            };
            warn!(error = %err, "Rejected operation");
            return Err(err);
        };

        if let Err(e) = self.dispatch(operation, &signer).await {
            warn!(%operation, error = %e, "Operation failed, local state unchanged");
            return Err(e);
        }

        *self.lock_state() = next;
        info!(%operation, state = %next, "Operation applied");
        Ok(Outcome::Applied(next))
    }

    async fn dispatch(&self, operation: Operation, signer: &Pubkey) -> Result<(), CounterError> {
        match operation {
            Operation::Initialize => self.client.initialize(signer).await?,
            Operation::Increment => self.client.increment(signer).await?,
            Operation::Delegate => self.client.delegate(signer).await?,
            Operation::Commit => self.client.commit(signer).await?,
            Operation::UndelegateAndIncrement => {
                self.client.undelegate_and_increment(signer).await?
            }
        };
        Ok(())
    }

    fn begin(&self) -> Result<InFlight<'_>, CounterError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| CounterError::Busy)?;
        Ok(InFlight(&self.in_flight))
    }

    fn lock_state(&self) -> MutexGuard<'_, LifecycleState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
