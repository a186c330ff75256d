use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_program::instruction::Instruction;
use solana_program::pubkey::Pubkey;
use solana_sdk::{
    account::Account,
    commitment_config::CommitmentConfig,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};
use tracing::{debug, info};

use crate::error::ProviderError;
use crate::state::Venue;

/// Network connection and wallet supplied by the surrounding environment.
#[async_trait]
pub trait ChainProvider: Send + Sync {
    /// Public key of the connected wallet, if any.
    fn current_signer(&self) -> Option<Pubkey>;

    /// Signs `instruction` with `signer`, sends it to `venue` and waits for
    /// confirmation.
    async fn submit(
        &self,
        venue: Venue,
        instruction: Instruction,
        signer: &Pubkey,
    ) -> Result<Signature, ProviderError>;

    async fn fetch_account(
        &self,
        venue: Venue,
        address: &Pubkey,
    ) -> Result<Option<Account>, ProviderError>;
}

pub struct RpcProvider {
    base: RpcClient,
    ephemeral: RpcClient,
    wallet: Option<Keypair>,
}

impl RpcProvider {
    pub fn new(base_url: &str, ephemeral_url: &str, wallet: Option<Keypair>) -> Self {
        Self {
            base: RpcClient::new_with_commitment(
                base_url.to_string(),
                CommitmentConfig::confirmed(),
            ),
            ephemeral: RpcClient::new_with_commitment(
                ephemeral_url.to_string(),
                CommitmentConfig::confirmed(),
            ),
            wallet,
        }
    }

    fn client(&self, venue: Venue) -> &RpcClient {
        match venue {
            Venue::Base => &self.base,
            Venue::Ephemeral => &self.ephemeral,
        }
    }
}

#[async_trait]
impl ChainProvider for RpcProvider {
    fn current_signer(&self) -> Option<Pubkey> {
        self.wallet.as_ref().map(|wallet| wallet.pubkey())
    }

    async fn submit(
        &self,
        venue: Venue,
        instruction: Instruction,
        signer: &Pubkey,
    ) -> Result<Signature, ProviderError> {
        let wallet = self
            .wallet
            .as_ref()
            .filter(|wallet| wallet.pubkey() == *signer)
            .ok_or(ProviderError::UnknownSigner(*signer))?;
        let client = self.client(venue);

        let blockhash = client.get_latest_blockhash().await?;
        let mut tx = Transaction::new_with_payer(&[instruction], Some(signer));
        tx.try_sign(&[wallet], blockhash)?;

        debug!(%venue, url = %client.url(), "Sending transaction");
        let signature = client.send_and_confirm_transaction(&tx).await?;
        info!(%venue, %signature, "Transaction confirmed");
        Ok(signature)
    }

    async fn fetch_account(
        &self,
        venue: Venue,
        address: &Pubkey,
    ) -> Result<Option<Account>, ProviderError> {
        let client = self.client(venue);
        let response = client
            .get_account_with_commitment(address, client.commitment())
            .await?;
        Ok(response.value)
    }
}
