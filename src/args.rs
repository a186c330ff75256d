use clap::{Parser, Subcommand};
use solana_program::pubkey::Pubkey;
use solana_sdk::signature::Keypair;
use std::str::FromStr;

use magic_counter::PROGRAM_ID;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[arg(long, help = "Base58 private key of the wallet")]
    pub private_key: Option<String>,
    #[arg(long, help = "Solana base layer RPC URL")]
    pub rpc_url: Option<String>,
    #[arg(long, help = "Ephemeral rollup RPC URL")]
    pub ephemeral_url: Option<String>,
    #[arg(long, help = "Counter program id")]
    pub program_id: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Show the counter and its delegation status
    Status,
    Initialize,
    Increment,
    /// Delegate the counter to the ephemeral rollup
    Delegate,
    /// Checkpoint the delegated counter to the base layer
    Commit,
    /// Increment, commit and hand the counter back to the base layer
    Undelegate,
}

pub fn get_rpc_url(cli_url: Option<String>) -> String {
    std::env::var("COUNTER_RPC_URL")
        .ok()
        .or(cli_url)
        .unwrap_or_else(|| "https://api.devnet.solana.com".to_string())
}

pub fn get_ephemeral_url(cli_url: Option<String>) -> String {
    std::env::var("COUNTER_EPHEMERAL_URL")
        .ok()
        .or(cli_url)
        .unwrap_or_else(|| "https://devnet.magicblock.app/".to_string())
}

/// Without a key there is no wallet and every operation is skipped.
pub fn get_wallet(cli_key: Option<String>) -> Option<Keypair> {
    std::env::var("COUNTER_PRIVATE_KEY")
        .ok()
        .or(cli_key)
        .map(|key| Keypair::from_base58_string(key.trim()))
}

pub fn get_program_id(cli_program: Option<String>) -> Result<Pubkey, String> {
    match std::env::var("COUNTER_PROGRAM_ID").ok().or(cli_program) {
        Some(id) => Pubkey::from_str(id.trim()).map_err(|e| format!("invalid program id {id}: {e}")),
        None => Ok(PROGRAM_ID),
    }
}
