mod args;

use clap::Parser;
use magic_counter::controller::CounterView;
use magic_counter::{CounterClient, LifecycleController, Outcome, RpcProvider};
use solana_sdk::signature::Signer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::args::{get_ephemeral_url, get_program_id, get_rpc_url, get_wallet, Args, Command};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();
    let rpc_url = get_rpc_url(args.rpc_url);
    let ephemeral_url = get_ephemeral_url(args.ephemeral_url);
    let program_id = get_program_id(args.program_id)?;
    let wallet = get_wallet(args.private_key);

    match &wallet {
        Some(wallet) => info!(wallet_pubkey = %wallet.pubkey(), "Identity initialized"),
        None => info!("No wallet configured, operations will be skipped"),
    }
    info!(rpc = %rpc_url, ephemeral = %ephemeral_url, %program_id, "Connecting");

    let provider = RpcProvider::new(&rpc_url, &ephemeral_url, wallet);
    let controller = LifecycleController::new(CounterClient::new(provider, program_id)?);
    info!(counter = %controller.client().counter(), "Counter address derived");

    controller.sync().await?;

    let result = match args.command {
        Command::Status => None,
        Command::Initialize => Some(controller.initialize().await),
        Command::Increment => Some(controller.increment().await),
        Command::Delegate => Some(controller.delegate().await),
        Command::Commit => Some(controller.commit().await),
        Command::Undelegate => Some(controller.undelegate_and_increment().await),
    };
    match result {
        Some(Ok(Outcome::Suppressed)) => println!("No wallet connected, nothing sent."),
        Some(Err(e)) => error!(error = %e, "Command failed"),
        Some(Ok(Outcome::Applied(_))) | None => {}
    }

    render(&controller.view());
    Ok(())
}

fn render(view: &CounterView) {
    println!("Magic Counter");
    println!("  count:     {}", view.count);
    println!(
        "  venue:     {}",
        if view.delegated { "delegated" } else { "base layer" }
    );
    println!(
        "  wallet:    {}",
        if view.wallet_connected { "connected" } else { "disconnected" }
    );
    let available: Vec<String> = view.available.iter().map(ToString::to_string).collect();
    println!("  available: {}", available.join(", "));
}
