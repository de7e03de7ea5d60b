//! Crypto Devs ICO client binary.
//!
//! Composition root that assembles:
//! 1. Chain backend (EVM over JSON-RPC, signing with a local key)
//! 2. Frontend (terminal UI)
//! 3. Client (spawns the sync worker and hands control to the frontend)
//!
//! # Features
//!
//! - `frontend-cli`: Terminal UI (default)
//!
//! # Examples
//!
//! ```bash
//! ICO_NETWORK=local ICO_PRIVATE_KEY=0x... \
//! ICO_NFT_CONTRACT_ADDRESS=0x... ICO_TOKEN_CONTRACT_ADDRESS=0x... \
//! cargo run -p ico-client
//! ```

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    #[cfg(feature = "frontend-cli")]
    {
        run_cli().await?;
    }

    #[cfg(not(feature = "frontend-cli"))]
    {
        compile_error!("At least one frontend feature must be enabled (frontend-cli)");
    }

    Ok(())
}

/// Run the CLI frontend.
#[cfg(feature = "frontend-cli")]
async fn run_cli() -> Result<()> {
    use client_blockchain_evm::{EvmBlockchainClient, EvmConfig};
    use client_frontend_cli::{CliConfig, CliFrontend, FrontendConfig, logging};
    use ico_client::Client;

    // 1. Load configuration from environment
    let frontend_config = FrontendConfig::from_env();
    let cli_config = CliConfig::from_env();
    let evm_config = EvmConfig::from_env().map_err(anyhow::Error::msg)?;

    // 2. Setup logging
    let _log_guard = logging::setup_logging(std::env::var("ICO_SESSION_ID").ok())?;

    tracing::info!("Starting Crypto Devs ICO client");
    tracing::info!("EVM configuration: {:?}", evm_config);
    tracing::info!(
        "Sale: price={} wei, cap={}, confirmations={}",
        frontend_config.sale.token_price_wei,
        frontend_config.sale.max_total_supply,
        frontend_config.sync.confirmations
    );

    // 3. Build chain backend
    let blockchain = EvmBlockchainClient::new(evm_config)?;

    // 4. Build Frontend
    let frontend = CliFrontend::new(frontend_config.clone(), cli_config);

    // 5. Build and run
    let client = Client::builder()
        .blockchain(blockchain)
        .frontend(frontend)
        .config(frontend_config)
        .build()?;

    tracing::info!("Client assembled, starting...");
    client.run().await?;

    tracing::info!("Client shutdown complete");
    Ok(())
}
