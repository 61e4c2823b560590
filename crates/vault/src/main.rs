//! `tx-vault-svc` — vault binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise the tracing subscriber.
//! 3. Create the in-memory [`TxStore`] (volatile; records live for the
//!    lifetime of the process).
//! 4. Build the Axum router and start the HTTP server.

mod config;
mod crypto;
mod server;
mod store;
mod telemetry;

use anyhow::Result;
use tracing::info;

use config::Config;
use server::state::AppState;
use store::TxStore;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        port = cfg.port,
        "tx-vault-svc starting"
    );

    // -----------------------------------------------------------------------
    // 3. Transaction store
    // -----------------------------------------------------------------------
    let tx_store = TxStore::new();

    // -----------------------------------------------------------------------
    // 4. HTTP server
    // -----------------------------------------------------------------------
    let state = AppState::new(tx_store);
    let router = server::router::build(state);

    let addr: std::net::SocketAddr = ([0, 0, 0, 0], cfg.port).into();
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
