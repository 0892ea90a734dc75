//! buswire-relay binary
//!
//! Binds the producer and consumer endpoints plus the health server and runs
//! until interrupted.

use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::{error, info};

use buswire_relay::{config::Config, health, server, store::PositionStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::parse();
    let store = Arc::new(PositionStore::new());

    let bus_listener = TcpListener::bind(config.bus_addr).await?;
    let browser_listener = TcpListener::bind(config.browser_addr).await?;
    info!(addr = %config.bus_addr, "bus endpoint listening");
    info!(addr = %config.browser_addr, "browser endpoint listening");

    let state = health::ServerState::new(Arc::clone(&store));
    let health_addr = config.health_addr;
    tokio::spawn(async move {
        if let Err(e) = health::run_server(health_addr, state).await {
            error!(error = %e, "health server error");
        }
    });
    info!(addr = %config.health_addr, "health server started");

    tokio::select! {
        _ = server::serve_bus_endpoint(bus_listener, Arc::clone(&store)) => {}
        _ = server::serve_browser_endpoint(browser_listener, store, server::BROADCAST_INTERVAL) => {}
        _ = tokio::signal::ctrl_c() => {
            info!("received shutdown signal");
        }
    }

    Ok(())
}
