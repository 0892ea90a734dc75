//! buswire-emulator: synthetic bus fleet
//!
//! Spawns a pool of relay connections and a fleet of simulated buses walking
//! real route geometry, each bus assigned to one pool connection for life.

mod config;
mod feeder;
mod fleet;
mod routes;
mod walker;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use rand::Rng;
use tokio::sync::mpsc;
use tracing::info;
use url::Url;

use config::Config;

/// Updates buffered per pool connection. Kept small so buses slow down with
/// the connection instead of piling up stale positions during an outage.
const FEEDER_BUFFER: usize = 1;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::parse();
    anyhow::ensure!(
        config.websockets_number > 0,
        "--websockets-number must be at least 1"
    );
    Url::parse(&config.server).context("invalid --server URL")?;

    let routes = routes::load_routes(&config.routes_dir, config.routes_number)?;
    anyhow::ensure!(
        !routes.is_empty(),
        "no route files found in {}",
        config.routes_dir.display()
    );
    info!(routes = routes.len(), "loaded route geometry");

    let mut senders = Vec::with_capacity(config.websockets_number);
    for id in 0..config.websockets_number {
        let (tx, rx) = mpsc::channel(FEEDER_BUFFER);
        senders.push(tx);
        tokio::spawn(feeder::run_feeder(
            id,
            config.server.clone(),
            rx,
            feeder::RECONNECT_DELAY,
        ));
    }

    let refresh = Duration::from_secs(config.refresh_timeout);
    let total_buses = config.routes_number * config.buses_per_route;
    let mut rng = rand::rng();
    for idx in 0..total_buses {
        let route = Arc::clone(&routes[idx % routes.len()]);
        let bus_id = fleet::bus_id(&route.name, idx, &config.emulator_id);
        // Assigned once at spawn; one connection carries many buses.
        let updates = senders[rng.random_range(0..senders.len())].clone();
        tokio::spawn(fleet::run_bus(updates, bus_id, route, refresh));
    }
    drop(senders);

    info!(
        buses = total_buses,
        connections = config.websockets_number,
        server = %config.server,
        "emulator running"
    );

    tokio::signal::ctrl_c().await?;
    info!("received shutdown signal");
    Ok(())
}
