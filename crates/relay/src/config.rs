use std::net::SocketAddr;

use clap::Parser;

/// buswire-relay: WebSocket position relay for bus producers and browser consumers
#[derive(Parser, Debug)]
#[command(name = "buswire-relay")]
pub struct Config {
    /// Producer (bus) endpoint listen address
    #[arg(long, env = "BUSWIRE_BUS_ADDR", default_value = "127.0.0.1:8080")]
    pub bus_addr: SocketAddr,

    /// Consumer (browser) endpoint listen address
    #[arg(long, env = "BUSWIRE_BROWSER_ADDR", default_value = "127.0.0.1:8000")]
    pub browser_addr: SocketAddr,

    /// Health/metrics listen address
    #[arg(long, env = "BUSWIRE_HEALTH_ADDR", default_value = "0.0.0.0:9090")]
    pub health_addr: SocketAddr,
}
