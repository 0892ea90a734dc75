use std::path::PathBuf;

use clap::Parser;
use uuid::Uuid;

/// buswire-emulator: synthetic bus position generator
#[derive(Parser, Debug)]
#[command(name = "buswire-emulator")]
pub struct Config {
    /// Relay producer endpoint URL
    #[arg(long, env = "BUSWIRE_SERVER", default_value = "ws://127.0.0.1:8080")]
    pub server: String,

    /// Directory of route geometry JSON files
    #[arg(long, env = "BUSWIRE_ROUTES_DIR", default_value = "routes")]
    pub routes_dir: PathBuf,

    /// Number of bus routes to load
    #[arg(long, default_value_t = 595)]
    pub routes_number: usize,

    /// Number of buses per route
    #[arg(long, default_value_t = 3)]
    pub buses_per_route: usize,

    /// Number of outbound websocket connections to spread buses over
    #[arg(long, default_value_t = 3)]
    pub websockets_number: usize,

    /// Suffix appended to generated bus ids, so parallel emulator runs
    /// never collide
    #[arg(long, default_value_t = default_emulator_id())]
    pub emulator_id: String,

    /// Base seconds between position updates per bus
    #[arg(long, default_value_t = 3)]
    pub refresh_timeout: u64,
}

fn default_emulator_id() -> String {
    Uuid::new_v4().to_string()
}
