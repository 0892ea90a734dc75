//! buswire-relay: real-time geospatial position relay
//!
//! Accepts bus position producers on one WebSocket endpoint and browser
//! consumers on another. Producers stream validated position updates into a
//! shared last-write-wins store; each browser session periodically filters
//! the store against its own viewport and pushes the visible buses.

pub mod config;
pub mod error;
pub mod health;
pub mod metrics;
pub mod server;
pub mod session;
pub mod store;

pub use config::Config;
pub use error::SessionError;
pub use server::{serve_bus_endpoint, serve_browser_endpoint, BROADCAST_INTERVAL};
pub use store::PositionStore;
