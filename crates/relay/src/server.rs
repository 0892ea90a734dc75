//! Connection acceptor
//!
//! Two independent accept loops, one per endpoint. Every accepted connection
//! becomes an independently spawned session; a session fault never touches
//! the acceptor or any other session.

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing::{debug, error, warn};

use crate::metrics::{self, ENDPOINT_BROWSER, ENDPOINT_BUS};
use crate::session;
use crate::store::PositionStore;

/// Cadence of bus frames pushed to every consumer.
pub const BROADCAST_INTERVAL: Duration = Duration::from_secs(1);

/// Accept producer connections and spawn a bus ingest session for each.
pub async fn serve_bus_endpoint(listener: TcpListener, store: Arc<PositionStore>) {
    loop {
        match listener.accept().await {
            Ok((socket, peer)) => {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    metrics::session_opened(ENDPOINT_BUS);
                    if let Err(e) = session::bus::run(socket, peer, store).await {
                        warn!(peer = %peer, error = %e, "bus session error");
                    }
                    metrics::session_closed(ENDPOINT_BUS);
                    debug!(peer = %peer, "bus session closed");
                });
            }
            Err(e) => {
                error!(error = %e, "failed to accept producer connection");
            }
        }
    }
}

/// Accept consumer connections and spawn a browser session for each.
pub async fn serve_browser_endpoint(
    listener: TcpListener,
    store: Arc<PositionStore>,
    broadcast_interval: Duration,
) {
    loop {
        match listener.accept().await {
            Ok((socket, peer)) => {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    metrics::session_opened(ENDPOINT_BROWSER);
                    if let Err(e) =
                        session::browser::run(socket, peer, store, broadcast_interval).await
                    {
                        warn!(peer = %peer, error = %e, "browser session error");
                    }
                    metrics::session_closed(ENDPOINT_BROWSER);
                    debug!(peer = %peer, "browser session closed");
                });
            }
            Err(e) => {
                error!(error = %e, "failed to accept consumer connection");
            }
        }
    }
}
