//! Outbound connection pool
//!
//! Each feeder owns one WebSocket connection to the relay's producer
//! endpoint and forwards updates from the many buses assigned to it. A
//! feeder never gives up: on handshake failure or mid-stream close it waits
//! a fixed delay and runs the whole connect-and-forward pass again, so the
//! relay sees producers vanish and reappear without any special-casing.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, info, warn};

/// Delay between reconnection attempts.
pub const RECONNECT_DELAY: Duration = Duration::from_secs(3);

#[derive(Error, Debug)]
pub enum FeederError {
    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
    #[error("server closed the connection")]
    ServerClosed,
}

/// Forward updates to the relay until the update channel drains, retrying
/// after `reconnect_delay` on any transport fault.
pub async fn run_feeder(
    id: usize,
    url: String,
    mut updates: mpsc::Receiver<String>,
    reconnect_delay: Duration,
) {
    loop {
        match forward_updates(&url, &mut updates).await {
            Ok(()) => {
                info!(feeder = id, "all buses stopped, closing connection");
                break;
            }
            Err(e) => {
                warn!(
                    feeder = id,
                    error = %e,
                    delay_secs = reconnect_delay.as_secs(),
                    "connection lost, reconnecting"
                );
                tokio::time::sleep(reconnect_delay).await;
            }
        }
    }
}

/// One connect-and-forward pass. Ok means the update channel has drained
/// (every bus on this feeder stopped); any transport fault is an Err and the
/// caller decides whether to retry.
async fn forward_updates(
    url: &str,
    updates: &mut mpsc::Receiver<String>,
) -> Result<(), FeederError> {
    let (ws, _) = connect_async(url).await?;
    debug!(url, "feeder connected");

    let (mut sink, mut stream) = ws.split();
    loop {
        tokio::select! {
            update = updates.recv() => match update {
                Some(payload) => sink.send(Message::Text(payload)).await?,
                None => {
                    sink.close().await.ok();
                    return Ok(());
                }
            },
            reply = stream.next() => match reply {
                Some(Ok(Message::Text(text))) => {
                    // The relay only ever talks back to reject an update.
                    warn!(reply = %text, "relay rejected an update");
                }
                Some(Ok(Message::Ping(payload))) => {
                    sink.send(Message::Pong(payload)).await?;
                }
                Some(Ok(Message::Close(_))) | None => return Err(FeederError::ServerClosed),
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
            }
        }
    }
}
