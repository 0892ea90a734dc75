//! Bus ingest session
//!
//! Receive loop for one producer connection: validate each text message and
//! upsert it into the shared store. Invalid messages get an error reply and
//! the session continues; the producer is never disconnected for bad input.

use std::net::SocketAddr;
use std::sync::Arc;

use buswire_protocol::validate_bus_update;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::{accept_async, tungstenite::Message};
use tracing::{debug, trace};

use crate::error::SessionError;
use crate::metrics::{self, ENDPOINT_BUS};
use crate::session::is_clean_close;
use crate::store::PositionStore;

/// Run one producer session until the peer disconnects.
pub async fn run(
    socket: TcpStream,
    peer: SocketAddr,
    store: Arc<PositionStore>,
) -> Result<(), SessionError> {
    let ws = accept_async(socket).await?;
    debug!(peer = %peer, "bus producer connected");

    let (mut sink, mut stream) = ws.split();

    while let Some(message) = stream.next().await {
        let message = match message {
            Ok(m) => m,
            Err(e) if is_clean_close(&e) => break,
            Err(e) => return Err(e.into()),
        };

        match message {
            Message::Text(text) => match validate_bus_update(&text) {
                Ok(record) => {
                    trace!(peer = %peer, bus = %record.bus_id, "position update");
                    store.upsert(record);
                    metrics::inc_position();
                }
                Err(err) => {
                    debug!(peer = %peer, error = %err, "rejected bus update");
                    metrics::inc_validation_error(ENDPOINT_BUS);
                    let reply = serde_json::to_string(&err.reply())?;
                    if let Err(e) = sink.send(Message::Text(reply)).await {
                        if is_clean_close(&e) {
                            break;
                        }
                        return Err(e.into());
                    }
                }
            },
            Message::Ping(payload) => {
                if let Err(e) = sink.send(Message::Pong(payload)).await {
                    if is_clean_close(&e) {
                        break;
                    }
                    return Err(e.into());
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    Ok(())
}
