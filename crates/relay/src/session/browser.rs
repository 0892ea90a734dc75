//! Browser session
//!
//! Three cooperating loops over one consumer connection, sharing a private
//! viewport: a listener applies validated bounds updates, a broadcaster
//! pushes the viewport-filtered store snapshot every interval, and a writer
//! serializes outbound frames from both onto the socket. The first loop to
//! finish tears down the whole session.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use buswire_protocol::{validate_bounds_update, BusFrame, BusRecord, ViewportBounds};
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, watch};
use tokio::time::{interval, MissedTickBehavior};
use tokio_tungstenite::{accept_async, tungstenite::Message, WebSocketStream};
use tracing::{debug, trace};

use crate::error::SessionError;
use crate::metrics::{self, ENDPOINT_BROWSER};
use crate::session::is_clean_close;
use crate::store::PositionStore;

/// Outbound frames buffered between the session loops and the writer.
const OUTBOUND_BUFFER: usize = 16;

/// Run one consumer session until the peer disconnects or a loop faults.
pub async fn run(
    socket: TcpStream,
    peer: SocketAddr,
    store: Arc<PositionStore>,
    broadcast_interval: Duration,
) -> Result<(), SessionError> {
    let ws = accept_async(socket).await?;
    debug!(peer = %peer, "browser connected");

    let (sink, stream) = ws.split();
    // The viewport starts empty; the listener overwrites it wholesale on
    // every valid newBounds message, the broadcaster reads the latest value.
    let (bounds_tx, bounds_rx) = watch::channel(ViewportBounds::default());
    let (out_tx, out_rx) = mpsc::channel::<Message>(OUTBOUND_BUFFER);

    tokio::select! {
        res = write_outbound(sink, out_rx) => res,
        res = broadcast_buses(&store, bounds_rx, out_tx.clone(), broadcast_interval) => res,
        res = listen_for_bounds(stream, bounds_tx, out_tx) => res,
    }
}

/// Forward outbound messages from the session loops onto the socket.
async fn write_outbound(
    mut sink: SplitSink<WebSocketStream<TcpStream>, Message>,
    mut outbound: mpsc::Receiver<Message>,
) -> Result<(), SessionError> {
    while let Some(message) = outbound.recv().await {
        if let Err(e) = sink.send(message).await {
            if is_clean_close(&e) {
                break;
            }
            return Err(e.into());
        }
    }
    Ok(())
}

/// Push the viewport-filtered store snapshot every tick. The first frame
/// goes out immediately on session start.
async fn broadcast_buses(
    store: &PositionStore,
    bounds_rx: watch::Receiver<ViewportBounds>,
    outbound: mpsc::Sender<Message>,
    period: Duration,
) -> Result<(), SessionError> {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let bounds = *bounds_rx.borrow();
        let visible: Vec<BusRecord> = store
            .snapshot()
            .into_iter()
            .filter(|bus| bounds.contains(bus.lat, bus.lng))
            .collect();
        trace!(count = visible.len(), "buses inside bounds");

        let frame = serde_json::to_string(&BusFrame::new(visible))?;
        if outbound.send(Message::Text(frame)).await.is_err() {
            // Writer gone, session is tearing down.
            break;
        }
        metrics::inc_frame();
    }
    Ok(())
}

/// Apply validated bounds updates to this session's viewport.
async fn listen_for_bounds(
    mut stream: SplitStream<WebSocketStream<TcpStream>>,
    bounds_tx: watch::Sender<ViewportBounds>,
    outbound: mpsc::Sender<Message>,
) -> Result<(), SessionError> {
    while let Some(message) = stream.next().await {
        let message = match message {
            Ok(m) => m,
            Err(e) if is_clean_close(&e) => break,
            Err(e) => return Err(e.into()),
        };

        match message {
            Message::Text(text) => match validate_bounds_update(&text) {
                Ok(bounds) => {
                    debug!(?bounds, "viewport updated");
                    bounds_tx.send_replace(bounds);
                }
                Err(err) => {
                    debug!(error = %err, "rejected bounds update");
                    metrics::inc_validation_error(ENDPOINT_BROWSER);
                    let reply = serde_json::to_string(&err.reply())?;
                    if outbound.send(Message::Text(reply)).await.is_err() {
                        break;
                    }
                }
            },
            Message::Ping(payload) => {
                if outbound.send(Message::Pong(payload)).await.is_err() {
                    break;
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }
    Ok(())
}
