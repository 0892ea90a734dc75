use thiserror::Error;

/// A fault that tears down a single session. Never crosses session
/// boundaries; the acceptor logs it and moves on.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
    #[error("failed to encode frame: {0}")]
    Encode(#[from] serde_json::Error),
}
