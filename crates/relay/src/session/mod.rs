//! Per-connection session loops
//!
//! One independent session per accepted connection: a single receive loop for
//! producers, a listener/broadcaster pair for consumers. Sessions share
//! nothing but the position store handle.

pub mod browser;
pub mod bus;

use tokio_tungstenite::tungstenite::{error::ProtocolError, Error as WsError};

/// Whether a transport error means the peer went away rather than a fault
/// worth surfacing. Peers closing (or dropping) their connection is an
/// expected terminal condition for any session.
pub(crate) fn is_clean_close(err: &WsError) -> bool {
    matches!(
        err,
        WsError::ConnectionClosed
            | WsError::AlreadyClosed
            | WsError::Protocol(ProtocolError::ResetWithoutClosingHandshake)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_close_classification() {
        assert!(is_clean_close(&WsError::ConnectionClosed));
        assert!(is_clean_close(&WsError::AlreadyClosed));
        assert!(is_clean_close(&WsError::Protocol(
            ProtocolError::ResetWithoutClosingHandshake
        )));
        assert!(!is_clean_close(&WsError::Utf8));
    }
}
