//! Message types for the producer and consumer protocols

use serde::{Deserialize, Serialize};

/// `msgType` value for periodic bus frames pushed to consumers.
pub const MSG_TYPE_BUSES: &str = "Buses";

/// `msgType` value for viewport updates sent by consumers.
pub const MSG_TYPE_NEW_BOUNDS: &str = "newBounds";

/// `msgType` value for error replies on either endpoint.
pub const MSG_TYPE_ERRORS: &str = "Errors";

/// Latest known position of one bus. Replaced wholesale on every valid
/// ingest message; keyed by `bus_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusRecord {
    #[serde(rename = "busId")]
    pub bus_id: String,
    pub route: String,
    pub lat: f64,
    pub lng: f64,
}

/// Rectangular viewport in lat/lng space, owned by one browser session.
///
/// Starts at all-zero (an empty rectangle, so a fresh session sees no buses
/// until it sends its first `newBounds`).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewportBounds {
    pub south_lat: f64,
    pub north_lat: f64,
    pub west_lng: f64,
    pub east_lng: f64,
}

impl ViewportBounds {
    /// Open-rectangle containment test: strict inequality on all four sides,
    /// so a point exactly on a boundary is excluded. Part of the consumer-side
    /// protocol contract.
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        self.north_lat > lat
            && lat > self.south_lat
            && self.east_lng > lng
            && lng > self.west_lng
    }
}

/// Periodic frame pushed to a consumer: all known buses inside its viewport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusFrame {
    #[serde(rename = "msgType")]
    pub msg_type: String,
    pub buses: Vec<BusRecord>,
}

impl BusFrame {
    pub fn new(buses: Vec<BusRecord>) -> Self {
        Self {
            msg_type: MSG_TYPE_BUSES.to_string(),
            buses,
        }
    }
}

/// Error reply sent in place of an ignored invalid message. The session
/// stays open after sending one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReply {
    pub errors: Vec<String>,
    #[serde(rename = "msgType")]
    pub msg_type: String,
}

impl ErrorReply {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            errors: vec![message.into()],
            msg_type: MSG_TYPE_ERRORS.to_string(),
        }
    }
}
