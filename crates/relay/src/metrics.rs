//! Prometheus metrics for the relay
//!
//! Counters and gauges for message flow and session lifecycle, exposed via
//! the health server's `/metrics` endpoint.

use once_cell::sync::Lazy;
use prometheus::{
    register_int_counter, register_int_counter_vec, register_int_gauge_vec, Encoder, IntCounter,
    IntCounterVec, IntGaugeVec, TextEncoder,
};

/// Endpoint label value for producer (bus) sessions.
pub const ENDPOINT_BUS: &str = "bus";

/// Endpoint label value for consumer (browser) sessions.
pub const ENDPOINT_BROWSER: &str = "browser";

const LABEL_ENDPOINT: &str = "endpoint";

/// Valid position updates ingested into the store
static POSITIONS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "buswire_relay_positions_total",
        "Valid bus position updates ingested"
    )
    .expect("Failed to register positions_total metric")
});

/// Messages rejected by the validator, per endpoint
static VALIDATION_ERRORS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "buswire_relay_validation_errors_total",
        "Inbound messages rejected by the validator",
        &[LABEL_ENDPOINT]
    )
    .expect("Failed to register validation_errors_total metric")
});

/// Bus frames pushed to consumers
static FRAMES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "buswire_relay_frames_total",
        "Bus frames broadcast to consumers"
    )
    .expect("Failed to register frames_total metric")
});

/// Currently open sessions, per endpoint
static ACTIVE_SESSIONS: Lazy<IntGaugeVec> = Lazy::new(|| {
    register_int_gauge_vec!(
        "buswire_relay_active_sessions",
        "Currently open sessions per endpoint",
        &[LABEL_ENDPOINT]
    )
    .expect("Failed to register active_sessions metric")
});

/// Record one valid position update ingested.
pub fn inc_position() {
    POSITIONS_TOTAL.inc();
}

/// Record one rejected inbound message.
pub fn inc_validation_error(endpoint: &str) {
    VALIDATION_ERRORS_TOTAL.with_label_values(&[endpoint]).inc();
}

/// Record one frame broadcast to a consumer.
pub fn inc_frame() {
    FRAMES_TOTAL.inc();
}

/// Mark a session opened on the given endpoint.
pub fn session_opened(endpoint: &str) {
    ACTIVE_SESSIONS.with_label_values(&[endpoint]).inc();
}

/// Mark a session closed on the given endpoint.
pub fn session_closed(endpoint: &str) {
    ACTIVE_SESSIONS.with_label_values(&[endpoint]).dec();
}

/// Current open session count for an endpoint.
pub fn active_sessions(endpoint: &str) -> i64 {
    ACTIVE_SESSIONS.with_label_values(&[endpoint]).get()
}

/// Encode all metrics to Prometheus text format.
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| prometheus::Error::Msg(format!("Failed to encode metrics as UTF-8: {}", e)))
}
