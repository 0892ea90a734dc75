//! Simulated bus fleet
//!
//! One task per bus: walk the route, emit one position update per tick into
//! the pool connection the bus was assigned at spawn. Tick periods carry
//! random jitter so thousands of buses don't fire in lockstep.

use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::Duration;

use buswire_protocol::BusRecord;
use rand::Rng;
use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::routes::Route;
use crate::walker::RouteWalker;

/// Jitter added to each tick, in whole seconds.
const TICK_JITTER_SECS: RangeInclusive<u64> = 1..=5;

/// Bus ids carry the route, a fleet-wide index, and the emulator run id.
pub fn bus_id(route_name: &str, index: usize, emulator_id: &str) -> String {
    format!("{route_name}-{index}-{emulator_id}")
}

/// Emit one position per tick until the assigned pool connection goes away.
pub async fn run_bus(
    updates: mpsc::Sender<String>,
    bus_id: String,
    route: Arc<Route>,
    refresh: Duration,
) {
    let mut walker = RouteWalker::new(Arc::clone(&route));

    loop {
        let (lat, lng) = walker.step();
        let record = BusRecord {
            bus_id: bus_id.clone(),
            route: route.name.clone(),
            lat,
            lng,
        };
        let payload = match serde_json::to_string(&record) {
            Ok(payload) => payload,
            Err(e) => {
                error!(bus = %bus_id, error = %e, "failed to encode update, stopping bus");
                break;
            }
        };

        if updates.send(payload).await.is_err() {
            debug!(bus = %bus_id, "update channel closed, stopping bus");
            break;
        }

        let jitter = rand::rng().random_range(TICK_JITTER_SECS);
        tokio::time::sleep(refresh + Duration::from_secs(jitter)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bus_id_format() {
        assert_eq!(bus_id("104", 7, "abc123"), "104-7-abc123");
    }

    #[tokio::test]
    async fn test_run_bus_emits_a_position() {
        let route = Arc::new(Route {
            name: "104".to_string(),
            coordinates: vec![(55.5, 37.5)],
        });
        let (tx, mut rx) = mpsc::channel(1);

        let handle = tokio::spawn(run_bus(
            tx,
            bus_id("104", 0, "test"),
            route,
            Duration::from_secs(60),
        ));

        // The first update is emitted before any sleep.
        let payload = rx.recv().await.expect("first update");
        let record: BusRecord = serde_json::from_str(&payload).expect("parse update");
        assert_eq!(record.bus_id, "104-0-test");
        assert_eq!(record.route, "104");
        assert_eq!(record.lat, 55.5);
        assert_eq!(record.lng, 37.5);

        // Dropping the receiver stops the bus on its next send.
        drop(rx);
        handle.abort();
    }
}
