//! Shared position store
//!
//! Process-wide map of bus id to latest known record, passed by handle into
//! every session. Writes come only from bus ingest sessions, reads only from
//! browser broadcasters. Each upsert is a single atomic replace and each
//! snapshot is a defensive copy, so a reader never observes a torn record;
//! the shard lock is never held across an await point.

use buswire_protocol::BusRecord;
use dashmap::DashMap;

/// Last-write-wins store of bus positions. Records are never deleted; a
/// bus that stops reporting keeps its final position until restart.
#[derive(Debug, Default)]
pub struct PositionStore {
    records: DashMap<String, BusRecord>,
}

impl PositionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unconditional overwrite by bus id. Infallible.
    pub fn upsert(&self, record: BusRecord) {
        self.records.insert(record.bus_id.clone(), record);
    }

    /// Latest record for one bus, if known.
    pub fn get(&self, bus_id: &str) -> Option<BusRecord> {
        self.records.get(bus_id).map(|entry| entry.value().clone())
    }

    /// Full copy of the current records, for filtering.
    pub fn snapshot(&self) -> Vec<BusRecord> {
        self.records
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Number of tracked buses.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
