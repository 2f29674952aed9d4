//! # Observation Store
//!
//! Concurrent map from block position to the last note heard there.
//!
//! The ingestion thread writes while the render thread reads. Both go through
//! a sharded `DashMap`, so callers never lock anything themselves:
//! - `record` replaces whatever was cached for the position (last write wins)
//! - `snapshot` copies the entries out shard by shard; writes racing with it
//!   may or may not be included, but every entry it returns is whole
//! - `clear` empties the map; records racing with it may survive
//!
//! Entries never expire on their own.

use dashmap::DashMap;

use crate::coord::BlockPos;
use crate::note::Note;

#[derive(Debug, Default)]
pub struct ObservationStore {
    notes: DashMap<BlockPos, Note>,
}

impl ObservationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache `note` for `pos`, replacing any previous note.
    pub fn record(&self, pos: BlockPos, note: Note) {
        self.notes.insert(pos, note);
    }

    pub fn get(&self, pos: BlockPos) -> Option<Note> {
        self.notes.get(&pos).map(|entry| *entry.value())
    }

    /// Copy of the current entries, in no particular order.
    pub fn snapshot(&self) -> Vec<(BlockPos, Note)> {
        self.notes
            .iter()
            .map(|entry| (*entry.key(), *entry.value()))
            .collect()
    }

    pub fn clear(&self) {
        self.notes.clear();
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}
