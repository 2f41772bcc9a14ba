//! Pending queue of chunk spawn requests

use crate::voxel::chunk::ChunkCoord;

/// Ordered backlog of chunk coordinates awaiting admission.
///
/// Producers append with [`enqueue`](SpawnBacklog::enqueue); the scheduler
/// sorts nearest-first and drains from the front once per tick. Duplicates
/// are not filtered — a coordinate enqueued twice is admitted twice.
#[derive(Debug, Default)]
pub struct SpawnBacklog {
    pending: Vec<ChunkCoord>,
}

impl SpawnBacklog {
    /// Create an empty backlog
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Append a spawn request. Never fails, never deduplicates.
    pub fn enqueue(&mut self, coord: ChunkCoord) {
        self.pending.push(coord);
    }

    /// Number of pending requests
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Check if the backlog is empty
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pending requests in their current order
    pub fn pending(&self) -> &[ChunkCoord] {
        &self.pending
    }

    /// Sort pending requests so the nearest coordinates (smallest Manhattan
    /// distance from the origin chunk) come first.
    ///
    /// The sort is unstable: ordering among equal-distance coordinates is
    /// unspecified and callers must not rely on insertion order there.
    pub fn sort_by_distance(&mut self) {
        self.pending
            .sort_unstable_by_key(|coord| coord.manhattan_magnitude());
    }

    /// Remove and return the first `n` requests (all of them if fewer)
    pub fn drain_front(&mut self, n: usize) -> Vec<ChunkCoord> {
        let n = n.min(self.pending.len());
        self.pending.drain(..n).collect()
    }
}
