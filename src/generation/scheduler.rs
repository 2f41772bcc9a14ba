//! Per-tick chunk spawn scheduling

use crate::core::types::Result;
use crate::generation::backlog::SpawnBacklog;
use crate::generation::config::SpawnConfig;
use crate::generation::noise_field::NoiseField;
use crate::generation::populate::populate_chunks;
use crate::voxel::chunk::{Chunk, ChunkCoord};
use crate::voxel::store::{ChunkHandle, ChunkStore};

/// Summary of one scheduler tick, for host-side observability
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Chunks admitted and populated this tick
    pub admitted: usize,
    /// Requests still pending in the backlog after this tick
    pub backlog_remaining: usize,
}

/// Turns backlog entries into populated chunk records at a bounded rate,
/// nearest-first.
///
/// The scheduler runs on a single control thread, one tick at a time. Each
/// tick it clears the previous tick's freshness flags, sorts the backlog by
/// Manhattan distance from the origin chunk, admits up to
/// `max_chunk_spawns_per_tick` coordinates, fills the new chunks in
/// parallel from the noise field, and trims the backlog. The populate
/// fan-out is joined before the tick returns — consumers never observe a
/// partially filled chunk.
pub struct ChunkScheduler {
    config: SpawnConfig,
    field: Box<dyn NoiseField>,
    backlog: SpawnBacklog,
    store: ChunkStore,
    /// Handles created by the previous tick; their freshness flags are
    /// cleared at the start of the next tick.
    fresh_batch: Vec<ChunkHandle>,
}

impl ChunkScheduler {
    /// Create a scheduler for a new world.
    ///
    /// Rejects invalid configuration (`blocks_per_side <= 0`, inverted
    /// vertical bounds) so generation never starts with bad parameters.
    pub fn new(config: SpawnConfig, field: Box<dyn NoiseField>) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            field,
            backlog: SpawnBacklog::new(),
            store: ChunkStore::new(),
            fresh_batch: Vec::new(),
        })
    }

    /// Append a spawn request to the backlog. Never fails, never deduplicates.
    pub fn enqueue(&mut self, coord: ChunkCoord) {
        self.backlog.enqueue(coord);
    }

    /// The world's spawn configuration
    pub fn config(&self) -> &SpawnConfig {
        &self.config
    }

    /// All chunk records created so far
    pub fn store(&self) -> &ChunkStore {
        &self.store
    }

    /// Number of requests still pending admission.
    ///
    /// This is the capacity-condition metric: if it keeps growing, the
    /// spawn cap is too small for the enqueue rate.
    pub fn backlog_len(&self) -> usize {
        self.backlog.len()
    }

    /// Run one generation tick.
    ///
    /// Admits `min(max_chunk_spawns_per_tick, backlog length)` coordinates,
    /// nearest-first, and returns once every admitted chunk is fully
    /// populated. Freshness flags from the previous tick are cleared before
    /// any new admissions, so a record is fresh for exactly one tick.
    pub fn tick(&mut self) -> TickStats {
        // One-tick visibility window: retire last tick's batch first.
        for handle in self.fresh_batch.drain(..) {
            if let Some(chunk) = self.store.get_mut(handle) {
                chunk.fresh = false;
            }
        }

        if self.backlog.is_empty() {
            return TickStats::default();
        }

        // Priority order is recomputed from scratch every tick; nothing is
        // remembered from a previous partial sort.
        self.backlog.sort_by_distance();

        let admitted = self
            .config
            .max_chunk_spawns_per_tick
            .min(self.backlog.len());
        let coords = self.backlog.drain_front(admitted);

        // The admitted set and its order are fixed before dispatch; the
        // parallel fill below does not reorder or drop records.
        let mut batch: Vec<Chunk> = coords
            .iter()
            .map(|&coord| Chunk::new(coord, self.config.blocks_per_side))
            .collect();
        populate_chunks(&mut batch, self.field.as_ref(), &self.config);

        for chunk in batch {
            let handle = self.store.insert(chunk);
            self.fresh_batch.push(handle);
        }

        let stats = TickStats {
            admitted,
            backlog_remaining: self.backlog.len(),
        };
        log::debug!(
            "tick admitted {} chunks, {} requests pending",
            stats.admitted,
            stats.backlog_remaining
        );
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::config::YBounds;
    use crate::generation::noise_field::PerlinNoiseField;
    use crate::generation::populate::populate_chunk;
    use crate::voxel::chunk::{block_index, VOXEL_EMPTY, VOXEL_SOLID};

    /// Noise stub returning the same value for every column
    struct ConstNoise(f64);

    impl NoiseField for ConstNoise {
        fn sample(&self, _x: i32, _z: i32) -> f64 {
            self.0
        }
    }

    fn small_config(cap: usize) -> SpawnConfig {
        SpawnConfig {
            seed: 12345,
            blocks_per_side: 4,
            y_bounds: YBounds {
                sea_level: 0,
                sky_level: 10,
            },
            max_chunk_spawns_per_tick: cap,
        }
    }

    fn scheduler_with_stub(cap: usize, noise: f64) -> ChunkScheduler {
        ChunkScheduler::new(small_config(cap), Box::new(ConstNoise(noise))).unwrap()
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = SpawnConfig {
            blocks_per_side: 0,
            ..small_config(2)
        };
        assert!(ChunkScheduler::new(config, Box::new(ConstNoise(0.5))).is_err());

        let config = SpawnConfig {
            y_bounds: YBounds {
                sea_level: 9,
                sky_level: 3,
            },
            ..small_config(2)
        };
        assert!(ChunkScheduler::new(config, Box::new(ConstNoise(0.5))).is_err());
    }

    #[test]
    fn test_admission_cap() {
        // A tick admits exactly min(cap, backlog length)
        let mut scheduler = scheduler_with_stub(3, 0.5);
        for x in 0..5 {
            scheduler.enqueue(ChunkCoord::new(x, 0, 0));
        }

        let stats = scheduler.tick();
        assert_eq!(stats.admitted, 3);
        assert_eq!(stats.backlog_remaining, 2);

        let stats = scheduler.tick();
        assert_eq!(stats.admitted, 2);
        assert_eq!(stats.backlog_remaining, 0);

        let stats = scheduler.tick();
        assert_eq!(stats.admitted, 0);
    }

    #[test]
    fn test_zero_cap_never_admits() {
        // Capacity condition, not an error: the backlog just grows
        let mut scheduler = scheduler_with_stub(0, 0.5);
        for x in 0..4 {
            scheduler.enqueue(ChunkCoord::new(x, 0, 0));
        }

        for _ in 0..3 {
            let stats = scheduler.tick();
            assert_eq!(stats.admitted, 0);
        }
        assert_eq!(scheduler.backlog_len(), 4);
        assert!(scheduler.store().is_empty());
    }

    #[test]
    fn test_priority_order_within_batch() {
        let mut scheduler = scheduler_with_stub(4, 0.5);
        scheduler.enqueue(ChunkCoord::new(3, 0, 3));
        scheduler.enqueue(ChunkCoord::new(0, 1, 0));
        scheduler.enqueue(ChunkCoord::new(-2, 0, 0));
        scheduler.enqueue(ChunkCoord::new(0, 0, 0));

        scheduler.tick();

        // Records land in the store in admission order
        let distances: Vec<u64> = scheduler
            .store()
            .iter()
            .map(|(_, c)| c.location.manhattan_magnitude())
            .collect();
        assert_eq!(distances, vec![0, 1, 2, 6]);
    }

    #[test]
    fn test_backlog_drain_removes_closest() {
        let mut scheduler = scheduler_with_stub(2, 0.5);
        scheduler.enqueue(ChunkCoord::new(5, 0, 0));
        scheduler.enqueue(ChunkCoord::new(1, 0, 0));
        scheduler.enqueue(ChunkCoord::new(2, 0, 0));
        scheduler.enqueue(ChunkCoord::new(4, 0, 0));

        scheduler.tick();

        // The two closest were admitted; the two farthest remain queued
        let spawned: Vec<ChunkCoord> =
            scheduler.store().iter().map(|(_, c)| c.location).collect();
        assert_eq!(
            spawned,
            vec![ChunkCoord::new(1, 0, 0), ChunkCoord::new(2, 0, 0)]
        );
        assert_eq!(scheduler.backlog_len(), 2);
    }

    #[test]
    fn test_freshness_window() {
        // Fresh exactly one tick, cleared on the next, never set again
        let mut scheduler = scheduler_with_stub(2, 0.5);
        scheduler.enqueue(ChunkCoord::new(0, 0, 0));

        scheduler.tick();
        let fresh: Vec<ChunkHandle> = scheduler.store().fresh().map(|(h, _)| h).collect();
        assert_eq!(fresh.len(), 1);
        let handle = fresh[0];

        scheduler.tick();
        assert!(!scheduler.store().get(handle).unwrap().fresh);

        scheduler.tick();
        assert!(!scheduler.store().get(handle).unwrap().fresh);
    }

    #[test]
    fn test_freshness_cleared_even_on_noop_tick() {
        let mut scheduler = scheduler_with_stub(1, 0.5);
        scheduler.enqueue(ChunkCoord::new(0, 0, 0));

        scheduler.tick();
        assert_eq!(scheduler.store().fresh().count(), 1);

        // Backlog is now empty; the no-op tick still retires the flag
        scheduler.tick();
        assert_eq!(scheduler.store().fresh().count(), 0);
    }

    #[test]
    fn test_resort_from_scratch_each_tick() {
        // A coordinate enqueued after a partial drain still jumps the queue
        let mut scheduler = scheduler_with_stub(1, 0.5);
        scheduler.enqueue(ChunkCoord::new(4, 0, 0));
        scheduler.enqueue(ChunkCoord::new(2, 0, 0));

        scheduler.tick(); // admits (2,0,0)

        scheduler.enqueue(ChunkCoord::new(1, 0, 0));
        scheduler.tick(); // re-sorts: (1,0,0) beats the older (4,0,0)

        let spawned: Vec<ChunkCoord> =
            scheduler.store().iter().map(|(_, c)| c.location).collect();
        assert_eq!(
            spawned,
            vec![ChunkCoord::new(2, 0, 0), ChunkCoord::new(1, 0, 0)]
        );
        assert_eq!(scheduler.backlog_len(), 1);
    }

    #[test]
    fn test_duplicate_enqueue_spawns_two_records() {
        // No deduplication anywhere in the admission path: enqueueing a
        // coordinate twice produces two independent records at the same
        // location.
        let mut scheduler = scheduler_with_stub(4, 0.5);
        let coord = ChunkCoord::new(1, 0, 1);
        scheduler.enqueue(coord);
        scheduler.enqueue(coord);

        let stats = scheduler.tick();
        assert_eq!(stats.admitted, 2);

        let at_coord = scheduler
            .store()
            .iter()
            .filter(|(_, c)| c.location == coord)
            .count();
        assert_eq!(at_coord, 2);
    }

    #[test]
    fn test_admitted_chunks_are_fully_populated() {
        let mut scheduler = scheduler_with_stub(2, 0.5);
        scheduler.enqueue(ChunkCoord::new(0, 0, 0));
        scheduler.enqueue(ChunkCoord::new(0, 1, 0));

        scheduler.tick();

        for (_, chunk) in scheduler.store().iter() {
            assert!(chunk
                .voxels
                .iter()
                .all(|&v| v == VOXEL_SOLID || v == VOXEL_EMPTY));
        }
    }

    #[test]
    fn test_locations_survive_later_ticks() {
        // Sorting and admission never touch existing records
        let mut scheduler = scheduler_with_stub(1, 0.5);
        scheduler.enqueue(ChunkCoord::new(2, 0, 0));
        scheduler.tick();

        let (handle, chunk) = scheduler.store().iter().next().unwrap();
        let location = chunk.location;
        let origin = chunk.origin;

        scheduler.enqueue(ChunkCoord::new(0, 0, 0));
        scheduler.enqueue(ChunkCoord::new(1, 0, 0));
        scheduler.tick();
        scheduler.tick();

        let chunk = scheduler.store().get(handle).unwrap();
        assert_eq!(chunk.location, location);
        assert_eq!(chunk.origin, origin);
    }

    #[test]
    fn test_same_seed_schedulers_agree_per_location() {
        // Two peers with the same seed generate identical voxels for the
        // same coordinate, independent of admission batching.
        let field_a = PerlinNoiseField::new(12345);
        let field_b = PerlinNoiseField::new(12345);

        let mut a = ChunkScheduler::new(small_config(1), Box::new(field_a)).unwrap();
        let mut b = ChunkScheduler::new(small_config(3), Box::new(field_b)).unwrap();

        let coords = [
            ChunkCoord::new(0, 0, 0),
            ChunkCoord::new(1, 0, -1),
            ChunkCoord::new(-2, 1, 2),
        ];
        for &coord in &coords {
            a.enqueue(coord);
            b.enqueue(coord);
        }

        // Different caps mean different batch compositions
        for _ in 0..3 {
            a.tick();
        }
        b.tick();

        for &coord in &coords {
            let chunk_a = a.store().iter().find(|(_, c)| c.location == coord).unwrap().1;
            let chunk_b = b.store().iter().find(|(_, c)| c.location == coord).unwrap().1;
            assert_eq!(chunk_a.voxels, chunk_b.voxels, "mismatch at {:?}", coord);
        }
    }

    #[test]
    fn test_end_to_end_scenario() {
        // blocks_per_side 4, sea 0, sky 10, cap 2,
        // backlog [(2,0,0), (0,0,0), (1,0,0)]
        let mut scheduler = scheduler_with_stub(2, 0.5);
        scheduler.enqueue(ChunkCoord::new(2, 0, 0));
        scheduler.enqueue(ChunkCoord::new(0, 0, 0));
        scheduler.enqueue(ChunkCoord::new(1, 0, 0));

        // Tick 1: sorts to [(0,0,0), (1,0,0), (2,0,0)], admits the first two
        let stats = scheduler.tick();
        assert_eq!(stats.admitted, 2);
        assert_eq!(stats.backlog_remaining, 1);

        let fresh: Vec<ChunkCoord> =
            scheduler.store().fresh().map(|(_, c)| c.location).collect();
        assert_eq!(fresh, vec![ChunkCoord::new(0, 0, 0), ChunkCoord::new(1, 0, 0)]);

        // Tick 2: clears those flags, admits (2,0,0), backlog empty
        let stats = scheduler.tick();
        assert_eq!(stats.admitted, 1);
        assert_eq!(stats.backlog_remaining, 0);

        let fresh: Vec<ChunkCoord> =
            scheduler.store().fresh().map(|(_, c)| c.location).collect();
        assert_eq!(fresh, vec![ChunkCoord::new(2, 0, 0)]);
        assert_eq!(scheduler.store().len(), 3);
    }

    #[test]
    fn test_scheduler_matches_direct_populate() {
        // A chunk spawned through the scheduler is bit-identical to one
        // filled directly with the same parameters.
        let config = small_config(1);
        let mut scheduler =
            ChunkScheduler::new(config.clone(), Box::new(PerlinNoiseField::new(config.seed)))
                .unwrap();

        let coord = ChunkCoord::new(3, -1, 2);
        scheduler.enqueue(coord);
        scheduler.tick();

        let field = PerlinNoiseField::new(config.seed);
        let mut direct = Chunk::new(coord, config.blocks_per_side);
        populate_chunk(&mut direct, &field, &config);

        let spawned = scheduler.store().iter().next().unwrap().1;
        assert_eq!(spawned.voxels, direct.voxels);
    }

    #[test]
    fn test_voxel_rule_through_scheduler() {
        // End-to-end check of the solid/empty rule with the stub field
        let mut scheduler = scheduler_with_stub(1, 0.5);
        scheduler.enqueue(ChunkCoord::new(0, 1, 0));
        scheduler.tick();

        // Chunk spans gy in [4, 8); cutoff is 5
        let chunk = scheduler.store().iter().next().unwrap().1;
        let side = scheduler.config().blocks_per_side;
        for by in 0..side {
            let gy = 4 + by;
            let tag = chunk.voxels[block_index(side, 0, by, 0)];
            if gy <= 5 {
                assert_eq!(tag, VOXEL_SOLID);
            } else {
                assert_eq!(tag, VOXEL_EMPTY);
            }
        }
    }
}
