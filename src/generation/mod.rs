//! Chunk spawn scheduling and deterministic terrain population.
//!
//! Per tick the scheduler:
//! 1. Clears the previous tick's freshness flags
//! 2. Sorts the backlog nearest-first (Manhattan distance from origin)
//! 3. Admits up to `max_chunk_spawns_per_tick` coordinates
//! 4. Fills the admitted chunks in parallel from the noise field
//! 5. Trims the backlog; the remainder is re-sorted from scratch next tick

pub mod backlog;
pub mod config;
pub mod noise_field;
pub mod populate;
pub mod scheduler;

pub use backlog::SpawnBacklog;
pub use config::{SpawnConfig, YBounds};
pub use noise_field::{NoiseField, PerlinNoiseField};
pub use populate::{populate_chunk, populate_chunks};
pub use scheduler::{ChunkScheduler, TickStats};
