//! Spawn configuration — immutable per-world generation parameters.

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::Result;

/// Vertical bounds of generated terrain
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct YBounds {
    /// Height at or below which every block is solid
    pub sea_level: i32,
    /// Height of the tallest possible terrain column
    pub sky_level: i32,
}

/// Parameters controlling chunk spawning for one world.
///
/// Supplied once at world creation and read-only afterwards; the scheduler
/// and populator share it by reference.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpawnConfig {
    /// World seed fed to the noise field
    pub seed: i32,
    /// Chunk edge length in voxels (must be positive)
    pub blocks_per_side: i32,
    /// Sea/sky vertical bounds (`sea_level <= sky_level`)
    pub y_bounds: YBounds,
    /// Maximum number of chunks admitted from the backlog per tick.
    ///
    /// Zero is legal: no chunks are ever admitted and the backlog grows
    /// until producers stop enqueueing. That is a capacity condition for
    /// the host to observe, not an error.
    pub max_chunk_spawns_per_tick: usize,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            blocks_per_side: 16,
            y_bounds: YBounds {
                sea_level: 20,
                sky_level: 80,
            },
            max_chunk_spawns_per_tick: 10,
        }
    }
}

impl SpawnConfig {
    /// Validate the configuration.
    ///
    /// Called at world creation; a world never starts generating with
    /// invalid parameters.
    pub fn validate(&self) -> Result<()> {
        if self.blocks_per_side <= 0 {
            return Err(Error::InvalidChunkSize(self.blocks_per_side));
        }
        if self.y_bounds.sea_level > self.y_bounds.sky_level {
            return Err(Error::InvalidYBounds {
                sea: self.y_bounds.sea_level,
                sky: self.y_bounds.sky_level,
            });
        }
        Ok(())
    }

    /// Number of voxels in one chunk (`blocks_per_side³`)
    pub fn blocks_per_chunk(&self) -> usize {
        let side = self.blocks_per_side as usize;
        side * side * side
    }
}
