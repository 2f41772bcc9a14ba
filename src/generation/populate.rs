//! Data-parallel voxel population of freshly spawned chunks

use rayon::prelude::*;

use crate::generation::config::SpawnConfig;
use crate::generation::noise_field::NoiseField;
use crate::voxel::chunk::{block_index, Chunk, VOXEL_EMPTY, VOXEL_SOLID};

/// Fill one chunk's voxel buffer from the noise field.
///
/// For each column `(gx, gz)` the noise value picks a cutoff height between
/// sea level and sky level; blocks above the cutoff are empty, blocks at or
/// below it are solid. Sea level and everything beneath it is always solid,
/// whatever the noise says.
///
/// The result depends only on the chunk origin, the field, and the bounds —
/// identical inputs produce a bit-identical buffer, which is what lets
/// independent peers regenerate matching terrain from a shared seed.
pub fn populate_chunk(chunk: &mut Chunk, field: &dyn NoiseField, config: &SpawnConfig) {
    let side = config.blocks_per_side;
    let sea = config.y_bounds.sea_level;
    let sky = config.y_bounds.sky_level;

    debug_assert_eq!(chunk.voxels.len(), config.blocks_per_chunk());

    for bz in 0..side {
        let gz = chunk.origin.z + bz;
        for bx in 0..side {
            let gx = chunk.origin.x + bx;
            // Noise is horizontal-only: one sample covers the whole column.
            let cutoff = sea as f64 + field.sample(gx, gz) * (sky - sea) as f64;
            for by in 0..side {
                let gy = chunk.origin.y + by;
                let tag = if gy <= sea {
                    VOXEL_SOLID
                } else if gy as f64 > cutoff {
                    VOXEL_EMPTY
                } else {
                    VOXEL_SOLID
                };
                chunk.voxels[block_index(side, bx, by, bz)] = tag;
            }
        }
    }
}

/// Populate a batch of freshly spawned chunks in parallel.
///
/// Each worker owns exactly one chunk's buffer, so the fan-out needs no
/// locks and no cross-chunk reads. Blocks until the whole batch is filled;
/// callers never observe a partially populated chunk.
pub fn populate_chunks(chunks: &mut [Chunk], field: &dyn NoiseField, config: &SpawnConfig) {
    chunks
        .par_iter_mut()
        .for_each(|chunk| populate_chunk(chunk, field, config));
}
