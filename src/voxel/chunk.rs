//! Chunk records for cubic regions of voxel terrain

use crate::core::types::IVec3;

/// Tag stored for a solid voxel
pub const VOXEL_SOLID: i32 = 1;

/// Tag stored for an empty (air) voxel
pub const VOXEL_EMPTY: i32 = -1;

/// Integer coordinate identifying a chunk in the world grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChunkCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl ChunkCoord {
    /// Create a new chunk coordinate
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Manhattan distance from the origin chunk `(0, 0, 0)`.
    ///
    /// This is the spawn priority key: smaller values are generated first.
    pub fn manhattan_magnitude(&self) -> u64 {
        self.x.unsigned_abs() as u64
            + self.y.unsigned_abs() as u64
            + self.z.unsigned_abs() as u64
    }

    /// World-space origin (minimum corner) of this chunk, in blocks
    pub fn world_origin(&self, blocks_per_side: i32) -> IVec3 {
        IVec3::new(
            self.x * blocks_per_side,
            self.y * blocks_per_side,
            self.z * blocks_per_side,
        )
    }
}

/// Flat buffer index of local block `(bx, by, bz)` in a chunk with edge
/// length `side`.
///
/// x varies fastest, then y; z selects the layer:
/// `index = bx + by * side + bz * side²`. The layout is fixed so that
/// independent peers produce bit-identical buffers from the same seed.
#[inline]
pub fn block_index(side: i32, bx: i32, by: i32, bz: i32) -> usize {
    (bx + by * side + bz * side * side) as usize
}

/// A chunk record: grid location, world origin, and dense voxel buffer.
///
/// `location` and `origin` are fixed at creation. The voxel buffer is
/// written exactly once, by the populator, immediately after creation;
/// downstream systems read it but never write it back.
pub struct Chunk {
    /// Grid coordinate this chunk was created from
    pub location: ChunkCoord,
    /// World-space origin in blocks (`location * blocks_per_side`)
    pub origin: IVec3,
    /// Dense voxel buffer of length `blocks_per_side³`, see [`block_index`]
    pub voxels: Vec<i32>,
    /// True only during the tick after this chunk was created
    pub fresh: bool,
}

impl Chunk {
    /// Allocate a new chunk record at the given coordinate.
    ///
    /// The buffer starts zeroed; the populator overwrites every entry
    /// before the record becomes visible to consumers.
    pub fn new(location: ChunkCoord, blocks_per_side: i32) -> Self {
        let side = blocks_per_side as usize;
        Self {
            location,
            origin: location.world_origin(blocks_per_side),
            voxels: vec![0; side * side * side],
            fresh: true,
        }
    }

    /// Number of solid voxels in this chunk
    pub fn solid_count(&self) -> usize {
        self.voxels.iter().filter(|&&v| v == VOXEL_SOLID).count()
    }
}
