//! Chunk records and voxel storage

pub mod chunk;
pub mod store;

pub use chunk::{block_index, Chunk, ChunkCoord, VOXEL_EMPTY, VOXEL_SOLID};
pub use store::{ChunkHandle, ChunkStore};
