//! Append-only arena of chunk records

use crate::voxel::chunk::Chunk;

/// Stable handle to a chunk record in a [`ChunkStore`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChunkHandle(u32);

impl ChunkHandle {
    /// Raw index of this handle within the store
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Arena of chunk records indexed by stable handles.
///
/// Records are only ever appended: handles stay valid for the lifetime of
/// the store and iteration order is creation order. Two records may share
/// a location — the admission path performs no deduplication.
#[derive(Default)]
pub struct ChunkStore {
    chunks: Vec<Chunk>,
}

impl ChunkStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self { chunks: Vec::new() }
    }

    /// Append a record, returning its handle
    pub fn insert(&mut self, chunk: Chunk) -> ChunkHandle {
        let handle = ChunkHandle(self.chunks.len() as u32);
        self.chunks.push(chunk);
        handle
    }

    /// Look up a record by handle
    pub fn get(&self, handle: ChunkHandle) -> Option<&Chunk> {
        self.chunks.get(handle.index())
    }

    pub(crate) fn get_mut(&mut self, handle: ChunkHandle) -> Option<&mut Chunk> {
        self.chunks.get_mut(handle.index())
    }

    /// Number of records in the store
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Iterate over all records in creation order
    pub fn iter(&self) -> impl Iterator<Item = (ChunkHandle, &Chunk)> {
        self.chunks
            .iter()
            .enumerate()
            .map(|(i, chunk)| (ChunkHandle(i as u32), chunk))
    }

    /// Iterate over records created in the most recent generation pass.
    ///
    /// The freshness flag is only up for one tick — consumers that need
    /// chunk-creation events must poll this within that tick or miss them.
    pub fn fresh(&self) -> impl Iterator<Item = (ChunkHandle, &Chunk)> {
        self.iter().filter(|(_, chunk)| chunk.fresh)
    }
}
