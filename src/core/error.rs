//! Error types for the generation core

use thiserror::Error;

/// Main error type for the generation core.
///
/// Only configuration errors exist: given valid parameters, generation
/// itself is pure arithmetic and cannot fail at tick time.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid chunk size: blocks_per_side must be positive, got {0}")]
    InvalidChunkSize(i32),

    #[error("invalid vertical bounds: sea level {sea} is above sky level {sky}")]
    InvalidYBounds { sea: i32, sky: i32 },
}
