//! Deterministic horizontal noise sampling for terrain height

use noise::{Fbm, MultiFractal, NoiseFn, Perlin};

/// A deterministic noise field sampled per (x, z) block column.
///
/// Implementations must be pure: the same column and the same construction
/// seed always yield the same value in `[0, 1]`, regardless of call order
/// or thread. Independent peers rely on this to regenerate identical
/// terrain from a shared seed without ever exchanging voxel data.
pub trait NoiseField: Send + Sync {
    /// Sample the field at a global block column. Returns a value in [0, 1].
    fn sample(&self, x: i32, z: i32) -> f64;
}

/// Default noise field: fractal Perlin sampled on a fixed horizontal scale
pub struct PerlinNoiseField {
    noise: Fbm<Perlin>,
    scale: f64,
}

impl PerlinNoiseField {
    /// Horizontal feature scale in blocks (larger = smoother terrain)
    pub const DEFAULT_SCALE: f64 = 100.0;

    /// Create a field for the given world seed with the default scale
    pub fn new(seed: i32) -> Self {
        Self::with_scale(seed, Self::DEFAULT_SCALE)
    }

    /// Create a field with an explicit horizontal scale
    pub fn with_scale(seed: i32, scale: f64) -> Self {
        let noise = Fbm::<Perlin>::new(seed as u32)
            .set_octaves(4)
            .set_persistence(0.5)
            .set_lacunarity(2.0);

        Self { noise, scale }
    }
}

impl NoiseField for PerlinNoiseField {
    fn sample(&self, x: i32, z: i32) -> f64 {
        let nx = x as f64 / self.scale;
        let nz = z as f64 / self.scale;

        // Fbm output is nominally [-1, 1]; remap to [0, 1] and clamp to
        // guard the trait contract at the extremes.
        let value = self.noise.get([nx, nz]);
        ((value + 1.0) / 2.0).clamp(0.0, 1.0)
    }
}
