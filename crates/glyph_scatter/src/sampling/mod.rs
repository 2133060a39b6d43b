//! Constrained point sampling in a 2D domain.
//!
//! This module defines the [`Region`] predicate seam, the [`PointSource`] pull contract used
//! by the animation driver, and the grid-accelerated [`PoissonDiskSampler`].
use glam::Vec2;
use rand::Rng as RngCore;

pub mod grid;
pub mod poisson_disk;
pub mod region;

pub use grid::BackgroundGrid;
pub use poisson_disk::{PoissonDiskSampler, PoissonDiskSampling, Points, SamplerStats};
pub use region::{Everywhere, FnRegion, Region};

/// Pull-based producer of points.
///
/// Each call either yields one new point or signals exhaustion with `None`.
/// Once a source returns `None` it keeps returning `None`.
pub trait PointSource {
    fn next_point(&mut self, rng: &mut dyn RngCore) -> Option<Vec2>;

    /// Drains up to `count` points, stopping early at exhaustion.
    fn pull(&mut self, count: usize, rng: &mut dyn RngCore) -> Vec<Vec2> {
        std::iter::from_fn(|| self.next_point(rng))
            .take(count)
            .collect()
    }
}

/// Generate a random float in the range [0, 1).
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f32 {
    // 24 bits keep the result strictly below 1.0 after rounding to f32.
    (rng.next_u32() >> 8) as f32 / (1u32 << 24) as f32
}

/// Generate a random float in `[min, max)`.
#[inline]
pub(crate) fn rand_range(rng: &mut dyn RngCore, min: f32, max: f32) -> f32 {
    let v = min + rand01(rng) * (max - min);
    if v >= max && max > min {
        next_down(max)
    } else {
        v
    }
}

/// Largest `f32` strictly below `val`.
#[inline]
pub(crate) fn next_down(val: f32) -> f32 {
    if val.is_nan() || val == f32::NEG_INFINITY {
        return val;
    }
    if val == 0.0 {
        return -f32::from_bits(1);
    }
    let bits = val.to_bits();
    if val > 0.0 {
        f32::from_bits(bits - 1)
    } else {
        f32::from_bits(bits + 1)
    }
}

/// Returns `-1.0` or `1.0` with equal probability.
#[inline]
pub(crate) fn rand_sign(rng: &mut dyn RngCore) -> f32 {
    if rng.next_u32() & 0x8000_0000 == 0 {
        -1.0
    } else {
        1.0
    }
}

/// Uniform index in `0..len`. `len` must be non-zero.
#[inline]
pub(crate) fn rand_index(rng: &mut dyn RngCore, len: usize) -> usize {
    debug_assert!(len > 0);
    ((rng.next_u32() as u128 * len as u128) >> 32) as usize
}
