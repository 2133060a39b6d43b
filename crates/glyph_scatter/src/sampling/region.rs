//! Membership predicates constraining where samples may land.
use std::sync::Arc;

use glam::Vec2;
use rand::Rng as RngCore;

/// Decides whether a point belongs to the admissible region.
///
/// The answer must not depend on sampler state. Implementations may consume randomness
/// from `rng` (see [`crate::raster::RegionOracle`]); plain predicates ignore it.
pub trait Region: Send + Sync {
    fn contains(&self, p: Vec2, rng: &mut dyn RngCore) -> bool;
}

/// Region that admits every point. Default predicate of the sampler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Everywhere;

impl Region for Everywhere {
    #[inline]
    fn contains(&self, _p: Vec2, _rng: &mut dyn RngCore) -> bool {
        true
    }
}

/// A region that forwards to a user-provided closure.
pub struct FnRegion<F>
where
    F: Fn(Vec2) -> bool + Send + Sync,
{
    f: F,
}

impl<F> FnRegion<F>
where
    F: Fn(Vec2) -> bool + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Region for FnRegion<F>
where
    F: Fn(Vec2) -> bool + Send + Sync,
{
    #[inline]
    fn contains(&self, p: Vec2, _rng: &mut dyn RngCore) -> bool {
        (self.f)(p)
    }
}

impl<T: Region + ?Sized> Region for &T {
    #[inline]
    fn contains(&self, p: Vec2, rng: &mut dyn RngCore) -> bool {
        (**self).contains(p, rng)
    }
}

impl<T: Region + ?Sized> Region for Box<T> {
    #[inline]
    fn contains(&self, p: Vec2, rng: &mut dyn RngCore) -> bool {
        (**self).contains(p, rng)
    }
}

impl<T: Region + ?Sized> Region for Arc<T> {
    #[inline]
    fn contains(&self, p: Vec2, rng: &mut dyn RngCore) -> bool {
        (**self).contains(p, rng)
    }
}
