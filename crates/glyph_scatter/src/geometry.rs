//! Axis-aligned sampling domains.
use glam::Vec2;
use mint::Vector2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Axis-aligned rectangle bounding a sampling run.
///
/// Containment is half-open: the `min` edges are inside, the `max` edges are not.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bounds {
    /// Lower corner (inclusive).
    pub min: Vec2,
    /// Upper corner (exclusive).
    pub max: Vec2,
}

impl Bounds {
    /// Creates bounds from two corners.
    pub fn new(min: impl Into<Vector2<f32>>, max: impl Into<Vector2<f32>>) -> Self {
        Self {
            min: Vec2::from(min.into()),
            max: Vec2::from(max.into()),
        }
    }

    /// Creates bounds spanning `[0, width) x [0, height)`.
    pub fn from_extent(width: f32, height: f32) -> Self {
        Self {
            min: Vec2::ZERO,
            max: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn extent(&self) -> Vec2 {
        self.max - self.min
    }

    /// Length of the diagonal.
    pub fn diagonal(&self) -> f32 {
        self.extent().length()
    }

    /// Returns `true` if `p` lies inside the half-open rectangle.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }

    /// Validates the rectangle, returning an error if it is degenerate or non-finite.
    pub fn validate(&self) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "bounds must be finite, got {:?}..{:?}",
                self.min, self.max
            )));
        }
        if self.max.x <= self.min.x || self.max.y <= self.min.y {
            return Err(Error::InvalidConfig(format!(
                "bounds max must exceed min on both axes, got {:?}..{:?}",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let b = Bounds::from_extent(10.0, 5.0);
        assert!(b.contains(Vec2::new(0.0, 0.0)));
        assert!(b.contains(Vec2::new(9.99, 4.99)));
        assert!(!b.contains(Vec2::new(10.0, 1.0)));
        assert!(!b.contains(Vec2::new(1.0, 5.0)));
        assert!(!b.contains(Vec2::new(-0.01, 1.0)));
    }

    #[test]
    fn new_accepts_arrays_and_glam() {
        let a = Bounds::new([-1.0, -2.0], [3.0, 4.0]);
        let b = Bounds::new(Vec2::new(-1.0, -2.0), Vec2::new(3.0, 4.0));
        assert_eq!(a, b);
        assert_eq!(a.width(), 4.0);
        assert_eq!(a.height(), 6.0);
        assert_eq!(a.extent(), Vec2::new(4.0, 6.0));
    }

    #[test]
    fn validate_rejects_degenerate_and_inverted() {
        assert!(Bounds::from_extent(1.0, 1.0).validate().is_ok());
        assert!(Bounds::from_extent(0.0, 1.0).validate().is_err());
        assert!(Bounds::new([5.0, 0.0], [1.0, 1.0]).validate().is_err());
        assert!(Bounds::new([0.0, 0.0], [f32::INFINITY, 1.0])
            .validate()
            .is_err());
        assert!(Bounds::new([f32::NAN, 0.0], [1.0, 1.0]).validate().is_err());
    }

    #[test]
    fn diagonal_matches_pythagoras() {
        let b = Bounds::from_extent(3.0, 4.0);
        assert!((b.diagonal() - 5.0).abs() < 1e-6);
    }
}
