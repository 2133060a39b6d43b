//! Edge-robust region membership over an [`IntensityRaster`].
//!
//! A single pixel lookup is noisy near glyph edges, so the oracle probes several points on a
//! small circle around the query and requires all of them to be covered. The effect is a
//! soft inward margin of about the probe radius.
use std::f32::consts::TAU;
use std::sync::Arc;

use glam::Vec2;
use rand::Rng as RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::raster::{IntensityRaster, FULL_INTENSITY};
use crate::sampling::{rand01, Region};

/// Number of probes placed around each query point, evenly spaced in angle.
pub const PROBE_COUNT: usize = 3;

/// Initial angle of the probe triangle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ProbeAngle {
    /// Draw a fresh angle from the sampler's RNG on every query.
    #[default]
    Random,
    /// Use the same angle (radians) for every query.
    Fixed(f32),
}

/// Region backed by a shared raster and a probe configuration.
#[derive(Debug, Clone)]
pub struct RegionOracle {
    raster: Arc<IntensityRaster>,
    threshold: u8,
    probe_radius: f32,
    probe_angle: ProbeAngle,
}

impl RegionOracle {
    pub const DEFAULT_PROBE_RADIUS: f32 = 3.0;

    pub fn new(raster: impl Into<Arc<IntensityRaster>>) -> Self {
        Self {
            raster: raster.into(),
            threshold: FULL_INTENSITY,
            probe_radius: Self::DEFAULT_PROBE_RADIUS,
            probe_angle: ProbeAngle::Random,
        }
    }

    /// Sets the minimum intensity a pixel needs to count as inside.
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_probe_radius(mut self, probe_radius: f32) -> Self {
        self.probe_radius = probe_radius;
        self
    }

    pub fn with_probe_angle(mut self, probe_angle: ProbeAngle) -> Self {
        self.probe_angle = probe_angle;
        self
    }

    /// Validates the probe settings, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if !self.probe_radius.is_finite() || self.probe_radius < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "probe_radius must be finite and >= 0, got {}",
                self.probe_radius
            )));
        }
        if let ProbeAngle::Fixed(angle) = self.probe_angle {
            if !angle.is_finite() {
                return Err(Error::InvalidConfig("probe angle must be finite".into()));
            }
        }
        Ok(())
    }

    pub fn raster(&self) -> &IntensityRaster {
        &self.raster
    }

    pub fn probe_radius(&self) -> f32 {
        self.probe_radius
    }

    /// Single-pixel test at `p` without probing.
    #[inline]
    pub fn is_covered(&self, p: Vec2) -> bool {
        self.raster.sample(p) >= self.threshold
    }

    /// Probe test with an explicit starting angle.
    pub fn contains_at_angle(&self, p: Vec2, start: f32) -> bool {
        let step = TAU / PROBE_COUNT as f32;
        (1..=PROBE_COUNT).all(|i| {
            let t = start + step * i as f32;
            self.is_covered(p + Vec2::from_angle(t) * self.probe_radius)
        })
    }
}

impl Region for RegionOracle {
    fn contains(&self, p: Vec2, rng: &mut dyn RngCore) -> bool {
        let start = match self.probe_angle {
            ProbeAngle::Random => rand01(rng) * TAU,
            ProbeAngle::Fixed(angle) => angle,
        };
        self.contains_at_angle(p, start)
    }
}
