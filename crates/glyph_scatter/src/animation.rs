//! Disc animation driven by a [`PointSource`].
//!
//! Every tick advances the existing discs with a damped spring on their radius and then
//! spawns a few new discs at freshly sampled points.
use std::ops::RangeInclusive;

use glam::Vec2;
use rand::Rng as RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sampling::{rand_index, rand_range, PointSource};

/// A growing disc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disc {
    pub center: Vec2,
    pub radius: f32,
    /// Radius change applied on the next tick.
    pub velocity: f32,
    pub target_radius: f32,
    /// Gray level used when drawing.
    pub shade: u8,
}

impl Disc {
    pub fn new(center: Vec2, target_radius: f32, shade: u8) -> Self {
        Self {
            center,
            radius: 0.0,
            velocity: 0.0,
            target_radius,
            shade,
        }
    }
}

/// Spring parameters for the radius motion.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiscDynamics {
    /// Fraction of the remaining distance to the target added to the velocity each tick.
    pub stiffness: f32,
    /// Velocity multiplier applied each tick.
    pub damping: f32,
    /// Target radius multiplier applied each tick. `1.0` keeps targets constant.
    pub target_decay: f32,
}

impl Default for DiscDynamics {
    fn default() -> Self {
        Self {
            stiffness: 0.2,
            damping: 0.6,
            target_decay: 1.0,
        }
    }
}

impl DiscDynamics {
    pub fn with_stiffness(mut self, stiffness: f32) -> Self {
        self.stiffness = stiffness;
        self
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_target_decay(mut self, target_decay: f32) -> Self {
        self.target_decay = target_decay;
        self
    }

    /// Advances one disc by a single tick.
    #[inline]
    pub fn step(&self, disc: &mut Disc) {
        disc.radius += disc.velocity;
        disc.velocity += self.stiffness * (disc.target_radius - disc.radius);
        disc.velocity *= self.damping;
        disc.target_radius *= self.target_decay;
    }

    /// Validates the parameters, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if !(self.stiffness.is_finite() && self.stiffness > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "stiffness must be finite and > 0, got {}",
                self.stiffness
            )));
        }
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(Error::InvalidConfig(format!(
                "damping must be within [0, 1], got {}",
                self.damping
            )));
        }
        if !(0.0..=1.0).contains(&self.target_decay) {
            return Err(Error::InvalidConfig(format!(
                "target_decay must be within [0, 1], got {}",
                self.target_decay
            )));
        }
        Ok(())
    }
}

/// Randomization of newly spawned discs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiscSpawn {
    /// Number of points pulled per tick (inclusive range).
    pub per_tick: RangeInclusive<usize>,
    /// Target radius range, `[min, max)`.
    pub target_radius: (f32, f32),
    /// Shade range (inclusive).
    pub shade: RangeInclusive<u8>,
}

impl Default for DiscSpawn {
    fn default() -> Self {
        Self {
            per_tick: 1..=3,
            target_radius: (3.0, 3.5),
            shade: 20..=59,
        }
    }
}

impl DiscSpawn {
    pub fn with_per_tick(mut self, per_tick: RangeInclusive<usize>) -> Self {
        self.per_tick = per_tick;
        self
    }

    pub fn with_target_radius(mut self, min: f32, max: f32) -> Self {
        self.target_radius = (min, max);
        self
    }

    pub fn with_shade(mut self, shade: RangeInclusive<u8>) -> Self {
        self.shade = shade;
        self
    }

    /// Validates the ranges, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.per_tick.is_empty() {
            return Err(Error::InvalidConfig("per_tick range is empty".into()));
        }
        let (min, max) = self.target_radius;
        if !(min.is_finite() && max.is_finite()) || min < 0.0 || max < min {
            return Err(Error::InvalidConfig(format!(
                "target_radius must satisfy 0 <= min <= max, got ({min}, {max})"
            )));
        }
        if self.shade.is_empty() {
            return Err(Error::InvalidConfig("shade range is empty".into()));
        }
        Ok(())
    }

    fn count(&self, rng: &mut dyn RngCore) -> usize {
        let lo = *self.per_tick.start();
        // Saturates for `0..=usize::MAX`, which then never draws the maximum.
        let span = (self.per_tick.end() - lo).saturating_add(1);
        lo + rand_index(rng, span)
    }

    fn spawn(&self, center: Vec2, rng: &mut dyn RngCore) -> Disc {
        let (min, max) = self.target_radius;
        let target = rand_range(rng, min, max);
        let lo = *self.shade.start();
        let span = (*self.shade.end() - lo) as usize + 1;
        let shade = lo + rand_index(rng, span) as u8;
        Disc::new(center, target, shade)
    }
}

/// Simulation state owned by the animation loop.
#[derive(Debug, Clone, Default)]
pub struct DiscField {
    discs: Vec<Disc>,
    dynamics: DiscDynamics,
    spawn: DiscSpawn,
    ticks: u64,
}

impl DiscField {
    pub fn new(dynamics: DiscDynamics, spawn: DiscSpawn) -> Result<Self> {
        dynamics.validate()?;
        spawn.validate()?;
        Ok(Self {
            discs: Vec::new(),
            dynamics,
            spawn,
            ticks: 0,
        })
    }

    pub fn discs(&self) -> &[Disc] {
        &self.discs
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn dynamics(&self) -> &DiscDynamics {
        &self.dynamics
    }

    /// Advances every disc, then spawns new discs at points pulled from `source`.
    ///
    /// Returns the number of discs spawned; zero once the source is exhausted.
    pub fn tick(&mut self, source: &mut dyn PointSource, rng: &mut dyn RngCore) -> usize {
        for disc in &mut self.discs {
            self.dynamics.step(disc);
        }

        let count = self.spawn.count(rng);
        let points = source.pull(count, rng);
        for p in &points {
            let disc = self.spawn.spawn(*p, rng);
            self.discs.push(disc);
        }

        self.ticks += 1;
        points.len()
    }
}
