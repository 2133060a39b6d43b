//! Scene assembly: text raster, probe oracle, sampler and disc field from one config.
use glam::Vec2;
use rand::Rng as RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::animation::{Disc, DiscDynamics, DiscField, DiscSpawn};
use crate::error::{Error, Result};
use crate::geometry::Bounds;
use crate::raster::{ProbeAngle, RegionOracle, TextRasterizer, TextStyle, FULL_INTENSITY};
use crate::sampling::{PoissonDiskSampler, PoissonDiskSampling};

/// Configuration for building a [`Scene`].
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SceneConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Text whose silhouette constrains the discs.
    pub label: String,
    pub text_style: TextStyle,
    /// Pixel position the label is aligned on.
    pub text_anchor: Vec2,
    pub sampling: PoissonDiskSampling,
    /// Minimum pixel intensity counted as inside the label.
    pub threshold: u8,
    pub probe_radius: f32,
    pub probe_angle: ProbeAngle,
    pub dynamics: DiscDynamics,
    pub spawn: DiscSpawn,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::new(1600, 200, "hello world")
    }
}

impl SceneConfig {
    pub const DEFAULT_BOTTOM_MARGIN: f32 = 20.0;
    pub const DEFAULT_MIN_DISTANCE: f32 = 11.0;
    pub const DEFAULT_MAX_ATTEMPTS: usize = 40;

    /// Creates a config for a `width` x `height` canvas showing `label` centered above a
    /// bottom margin.
    pub fn new(width: u32, height: u32, label: impl Into<String>) -> Self {
        Self {
            width,
            height,
            label: label.into(),
            text_style: TextStyle::default(),
            text_anchor: Vec2::new(
                width as f32 * 0.5,
                height as f32 - Self::DEFAULT_BOTTOM_MARGIN,
            ),
            sampling: PoissonDiskSampling::new(Self::DEFAULT_MIN_DISTANCE)
                .with_max_attempts(Self::DEFAULT_MAX_ATTEMPTS),
            threshold: FULL_INTENSITY,
            probe_radius: RegionOracle::DEFAULT_PROBE_RADIUS,
            probe_angle: ProbeAngle::Random,
            dynamics: DiscDynamics::default(),
            spawn: DiscSpawn::default(),
        }
    }

    pub fn with_text_style(mut self, text_style: TextStyle) -> Self {
        self.text_style = text_style;
        self
    }

    pub fn with_text_anchor(mut self, text_anchor: Vec2) -> Self {
        self.text_anchor = text_anchor;
        self
    }

    pub fn with_sampling(mut self, sampling: PoissonDiskSampling) -> Self {
        self.sampling = sampling;
        self
    }

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

    pub fn with_dynamics(mut self, dynamics: DiscDynamics) -> Self {
        self.dynamics = dynamics;
        self
    }

    pub fn with_spawn(mut self, spawn: DiscSpawn) -> Self {
        self.spawn = spawn;
        self
    }

    /// Sampling domain covering the whole canvas.
    pub fn bounds(&self) -> Bounds {
        Bounds::from_extent(self.width as f32, self.height as f32)
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidConfig(format!(
                "canvas must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        self.text_style.validate()?;
        self.sampling.validate()?;
        self.dynamics.validate()?;
        self.spawn.validate()?;
        Ok(())
    }
}

/// Sampler and disc field for one text banner.
pub struct Scene {
    sampler: PoissonDiskSampler<RegionOracle>,
    field: DiscField,
}

impl Scene {
    /// Creates a new [`Scene`] after validating the configuration.
    pub fn try_new(config: &SceneConfig) -> Result<Self> {
        config.validate()?;

        let raster = TextRasterizer::new(config.width, config.height).rasterize(
            &config.label,
            config.text_anchor,
            &config.text_style,
        )?;
        if raster.coverage() == 0 {
            warn!("Label '{}' covers no pixels; the scene stays empty.", config.label);
        }

        let oracle = RegionOracle::new(raster)
            .with_threshold(config.threshold)
            .with_probe_radius(config.probe_radius)
            .with_probe_angle(config.probe_angle);
        oracle.validate()?;

        let sampler = config.sampling.sampler(config.bounds(), oracle)?;
        let field = DiscField::new(config.dynamics.clone(), config.spawn.clone())?;

        info!(
            "Scene {}x{} | label: '{}' | min distance: {}.",
            config.width, config.height, config.label, config.sampling.min_distance,
        );

        Ok(Self { sampler, field })
    }

    /// Advances the animation by one frame. Returns the number of discs spawned.
    pub fn tick(&mut self, rng: &mut dyn RngCore) -> usize {
        self.field.tick(&mut self.sampler, rng)
    }

    pub fn discs(&self) -> &[Disc] {
        self.field.discs()
    }

    pub fn field(&self) -> &DiscField {
        &self.field
    }

    pub fn sampler(&self) -> &PoissonDiskSampler<RegionOracle> {
        &self.sampler
    }

    pub fn oracle(&self) -> &RegionOracle {
        self.sampler.region()
    }

    /// `true` once the sampler can produce no more points.
    pub fn is_saturated(&self) -> bool {
        self.sampler.is_exhausted()
    }
}
