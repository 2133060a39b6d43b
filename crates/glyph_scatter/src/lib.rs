#![forbid(unsafe_code)]
//! glyph_scatter: constrained Poisson disk sampling inside rasterized text, plus a disc
//! animation driver consuming the samples.
//!
//! Modules:
//! - geometry: sampling domains
//! - sampling: region predicates, background grid, lazy Poisson disk sampler
//! - raster: intensity rasters, edge-robust region oracle, block-font text rasterizer
//! - animation: spring-driven discs spawned at sampled points
//! - scene: one-config assembly of all of the above
pub mod animation;
pub mod error;
pub mod geometry;
pub mod raster;
pub mod sampling;
pub mod scene;

/// Convenient re-exports for common types. Import with `use glyph_scatter::prelude::*;`.
pub mod prelude {
    pub use crate::animation::{Disc, DiscDynamics, DiscField, DiscSpawn};
    pub use crate::error::{Error, Result};
    pub use crate::geometry::Bounds;
    pub use crate::raster::{
        HorizontalAlign, IntensityRaster, ProbeAngle, RegionOracle, TextRasterizer, TextStyle,
        VerticalAnchor, FULL_INTENSITY,
    };
    pub use crate::sampling::{
        Everywhere, FnRegion, PointSource, PoissonDiskSampler, PoissonDiskSampling, Region,
        SamplerStats,
    };
    pub use crate::scene::{Scene, SceneConfig};
}
