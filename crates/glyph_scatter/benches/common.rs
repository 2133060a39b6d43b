use std::time::Duration;

use criterion::measurement::WallTime;
use criterion::{BenchmarkGroup, Criterion, Throughput};
use glam::Vec2;
use glyph_scatter::geometry::Bounds;
use glyph_scatter::raster::{RegionOracle, TextRasterizer, TextStyle};
use glyph_scatter::sampling::{PoissonDiskSampling, Region};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub const BANNER_SIZE: (u32, u32) = (1600, 200);
pub const BANNER_LABEL: &str = "hello world";

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(20)
        .warm_up_time(Duration::from_millis(500))
        .measurement_time(Duration::from_secs(2))
}

/// Full runs against the text oracle take tens of milliseconds, so give them fewer samples
/// over a longer window.
pub fn configure_oracle_group(group: &mut BenchmarkGroup<'_, WallTime>) {
    group
        .sample_size(10)
        .measurement_time(Duration::from_secs(5));
}

pub fn banner_bounds() -> Bounds {
    Bounds::from_extent(BANNER_SIZE.0 as f32, BANNER_SIZE.1 as f32)
}

/// Oracle over the default banner label, bottom-centered 20 px above the lower edge.
pub fn banner_oracle() -> RegionOracle {
    let (width, height) = BANNER_SIZE;
    let anchor = Vec2::new(width as f32 * 0.5, height as f32 - 20.0);
    let raster = TextRasterizer::new(width, height)
        .rasterize(BANNER_LABEL, anchor, &TextStyle::new(140.0))
        .expect("valid text style");
    RegionOracle::new(raster)
}

/// Throughput in accepted points, measured from one seeded run.
pub fn accepted_throughput<G: Region>(
    sampling: &PoissonDiskSampling,
    bounds: Bounds,
    region: G,
    seed: u64,
) -> Throughput {
    let mut rng = StdRng::seed_from_u64(seed);
    let accepted = sampling
        .generate(bounds, region, &mut rng)
        .map(|pts| pts.len())
        .unwrap_or(0);
    Throughput::Elements(accepted.max(1) as u64)
}
