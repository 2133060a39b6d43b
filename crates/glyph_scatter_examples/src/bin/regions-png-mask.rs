use glam::Vec2;
use glyph_scatter::prelude::*;
use glyph_scatter_examples::{init_tracing, load_png_mask, render_points_to_png, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

/// Samples inside a PNG mask (red channel at full intensity) given as the first argument,
/// or inside rasterized text when no path is given.
fn main() -> anyhow::Result<()> {
    init_tracing();

    let raster = match std::env::args().nth(1) {
        Some(path) => load_png_mask(path)?,
        None => {
            let style = TextStyle::new(112.0);
            TextRasterizer::new(800, 160).rasterize("MASK", Vec2::new(400.0, 140.0), &style)?
        }
    };
    let (w, h) = raster.size();
    let bounds = Bounds::from_extent(w as f32, h as f32);

    let oracle = RegionOracle::new(raster.clone()).with_probe_radius(2.0);
    oracle.validate()?;

    let mut rng = StdRng::seed_from_u64(1234);
    let mut sampler = PoissonDiskSampling::new(5.0).sampler(bounds, oracle)?;
    let points = sampler.generate(&mut rng);
    info!(
        "{} points inside a {}x{} mask covering {} px.",
        points.len(),
        w,
        h,
        raster.coverage(),
    );

    let rc = RenderConfig::new((w, h), bounds)
        .with_background([245, 245, 245])
        .with_mask(raster, [210, 220, 235]);
    render_points_to_png(&points, &rc, [30, 60, 140], 1.5, "regions-png-mask.png")?;
    Ok(())
}
