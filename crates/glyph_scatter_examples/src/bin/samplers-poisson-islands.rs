use glam::Vec2;
use glyph_scatter::prelude::*;
use glyph_scatter_examples::{init_tracing, render_points_to_png, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

/// Two disjoint rectangles far apart: the sampler has to restart its seed sweep to reach
/// the second one.
fn main() -> anyhow::Result<()> {
    init_tracing();

    let bounds = Bounds::from_extent(400.0, 100.0);
    let islands = [
        (Vec2::new(20.0, 10.0), Vec2::new(90.0, 90.0)),
        (Vec2::new(300.0, 20.0), Vec2::new(380.0, 80.0)),
    ];
    let region = FnRegion::new(move |p: Vec2| {
        islands
            .iter()
            .any(|(min, max)| p.cmpge(*min).all() && p.cmple(*max).all())
    });

    let mut rng = StdRng::seed_from_u64(7);
    let mut sampler = PoissonDiskSampling::new(6.0).sampler(bounds, region)?;
    let points = sampler.generate(&mut rng);

    let stats = sampler.stats();
    info!(
        "{} points | islands: {} | seed batches: {}.",
        points.len(),
        stats.islands,
        stats.seed_batches,
    );

    let rc = RenderConfig::new((800, 200), bounds).with_background([24, 26, 32]);
    render_points_to_png(
        &points,
        &rc,
        [250, 200, 80],
        3.0,
        "samplers-poisson-islands.png",
    )?;
    Ok(())
}
