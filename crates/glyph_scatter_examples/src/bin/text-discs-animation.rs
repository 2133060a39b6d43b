use glyph_scatter::prelude::*;
use glyph_scatter_examples::{init_tracing, render_discs_to_png, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

const MAX_TICKS: usize = 2_000;
const SNAPSHOT_TICKS: [usize; 3] = [30, 120, 300];

fn main() -> anyhow::Result<()> {
    init_tracing();

    let label = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "hello world".to_owned());
    let config = SceneConfig::new(1600, 200, label);
    let mut scene = Scene::try_new(&config)?;
    let mut rng = StdRng::seed_from_u64(42);

    let rc = RenderConfig::new((config.width, config.height), config.bounds())
        .with_background([250, 250, 250]);

    let mut tick = 0;
    while tick < MAX_TICKS {
        scene.tick(&mut rng);
        tick += 1;

        if SNAPSHOT_TICKS.contains(&tick) {
            render_discs_to_png(
                scene.discs(),
                &rc,
                format!("text-discs-animation-{tick:04}.png"),
            )?;
        }

        // Let the last discs settle before the final frame.
        if scene.is_saturated() && tick > SNAPSHOT_TICKS[SNAPSHOT_TICKS.len() - 1] {
            break;
        }
    }

    // A few more frames so the latest discs reach their target radius.
    for _ in 0..30 {
        scene.tick(&mut rng);
    }
    render_discs_to_png(scene.discs(), &rc, "text-discs-animation-final.png")?;

    let stats = scene.sampler().stats();
    info!(
        "{} discs after {} ticks | rejected: {} | islands: {}.",
        scene.discs().len(),
        scene.field().ticks(),
        stats.rejected(),
        stats.islands,
    );
    Ok(())
}
