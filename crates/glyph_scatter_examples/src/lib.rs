#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{
    init_tracing, load_png_mask, render_discs_to_png, render_points_to_png, RenderConfig,
};
