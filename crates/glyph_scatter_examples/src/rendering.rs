//! PNG output and input helpers shared by the example binaries.
use std::path::Path;

use anyhow::Context;
use glam::Vec2;
use glyph_scatter::prelude::*;
use image::{Rgb, RgbImage};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Installs a fmt subscriber honoring `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Maps a sampling domain onto an output image.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub image_size: (u32, u32),
    pub domain: Bounds,
    pub background: [u8; 3],
    /// Optional silhouette drawn under the samples.
    pub mask: Option<(IntensityRaster, [u8; 3])>,
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32), domain: Bounds) -> Self {
        Self {
            image_size,
            domain,
            background: [255, 255, 255],
            mask: None,
        }
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    pub fn with_mask(mut self, raster: IntensityRaster, color: [u8; 3]) -> Self {
        self.mask = Some((raster, color));
        self
    }

    fn scale(&self) -> Vec2 {
        Vec2::new(
            self.image_size.0 as f32 / self.domain.width(),
            self.image_size.1 as f32 / self.domain.height(),
        )
    }

    fn to_image(&self, p: Vec2) -> Vec2 {
        (p - self.domain.min) * self.scale()
    }

    fn canvas(&self) -> RgbImage {
        let (w, h) = self.image_size;
        let mut img = RgbImage::from_pixel(w, h, Rgb(self.background));
        if let Some((raster, color)) = &self.mask {
            let scale = self.scale();
            for (x, y, px) in img.enumerate_pixels_mut() {
                let p = self.domain.min + Vec2::new(x as f32 + 0.5, y as f32 + 0.5) / scale;
                if raster.sample(p) == FULL_INTENSITY {
                    *px = Rgb(*color);
                }
            }
        }
        img
    }
}

fn fill_circle(img: &mut RgbImage, center: Vec2, radius: f32, color: [u8; 3]) {
    if radius <= 0.0 {
        return;
    }
    let (w, h) = img.dimensions();
    let x0 = (center.x - radius).floor().max(0.0) as u32;
    let y0 = (center.y - radius).floor().max(0.0) as u32;
    let x1 = ((center.x + radius).ceil().max(0.0) as u32).min(w);
    let y1 = ((center.y + radius).ceil().max(0.0) as u32).min(h);
    let r2 = radius * radius;

    for y in y0..y1 {
        for x in x0..x1 {
            let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - center;
            if d.length_squared() <= r2 {
                img.put_pixel(x, y, Rgb(color));
            }
        }
    }
}

/// Draws each disc as a gray circle using its current radius and shade.
pub fn render_discs_to_png(
    discs: &[Disc],
    rc: &RenderConfig,
    out_path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let mut img = rc.canvas();
    let scale = rc.scale().min_element();
    for disc in discs {
        let shade = disc.shade;
        fill_circle(
            &mut img,
            rc.to_image(disc.center),
            disc.radius * scale,
            [shade, shade, shade],
        );
    }
    save(img, out_path.as_ref())
}

/// Draws each point as a filled circle of `radius` pixels.
pub fn render_points_to_png(
    points: &[Vec2],
    rc: &RenderConfig,
    color: [u8; 3],
    radius: f32,
    out_path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let mut img = rc.canvas();
    for p in points {
        fill_circle(&mut img, rc.to_image(*p), radius, color);
    }
    save(img, out_path.as_ref())
}

/// Loads the red channel of a PNG as an intensity mask.
pub fn load_png_mask(path: impl AsRef<Path>) -> anyhow::Result<IntensityRaster> {
    let path = path.as_ref();
    let img = image::open(path)
        .with_context(|| format!("failed to open mask '{}'", path.display()))?
        .to_rgb8();
    let (w, h) = img.dimensions();
    let data = img.pixels().map(|px| px.0[0]).collect();
    Ok(IntensityRaster::from_data(w, h, data)?)
}

fn save(img: RgbImage, path: &Path) -> anyhow::Result<()> {
    img.save(path)
        .with_context(|| format!("failed to write '{}'", path.display()))?;
    info!("Wrote {}.", path.display());
    Ok(())
}
