//! Pixel-backed regions.
//!
//! [`IntensityRaster`] stores a single 8-bit channel, [`RegionOracle`] turns it into a
//! [`crate::sampling::Region`] with an edge-robust probe, and [`TextRasterizer`] produces
//! rasters from text labels.
use glam::Vec2;

use crate::error::{Error, Result};

pub mod font;
pub mod oracle;
pub mod text;

pub use oracle::{ProbeAngle, RegionOracle};
pub use text::{HorizontalAlign, TextRasterizer, TextStyle, VerticalAnchor};

/// Intensity value of a fully covered pixel.
pub const FULL_INTENSITY: u8 = u8::MAX;

/// Row-major single-channel raster. Pixel `(0, 0)` is the top-left corner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntensityRaster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl IntensityRaster {
    /// Create a new raster of the given size, initializing all values to zero.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        }
    }

    /// Wraps an existing buffer, checking that its length matches `width * height`.
    pub fn from_data(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(Error::InvalidRaster {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Get the size of the raster as `(width, height)`.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    fn offset(&self, ix: i64, iy: i64) -> Option<usize> {
        if ix < 0 || iy < 0 || ix >= self.width as i64 || iy >= self.height as i64 {
            return None;
        }
        Some(iy as usize * self.width as usize + ix as usize)
    }

    /// Get the value at the given pixel, returning `0` if out of bounds.
    #[inline]
    pub fn get(&self, ix: i64, iy: i64) -> u8 {
        self.offset(ix, iy).map_or(0, |i| self.data[i])
    }

    /// Sets a pixel. Out-of-bounds writes are ignored.
    pub fn set(&mut self, ix: i64, iy: i64, value: u8) {
        if let Some(i) = self.offset(ix, iy) {
            self.data[i] = value;
        }
    }

    /// Fills the pixel rectangle `[x0, x1) x [y0, y1)`, clipped to the raster.
    pub fn fill_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, value: u8) {
        let x0 = x0.max(0);
        let y0 = y0.max(0);
        let x1 = x1.min(self.width as i64);
        let y1 = y1.min(self.height as i64);
        for y in y0..y1 {
            for x in x0..x1 {
                self.set(x, y, value);
            }
        }
    }

    /// Samples the pixel nearest to `p`, rounding halves up.
    #[inline]
    pub fn sample(&self, p: Vec2) -> u8 {
        if !p.is_finite() {
            return 0;
        }
        let ix = (p.x + 0.5).floor() as i64;
        let iy = (p.y + 0.5).floor() as i64;
        self.get(ix, iy)
    }

    /// Number of pixels at full intensity.
    pub fn coverage(&self) -> usize {
        self.data.iter().filter(|v| **v == FULL_INTENSITY).count()
    }
}
