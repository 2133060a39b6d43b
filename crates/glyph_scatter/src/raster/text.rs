//! Text label rasterization into an [`IntensityRaster`].
use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
use crate::raster::font::{self, GlyphRows, GLYPH_COLUMNS, GLYPH_ROWS};
use crate::raster::{IntensityRaster, FULL_INTENSITY};

/// Horizontal placement of the label relative to the anchor x.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HorizontalAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Which edge of the label sits on the anchor y.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VerticalAnchor {
    Top,
    #[default]
    Bottom,
}

/// Size and alignment of a rasterized label.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TextStyle {
    /// Height of a full glyph cell in pixels.
    pub glyph_height: f32,
    pub align: HorizontalAlign,
    pub baseline: VerticalAnchor,
}

impl TextStyle {
    pub fn new(glyph_height: f32) -> Self {
        Self {
            glyph_height,
            align: HorizontalAlign::default(),
            baseline: VerticalAnchor::default(),
        }
    }

    pub fn with_align(mut self, align: HorizontalAlign) -> Self {
        self.align = align;
        self
    }

    pub fn with_baseline(mut self, baseline: VerticalAnchor) -> Self {
        self.baseline = baseline;
        self
    }

    /// Side length of one font cell in pixels.
    #[inline]
    pub fn unit(&self) -> f32 {
        self.glyph_height / GLYPH_ROWS as f32
    }

    /// Horizontal distance between consecutive glyph origins (one blank column between glyphs).
    #[inline]
    pub fn advance(&self) -> f32 {
        self.unit() * (GLYPH_COLUMNS + 1) as f32
    }

    /// Validates the style, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if !self.glyph_height.is_finite() || self.glyph_height <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "glyph_height must be finite and > 0, got {}",
                self.glyph_height
            )));
        }
        Ok(())
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(140.0)
    }
}

/// Renders labels onto fixed-size rasters with the built-in block font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRasterizer {
    width: u32,
    height: u32,
}

impl TextRasterizer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Pixel extent `(width, height)` of `label` drawn with `style`.
    pub fn measure(label: &str, style: &TextStyle) -> Vec2 {
        let n = label.chars().count();
        if n == 0 {
            return Vec2::ZERO;
        }
        let width = n as f32 * style.advance() - style.unit();
        Vec2::new(width, style.glyph_height)
    }

    /// Rasterizes `label` positioned on `anchor` according to `style`.
    ///
    /// Covered pixels get [`FULL_INTENSITY`], everything else stays zero. Characters without a
    /// glyph render as blanks.
    pub fn rasterize(&self, label: &str, anchor: Vec2, style: &TextStyle) -> Result<IntensityRaster> {
        style.validate()?;
        if !anchor.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "text anchor must be finite, got {anchor:?}"
            )));
        }

        let mut raster = IntensityRaster::new(self.width, self.height);
        let glyphs: Vec<GlyphRows> = label.chars().map(glyph_or_blank).collect();
        if glyphs.is_empty() {
            return Ok(raster);
        }

        let extent = Self::measure(label, style);
        let left = match style.align {
            HorizontalAlign::Left => anchor.x,
            HorizontalAlign::Center => anchor.x - extent.x * 0.5,
            HorizontalAlign::Right => anchor.x - extent.x,
        };
        let top = match style.baseline {
            VerticalAnchor::Top => anchor.y,
            VerticalAnchor::Bottom => anchor.y - extent.y,
        };

        let unit = style.unit();
        let advance = style.advance();
        let x0 = (left.floor() as i64).max(0);
        let x1 = ((left + extent.x).ceil() as i64).min(self.width as i64);
        let y0 = (top.floor() as i64).max(0);
        let y1 = ((top + extent.y).ceil() as i64).min(self.height as i64);

        for py in y0..y1 {
            let local_y = py as f32 + 0.5 - top;
            if local_y < 0.0 {
                continue;
            }
            let row = (local_y / unit) as usize;
            for px in x0..x1 {
                let local_x = px as f32 + 0.5 - left;
                if local_x < 0.0 {
                    continue;
                }
                let slot = (local_x / advance) as usize;
                let Some(rows) = glyphs.get(slot) else {
                    continue;
                };
                let col = ((local_x - slot as f32 * advance) / unit) as usize;
                if font::is_set(rows, col, row) {
                    raster.set(px, py, FULL_INTENSITY);
                }
            }
        }

        Ok(raster)
    }
}

fn glyph_or_blank(c: char) -> GlyphRows {
    font::glyph(c).unwrap_or_else(|| {
        warn!("No glyph for character '{}'; rendering a blank.", c);
        [0; GLYPH_ROWS]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> TextRasterizer {
        TextRasterizer::new(100, 100)
    }

    #[test]
    fn measure_accounts_for_spacing() {
        let style = TextStyle::new(70.0);
        assert_eq!(TextRasterizer::measure("", &style), Vec2::ZERO);
        assert_eq!(TextRasterizer::measure("I", &style), Vec2::new(50.0, 70.0));
        assert_eq!(TextRasterizer::measure("II", &style), Vec2::new(110.0, 70.0));
    }

    #[test]
    fn centered_bottom_anchored_glyph_lands_where_expected() {
        let style = TextStyle::new(70.0);
        let raster = canvas()
            .rasterize("I", Vec2::new(50.0, 90.0), &style)
            .unwrap();

        // Glyph box spans x 25..75, y 20..90 with 10 px cells.
        assert_eq!(raster.get(50, 50), FULL_INTENSITY);
        assert_eq!(raster.get(30, 50), 0);
        assert_eq!(raster.get(40, 25), FULL_INTENSITY);
        assert_eq!(raster.get(28, 25), 0);
        assert_eq!(raster.get(50, 19), 0);
        assert_eq!(raster.get(50, 90), 0);
        assert_eq!(raster.coverage(), 11 * 100);
    }

    #[test]
    fn alignment_shifts_the_label() {
        let style = TextStyle::new(70.0)
            .with_align(HorizontalAlign::Left)
            .with_baseline(VerticalAnchor::Top);
        let left = canvas().rasterize("L", Vec2::new(10.0, 0.0), &style).unwrap();
        assert_eq!(left.get(10, 5), FULL_INTENSITY);
        assert_eq!(left.get(9, 5), 0);

        let style = style.with_align(HorizontalAlign::Right);
        let right = canvas().rasterize("L", Vec2::new(90.0, 0.0), &style).unwrap();
        assert_eq!(right.get(40, 5), FULL_INTENSITY);
        assert_eq!(right.get(39, 5), 0);
        assert_eq!(right.get(89, 65), FULL_INTENSITY);
    }

    #[test]
    fn unknown_characters_leave_gaps() {
        let style = TextStyle::new(7.0).with_align(HorizontalAlign::Left);
        let blank = canvas().rasterize("~", Vec2::new(0.0, 50.0), &style).unwrap();
        assert_eq!(blank.coverage(), 0);

        let single = canvas().rasterize("I", Vec2::new(0.0, 50.0), &style).unwrap();
        let gapped = canvas().rasterize("I~I", Vec2::new(0.0, 50.0), &style).unwrap();
        assert_eq!(gapped.coverage(), 2 * single.coverage());
    }

    #[test]
    fn clipped_labels_do_not_panic() {
        let style = TextStyle::new(70.0);
        let raster = canvas()
            .rasterize("WIDE LABEL", Vec2::new(0.0, 40.0), &style)
            .unwrap();
        assert!(raster.coverage() > 0);
        assert_eq!(raster.size(), (100, 100));
    }

    #[test]
    fn empty_label_yields_empty_raster() {
        let raster = canvas()
            .rasterize("", Vec2::new(50.0, 50.0), &TextStyle::default())
            .unwrap();
        assert_eq!(raster.coverage(), 0);
    }

    #[test]
    fn invalid_style_is_rejected() {
        let err = canvas().rasterize("A", Vec2::ZERO, &TextStyle::new(0.0));
        assert!(matches!(err, Err(Error::InvalidConfig(_))));
        let err = canvas().rasterize("A", Vec2::new(f32::NAN, 0.0), &TextStyle::new(7.0));
        assert!(err.is_err());
    }
}
