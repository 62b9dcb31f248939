//! A font at a fixed pixel size, bound to one style.
//!
//! Outline fonts are rasterized with ab_glyph; coverage of one half or more
//! becomes a dark pixel so the output stays 1-bit.

use ab_glyph::{Font, FontArc, ScaleFont};
use std::fmt;
use std::path::{Path, PathBuf};

use super::builtin;
use crate::layout::StyleTag;
use crate::render::Canvas;

/// Coverage at or above this is drawn dark.
const COVERAGE_THRESHOLD: f32 = 0.5;

/// Where a font's glyphs come from.
#[derive(Clone)]
pub enum FontSource {
    /// A TTF/OTF file parsed with ab_glyph.
    Outline { font: FontArc, path: PathBuf },
    /// The embedded Spleen bitmap font.
    Builtin,
}

impl FontSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            FontSource::Outline { path, .. } => Some(path),
            FontSource::Builtin => None,
        }
    }
}

impl fmt::Debug for FontSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontSource::Outline { path, .. } => f.debug_tuple("Outline").field(path).finish(),
            FontSource::Builtin => f.write_str("Builtin"),
        }
    }
}

/// Font resolved for a style.
#[derive(Debug, Clone)]
pub struct FontAsset {
    style: StyleTag,
    pixel_size: u32,
    source: FontSource,
}

impl FontAsset {
    pub fn new(style: StyleTag, pixel_size: u32, source: FontSource) -> Self {
        Self {
            style,
            pixel_size: pixel_size.max(1),
            source,
        }
    }

    pub fn style(&self) -> StyleTag {
        self.style
    }

    pub fn pixel_size(&self) -> u32 {
        self.pixel_size
    }

    pub fn source(&self) -> &FontSource {
        &self.source
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self.source, FontSource::Builtin)
    }

    /// Whether this font has a glyph for `ch`.
    pub fn can_render(&self, ch: char) -> bool {
        match &self.source {
            FontSource::Outline { font, .. } => font.glyph_id(ch).0 != 0,
            FontSource::Builtin => builtin::has_glyph(ch),
        }
    }

    /// Horizontal advance of `ch` in pixels.
    pub fn advance(&self, ch: char) -> f32 {
        match &self.source {
            FontSource::Outline { font, .. } => {
                let scaled = font.as_scaled(self.pixel_size as f32);
                scaled.h_advance(font.glyph_id(ch))
            }
            FontSource::Builtin => builtin::cell_size(self.pixel_size).0 as f32,
        }
    }

    /// Height of a line of this font, before line spacing.
    pub fn glyph_height(&self) -> u32 {
        match &self.source {
            FontSource::Outline { font, .. } => {
                let scaled = font.as_scaled(self.pixel_size as f32);
                (scaled.ascent() - scaled.descent()).ceil().max(1.0) as u32
            }
            FontSource::Builtin => builtin::cell_size(self.pixel_size).1 as u32,
        }
    }

    /// Draw `ch` with its cell's top-left corner at (`x`, `top`).
    pub(crate) fn draw_glyph(&self, ch: char, canvas: &mut Canvas, x: f32, top: u32) {
        match &self.source {
            FontSource::Outline { font, .. } => {
                let pixel_height = self.pixel_size as f32;
                let baseline_y = top as f32 + font.as_scaled(pixel_height).ascent();
                let glyph = font
                    .glyph_id(ch)
                    .with_scale_and_position(pixel_height, ab_glyph::point(x, baseline_y));

                if let Some(outlined) = font.outline_glyph(glyph) {
                    let bounds = outlined.px_bounds();
                    outlined.draw(|px, py, coverage| {
                        if coverage >= COVERAGE_THRESHOLD {
                            let gx = px as i64 + bounds.min.x as i64;
                            let gy = py as i64 + bounds.min.y as i64;
                            canvas.set_dark(gx, gy);
                        }
                    });
                }
            }
            FontSource::Builtin => {
                let Some(bitmap) = builtin::glyph(ch, self.pixel_size) else {
                    return;
                };
                let left = x.round() as i64;
                for gy in 0..bitmap.height {
                    for gx in 0..bitmap.width {
                        if bitmap.data[gy * bitmap.width + gx] != 0 {
                            canvas.set_dark(left + gx as i64, top as i64 + gy as i64);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_metrics() {
        let asset = FontAsset::new(StyleTag::Plain, 24, FontSource::Builtin);
        assert_eq!(asset.advance('W'), 12.0);
        assert_eq!(asset.glyph_height(), 24);
        assert!(asset.can_render('x'));
        assert!(asset.is_builtin());
    }

    #[test]
    fn test_builtin_draws_inside_cell() {
        let asset = FontAsset::new(StyleTag::Plain, 24, FontSource::Builtin);
        let mut canvas = Canvas::blank(40, 30);
        asset.draw_glyph('H', &mut canvas, 5.0, 3);

        let image = canvas.as_image();
        let mut dark = 0;
        for (x, y, pixel) in image.enumerate_pixels() {
            if pixel.0[0] == crate::render::DARK {
                dark += 1;
                assert!((5..17).contains(&x), "x = {}", x);
                assert!((3..27).contains(&y), "y = {}", y);
            }
        }
        assert!(dark > 0);
    }

    #[test]
    fn test_zero_size_clamped() {
        let asset = FontAsset::new(StyleTag::Plain, 0, FontSource::Builtin);
        assert_eq!(asset.pixel_size(), 1);
    }
}
