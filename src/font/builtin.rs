//! Built-in bitmap font, used when no font file can be loaded.
//!
//! Glyphs come from the Spleen 12x24 PSF2 font and are scaled with nearest
//! neighbor to the requested pixel size, keeping the 1:2 cell aspect.
//! A few typographic characters Spleen lacks are drawn with a close
//! stand-in (see [`substitute`]).

use spleen_font::{FONT_12X24, PSF2Font};

/// Source cell width in pixels.
pub const CELL_WIDTH: usize = 12;
/// Source cell height in pixels.
pub const CELL_HEIGHT: usize = 24;

/// A 1-bit glyph bitmap: 0 = white, 1 = black.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphBitmap {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

/// Cell dimensions (width, height) at a pixel size.
pub fn cell_size(pixel_size: u32) -> (usize, usize) {
    let height = (pixel_size as usize).max(1);
    let width = (CELL_WIDTH * height + CELL_HEIGHT / 2) / CELL_HEIGHT;
    (width.max(1), height)
}

/// Stand-ins for characters missing from Spleen.
const SUBSTITUTES: &[(char, char)] = &[
    ('\u{2022}', '\u{00B7}'), // bullet -> middle dot
    ('\u{2013}', '-'),
    ('\u{2014}', '-'),
    ('\u{2018}', '\''),
    ('\u{2019}', '\''),
    ('\u{201C}', '"'),
    ('\u{201D}', '"'),
];

/// Character actually drawn for `ch` when Spleen has no glyph of its own.
pub fn substitute(ch: char) -> Option<char> {
    SUBSTITUTES
        .iter()
        .find_map(|&(from, to)| (from == ch).then_some(to))
}

/// Whether `ch` can be drawn, directly or through its stand-in.
pub fn has_glyph(ch: char) -> bool {
    lookup(ch).is_some()
}

/// Glyph for `ch` scaled to `pixel_size`, or `None` if Spleen lacks it.
pub fn glyph(ch: char, pixel_size: u32) -> Option<GlyphBitmap> {
    let source = lookup(ch)?;
    let (width, height) = cell_size(pixel_size);

    let mut data = vec![0u8; width * height];
    scale_bitmap(&source, CELL_WIDTH, CELL_HEIGHT, &mut data, width, height);

    Some(GlyphBitmap {
        width,
        height,
        data,
    })
}

fn lookup(ch: char) -> Option<Vec<u8>> {
    source_glyph(ch).or_else(|| substitute(ch).and_then(source_glyph))
}

/// Unscaled 12x24 bitmap for `ch`.
fn source_glyph(ch: char) -> Option<Vec<u8>> {
    let mut spleen = PSF2Font::new(FONT_12X24).ok()?;
    let mut utf8 = [0u8; 4];
    let spleen_glyph = spleen.glyph_for_utf8(ch.encode_utf8(&mut utf8).as_bytes())?;

    let mut bitmap = vec![0u8; CELL_WIDTH * CELL_HEIGHT];
    for (row_y, row) in spleen_glyph.enumerate() {
        for (col_x, on) in row.enumerate() {
            if row_y < CELL_HEIGHT && col_x < CELL_WIDTH && on {
                bitmap[row_y * CELL_WIDTH + col_x] = 1;
            }
        }
    }

    Some(bitmap)
}

/// Scale a bitmap from src dimensions to dst dimensions using nearest neighbor.
fn scale_bitmap(
    src: &[u8],
    src_w: usize,
    src_h: usize,
    dst: &mut [u8],
    dst_w: usize,
    dst_h: usize,
) {
    for dy in 0..dst_h {
        for dx in 0..dst_w {
            let sx = dx * src_w / dst_w;
            let sy = dy * src_h / dst_h;
            let src_idx = sy * src_w + sx;
            let dst_idx = dy * dst_w + dx;
            if src_idx < src.len() && dst_idx < dst.len() {
                dst[dst_idx] = src[src_idx];
            }
        }
    }
}
