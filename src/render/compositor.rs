//! Draws wrapped lines onto a canvas.
//!
//! ## Layout
//!
//! ```text
//! ┌──────────────── min(widest + 2·padding, max_width) ───────────────┐
//! │ padding                                                          │
//! │        line 1 (height = glyph height + spacing)                  │
//! │        line 2                                                    │
//! │        ...                                                       │
//! │ padding                                                          │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each line sits at `x = padding`, shifted right by its [`Align`](crate::layout::Align) share of
//! the spare width between the line and the content edge.

use super::canvas::Canvas;
use crate::font::{FontResolver, GlyphChain};
use crate::layout::WrappedLine;

/// Size and draw `lines` into a new canvas.
pub fn compose(lines: &[WrappedLine], fonts: &FontResolver, padding: u32, max_width: u32) -> Canvas {
    let (width, height) = canvas_size(lines, padding, max_width);
    draw_lines(lines, fonts, padding, width, height)
}

/// Like [`compose`], but the canvas always spans `width`, so centered and
/// right-aligned lines line up with the receipt edges.
pub fn compose_full_width(
    lines: &[WrappedLine],
    fonts: &FontResolver,
    padding: u32,
    width: u32,
) -> Canvas {
    let (_, height) = canvas_size(lines, padding, width);
    draw_lines(lines, fonts, padding, width, height)
}

fn draw_lines(
    lines: &[WrappedLine],
    fonts: &FontResolver,
    padding: u32,
    width: u32,
    height: u32,
) -> Canvas {
    let mut canvas = Canvas::blank(width, height);
    let content_width = width.saturating_sub(padding.saturating_mul(2));

    let mut y = padding;
    for line in lines {
        if !line.is_blank() {
            let spare = content_width.saturating_sub(line.pixel_width);
            let x = padding + line.align.offset(spare);
            draw_line(&mut canvas, &fonts.chain(line.style), &line.text, x, y);
        }
        y += line.pixel_height;
    }

    canvas
}

/// Canvas dimensions for `lines`: widest line plus padding, capped at
/// `max_width`; summed line heights plus padding.
pub fn canvas_size(lines: &[WrappedLine], padding: u32, max_width: u32) -> (u32, u32) {
    let widest = lines.iter().map(|l| l.pixel_width).max().unwrap_or(0);
    let total_height: u32 = lines.iter().map(|l| l.pixel_height).sum();

    let width = widest.saturating_add(padding.saturating_mul(2)).min(max_width);
    let height = total_height.saturating_add(padding.saturating_mul(2));
    (width, height)
}

/// Draw one line with per-character font fallback.
fn draw_line(canvas: &mut Canvas, chain: &GlyphChain<'_>, text: &str, left: u32, top: u32) {
    let mut x = left as f32;
    for ch in text.chars() {
        let (font, glyph) = chain.pick(ch);
        font.draw_glyph(glyph, canvas, x, top);
        x += font.advance(glyph);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use crate::layout::{Align, StyleTag, StyledLine, wrap_line};

    fn fonts() -> FontResolver {
        FontResolver::builtin(&RenderConfig::default())
    }

    fn wrapped(fonts: &FontResolver, text: &str, style: StyleTag) -> Vec<WrappedLine> {
        wrap_line(&StyledLine::new(text, style), &fonts.chain(style), 472)
    }

    #[test]
    fn test_single_line_size() {
        let fonts = fonts();
        let lines = wrapped(&fonts, "Hello world", StyleTag::Plain);
        let canvas = compose(&lines, &fonts, 20, 512);

        assert_eq!(canvas.width(), 132 + 40);
        assert_eq!(canvas.height(), 30 + 40);
        assert!(canvas.dark_pixel_count() > 0);
    }

    #[test]
    fn test_padding_stays_light() {
        let fonts = fonts();
        let lines = wrapped(&fonts, "WWWW", StyleTag::Bold);
        let canvas = compose(&lines, &fonts, 20, 512);

        for (x, y, pixel) in canvas.as_image().enumerate_pixels() {
            if x < 20 || y < 20 || x >= canvas.width() - 20 || y >= canvas.height() - 20 {
                assert_eq!(pixel.0[0], crate::render::LIGHT, "ink at ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_width_capped() {
        let fonts = fonts();
        let line = WrappedLine {
            text: "x".repeat(100),
            style: StyleTag::Plain,
            pixel_width: 1200,
            pixel_height: 30,
            align: Align::Left,
        };
        let canvas = compose(&[line], &fonts, 20, 512);
        assert_eq!(canvas.width(), 512);
    }

    #[test]
    fn test_height_sums_lines() {
        let fonts = fonts();
        let mut lines = wrapped(&fonts, "Title", StyleTag::Header1);
        lines.extend(wrapped(&fonts, "", StyleTag::Plain));
        lines.extend(wrapped(&fonts, "Body", StyleTag::Plain));

        let (_, height) = canvas_size(&lines, 20, 512);
        assert_eq!(height, 49 + 30 + 30 + 40);
    }

    #[test]
    fn test_blank_lines_draw_nothing() {
        let fonts = fonts();
        let lines = wrapped(&fonts, "   ", StyleTag::Plain);
        let canvas = compose(&lines, &fonts, 20, 512);
        assert_eq!(canvas.dark_pixel_count(), 0);
        assert_eq!(canvas.height(), 70);
    }

    #[test]
    fn test_unsupported_char_drawn_as_replacement() {
        let fonts = fonts();
        let odd = compose(&wrapped(&fonts, "\u{F8FF}", StyleTag::Plain), &fonts, 0, 512);
        let question = compose(&wrapped(&fonts, "?", StyleTag::Plain), &fonts, 0, 512);
        assert_eq!(odd, question);
    }

    /// Leftmost dark column, if any.
    fn ink_left(canvas: &Canvas) -> Option<u32> {
        (0..canvas.width()).find(|&x| (0..canvas.height()).any(|y| canvas.is_dark(x, y)))
    }

    #[test]
    fn test_alignment_shifts_lines() {
        let fonts = fonts();
        let line = |align: Align| {
            wrapped(&fonts, "I", StyleTag::Plain)
                .into_iter()
                .map(|l| l.aligned(align))
                .collect::<Vec<_>>()
        };

        let left = compose_full_width(&line(Align::Left), &fonts, 20, 200);
        let center = compose_full_width(&line(Align::Center), &fonts, 20, 200);
        let right = compose_full_width(&line(Align::Right), &fonts, 20, 200);
        assert_eq!(left.width(), 200);

        // Content is 160 wide, the line 12: spare 148
        let base = ink_left(&left).unwrap();
        assert_eq!(ink_left(&center).unwrap(), base + 74);
        assert_eq!(ink_left(&right).unwrap(), base + 148);
        assert!(base >= 20);
    }

    #[test]
    fn test_alignment_moot_on_shrunk_canvas() {
        let fonts = fonts();
        let left = compose(&wrapped(&fonts, "Hello", StyleTag::Plain), &fonts, 20, 512);
        let centered: Vec<_> = wrapped(&fonts, "Hello", StyleTag::Plain)
            .into_iter()
            .map(|l| l.aligned(Align::Center))
            .collect();
        assert_eq!(compose(&centered, &fonts, 20, 512), left);
    }

    #[test]
    fn test_empty_document() {
        let canvas = compose(&[], &fonts(), 20, 512);
        assert_eq!((canvas.width(), canvas.height()), (40, 40));
    }
}
