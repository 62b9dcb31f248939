//! Greedy word wrapping under pixel metrics.
//!
//! Words are separated by single spaces and appended to the current line
//! while the line still fits. A word that does not fit on an empty line
//! either is broken between characters (no hyphen) so no line exceeds the
//! width.

use super::{Align, StyleTag, StyledLine};
use crate::font::GlyphChain;

/// A laid-out line ready for drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedLine {
    pub text: String,
    pub style: StyleTag,
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub align: Align,
}

impl WrappedLine {
    fn measured(text: String, style: StyleTag, chain: &GlyphChain<'_>) -> Self {
        Self {
            pixel_width: chain.measure(&text),
            pixel_height: chain.line_height(),
            text,
            style,
            align: Align::Left,
        }
    }

    pub fn aligned(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Wrap one styled line to `content_width` pixels.
///
/// A blank line yields exactly one empty wrapped line.
pub fn wrap_line(line: &StyledLine, chain: &GlyphChain<'_>, content_width: u32) -> Vec<WrappedLine> {
    let style = line.style();

    if line.is_blank() {
        return vec![WrappedLine::measured(String::new(), style, chain)];
    }

    let mut out = Vec::new();
    let mut current = String::new();
    let mut words_in_line = 0usize;

    for word in line.text().split(' ') {
        // Spaces at a wrap point do not carry over to the next line.
        if word.is_empty() && words_in_line == 0 && !out.is_empty() {
            continue;
        }

        let candidate = if words_in_line == 0 {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };

        if chain.measure(&candidate) <= content_width {
            current = candidate;
            words_in_line += 1;
            continue;
        }

        if words_in_line > 0 {
            out.push(WrappedLine::measured(std::mem::take(&mut current), style, chain));
            words_in_line = 0;
        }

        if word.is_empty() {
            continue;
        }

        let (pieces, rest) = break_word(word, chain, content_width);
        out.extend(pieces.into_iter().map(|p| WrappedLine::measured(p, style, chain)));
        current = rest;
        words_in_line = 1;
    }

    if words_in_line > 0 {
        out.push(WrappedLine::measured(current, style, chain));
    }

    out
}

/// Split a word wider than `width` into full-width pieces plus the tail
/// that starts the next line. A word that fits comes back whole as the tail.
fn break_word(word: &str, chain: &GlyphChain<'_>, width: u32) -> (Vec<String>, String) {
    let mut pieces = Vec::new();
    let mut piece = String::new();

    for ch in word.chars() {
        piece.push(ch);
        if chain.measure(&piece) > width && piece.chars().count() > 1 {
            piece.pop();
            pieces.push(std::mem::take(&mut piece));
            piece.push(ch);
        }
    }

    (pieces, piece)
}

/// Wrap by character count, never breaking words.
///
/// Used when the receipt leaves no pixel width for text.
pub fn wrap_columns(text: &str, columns: usize) -> Vec<String> {
    let columns = columns.max(1);
    let mut out = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= columns {
            current.push(' ');
            current.push_str(word);
        } else {
            out.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() || out.is_empty() {
        out.push(current);
    }

    out
}

/// [`wrap_columns`] as wrapped lines with their measured size.
pub fn wrap_line_by_columns(
    line: &StyledLine,
    chain: &GlyphChain<'_>,
    columns: usize,
) -> Vec<WrappedLine> {
    wrap_columns(line.text(), columns)
        .into_iter()
        .map(|text| WrappedLine::measured(text, line.style(), chain))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use crate::font::FontResolver;
    use pretty_assertions::assert_eq;

    fn resolver() -> FontResolver {
        FontResolver::builtin(&RenderConfig::default())
    }

    fn texts(lines: &[WrappedLine]) -> Vec<&str> {
        lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_fits_on_one_line() {
        let fonts = resolver();
        let chain = fonts.chain(StyleTag::Plain);
        let lines = wrap_line(&StyledLine::plain("Hello world"), &chain, 472);

        assert_eq!(
            lines,
            vec![WrappedLine {
                text: "Hello world".into(),
                style: StyleTag::Plain,
                pixel_width: 132,
                pixel_height: 30,
                align: Align::Left,
            }]
        );
    }

    #[test]
    fn test_greedy_wrap() {
        let fonts = resolver();
        let chain = fonts.chain(StyleTag::Plain);
        // 12px per char, 120px = 10 chars
        let lines = wrap_line(&StyledLine::plain("the quick brown fox jumps"), &chain, 120);

        assert_eq!(texts(&lines), vec!["the quick", "brown fox", "jumps"]);
        assert!(lines.iter().all(|l| l.pixel_width <= 120));
    }

    #[test]
    fn test_blank_line_yields_one_empty_line() {
        let fonts = resolver();
        let chain = fonts.chain(StyleTag::Plain);
        let lines = wrap_line(&StyledLine::blank(), &chain, 100);

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "");
        assert_eq!(lines[0].pixel_width, 0);
        assert_eq!(lines[0].pixel_height, 30);
    }

    #[test]
    fn test_long_word_broken_to_fit() {
        let fonts = resolver();
        let chain = fonts.chain(StyleTag::Plain);
        let lines = wrap_line(&StyledLine::plain("go abcdefghijkl now"), &chain, 60);

        assert_eq!(texts(&lines), vec!["go", "abcde", "fghij", "kl", "now"]);
        assert!(lines.iter().all(|l| l.pixel_width <= 60));
    }

    #[test]
    fn test_header_lines_are_taller() {
        let fonts = resolver();
        let header = wrap_line(
            &StyledLine::new("Title", StyleTag::Header1),
            &fonts.chain(StyleTag::Header1),
            472,
        );
        assert_eq!(header[0].pixel_height, 43 + 6);
        assert_eq!(header[0].pixel_width, 5 * 22);
    }

    #[test]
    fn test_double_space_at_wrap_point() {
        let fonts = resolver();
        let chain = fonts.chain(StyleTag::Plain);
        let lines = wrap_line(&StyledLine::plain("aaaaa  bbb"), &chain, 60);
        assert_eq!(texts(&lines), vec!["aaaaa", "bbb"]);

        let lines = wrap_line(&StyledLine::plain("aaaaa     bbb"), &chain, 60);
        assert_eq!(texts(&lines), vec!["aaaaa", "bbb"]);
    }

    #[test]
    fn test_table_spacing_preserved() {
        let fonts = resolver();
        let chain = fonts.chain(StyleTag::Plain);
        let lines = wrap_line(&StyledLine::plain("a  |b  "), &chain, 472);
        assert_eq!(texts(&lines), vec!["a  |b  "]);
    }

    #[test]
    fn test_width_invariant_over_many_widths() {
        let fonts = resolver();
        let chain = fonts.chain(StyleTag::Plain);
        let text = StyledLine::plain(
            "Thermal receipts are narrow, so every sentence gets wrapped supercalifragilistic",
        );
        for width in [12, 30, 60, 97, 150, 472] {
            for line in wrap_line(&text, &chain, width) {
                assert!(line.pixel_width <= width, "{:?} wider than {}", line, width);
            }
        }
    }

    #[test]
    fn test_wrap_columns() {
        assert_eq!(
            wrap_columns("one two three four", 9),
            vec!["one two", "three", "four"]
        );
        assert_eq!(wrap_columns("unbreakableword x", 4), vec!["unbreakableword", "x"]);
        assert_eq!(wrap_columns("", 10), vec![""]);
    }
}
