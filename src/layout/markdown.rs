//! Receipt markdown dialect.
//!
//! Supports, one line at a time:
//! - Headers: `# `, `## `, `### ` (and `=== text ===` banners from the
//!   normalizer, read as level 2)
//! - Whole-line bold: `**text**`
//! - Bullets: `- `, `* `, `• ` rendered with a `•` prefix
//! - Ordered items: `1. text`, kept verbatim
//! - Pipe tables, handed to [`format_table`]
//!
//! Inline `*`/`**` markers inside an otherwise plain line are removed
//! without styling the span.
//!
//! # Example
//!
//! ```
//! use kvittering::layout::{parse_markdown, StyleTag};
//!
//! let doc = parse_markdown("# Title\nBody");
//! assert_eq!(doc.lines()[0].style(), StyleTag::Header1);
//! assert_eq!(doc.lines()[0].text(), "Title");
//! assert_eq!(doc.lines()[1].style(), StyleTag::Plain);
//! ```

use super::table::format_table;
use super::{LayoutDocument, StyleTag, StyledLine};

/// Glyph placed in front of list items.
pub const BULLET: char = '•';

/// Parse receipt markdown into styled lines.
pub fn parse_markdown(text: &str) -> LayoutDocument {
    let lines: Vec<&str> = text.lines().collect();
    let mut doc = LayoutDocument::new();
    let mut index = 0;

    while index < lines.len() {
        if opens_table(&lines, index) {
            let (rows, next) = format_table(&lines, index);
            doc.extend(rows);
            index = next;
            continue;
        }

        doc.push(classify_line(lines[index]));
        index += 1;
    }

    doc
}

/// A `|` line followed by another `|` line starts a table.
fn opens_table(lines: &[&str], index: usize) -> bool {
    lines[index].contains('|') && lines.get(index + 1).is_some_and(|next| next.contains('|'))
}

/// Style a single non-table line.
pub fn classify_line(line: &str) -> StyledLine {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return StyledLine::blank();
    }

    for (marker, style) in [
        ("### ", StyleTag::Header3),
        ("## ", StyleTag::Header2),
        ("# ", StyleTag::Header1),
    ] {
        if let Some(rest) = trimmed.strip_prefix(marker) {
            return StyledLine::new(strip_inline_markers(rest.trim()), style);
        }
    }

    if let Some(inner) = whole_line_bold(trimmed) {
        return StyledLine::new(strip_inline_markers(inner), StyleTag::Bold);
    }

    if let Some(inner) = banner(trimmed) {
        return StyledLine::new(strip_inline_markers(inner), StyleTag::Header2);
    }

    if let Some(rest) = list_item(trimmed) {
        return StyledLine::new(
            format!("{} {}", BULLET, strip_inline_markers(rest)),
            StyleTag::ListItem,
        );
    }

    if is_ordered_item(trimmed) {
        return StyledLine::plain(line.trim_end());
    }

    StyledLine::plain(strip_inline_markers(line.trim_end()))
}

/// `**text**` with no other bold markers inside.
fn whole_line_bold(line: &str) -> Option<&str> {
    let inner = line.strip_prefix("**")?.strip_suffix("**")?;
    let inner = inner.trim();
    (!inner.is_empty() && !inner.contains("**")).then_some(inner)
}

/// `=== text ===`
fn banner(line: &str) -> Option<&str> {
    let inner = line.strip_prefix("===")?.strip_suffix("===")?;
    let inner = inner.trim_matches('=').trim();
    (!inner.is_empty()).then_some(inner)
}

fn list_item(line: &str) -> Option<&str> {
    ["- ", "* ", "• "]
        .iter()
        .find_map(|marker| line.strip_prefix(marker))
        .map(str::trim)
}

/// `<digits>. ` at the start of the line.
fn is_ordered_item(line: &str) -> bool {
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    digits > 0 && line[digits..].starts_with(". ")
}

fn strip_inline_markers(text: &str) -> String {
    text.replace("**", "").replace('*', "")
}
