//! # Layout Model
//!
//! Text is turned into an ordered list of style-tagged lines before any
//! pixels are touched.
//!
//! ```text
//! text ──► markdown::parse_markdown ──► LayoutDocument ──► wrap::wrap_line ──► Vec<WrappedLine>
//!               │                                              ▲
//!               └── table::format_table (pipe blocks)          └── font::GlyphChain metrics
//! ```
//!
//! ## Modules
//!
//! - [`markdown`]: line classifier for the receipt markdown dialect
//! - [`normalize`]: optional CommonMark → receipt dialect pass
//! - [`table`]: pipe table formatting
//! - [`wrap`]: greedy pixel-width word wrapping

pub mod markdown;
pub mod normalize;
pub mod table;
pub mod wrap;

pub use markdown::parse_markdown;
pub use normalize::normalize_markdown;
pub use table::format_table;
pub use wrap::{WrappedLine, wrap_line};

/// Rendering style of one line. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleTag {
    Plain,
    Bold,
    Header1,
    Header2,
    Header3,
    ListItem,
}

impl StyleTag {
    pub const COUNT: usize = 6;

    /// Every style, in declaration order.
    pub const ALL: [StyleTag; Self::COUNT] = [
        StyleTag::Plain,
        StyleTag::Bold,
        StyleTag::Header1,
        StyleTag::Header2,
        StyleTag::Header3,
        StyleTag::ListItem,
    ];

    /// Font size relative to the base size.
    pub fn size_multiplier(self) -> f32 {
        match self {
            StyleTag::Header1 => 1.8,
            StyleTag::Header2 => 1.5,
            StyleTag::Header3 => 1.2,
            StyleTag::Plain | StyleTag::Bold | StyleTag::ListItem => 1.0,
        }
    }

    pub fn is_header(self) -> bool {
        matches!(
            self,
            StyleTag::Header1 | StyleTag::Header2 | StyleTag::Header3
        )
    }

    /// Whether the style draws from the bold font family.
    pub fn uses_bold_family(self) -> bool {
        self == StyleTag::Bold || self.is_header()
    }

    /// Position in [`StyleTag::ALL`].
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Horizontal placement of a line inside the content area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    /// Offset from the left content edge for a line leaving `spare` pixels.
    pub fn offset(self, spare: u32) -> u32 {
        match self {
            Align::Left => 0,
            Align::Center => spare / 2,
            Align::Right => spare,
        }
    }
}

/// A unit of text tagged with its style. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledLine {
    text: String,
    style: StyleTag,
}

impl StyledLine {
    pub fn new(text: impl Into<String>, style: StyleTag) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, StyleTag::Plain)
    }

    /// Empty Plain line, kept for vertical spacing.
    pub fn blank() -> Self {
        Self::plain(String::new())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> StyleTag {
        self.style
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Ordered styled lines; insertion order is rendering order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutDocument {
    lines: Vec<StyledLine>,
}

impl LayoutDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// One Plain line per input line, no markup interpretation.
    pub fn plain_text(text: &str) -> Self {
        text.lines().map(StyledLine::plain).collect()
    }

    pub fn push(&mut self, line: StyledLine) {
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[StyledLine] {
        &self.lines
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StyledLine> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Extend<StyledLine> for LayoutDocument {
    fn extend<I: IntoIterator<Item = StyledLine>>(&mut self, iter: I) {
        self.lines.extend(iter);
    }
}

impl FromIterator<StyledLine> for LayoutDocument {
    fn from_iter<I: IntoIterator<Item = StyledLine>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a LayoutDocument {
    type Item = &'a StyledLine;
    type IntoIter = std::slice::Iter<'a, StyledLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
