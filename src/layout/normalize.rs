//! CommonMark → receipt dialect.
//!
//! Full markdown documents (nested lists, paragraphs split over several
//! lines, inline HTML) are flattened into the line-oriented dialect that
//! [`parse_markdown`](super::parse_markdown) understands:
//!
//! | CommonMark | Receipt dialect |
//! |------------|-----------------|
//! | `# Heading` (any level) | `=== Heading ===` |
//! | `**strong**` | `**strong**` |
//! | `*emphasis*` | `*emphasis*` |
//! | `` `code` `` | `` `code` `` |
//! | list item | `• item` |
//! | HTML | dropped |
//!
//! Runs of blank lines collapse to one and the result is trimmed.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};

use super::markdown::BULLET;

/// Flatten CommonMark into receipt markdown.
pub fn normalize_markdown(markdown: &str) -> String {
    let mut state = NormalizeState::default();

    for event in Parser::new(markdown) {
        match event {
            Event::Start(tag) => state.handle_start_tag(tag),
            Event::End(tag_end) => state.handle_end_tag(tag_end),
            Event::Text(text) => state.out.push_str(&text),
            Event::Code(code) => {
                state.out.push('`');
                state.out.push_str(&code);
                state.out.push('`');
            }
            Event::SoftBreak | Event::HardBreak => state.out.push('\n'),
            Event::Rule => state.end_block(),
            _ => {} // HTML, footnotes, task markers
        }
    }

    collapse_blank_lines(&state.out)
}

#[derive(Default)]
struct NormalizeState {
    out: String,
    list_depth: usize,
}

impl NormalizeState {
    fn handle_start_tag(&mut self, tag: Tag) {
        match tag {
            Tag::Heading { .. } => {
                self.start_line();
                self.out.push_str("=== ");
            }
            Tag::Strong => self.out.push_str("**"),
            Tag::Emphasis => self.out.push('*'),
            Tag::List(_) => self.list_depth += 1,
            Tag::Item => {
                self.start_line();
                self.out.push(BULLET);
                self.out.push(' ');
            }
            Tag::CodeBlock(_) => self.start_line(),
            _ => {}
        }
    }

    fn handle_end_tag(&mut self, tag_end: TagEnd) {
        match tag_end {
            TagEnd::Heading(_) => {
                self.out.push_str(" ===");
                self.end_block();
            }
            TagEnd::Strong => self.out.push_str("**"),
            TagEnd::Emphasis => self.out.push('*'),
            TagEnd::Paragraph => {
                if self.list_depth > 0 {
                    self.start_line();
                } else {
                    self.end_block();
                }
            }
            TagEnd::Item => self.start_line(),
            TagEnd::List(_) => {
                self.list_depth = self.list_depth.saturating_sub(1);
                if self.list_depth == 0 {
                    self.end_block();
                }
            }
            TagEnd::CodeBlock => self.end_block(),
            _ => {}
        }
    }

    /// Make sure the next text starts on a fresh line.
    fn start_line(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
    }

    /// Finish the block with one blank line.
    fn end_block(&mut self) {
        self.start_line();
        self.out.push('\n');
    }
}

fn collapse_blank_lines(text: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    for line in text.lines().map(str::trim_end) {
        if line.is_empty() && lines.last().is_none_or(|prev| prev.is_empty()) {
            continue;
        }
        lines.push(line);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}
