//! # Receipt Builder
//!
//! Top-level entry point: text (optionally markdown) plus an optional QR
//! payload in, one finished [`Canvas`] out.
//!
//! ```text
//! text ──► layout ──► wrap ──► compose ──► text canvas ─┐
//!                                                       ├──► stack ──► Canvas
//! qr payload ──────────────────────► generate_qr ───────┘
//! ```
//!
//! Task cards are a second, fixed layout: a large left-aligned header with
//! the task kind, then the task text centered across the full receipt width.
//!
//! A renderer holds only its configuration and a shared, read-only
//! [`FontResolver`]; `build` has no other state, so one renderer can serve
//! many threads at once.
//!
//! ## Example
//!
//! ```
//! use kvittering::{ReceiptRenderer, RenderConfig};
//!
//! let renderer = ReceiptRenderer::new(RenderConfig::default().builtin_fonts());
//! let canvas = renderer.build("# Thanks!\nSee you soon", true, None)?;
//! assert!(canvas.width() <= 512);
//! # Ok::<(), kvittering::KvitteringError>(())
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

use crate::config::RenderConfig;
use crate::error::KvitteringError;
use crate::font::FontResolver;
use crate::layout::wrap::wrap_line_by_columns;
use crate::layout::{
    Align, LayoutDocument, StyleTag, StyledLine, WrappedLine, normalize_markdown, parse_markdown,
    wrap_line,
};
use crate::render::{Canvas, QrBitmap, QrSpec, compose, compose_full_width, generate_qr};

/// Kind of task printed on a task card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Idea,
    Urgent,
    Todo,
    Archive,
}

impl TaskKind {
    pub const ALL: [TaskKind; 4] = [
        TaskKind::Idea,
        TaskKind::Urgent,
        TaskKind::Todo,
        TaskKind::Archive,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TaskKind::Idea => "Idea",
            TaskKind::Urgent => "Urgent",
            TaskKind::Todo => "Todo",
            TaskKind::Archive => "Archive",
        }
    }

    /// Symbol printed before the label when a font can draw it.
    pub fn emoji(self) -> char {
        match self {
            TaskKind::Idea => '\u{203C}',
            TaskKind::Urgent => '\u{1F9E8}',
            TaskKind::Todo => '\u{1F4CB}',
            TaskKind::Archive => '\u{1F4BE}',
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TaskKind {
    type Err = KvitteringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskKind::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                KvitteringError::Config(format!(
                    "unknown task kind '{}' (expected idea, urgent, todo or archive)",
                    s
                ))
            })
    }
}

/// Renders receipts for one configuration.
#[derive(Debug, Clone)]
pub struct ReceiptRenderer {
    config: RenderConfig,
    fonts: Arc<FontResolver>,
}

impl ReceiptRenderer {
    /// Renderer with fonts loaded from the config's candidate lists.
    pub fn new(config: RenderConfig) -> Self {
        let fonts = Arc::new(FontResolver::load(&config));
        Self { config, fonts }
    }

    /// Renderer sharing an already loaded resolver.
    pub fn with_fonts(config: RenderConfig, fonts: Arc<FontResolver>) -> Self {
        Self { config, fonts }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn fonts(&self) -> &Arc<FontResolver> {
        &self.fonts
    }

    /// Styled lines for `text`.
    pub fn layout(&self, text: &str, is_markdown: bool) -> LayoutDocument {
        if !is_markdown {
            return LayoutDocument::plain_text(text);
        }
        if self.config.normalize_markdown {
            return parse_markdown(&normalize_markdown(text));
        }
        parse_markdown(text)
    }

    /// Wrap every line of `doc` to the content width.
    pub fn wrap(&self, doc: &LayoutDocument) -> Vec<WrappedLine> {
        let content_width = self.config.content_width();
        if content_width.is_none() {
            debug!(
                columns = self.config.wrap_columns,
                "no pixel width left for text, wrapping by columns"
            );
        }

        doc.iter()
            .flat_map(|line| {
                let chain = self.fonts.chain(line.style());
                match content_width {
                    Some(width) => wrap_line(line, &chain, width),
                    None => wrap_line_by_columns(line, &chain, self.config.wrap_columns),
                }
            })
            .collect()
    }

    /// Text-only canvas.
    pub fn render_text(&self, text: &str, is_markdown: bool) -> Canvas {
        let doc = self.layout(text, is_markdown);
        let lines = self.wrap(&doc);
        debug!(
            styled = doc.len(),
            wrapped = lines.len(),
            "text laid out"
        );
        compose(&lines, &self.fonts, self.config.padding, self.config.max_width)
    }

    /// QR bitmap sized for this receipt.
    pub fn render_qr(&self, payload: &str) -> Result<QrBitmap, KvitteringError> {
        let spec = QrSpec::new(payload, self.config.max_width, self.config.qr.border_modules)
            .max_version(self.config.qr.max_version);
        generate_qr(&spec)
    }

    /// Render `text` and, if given, a QR code below it.
    ///
    /// An empty QR payload counts as none.
    pub fn build(
        &self,
        text: &str,
        is_markdown: bool,
        qr_payload: Option<&str>,
    ) -> Result<Canvas, KvitteringError> {
        let text_canvas = self.render_text(text, is_markdown);

        let Some(payload) = qr_payload.filter(|p| !p.is_empty()) else {
            return Ok(text_canvas);
        };

        let qr = self.render_qr(payload)?;
        Ok(stack(&text_canvas, &qr, self.config.padding))
    }

    /// Header line for a task card: emoji and label, or the label alone
    /// when no font in the Header1 chain draws the emoji.
    pub fn task_header(&self, kind: TaskKind) -> String {
        if self.fonts.chain(StyleTag::Header1).can_render(kind.emoji()) {
            format!("{} {}", kind.emoji(), kind.label())
        } else {
            kind.label().to_string()
        }
    }

    /// Task card spanning the full receipt width.
    pub fn build_task(&self, task: &str, kind: TaskKind) -> Canvas {
        let mut doc = LayoutDocument::new();
        doc.push(StyledLine::new(self.task_header(kind), StyleTag::Header1));
        let mut lines = self.wrap(&doc);

        let body = self.wrap(&LayoutDocument::plain_text(task));
        lines.extend(body.into_iter().map(|line| line.aligned(Align::Center)));

        debug!(kind = %kind, lines = lines.len(), "task card laid out");
        compose_full_width(&lines, &self.fonts, self.config.padding, self.config.max_width)
    }
}

/// Text on top, QR below after a `gap`, each centered horizontally.
fn stack(text: &Canvas, qr: &QrBitmap, gap: u32) -> Canvas {
    let width = text.width().max(qr.width());
    let height = text.height() + gap + qr.height();
    let mut canvas = Canvas::blank(width, height);

    canvas.paste(text.as_image(), (width - text.width()) / 2, 0);
    canvas.paste(qr.as_image(), (width - qr.width()) / 2, text.height() + gap);
    canvas
}
