//! # Font Resolution
//!
//! Maps every [`StyleTag`] to a usable font, once, at construction.
//!
//! ## Fallback chain
//!
//! ```text
//! style ──► candidate files (regular | bold) ──first that parses──► Outline font
//!                 │ none load
//!                 ▼
//!           Plain's source at the style's size ──► built-in Spleen bitmap font
//!
//! char  ──► primary font ──can't render──► symbol font ──can't render──► '?'
//! ```
//!
//! Resolution never fails. Missing or corrupt font files are logged and
//! skipped.
//!
//! ## Sharing
//!
//! A resolver is read-only after construction and can be shared between
//! threads behind an [`Arc`]. [`FontResolver::global`] keeps one built from
//! the default configuration for the whole process.

mod asset;
pub mod builtin;

pub use asset::{FontAsset, FontSource};

use ab_glyph::FontArc;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tracing::{debug, info, warn};

use crate::config::RenderConfig;
use crate::error::KvitteringError;
use crate::layout::StyleTag;

/// Drawn when neither the primary nor the symbol font has a glyph.
pub const REPLACEMENT_CHAR: char = '?';

static GLOBAL_RESOLVER: OnceLock<Arc<FontResolver>> = OnceLock::new();

/// Fixed style → font table plus the symbol fallback.
#[derive(Debug)]
pub struct FontResolver {
    assets: [FontAsset; StyleTag::COUNT],
    symbol: FontSource,
    line_spacing: u32,
}

impl FontResolver {
    /// Load fonts for every style from the config's candidate lists.
    pub fn load(config: &RenderConfig) -> Self {
        let regular = load_first(&config.fonts.regular);
        let bold = load_first(&config.fonts.bold);
        let symbol = load_first(&config.fonts.symbol).unwrap_or(FontSource::Builtin);

        let plain = match regular {
            Some(source) => source,
            None => {
                warn!("no regular font could be loaded, using built-in bitmap font");
                FontSource::Builtin
            }
        };
        if bold.is_none() && !config.fonts.bold.is_empty() {
            warn!("no bold font could be loaded, bold and headers use the regular font");
        }

        let assets = StyleTag::ALL.map(|style| {
            let source = match (&bold, style.uses_bold_family()) {
                (Some(bold), true) => bold.clone(),
                _ => plain.clone(),
            };
            FontAsset::new(style, config.pixel_size(style), source)
        });

        let resolver = Self {
            assets,
            symbol,
            line_spacing: config.line_spacing,
        };
        debug_assert!(resolver.covers_all_styles());

        info!(
            regular = ?resolver.resolve(StyleTag::Plain).source(),
            bold = ?resolver.resolve(StyleTag::Bold).source(),
            symbol = ?resolver.symbol,
            "fonts resolved"
        );
        resolver
    }

    /// Resolver that only uses the built-in bitmap font.
    pub fn builtin(config: &RenderConfig) -> Self {
        Self::load(&config.clone().builtin_fonts())
    }

    /// Process-wide resolver for the default configuration, loaded on first use.
    pub fn global() -> Arc<FontResolver> {
        GLOBAL_RESOLVER
            .get_or_init(|| Arc::new(FontResolver::load(&RenderConfig::default())))
            .clone()
    }

    /// Font for a style. Total: every style has one.
    pub fn resolve(&self, style: StyleTag) -> &FontAsset {
        &self.assets[style.index()]
    }

    /// Symbol fallback font at the given style's size.
    pub fn symbol_for(&self, style: StyleTag) -> FontAsset {
        FontAsset::new(
            style,
            self.resolve(style).pixel_size(),
            self.symbol.clone(),
        )
    }

    /// Primary and symbol fonts for a style, with per-character fallback.
    pub fn chain(&self, style: StyleTag) -> GlyphChain<'_> {
        GlyphChain {
            primary: self.resolve(style),
            symbol: self.symbol_for(style),
            line_spacing: self.line_spacing,
        }
    }

    fn covers_all_styles(&self) -> bool {
        StyleTag::ALL
            .iter()
            .all(|&style| self.resolve(style).style() == style)
    }
}

/// First candidate that reads and parses as a font.
fn load_first(candidates: &[PathBuf]) -> Option<FontSource> {
    candidates.iter().find_map(|path| match load_outline(path) {
        Ok(font) => {
            debug!(path = %path.display(), "loaded font");
            Some(FontSource::Outline {
                font,
                path: path.clone(),
            })
        }
        Err(e) => {
            debug!(path = %path.display(), error = %e, "skipping font candidate");
            None
        }
    })
}

fn load_outline(path: &Path) -> Result<FontArc, KvitteringError> {
    let bytes = std::fs::read(path)?;
    FontArc::try_from_vec(bytes)
        .map_err(|e| KvitteringError::Font(format!("{}: {}", path.display(), e)))
}

/// Fonts used to lay out and draw one style's text.
#[derive(Debug, Clone)]
pub struct GlyphChain<'a> {
    primary: &'a FontAsset,
    symbol: FontAsset,
    line_spacing: u32,
}

impl GlyphChain<'_> {
    pub fn primary(&self) -> &FontAsset {
        self.primary
    }

    /// Font and character to draw for `ch`.
    pub fn pick(&self, ch: char) -> (&FontAsset, char) {
        if self.primary.can_render(ch) {
            (self.primary, ch)
        } else if self.symbol.can_render(ch) {
            (&self.symbol, ch)
        } else {
            (self.primary, REPLACEMENT_CHAR)
        }
    }

    /// Whether `ch` is drawn as itself rather than as the replacement.
    pub fn can_render(&self, ch: char) -> bool {
        self.primary.can_render(ch) || self.symbol.can_render(ch)
    }

    /// Rendered width of `text` in pixels.
    pub fn measure(&self, text: &str) -> u32 {
        let width: f32 = text
            .chars()
            .map(|ch| {
                let (font, glyph) = self.pick(ch);
                font.advance(glyph)
            })
            .sum();
        width.ceil().max(0.0) as u32
    }

    /// Glyph height plus line spacing.
    pub fn line_height(&self) -> u32 {
        self.primary.glyph_height() + self.line_spacing
    }
}
