//! # Render Configuration
//!
//! Receipt geometry, font sizing and font sources for the renderer.
//!
//! ## Defaults
//!
//! | Field | Default | Meaning |
//! |-------|---------|---------|
//! | `max_width` | 512 | Printer head width in dots |
//! | `font_size` | 24 | Base pixel size for Plain text |
//! | `line_spacing` | 6 | Extra pixels below every line |
//! | `padding` | 20 | Margin on every side of the text canvas |
//! | `wrap_columns` | 35 | Character budget when pixel wrapping is impossible |
//!
//! ## Usage
//!
//! ```
//! use kvittering::config::RenderConfig;
//!
//! let config = RenderConfig::from_json_str(r#"{ "max_width": 384 }"#).unwrap();
//! assert_eq!(config.max_width, 384);
//! assert_eq!(config.font_size, 24);
//! assert_eq!(config.content_width(), Some(344));
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::KvitteringError;
use crate::layout::StyleTag;
use crate::render::qr::MAX_BORDER_MODULES;

pub const DEFAULT_MAX_WIDTH: u32 = 512;
pub const DEFAULT_FONT_SIZE: u32 = 24;
pub const DEFAULT_LINE_SPACING: u32 = 6;
pub const DEFAULT_PADDING: u32 = 20;
pub const DEFAULT_WRAP_COLUMNS: usize = 35;

/// Quiet zone around a QR symbol, in modules.
pub const DEFAULT_QR_BORDER: u32 = 4;

/// Everything the renderer needs besides the content itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Maximum canvas width in pixels (printer head width)
    pub max_width: u32,

    /// Base font pixel size; headers scale from this
    pub font_size: u32,

    /// Pixels added below each line's glyph height
    pub line_spacing: u32,

    /// Margin on all sides of the text canvas, also the gap above a QR code
    pub padding: u32,

    /// Column budget used instead of pixel wrapping when the content width
    /// is zero (padding eats the whole receipt)
    pub wrap_columns: usize,

    /// Run CommonMark input through the receipt-dialect normalizer first
    pub normalize_markdown: bool,

    /// Candidate font files, tried in order
    pub fonts: FontCandidates,

    /// QR code settings
    pub qr: QrConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            font_size: DEFAULT_FONT_SIZE,
            line_spacing: DEFAULT_LINE_SPACING,
            padding: DEFAULT_PADDING,
            wrap_columns: DEFAULT_WRAP_COLUMNS,
            normalize_markdown: false,
            fonts: FontCandidates::default(),
            qr: QrConfig::default(),
        }
    }
}

impl RenderConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, KvitteringError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| KvitteringError::Config(format!("Invalid config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, KvitteringError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            KvitteringError::Config(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }

    /// Reject configurations the renderer cannot honor.
    pub fn validate(&self) -> Result<(), KvitteringError> {
        if self.max_width == 0 {
            return Err(KvitteringError::Config("max_width must be positive".into()));
        }
        if self.font_size == 0 {
            return Err(KvitteringError::Config("font_size must be positive".into()));
        }
        if self.wrap_columns == 0 {
            return Err(KvitteringError::Config(
                "wrap_columns must be positive".into(),
            ));
        }
        if self.qr.border_modules > MAX_BORDER_MODULES {
            return Err(KvitteringError::Config(format!(
                "qr.border_modules must be at most {}, got {}",
                MAX_BORDER_MODULES, self.qr.border_modules
            )));
        }
        if let Some(version) = self.qr.max_version {
            if !(1..=40).contains(&version) {
                return Err(KvitteringError::Config(format!(
                    "qr.max_version must be within 1..=40, got {}",
                    version
                )));
            }
        }
        Ok(())
    }

    /// Usable width for wrapped text: `max_width - 2 * padding`.
    ///
    /// `None` when the padding leaves no room at all.
    pub fn content_width(&self) -> Option<u32> {
        self.max_width
            .checked_sub(self.padding.saturating_mul(2))
            .filter(|&w| w > 0)
    }

    /// Pixel size a style renders at.
    pub fn pixel_size(&self, style: StyleTag) -> u32 {
        ((self.font_size as f32) * style.size_multiplier()).round() as u32
    }

    /// Same configuration with no font files, so only the built-in bitmap
    /// font is used. Metrics are then identical on every machine.
    pub fn builtin_fonts(mut self) -> Self {
        self.fonts = FontCandidates::none();
        self
    }
}

/// Ordered font file candidates per font family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontCandidates {
    /// Plain and list item text
    pub regular: Vec<PathBuf>,
    /// Bold and header text
    pub bold: Vec<PathBuf>,
    /// Symbol/emoji fallback for characters the primary font lacks
    pub symbol: Vec<PathBuf>,
}

impl Default for FontCandidates {
    fn default() -> Self {
        Self {
            regular: paths(&[
                "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
                "/usr/share/fonts/TTF/DejaVuSans.ttf",
                "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
                "/Library/Fonts/Arial Unicode.ttf",
            ]),
            bold: paths(&[
                "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
                "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
                "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
            ]),
            symbol: paths(&[
                "/usr/share/fonts/truetype/noto/NotoEmoji-Regular.ttf",
                "/usr/share/fonts/truetype/ancient-scripts/Symbola_hint.ttf",
                "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            ]),
        }
    }
}

impl FontCandidates {
    /// No candidates at all.
    pub fn none() -> Self {
        Self {
            regular: Vec::new(),
            bold: Vec::new(),
            symbol: Vec::new(),
        }
    }
}

fn paths(list: &[&str]) -> Vec<PathBuf> {
    list.iter().map(PathBuf::from).collect()
}

/// QR code settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QrConfig {
    /// Quiet zone in modules, at most [`MAX_BORDER_MODULES`]
    pub border_modules: u32,

    /// Largest QR version a payload may need. `None` allows up to 40.
    pub max_version: Option<i16>,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            border_modules: DEFAULT_QR_BORDER,
            max_version: None,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.max_width, 512);
        assert_eq!(config.font_size, 24);
        assert_eq!(config.line_spacing, 6);
        assert_eq!(config.padding, 20);
        assert_eq!(config.wrap_columns, 35);
        assert_eq!(config.qr.border_modules, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_content_width() {
        let config = RenderConfig::default();
        assert_eq!(config.content_width(), Some(472));

        let squeezed = RenderConfig {
            max_width: 40,
            ..Default::default()
        };
        assert_eq!(squeezed.content_width(), None);
    }

    #[test]
    fn test_pixel_sizes() {
        let config = RenderConfig::default();
        assert_eq!(config.pixel_size(StyleTag::Plain), 24);
        assert_eq!(config.pixel_size(StyleTag::Bold), 24);
        assert_eq!(config.pixel_size(StyleTag::ListItem), 24);
        assert_eq!(config.pixel_size(StyleTag::Header1), 43);
        assert_eq!(config.pixel_size(StyleTag::Header2), 36);
        assert_eq!(config.pixel_size(StyleTag::Header3), 29);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = RenderConfig::from_json_str(
            r#"{ "padding": 8, "fonts": { "regular": ["/tmp/a.ttf"] } }"#,
        )
        .unwrap();
        assert_eq!(config.padding, 8);
        assert_eq!(config.max_width, 512);
        assert_eq!(config.fonts.regular, vec![PathBuf::from("/tmp/a.ttf")]);
        assert!(config.fonts.bold.is_empty());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(RenderConfig::from_json_str(r#"{ "max_width": 0 }"#).is_err());
        assert!(RenderConfig::from_json_str(r#"{ "font_size": 0 }"#).is_err());
        assert!(RenderConfig::from_json_str(r#"{ "qr": { "max_version": 41 } }"#).is_err());
        assert!(RenderConfig::from_json_str("not json").is_err());
    }

    #[test]
    fn test_qr_border_bounded() {
        let err = RenderConfig::from_json_str(r#"{ "qr": { "border_modules": 3000000000 } }"#)
            .unwrap_err();
        assert!(matches!(err, KvitteringError::Config(_)));
        assert!(RenderConfig::from_json_str(r#"{ "qr": { "border_modules": 17 } }"#).is_err());

        let config = RenderConfig::from_json_str(r#"{ "qr": { "border_modules": 16 } }"#).unwrap();
        assert_eq!(config.qr.border_modules, 16);
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "max_width": 576, "normalize_markdown": true }}"#).unwrap();

        let config = RenderConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.max_width, 576);
        assert!(config.normalize_markdown);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = RenderConfig::from_json_file("/nonexistent/kvittering.json").unwrap_err();
        assert!(matches!(err, KvitteringError::Config(_)));
    }

    #[test]
    fn test_builtin_fonts_clears_candidates() {
        let config = RenderConfig::default().builtin_fonts();
        assert_eq!(config.fonts, FontCandidates::none());
    }
}
