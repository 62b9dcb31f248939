//! QR code bitmaps sized to the receipt.
//!
//! The smallest QR version that holds the payload at error correction level
//! M is used. Each module is drawn as a square box, as large as fits:
//!
//! ```text
//! box = max(1, (max_width - 2·border) / modules)
//! side = (modules + 2·border) · box
//! ```
//!
//! The quiet zone can push `side` past `max_width`; the bitmap is then
//! scaled down to `max_width` and thresholded back to pure black and white.

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma};
use qrcode::{Color, EcLevel, QrCode, Version};
use tracing::debug;

use super::canvas::{DARK, LIGHT};
use crate::error::KvitteringError;

/// Widest quiet zone accepted, in modules.
pub const MAX_BORDER_MODULES: u32 = 16;

/// What to encode and how large it may get.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrSpec {
    pub payload: String,
    pub target_max_width: u32,
    pub border_modules: u32,
    /// Largest QR version allowed, `None` for no bound beyond 40.
    pub max_version: Option<i16>,
}

impl QrSpec {
    pub fn new(payload: impl Into<String>, target_max_width: u32, border_modules: u32) -> Self {
        Self {
            payload: payload.into(),
            target_max_width,
            border_modules,
            max_version: None,
        }
    }

    pub fn max_version(mut self, version: Option<i16>) -> Self {
        self.max_version = version;
        self
    }
}

/// A rendered QR code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrBitmap {
    /// Modules per side, quiet zone excluded
    pub module_count: u32,
    /// Pixels per module before any downscale
    pub box_size: u32,
    image: GrayImage,
}

impl QrBitmap {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn as_image(&self) -> &GrayImage {
        &self.image
    }
}

/// Encode and draw a QR code no wider than `spec.target_max_width`.
pub fn generate_qr(spec: &QrSpec) -> Result<QrBitmap, KvitteringError> {
    if spec.target_max_width == 0 {
        return Err(KvitteringError::Config(
            "QR target width must be positive".into(),
        ));
    }
    if spec.border_modules > MAX_BORDER_MODULES {
        return Err(KvitteringError::Config(format!(
            "QR border of {} modules exceeds {}",
            spec.border_modules, MAX_BORDER_MODULES
        )));
    }

    let code = QrCode::with_error_correction_level(spec.payload.as_bytes(), EcLevel::M)
        .map_err(|e| KvitteringError::Qr(format!("QR code generation failed: {}", e)))?;

    if let (Some(max), Version::Normal(version)) = (spec.max_version, code.version()) {
        if version > max {
            return Err(KvitteringError::QrCapacity { version, max });
        }
    }

    let module_count = code.width() as u32;
    let border = spec.border_modules;
    let available = spec.target_max_width.saturating_sub(border * 2);
    let box_size = (available / module_count).max(1);

    let side = (module_count + border * 2)
        .checked_mul(box_size)
        .ok_or_else(|| KvitteringError::Config("QR bitmap too large".into()))?;
    let mut image = draw_modules(&code.to_colors(), module_count, border, box_size, side);

    if image.width() > spec.target_max_width {
        debug!(
            from = image.width(),
            to = spec.target_max_width,
            "scaling QR code down to fit"
        );
        image = shrink_to_width(&image, spec.target_max_width);
    }

    Ok(QrBitmap {
        module_count,
        box_size,
        image,
    })
}

/// Draw the module grid with a light quiet zone of `border` modules.
fn draw_modules(
    colors: &[Color],
    module_count: u32,
    border: u32,
    box_size: u32,
    side: u32,
) -> GrayImage {
    let mut image = GrayImage::from_pixel(side, side, Luma([LIGHT]));

    for (i, color) in colors.iter().enumerate() {
        if *color != Color::Dark {
            continue;
        }
        let qx = i as u32 % module_count + border;
        let qy = i as u32 / module_count + border;
        for cy in 0..box_size {
            for cx in 0..box_size {
                image.put_pixel(qx * box_size + cx, qy * box_size + cy, Luma([DARK]));
            }
        }
    }

    image
}

/// Uniform downscale to `width`, back to pure black and white.
fn shrink_to_width(image: &GrayImage, width: u32) -> GrayImage {
    let ratio = width as f64 / image.width() as f64;
    let height = ((image.height() as f64 * ratio) as u32).max(1);
    let mut scaled = imageops::resize(image, width, height, FilterType::Lanczos3);

    for pixel in scaled.pixels_mut() {
        pixel.0[0] = if pixel.0[0] < 128 { DARK } else { LIGHT };
    }
    scaled
}
