//! The output bitmap and its handoff formats.
//!
//! A [`Canvas`] is an 8-bit grayscale image holding only [`LIGHT`] and
//! [`DARK`] pixels. It can only be drawn on inside the crate; callers get a
//! finished, read-only value.

use image::codecs::png::PngEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, ImageEncoder, Luma};
use std::path::Path;

use crate::error::KvitteringError;

/// Background (paper).
pub const LIGHT: u8 = 255;
/// Ink.
pub const DARK: u8 = 0;

/// Pixels darker than this count as ink when packing to 1-bit.
const INK_THRESHOLD: u8 = 128;

/// A finished receipt bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    image: GrayImage,
}

impl Canvas {
    /// All-light canvas.
    pub(crate) fn blank(width: u32, height: u32) -> Self {
        Self {
            image: GrayImage::from_pixel(width, height, Luma([LIGHT])),
        }
    }

    pub(crate) fn from_image(image: GrayImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Row-major luma bytes.
    pub fn pixels(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn as_image(&self) -> &GrayImage {
        &self.image
    }

    pub fn into_image(self) -> GrayImage {
        self.image
    }

    pub fn is_dark(&self, x: u32, y: u32) -> bool {
        self.image
            .get_pixel_checked(x, y)
            .is_some_and(|p| p.0[0] < INK_THRESHOLD)
    }

    pub fn dark_pixel_count(&self) -> usize {
        self.pixels().iter().filter(|&&p| p < INK_THRESHOLD).count()
    }

    /// Ink one pixel; coordinates outside the canvas are ignored.
    pub(crate) fn set_dark(&mut self, x: i64, y: i64) {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return;
        }
        self.image.put_pixel(x as u32, y as u32, Luma([DARK]));
    }

    /// Copy `source` with its top-left corner at (`x`, `y`), clipped.
    pub(crate) fn paste(&mut self, source: &GrayImage, x: u32, y: u32) {
        imageops::replace(&mut self.image, source, x as i64, y as i64);
    }

    /// Pack into 1-bit rows for the printer transport.
    pub fn to_raster(&self) -> RasterBits {
        let width = self.width() as usize;
        let height = self.height() as usize;
        let width_bytes = width.div_ceil(8);
        let mut data = vec![0u8; width_bytes * height];

        for (x, y, pixel) in self.image.enumerate_pixels() {
            if pixel.0[0] < INK_THRESHOLD {
                let (x, y) = (x as usize, y as usize);
                let byte_idx = y * width_bytes + x / 8;
                let bit_idx = 7 - (x % 8);
                data[byte_idx] |= 1 << bit_idx;
            }
        }

        RasterBits {
            width,
            height,
            data,
        }
    }

    /// Encode as an 8-bit grayscale PNG.
    pub fn to_png(&self) -> Result<Vec<u8>, KvitteringError> {
        let mut png_bytes = Vec::new();
        let encoder = PngEncoder::new(&mut png_bytes);
        encoder
            .write_image(
                self.image.as_raw(),
                self.width(),
                self.height(),
                image::ExtendedColorType::L8,
            )
            .map_err(|e| KvitteringError::Image(format!("PNG encoding failed: {}", e)))?;
        Ok(png_bytes)
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), KvitteringError> {
        std::fs::write(path, self.to_png()?)?;
        Ok(())
    }
}

/// 1-bit raster, MSB first, 1 = ink. Each row is padded to a whole byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBits {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl RasterBits {
    pub fn width_bytes(&self) -> usize {
        self.width.div_ceil(8)
    }

    pub fn is_set(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let byte = self.data[y * self.width_bytes() + x / 8];
        (byte >> (7 - (x % 8))) & 1 == 1
    }
}

/// Fit a photo to the receipt: grayscale, and shrunk to `max_width` when
/// wider, keeping the aspect ratio. Narrower images keep their size.
pub fn fit_image(image: &DynamicImage, max_width: u32) -> Canvas {
    let gray = image.to_luma8();
    if gray.width() <= max_width || max_width == 0 {
        return Canvas::from_image(gray);
    }

    let ratio = gray.height() as f64 / gray.width() as f64;
    let height = ((max_width as f64 * ratio) as u32).max(1);
    Canvas::from_image(imageops::resize(&gray, max_width, height, FilterType::Triangle))
}

/// Decode image bytes and [`fit_image`] them.
pub fn fit_image_bytes(bytes: &[u8], max_width: u32) -> Result<Canvas, KvitteringError> {
    let image = image::load_from_memory(bytes)
        .map_err(|e| KvitteringError::Image(format!("Cannot decode image: {}", e)))?;
    Ok(fit_image(&image, max_width))
}
