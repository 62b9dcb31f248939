//! # Rendering Module
//!
//! Turns wrapped lines and QR payloads into 1-bit-ready grayscale bitmaps.
//!
//! ## Modules
//!
//! - [`canvas`]: the output bitmap, PNG and packed raster handoff
//! - [`compositor`]: draws wrapped lines with per-glyph font fallback
//! - [`qr`]: QR code bitmaps sized to the receipt width
//!
//! ## Usage Example
//!
//! ```
//! use kvittering::render::{generate_qr, QrSpec};
//!
//! let qr = generate_qr(&QrSpec::new("https://example.com", 512, 4))?;
//! assert!(qr.width() <= 512);
//! # Ok::<(), kvittering::KvitteringError>(())
//! ```

pub mod canvas;
pub mod compositor;
pub mod qr;

pub use canvas::{Canvas, DARK, LIGHT, RasterBits, fit_image, fit_image_bytes};
pub use compositor::{compose, compose_full_width};
pub use qr::{QrBitmap, QrSpec, generate_qr};
