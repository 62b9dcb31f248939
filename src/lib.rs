//! # Kvittering - Receipt Rendering Library
//!
//! Kvittering turns short text, markdown and QR payloads into monochrome
//! bitmaps sized for a thermal receipt printer. It provides:
//!
//! - **Layout**: a line-oriented markdown dialect, pipe tables and greedy
//!   pixel-width word wrapping
//! - **Fonts**: ordered font candidates per style with a built-in bitmap
//!   font as last resort, and per-character symbol fallback
//! - **Rendering**: text compositing, QR codes and photo fitting
//! - **Handoff**: PNG and packed 1-bit raster output for a printer transport
//!
//! ## Quick Start
//!
//! ```
//! use kvittering::{ReceiptRenderer, RenderConfig};
//!
//! let renderer = ReceiptRenderer::new(RenderConfig::default());
//! let canvas = renderer.build(
//!     "# Corner Cafe\n**Order 42**\n- Espresso\n- Croissant",
//!     true,
//!     Some("https://example.com/r/42"),
//! )?;
//!
//! assert!(canvas.width() <= 512);
//! let raster = canvas.to_raster();
//! assert_eq!(raster.height, canvas.height() as usize);
//!
//! # Ok::<(), kvittering::KvitteringError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Render configuration and JSON loading |
//! | [`layout`] | Styled lines, markdown, tables, wrapping |
//! | [`font`] | Font resolution and glyph fallback |
//! | [`render`] | Canvas, compositor, QR codes |
//! | [`receipt`] | Top-level receipt and task card builders |
//! | [`error`] | Error types |

pub mod config;
pub mod error;
pub mod font;
pub mod layout;
pub mod receipt;
pub mod render;

// Re-exports for convenience
pub use config::RenderConfig;
pub use error::KvitteringError;
pub use font::FontResolver;
pub use receipt::{ReceiptRenderer, TaskKind};
pub use render::Canvas;
