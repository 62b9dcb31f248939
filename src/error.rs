//! # Error Types
//!
//! This module defines error types used throughout the kvittering library.
//!
//! Rendering itself only fails on QR encoding and QR sizing. Configuration,
//! image decoding and file output fail at their own entry points. Font and glyph problems
//! are recovered where they happen and only show up as log lines.

use thiserror::Error;

/// Main error type for kvittering operations
#[derive(Debug, Error)]
pub enum KvitteringError {
    /// QR payload could not be encoded
    #[error("QR error: {0}")]
    Qr(String),

    /// QR payload needs a larger symbol than the configured bound allows
    #[error("QR payload needs version {version}, limit is {max}")]
    QrCapacity { version: i16, max: i16 },

    /// Invalid or unreadable configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Font file could not be parsed
    #[error("Font error: {0}")]
    Font(String),

    /// Image decoding or encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
