//! # Error Types
//!
//! This module defines error types used throughout the croquis library.

use thiserror::Error;

/// Main error type for croquis operations.
#[derive(Debug, Error)]
pub enum CroquisError {
    /// Malformed or unsupported image data (bad bytes, bad base64, bad data URI).
    ///
    /// Fatal to the single operation in progress; surface and history
    /// state are left unchanged by the failing call.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Failure while encoding an artifact (always PNG on emit).
    #[error("Encode error: {0}")]
    Encode(String),

    /// Zero or negative dimensions passed where positive ones are required.
    ///
    /// Rejected before any computation; retrying without correcting the
    /// input will fail again.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },

    /// I/O error wrapper (CLI file reads/writes).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<image::ImageError> for CroquisError {
    fn from(err: image::ImageError) -> Self {
        CroquisError::Decode(err.to_string())
    }
}
