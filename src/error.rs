//! # Error Types
//!
//! This module defines error types used throughout the dotraster library.
//!
//! The codec itself only ever reports [`RasterError::InvalidParameter`], and
//! only while a strategy or view is being constructed. The remaining variants
//! belong to the outer layers (image decoding, profiles, file output).

use thiserror::Error;

/// Main error type for dotraster operations
#[derive(Debug, Error)]
pub enum RasterError {
    /// Out-of-range cutoff, matrix dimension, threshold bound or region
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Image decoding or encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// Malformed render profile
    #[error("Config error: {0}")]
    Config(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RasterError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, RasterError>;
