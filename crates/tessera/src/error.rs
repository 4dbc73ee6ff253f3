//! Error types for Tessera operations.
//!
//! Compiling and rendering a diagram never fails; malformed notation yields
//! warnings instead. [`TesseraError`] covers the fallible edges around the
//! pipeline: reading input and validating configuration.

use std::io;

use thiserror::Error;

use tessera_core::style::StyleKey;

/// The main error type for Tessera operations.
#[derive(Debug, Error)]
pub enum TesseraError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid default `{key}` in style configuration: `{value}`")]
    InvalidStyle { key: StyleKey, value: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TesseraError {
    /// Create a new `InvalidStyle` error for a rejected style default.
    pub fn new_invalid_style(key: StyleKey, value: impl Into<String>) -> Self {
        Self::InvalidStyle {
            key,
            value: value.into(),
        }
    }
}
