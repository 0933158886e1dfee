//! Error types for wiper-morph

use thiserror::Error;

/// Errors that can occur during morphological operations
#[derive(Debug, Error)]
pub enum MorphError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] wiper_core::Error),

    /// Invalid structuring element
    #[error("invalid structuring element: {0}")]
    InvalidSel(String),

    /// Unsupported pixel depth for this operation
    #[error("unsupported depth: expected {expected}, got {actual}")]
    UnsupportedDepth { expected: &'static str, actual: u32 },

    /// Input holds values other than foreground and background
    #[error("image is not binary: found value {0}")]
    NotBinary(u32),
}

/// Result type for morphological operations
pub type MorphResult<T> = Result<T, MorphError>;
