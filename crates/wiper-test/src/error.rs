//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur during regression testing
#[derive(Debug, Error)]
pub enum TestError {
    /// Failed to write an image
    #[error("failed to write image '{path}': {message}")]
    ImageWrite { path: String, message: String },

    /// Malformed synthetic image description
    #[error("invalid test pattern: {0}")]
    Pattern(String),

    /// Error from the core image container
    #[error("core error: {0}")]
    Core(#[from] wiper_core::Error),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
