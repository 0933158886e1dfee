//! I/O error types
//!
//! Codec errors are flattened to strings so callers match on one enum.

use thiserror::Error;

/// Error type for reading and writing camera frames.
#[derive(Error, Debug)]
pub enum IoError {
    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Unrecognized or unsupported container
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Header or sample layout the reader cannot represent as a Pix
    #[error("invalid image data: {0}")]
    InvalidData(String),

    #[error("decode error: {0}")]
    DecodeError(String),

    #[error("encode error: {0}")]
    EncodeError(String),

    /// Pixel container error
    #[error("core error: {0}")]
    Core(#[from] wiper_core::Error),
}

/// Convenience alias for I/O results.
pub type IoResult<T> = Result<T, IoError>;
