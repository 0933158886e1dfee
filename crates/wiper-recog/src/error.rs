//! Error types for wiper-recog

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while running the detection pipeline
#[derive(Debug, Error)]
pub enum RecogError {
    /// Input file does not exist
    #[error("file not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// The equalizer cannot process this bit depth
    #[error("unsupported bit depth for equalization: {0} bpp")]
    UnsupportedBitDepth(u32),

    /// Invalid detection parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Image I/O error
    #[error("io error: {0}")]
    Io(#[from] wiper_io::IoError),

    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] wiper_core::Error),

    /// Equalization error
    #[error("filter error: {0}")]
    Filter(#[from] wiper_filter::FilterError),

    /// Binarization error
    #[error("threshold error: {0}")]
    Color(#[from] wiper_color::ColorError),

    /// Morphology error
    #[error("morphology error: {0}")]
    Morph(#[from] wiper_morph::MorphError),

    /// Region processing error
    #[error("region error: {0}")]
    Region(#[from] wiper_region::RegionError),
}

/// Result type for recognition operations
pub type RecogResult<T> = Result<T, RecogError>;
