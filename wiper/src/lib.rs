//! Wiper - Windshield-wiper detection for Rust
//!
//! Decides whether a wiper blade is occluding a camera image by
//! equalizing, binarizing and cleaning the frame, then looking for a dark
//! region of plausible size.
//!
//! # Overview
//!
//! - Image I/O (PNG, JPEG, PNM, TIFF)
//! - Histogram equalization
//! - Binarization and binary morphology
//! - Hole filling and dark-region area scanning
//! - The detection pipeline, annotation and batch processing
//!
//! # Example
//!
//! ```
//! use wiper::{DetectionParams, Pix, PixelDepth, WiperDetector};
//!
//! let pix = Pix::new(640, 480, PixelDepth::Bit8).unwrap();
//! let detector = WiperDetector::new(DetectionParams::default()).unwrap();
//! let report = detector.detect(&pix).unwrap();
//! assert!(!report.detected());
//! ```

// Re-export core types (primary data structures used everywhere)
pub use wiper_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use wiper_color as color;
pub use wiper_filter as filter;
pub use wiper_io as io;
pub use wiper_morph as morph;
pub use wiper_recog as recog;
pub use wiper_region as region;

// The detector is the main entry point
pub use wiper_recog::{
    DetectionParams, DetectorOptions, Verdict, WiperDetector, WiperReport, annotate_detection,
    detect_dir, detect_file,
};
