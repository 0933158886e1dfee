//! wiper-recog - Windshield-wiper detection
//!
//! This crate composes the pipeline stages from the sibling crates into a
//! single detector and provides the file-level entry points:
//!
//! - **Detection parameters** ([`DetectionParams`], [`DetectorOptions`])
//! - **The pipeline** ([`WiperDetector`], [`WiperReport`])
//! - **Annotation** ([`annotate_detection`])
//! - **Files and folders** ([`detect_file`], [`detect_dir`])
//!
//! # Quick Start
//!
//! ```no_run
//! use wiper_recog::{DetectionParams, WiperDetector, detect_file};
//!
//! let detector = WiperDetector::new(DetectionParams::default()).unwrap();
//! let result = detect_file("frame.png", &detector).unwrap();
//! if result.report.detected() {
//!     println!("Wiper found");
//! }
//! ```

pub mod annotate;
pub mod detector;
mod error;
pub mod file;
pub mod params;

pub use error::{RecogError, RecogResult};

pub use annotate::annotate_detection;
pub use detector::{LabelHint, PipelineStage, Verdict, WiperDetector, WiperReport};
pub use file::{BatchEntry, FileReport, default_output_path, detect_dir, detect_file};
pub use params::{DetectionParams, DetectorOptions};
pub use wiper_region::RegionMatch;
