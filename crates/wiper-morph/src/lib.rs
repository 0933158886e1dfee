//! wiper-morph - Binary morphology for the detection pipeline
//!
//! Operates on the two-level 8 bpp images produced by binarization, where
//! [`FOREGROUND`](wiper_core::FOREGROUND) marks dark pixels:
//!
//! - Structuring elements ([`Sel`]) describing the neighborhood
//! - Erosion and dilation, single or repeated ([`binary`])

pub mod binary;
mod error;
pub mod sel;

pub use error::{MorphError, MorphResult};
pub use sel::{Sel, SelElement};

pub use binary::{dilate, dilate_passes, erode, erode_passes, open_passes};
