//! wiper-filter - Intensity filtering
//!
//! This crate provides the histogram equalizer that opens the detection
//! pipeline:
//!
//! - Square-root weighted histogram equalization for 8 and 16 bpp images
//! - Lookup-table mapping

pub mod equalize;
mod error;

pub use equalize::{
    EqualizeStatus, SkipReason, equalize, equalize_in_place, equalize_lut, lut_map,
};
pub use error::{FilterError, FilterResult};
