//! wiper-color - Gray to binary conversion
//!
//! - **Thresholding** ([`threshold`]): fixed-threshold binarization into
//!   the two-level image used by the rest of the pipeline

pub mod error;
pub mod threshold;

pub use error::{ColorError, ColorResult};
pub use threshold::{threshold_in_place, threshold_to_binary};
