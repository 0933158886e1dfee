//! wiper-region - Region processing for wiper detection
//!
//! This crate provides the region stages of the pipeline:
//!
//! - **Seed fill operations** - Flood fill and border-seeded hole filling
//! - **Dark-region scanning** - Area measurement of foreground components
//!   and the relative-area acceptance test
//!
//! # Examples
//!
//! ## Flood fill
//!
//! ```
//! use wiper_region::{floodfill, ConnectivityType};
//! use wiper_core::{Pix, PixelDepth};
//!
//! let pix = Pix::new(10, 10, PixelDepth::Bit8).unwrap();
//! let mut pix_mut = pix.try_into_mut().unwrap();
//!
//! // Fill from seed point
//! let count = floodfill(&mut pix_mut, 5, 5, 255, ConnectivityType::FourWay).unwrap();
//! assert_eq!(count, 100); // All 100 pixels filled
//! ```
//!
//! ## Scanning for a wiper-sized region
//!
//! ```
//! use wiper_region::{AreaWindow, scan_for_region};
//! use wiper_core::{BACKGROUND, FOREGROUND, Pix, PixelDepth};
//!
//! let mut pm = Pix::new(100, 100, PixelDepth::Bit8).unwrap().to_mut();
//! pm.set_all(BACKGROUND);
//! for y in 10..25 {
//!     for x in 10..30 {
//!         pm.set_pixel(x, y, FOREGROUND).unwrap();
//!     }
//! }
//! let window = AreaWindow::new(0.02, 0.17).unwrap();
//! let found = scan_for_region(&pm.into(), window).unwrap().unwrap();
//! assert_eq!(found.area, 300);
//! ```

pub mod conncomp;
pub mod error;
pub mod seedfill;

// Re-export error types
pub use error::{RegionError, RegionResult};

// Re-export conncomp types and functions
pub use conncomp::{
    AreaWindow, ConnectivityType, DIRECTED_OFFSETS, DarkRegion, RegionMatch,
    measure_dark_regions, scan_for_region, scan_for_region_in_place,
};

// Re-export seedfill functions
pub use seedfill::{fill_holes, fill_holes_in_place, floodfill};
