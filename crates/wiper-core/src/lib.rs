//! Wiper Core - Basic data structures for wiper detection
//!
//! This crate provides the fundamental data structures shared by every
//! stage of the detection pipeline:
//!
//! - [`Pix`] / [`PixMut`] - The image container (immutable / mutable)
//! - [`Box`] - Rectangle regions (component bounds, annotation boxes)
//! - [`Color`] - RGB color used when rendering annotations
//!
//! Binary images produced by the pipeline are 8 bpp with two levels:
//! [`FOREGROUND`] (dark, 0) and [`BACKGROUND`] (light, 255).

pub mod box_;
pub mod error;
pub mod pix;

pub use box_::Box;
pub use error::{Error, Result};
pub use pix::{Color, Convert16To8Type, ImageFormat, Pix, PixMut, PixelDepth};

/// Binary foreground value (dark pixel, candidate wiper material).
pub const FOREGROUND: u32 = 0;

/// Binary background value (light pixel, visible scene).
pub const BACKGROUND: u32 = 255;

/// Channel packing for 32 bpp pixels, stored as `0xRRGGBBAA`.
pub mod color {
    /// Pack an opaque RGB pixel.
    #[inline]
    pub fn compose_rgb(r: u8, g: u8, b: u8) -> u32 {
        compose_rgba(r, g, b, 0xff)
    }

    #[inline]
    pub fn compose_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
        u32::from_be_bytes([r, g, b, a])
    }

    /// Unpack the color channels, dropping alpha.
    #[inline]
    pub fn extract_rgb(pixel: u32) -> (u8, u8, u8) {
        let [r, g, b, _] = pixel.to_be_bytes();
        (r, g, b)
    }

    #[inline]
    pub fn alpha(pixel: u32) -> u8 {
        pixel.to_be_bytes()[3]
    }

    /// Unweighted gray value `(r + g + b) / 3`, truncated.
    #[inline]
    pub fn average_gray(pixel: u32) -> u8 {
        let (r, g, b) = extract_rgb(pixel);
        ((u32::from(r) + u32::from(g) + u32::from(b)) / 3) as u8
    }

}
