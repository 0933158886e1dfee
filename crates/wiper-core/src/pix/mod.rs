//! Frame container
//!
//! A camera frame travels through the pipeline as a [`Pix`]: 8 or 16 bpp
//! gray, or 32 bpp color as decoded from disk. Rows are packed big-end
//! first into 32-bit words, each row padded to a whole word.
//!
//! `Pix` shares its buffer through an `Arc`, so handing a frame to the
//! report or keeping it as an intermediate is free. Stages that rewrite
//! pixels take a [`PixMut`] and hand back a `Pix` when they are done.

mod access;
mod convert;
pub mod graphics;
mod histogram;

pub use access::*;
pub use convert::Convert16To8Type;
pub use graphics::Color;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Pixel depth (bits per pixel)
///
/// 8 and 16 bpp images are grayscale; 32 bpp images are RGB(A).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PixelDepth {
    /// 8-bit grayscale (also used for two-level binary images)
    Bit8 = 8,
    /// 16-bit grayscale
    Bit16 = 16,
    /// 32-bit RGB or RGBA
    Bit32 = 32,
}

impl PixelDepth {
    /// Get the number of bits per pixel.
    pub fn bits(self) -> u32 {
        self as u32
    }

    /// Check if this depth holds a single gray channel.
    pub fn is_gray(self) -> bool {
        matches!(self, PixelDepth::Bit8 | PixelDepth::Bit16)
    }

    /// Get the maximum pixel value representable at this depth.
    pub fn max_value(self) -> u32 {
        match self {
            PixelDepth::Bit32 => u32::MAX,
            _ => (1u32 << self.bits()) - 1,
        }
    }
}

/// Image file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    /// Unknown format
    #[default]
    Unknown,
    /// JFIF JPEG format
    Jpeg,
    /// PNG format
    Png,
    /// TIFF format
    Tiff,
    /// PNM format (PGM / PPM)
    Pnm,
}

impl ImageFormat {
    /// Get the file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Unknown => "dat",
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Tiff => "tif",
            Self::Pnm => "pnm",
        }
    }

    /// Guess the format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Self::Jpeg,
            "png" => Self::Png,
            "tif" | "tiff" => Self::Tiff,
            "pnm" | "pgm" | "ppm" => Self::Pnm,
            _ => Self::Unknown,
        }
    }
}

/// Internal PIX data
#[derive(Debug, Clone)]
struct PixData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Depth in bits per pixel
    depth: PixelDepth,
    /// Samples per pixel (1 for grayscale, 3 for RGB, 4 for RGBA)
    spp: u32,
    /// 32-bit words per line
    wpl: u32,
    /// Input file format
    informat: ImageFormat,
    /// The image data (packed 32-bit words)
    data: Vec<u32>,
}

/// PIX - Main image container
///
/// # Examples
///
/// ```
/// use wiper_core::{Pix, PixelDepth};
///
/// let pix = Pix::new(640, 480, PixelDepth::Bit8).unwrap();
/// assert_eq!(pix.width(), 640);
/// assert_eq!(pix.height(), 480);
/// ```
#[derive(Debug, Clone)]
pub struct Pix {
    inner: Arc<PixData>,
}

impl Pix {
    /// Allocate a zero-filled frame.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for an empty frame or a row
    /// that does not fit in `u32` words.
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        let invalid = Error::InvalidDimension { width, height };
        if width == 0 || height == 0 {
            return Err(invalid);
        }
        let wpl = u32::try_from((u64::from(width) * u64::from(depth.bits())).div_ceil(32))
            .map_err(|_| invalid)?;

        Ok(Pix {
            inner: Arc::new(PixData {
                width,
                height,
                depth,
                spp: if depth == PixelDepth::Bit32 { 3 } else { 1 },
                wpl,
                informat: ImageFormat::Unknown,
                data: vec![0; wpl as usize * height as usize],
            }),
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// `width * height`, the denominator of relative region areas.
    #[inline]
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.inner.width) * u64::from(self.inner.height)
    }

    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Samples per pixel: 1 for gray, 3 or 4 for color.
    #[inline]
    pub fn spp(&self) -> u32 {
        self.inner.spp
    }

    /// Container the frame was decoded from, if any.
    #[inline]
    pub fn informat(&self) -> ImageFormat {
        self.inner.informat
    }

    /// Packed words of row `y`. Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        let wpl = self.inner.wpl as usize;
        &self.inner.data[y as usize * wpl..][..wpl]
    }

    /// Same width, height and depth.
    pub fn sizes_equal(&self, other: &Pix) -> bool {
        self.inner.width == other.inner.width
            && self.inner.height == other.inner.height
            && self.inner.depth == other.inner.depth
    }

    /// Copy the pixel buffer instead of sharing it.
    pub fn deep_clone(&self) -> Self {
        Pix {
            inner: Arc::new((*self.inner).clone()),
        }
    }

    /// Take the buffer for writing, or get `self` back if it is shared.
    pub fn try_into_mut(self) -> std::result::Result<PixMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(PixMut { inner: data }),
            Err(arc) => Err(Pix { inner: arc }),
        }
    }

    /// Get mutable access, copying the data only if it is shared.
    pub fn into_mut(self) -> PixMut {
        self.try_into_mut().unwrap_or_else(|p| p.to_mut())
    }

    /// Writable copy; `self` is untouched.
    pub fn to_mut(&self) -> PixMut {
        PixMut {
            inner: (*self.inner).clone(),
        }
    }
}

/// Mutable PIX
///
/// Allows modification of image data. Convert back to an immutable
/// [`Pix`] using `Into<Pix>`.
#[derive(Debug)]
pub struct PixMut {
    inner: PixData,
}

impl PixMut {
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Record the container the frame was decoded from.
    pub fn set_informat(&mut self, format: ImageFormat) {
        self.inner.informat = format;
    }

    /// Mark a 32 bpp frame as carrying alpha (4) or not (3).
    pub fn set_spp(&mut self, spp: u32) {
        self.inner.spp = spp;
    }

    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        let wpl = self.inner.wpl as usize;
        &self.inner.data[y as usize * wpl..][..wpl]
    }

    /// Words of row `y`, writable. Panics if `y >= height`.
    #[inline]
    pub fn row_data_mut(&mut self, y: u32) -> &mut [u32] {
        let wpl = self.inner.wpl as usize;
        &mut self.inner.data[y as usize * wpl..][..wpl]
    }

    /// Fill the frame with `val`, masked to the depth.
    pub fn set_all(&mut self, val: u32) {
        let word = match self.inner.depth {
            PixelDepth::Bit8 => (val & 0xff) * 0x0101_0101,
            PixelDepth::Bit16 => (val & 0xffff) * 0x0001_0001,
            PixelDepth::Bit32 => val,
        };
        self.inner.data.fill(word);
    }
}

impl From<PixMut> for Pix {
    fn from(pix_mut: PixMut) -> Self {
        Pix {
            inner: Arc::new(pix_mut.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty() {
        assert!(Pix::new(0, 10, PixelDepth::Bit8).is_err());
        assert!(Pix::new(10, 0, PixelDepth::Bit16).is_err());
    }

    #[test]
    fn test_row_words_per_depth() {
        assert_eq!(Pix::new(5, 1, PixelDepth::Bit8).unwrap().row_data(0).len(), 2);
        assert_eq!(Pix::new(5, 1, PixelDepth::Bit16).unwrap().row_data(0).len(), 3);
        assert_eq!(Pix::new(5, 1, PixelDepth::Bit32).unwrap().row_data(0).len(), 5);
    }

    #[test]
    fn test_try_into_mut_shared() {
        let pix = Pix::new(4, 4, PixelDepth::Bit8).unwrap();
        let shared = pix.clone();
        let back = pix.try_into_mut().unwrap_err();
        drop(shared);
        assert!(back.try_into_mut().is_ok());
    }

    #[test]
    fn test_set_all() {
        let mut pm = Pix::new(7, 3, PixelDepth::Bit8).unwrap().to_mut();
        pm.set_all(255);
        let pix: Pix = pm.into();
        for y in 0..3 {
            for x in 0..7 {
                assert_eq!(pix.get_pixel(x, y), Some(255));
            }
        }

        let mut pm = Pix::new(3, 2, PixelDepth::Bit16).unwrap().to_mut();
        pm.set_all(40000);
        assert_eq!(pm.get_pixel(2, 1), Some(40000));
    }

    #[test]
    fn test_deep_clone_is_independent() {
        let pix = Pix::new(3, 3, PixelDepth::Bit8).unwrap();
        let copy = pix.deep_clone();
        let mut pm = copy.try_into_mut().unwrap();
        pm.set_pixel(1, 1, 9).unwrap();
        assert_eq!(pix.get_pixel(1, 1), Some(0));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ImageFormat::from_extension("JPEG"), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_extension("pgm"), ImageFormat::Pnm);
        assert_eq!(ImageFormat::from_extension("gif"), ImageFormat::Unknown);
    }
}
