//! Histogram generation for Pix images
//!
//! Functions to compute pixel value distributions from grayscale images.

use super::{Pix, PixMut, PixelDepth};
use crate::error::{Error, Result};

fn histogram_of(
    width: u32,
    height: u32,
    depth: PixelDepth,
    get: impl Fn(u32, u32) -> u32,
) -> Result<Vec<u32>> {
    if !depth.is_gray() {
        return Err(Error::UnsupportedDepth(depth.bits()));
    }

    let mut histogram = vec![0u32; 1usize << depth.bits()];
    for y in 0..height {
        for x in 0..width {
            histogram[get(x, y) as usize] += 1;
        }
    }
    Ok(histogram)
}

impl Pix {
    /// Get the grayscale histogram of the image
    ///
    /// Counts the occurrence of each pixel value in the image.
    /// The histogram size depends on the image depth:
    /// - 8-bit: 256 bins
    /// - 16-bit: 65536 bins
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] for 32-bit images.
    ///
    /// # Example
    ///
    /// ```
    /// use wiper_core::{Pix, PixelDepth};
    ///
    /// let pix = Pix::new(100, 100, PixelDepth::Bit8).unwrap();
    /// let hist = pix.gray_histogram().unwrap();
    /// assert_eq!(hist.len(), 256);
    /// assert_eq!(hist[0], 10_000);
    /// ```
    pub fn gray_histogram(&self) -> Result<Vec<u32>> {
        histogram_of(self.width(), self.height(), self.depth(), |x, y| {
            self.get_pixel_unchecked(x, y)
        })
    }

    /// Get the minimum and maximum pixel values of a grayscale image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] for 32-bit images.
    pub fn min_max_value(&self) -> Result<(u32, u32)> {
        if self.depth() == PixelDepth::Bit32 {
            return Err(Error::UnsupportedDepth(32));
        }

        let mut min = u32::MAX;
        let mut max = 0u32;
        for y in 0..self.height() {
            for x in 0..self.width() {
                let v = self.get_pixel_unchecked(x, y);
                min = min.min(v);
                max = max.max(v);
            }
        }
        Ok((min, max))
    }

    /// Count the pixels equal to `val`.
    pub fn count_value(&self, val: u32) -> u64 {
        let mut count = 0u64;
        for y in 0..self.height() {
            for x in 0..self.width() {
                if self.get_pixel_unchecked(x, y) == val {
                    count += 1;
                }
            }
        }
        count
    }

    /// Check whether this is an 8 bpp image holding only
    /// [`FOREGROUND`](crate::FOREGROUND) and [`BACKGROUND`](crate::BACKGROUND).
    pub fn is_binary(&self) -> bool {
        if self.depth() != PixelDepth::Bit8 {
            return false;
        }
        (0..self.height()).all(|y| {
            (0..self.width()).all(|x| {
                matches!(
                    self.get_pixel_unchecked(x, y),
                    crate::FOREGROUND | crate::BACKGROUND
                )
            })
        })
    }
}

impl PixMut {
    /// Get the grayscale histogram of the image.
    ///
    /// See [`Pix::gray_histogram`].
    pub fn gray_histogram(&self) -> Result<Vec<u32>> {
        histogram_of(self.width(), self.height(), self.depth(), |x, y| {
            self.get_pixel_unchecked(x, y)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gray_histogram_8bit() {
        let mut pm = Pix::new(10, 10, PixelDepth::Bit8).unwrap().to_mut();
        for x in 0..10 {
            pm.set_pixel(x, 0, 200).unwrap();
        }
        let pix: Pix = pm.into();
        let hist = pix.gray_histogram().unwrap();
        assert_eq!(hist[0], 90);
        assert_eq!(hist[200], 10);
        assert_eq!(hist.iter().sum::<u32>(), 100);
    }

    #[test]
    fn test_gray_histogram_16bit_len() {
        let pix = Pix::new(3, 3, PixelDepth::Bit16).unwrap();
        assert_eq!(pix.gray_histogram().unwrap().len(), 65536);
    }

    #[test]
    fn test_gray_histogram_rejects_rgb() {
        let pix = Pix::new(3, 3, PixelDepth::Bit32).unwrap();
        assert!(pix.gray_histogram().is_err());
        assert!(pix.min_max_value().is_err());
    }

    #[test]
    fn test_min_max_and_count() {
        let mut pm = Pix::new(4, 2, PixelDepth::Bit16).unwrap().to_mut();
        pm.set_all(1000);
        pm.set_pixel(2, 1, 60000).unwrap();
        let pix: Pix = pm.into();
        assert_eq!(pix.min_max_value().unwrap(), (1000, 60000));
        assert_eq!(pix.count_value(1000), 7);
    }

    #[test]
    fn test_is_binary() {
        let mut pm = Pix::new(3, 3, PixelDepth::Bit8).unwrap().to_mut();
        pm.set_pixel(1, 1, 255).unwrap();
        let pix: Pix = pm.into();
        assert!(pix.is_binary());

        let mut pm = pix.to_mut();
        pm.set_pixel(0, 0, 127).unwrap();
        assert!(!Pix::from(pm).is_binary());

        assert!(!Pix::new(3, 3, PixelDepth::Bit16).unwrap().is_binary());
    }
}
