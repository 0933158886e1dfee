//! Pixel depth conversion functions
//!
//! Functions for converting between the supported pixel depths.

use super::{Pix, PixelDepth};
use crate::color;
use crate::error::{Error, Result};

/// Conversion type for 16 bpp to 8 bpp conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Convert16To8Type {
    /// Linearly map the data range `[min, max]` onto `[0, 255]`
    #[default]
    DataRange,
    /// Use most significant byte
    MsByte,
    /// Saturate to 255: min(val, 0xFF)
    ClipToFf,
}

impl Pix {
    /// Convert a 16 bpp image to 8 bpp.
    ///
    /// With [`Convert16To8Type::DataRange`], each value is scaled by
    /// `256 / (max - min + 1)` and rounded, where `min`/`max` are taken from
    /// the actual pixel data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] if the image is not 16 bpp.
    pub fn convert_16_to_8(&self, conversion_type: Convert16To8Type) -> Result<Pix> {
        if self.depth() != PixelDepth::Bit16 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }

        let w = self.width();
        let h = self.height();
        let mut result_mut = Pix::new(w, h, PixelDepth::Bit8)?.into_mut();
        result_mut.set_informat(self.informat());

        let (min, scale) = match conversion_type {
            Convert16To8Type::DataRange => {
                let (min, max) = self.min_max_value()?;
                (min, 256.0 / f64::from(max - min + 1))
            }
            _ => (0, 0.0),
        };

        for y in 0..h {
            for x in 0..w {
                let val = self.get_pixel_unchecked(x, y);
                let val8 = match conversion_type {
                    Convert16To8Type::DataRange => {
                        let v = (f64::from(val - min) * scale + 0.5) as u32;
                        v.min(255)
                    }
                    Convert16To8Type::MsByte => (val >> 8) & 0xff,
                    Convert16To8Type::ClipToFf => val.min(255),
                };
                result_mut.set_pixel_unchecked(x, y, val8);
            }
        }

        Ok(result_mut.into())
    }

    /// Convert a 32 bpp RGB image to 8 bpp gray using the unweighted
    /// channel average `(r + g + b) / 3`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] if the image is not 32 bpp.
    pub fn convert_rgb_to_gray_average(&self) -> Result<Pix> {
        if self.depth() != PixelDepth::Bit32 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }

        let w = self.width();
        let h = self.height();
        let mut result_mut = Pix::new(w, h, PixelDepth::Bit8)?.into_mut();
        result_mut.set_informat(self.informat());

        for y in 0..h {
            for x in 0..w {
                let gray = color::average_gray(self.get_pixel_unchecked(x, y));
                result_mut.set_pixel_unchecked(x, y, u32::from(gray));
            }
        }

        Ok(result_mut.into())
    }

    /// Convert any supported depth to 32 bpp RGB.
    ///
    /// Gray values are replicated into R, G and B; 16 bpp input is first
    /// reduced with [`Convert16To8Type::DataRange`].
    pub fn convert_to_32(&self) -> Result<Pix> {
        let gray = match self.depth() {
            PixelDepth::Bit32 => return Ok(self.deep_clone()),
            PixelDepth::Bit16 => self.convert_16_to_8(Convert16To8Type::DataRange)?,
            PixelDepth::Bit8 => self.clone(),
        };

        let w = self.width();
        let h = self.height();
        let mut result_mut = Pix::new(w, h, PixelDepth::Bit32)?.into_mut();
        result_mut.set_informat(self.informat());

        for y in 0..h {
            for x in 0..w {
                let g = gray.get_pixel_unchecked(x, y) as u8;
                result_mut.set_pixel_unchecked(x, y, color::compose_rgb(g, g, g));
            }
        }

        Ok(result_mut.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pix16(vals: &[u32]) -> Pix {
        let mut pm = Pix::new(vals.len() as u32, 1, PixelDepth::Bit16)
            .unwrap()
            .to_mut();
        for (x, &v) in vals.iter().enumerate() {
            pm.set_pixel_unchecked(x as u32, 0, v);
        }
        pm.into()
    }

    #[test]
    fn test_convert_16_to_8_data_range() {
        let pix = pix16(&[1000, 1255, 1511]);
        let result = pix.convert_16_to_8(Convert16To8Type::DataRange).unwrap();
        // scale = 256 / 512 = 0.5
        assert_eq!(result.get_pixel(0, 0), Some(0));
        assert_eq!(result.get_pixel(1, 0), Some(128));
        assert_eq!(result.get_pixel(2, 0), Some(255));
    }

    #[test]
    fn test_convert_16_to_8_uniform() {
        let pix = pix16(&[300, 300]);
        let result = pix.convert_16_to_8(Convert16To8Type::DataRange).unwrap();
        assert_eq!(result.get_pixel(0, 0), Some(0));
    }

    #[test]
    fn test_convert_16_to_8_bytes() {
        let pix = pix16(&[0xabcd, 0x00ff]);
        let ms = pix.convert_16_to_8(Convert16To8Type::MsByte).unwrap();
        assert_eq!(ms.get_pixel(0, 0), Some(0xab));
        let clip = pix.convert_16_to_8(Convert16To8Type::ClipToFf).unwrap();
        assert_eq!(clip.get_pixel(0, 0), Some(255));
        assert_eq!(clip.get_pixel(1, 0), Some(255));
    }

    #[test]
    fn test_convert_16_to_8_rejects_8bpp() {
        let pix = Pix::new(2, 2, PixelDepth::Bit8).unwrap();
        assert!(pix.convert_16_to_8(Convert16To8Type::MsByte).is_err());
    }

    #[test]
    fn test_rgb_to_gray_average() {
        let mut pm = Pix::new(2, 1, PixelDepth::Bit32).unwrap().to_mut();
        pm.set_rgb(0, 0, 30, 60, 90).unwrap();
        pm.set_rgb(1, 0, 255, 255, 254).unwrap();
        let pix: Pix = pm.into();
        let gray = pix.convert_rgb_to_gray_average().unwrap();
        assert_eq!(gray.depth(), PixelDepth::Bit8);
        assert_eq!(gray.get_pixel(0, 0), Some(60));
        assert_eq!(gray.get_pixel(1, 0), Some(254));
    }

    #[test]
    fn test_convert_to_32_replicates_gray() {
        let mut pm = Pix::new(2, 1, PixelDepth::Bit8).unwrap().to_mut();
        pm.set_pixel(1, 0, 77).unwrap();
        let pix: Pix = pm.into();
        let rgb = pix.convert_to_32().unwrap();
        assert_eq!(rgb.depth(), PixelDepth::Bit32);
        assert_eq!(rgb.get_rgb(1, 0), Some((77, 77, 77)));
        assert_eq!(rgb.get_rgb(0, 0), Some((0, 0, 0)));
    }
}
