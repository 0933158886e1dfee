//! JPEG image format support
//!
//! Reads JPEG images with the `jpeg-decoder` crate and writes them with
//! `jpeg-encoder`.
//!
//! | JPEG pixel format | Pix |
//! |---|---|
//! | L8 | 8 bpp |
//! | L16 | 16 bpp |
//! | RGB24, CMYK32 | 32 bpp |

use crate::{IoError, IoResult};
use jpeg_decoder::PixelFormat;
use std::io::{Read, Write};
use wiper_core::{ImageFormat, Pix, PixelDepth, color};

/// Default JPEG quality used by [`write_jpeg`].
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// Read a JPEG image from a reader.
///
/// # Arguments
/// * `reader` - A reader positioned at the JPEG SOI marker (`FF D8`)
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Pix> {
    let mut decoder = jpeg_decoder::Decoder::new(reader);
    let data = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing".to_string()))?;

    let width = u32::from(info.width);
    let height = u32::from(info.height);

    let (depth, bytes_per_pixel) = match info.pixel_format {
        PixelFormat::L8 => (PixelDepth::Bit8, 1),
        PixelFormat::L16 => (PixelDepth::Bit16, 2),
        PixelFormat::RGB24 => (PixelDepth::Bit32, 3),
        PixelFormat::CMYK32 => (PixelDepth::Bit32, 4),
    };

    let expected = width as usize * height as usize * bytes_per_pixel;
    if data.len() < expected {
        return Err(IoError::InvalidData(format!(
            "JPEG data too short: {} < {}",
            data.len(),
            expected
        )));
    }

    let mut pix_mut = Pix::new(width, height, depth)?.into_mut();
    pix_mut.set_informat(ImageFormat::Jpeg);

    for y in 0..height {
        for x in 0..width {
            let idx = (y as usize * width as usize + x as usize) * bytes_per_pixel;
            let val = match info.pixel_format {
                PixelFormat::L8 => u32::from(data[idx]),
                PixelFormat::L16 => (u32::from(data[idx]) << 8) | u32::from(data[idx + 1]),
                PixelFormat::RGB24 => color::compose_rgb(data[idx], data[idx + 1], data[idx + 2]),
                PixelFormat::CMYK32 => {
                    let k = u32::from(data[idx + 3]);
                    let channel = |c: u8| ((255 - u32::from(c)) * (255 - k) / 255) as u8;
                    color::compose_rgb(
                        channel(data[idx]),
                        channel(data[idx + 1]),
                        channel(data[idx + 2]),
                    )
                }
            };
            pix_mut.set_pixel_unchecked(x, y, val);
        }
    }

    Ok(pix_mut.into())
}

/// Write a `Pix` as JPEG.
///
/// 8 bpp images are written as luma and 32 bpp images as RGB. 16 bpp
/// images are not supported by baseline JPEG; convert them first.
///
/// # Arguments
/// * `pix`     - The image to encode
/// * `writer`  - Destination writer
/// * `quality` - JPEG quality, 1..=100
pub fn write_jpeg<W: Write>(pix: &Pix, writer: W, quality: u8) -> IoResult<()> {
    let width = u16::try_from(pix.width())
        .map_err(|_| IoError::InvalidData(format!("JPEG width too large: {}", pix.width())))?;
    let height = u16::try_from(pix.height())
        .map_err(|_| IoError::InvalidData(format!("JPEG height too large: {}", pix.height())))?;

    let (color_type, data) = match pix.depth() {
        PixelDepth::Bit8 => {
            let mut data = Vec::with_capacity(pix.pixel_count() as usize);
            for y in 0..pix.height() {
                for x in 0..pix.width() {
                    data.push(pix.get_pixel_unchecked(x, y) as u8);
                }
            }
            (jpeg_encoder::ColorType::Luma, data)
        }
        PixelDepth::Bit32 => {
            let mut data = Vec::with_capacity(pix.pixel_count() as usize * 3);
            for y in 0..pix.height() {
                for x in 0..pix.width() {
                    let (r, g, b) = color::extract_rgb(pix.get_pixel_unchecked(x, y));
                    data.extend_from_slice(&[r, g, b]);
                }
            }
            (jpeg_encoder::ColorType::Rgb, data)
        }
        PixelDepth::Bit16 => {
            return Err(IoError::UnsupportedFormat(
                "JPEG output requires 8 or 32 bpp".to_string(),
            ));
        }
    };

    let encoder = jpeg_encoder::Encoder::new(writer, quality.clamp(1, 100));
    encoder
        .encode(&data, width, height, color_type)
        .map_err(|e| IoError::EncodeError(format!("JPEG encode error: {}", e)))?;
    Ok(())
}
