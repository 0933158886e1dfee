//! TIFF image format support
//!
//! Reads the first page of gray (8/16 bit), RGB and RGBA TIFF files and
//! writes uncompressed single-page TIFF.

use crate::{IoError, IoResult};
use std::io::{Read, Seek, Write};
use tiff::ColorType;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::TiffEncoder;
use tiff::encoder::colortype::{Gray8, Gray16, RGB8, RGBA8};
use tiff::tags::Tag;
use wiper_core::{ImageFormat, Pix, PixMut, PixelDepth, color};

/// PhotometricInterpretation value for gray images where 0 is white
const WHITE_IS_ZERO: u32 = 0;

/// Read a TIFF image (first page)
pub fn read_tiff<R: Read + Seek>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader)
        .map_err(|e| IoError::DecodeError(format!("TIFF decode error: {}", e)))?;

    let (width, height) = decoder
        .dimensions()
        .map_err(|e| IoError::DecodeError(format!("Failed to get TIFF dimensions: {}", e)))?;
    let color_type = decoder
        .colortype()
        .map_err(|e| IoError::DecodeError(format!("Failed to get TIFF color type: {}", e)))?;
    let white_is_zero = decoder
        .get_tag_u32(Tag::PhotometricInterpretation)
        .is_ok_and(|v| v == WHITE_IS_ZERO);

    let (depth, spp) = match color_type {
        ColorType::Gray(8) => (PixelDepth::Bit8, 1),
        ColorType::Gray(16) => (PixelDepth::Bit16, 1),
        ColorType::RGB(8) | ColorType::RGB(16) => (PixelDepth::Bit32, 3),
        ColorType::RGBA(8) | ColorType::RGBA(16) => (PixelDepth::Bit32, 4),
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported TIFF color type: {:?}",
                other
            )));
        }
    };

    let image_data = decoder
        .read_image()
        .map_err(|e| IoError::DecodeError(format!("Failed to read TIFF image data: {}", e)))?;

    let mut pix_mut = Pix::new(width, height, depth)?.into_mut();
    pix_mut.set_spp(spp);
    pix_mut.set_informat(ImageFormat::Tiff);

    match image_data {
        DecodingResult::U8(data) => fill_samples(&mut pix_mut, &data, spp, |v| v)?,
        // 16-bit color keeps the most significant byte of each channel
        DecodingResult::U16(data) => {
            fill_samples(&mut pix_mut, &data, spp, |v| (v >> 8) as u8)?
        }
        _ => {
            return Err(IoError::UnsupportedFormat(
                "unsupported TIFF sample format".to_string(),
            ));
        }
    }

    if white_is_zero && depth.is_gray() {
        let max = depth.max_value();
        for y in 0..height {
            for x in 0..width {
                let v = pix_mut.get_pixel_unchecked(x, y);
                pix_mut.set_pixel_unchecked(x, y, max - v);
            }
        }
    }

    Ok(pix_mut.into())
}

/// Copy interleaved samples into `pix_mut`.
///
/// Gray samples are stored as-is; color samples go through `to_byte`.
fn fill_samples<T: Copy + Into<u32>>(
    pix_mut: &mut PixMut,
    data: &[T],
    spp: u32,
    to_byte: impl Fn(T) -> u8,
) -> IoResult<()> {
    let width = pix_mut.width();
    let height = pix_mut.height();
    let spp = spp as usize;
    let needed = width as usize * height as usize * spp;
    if data.len() < needed {
        return Err(IoError::InvalidData(format!(
            "TIFF data too short: {} < {}",
            data.len(),
            needed
        )));
    }

    for y in 0..height {
        for x in 0..width {
            let idx = (y as usize * width as usize + x as usize) * spp;
            let val = if spp == 1 {
                data[idx].into()
            } else {
                let r = to_byte(data[idx]);
                let g = to_byte(data[idx + 1]);
                let b = to_byte(data[idx + 2]);
                let a = if spp == 4 { to_byte(data[idx + 3]) } else { 255 };
                color::compose_rgba(r, g, b, a)
            };
            pix_mut.set_pixel_unchecked(x, y, val);
        }
    }
    Ok(())
}

/// Write a TIFF image (uncompressed, single page)
pub fn write_tiff<W: Write + Seek>(pix: &Pix, writer: W) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();
    let mut encoder = TiffEncoder::new(writer)
        .map_err(|e| IoError::EncodeError(format!("TIFF encoder error: {}", e)))?;

    let result = match pix.depth() {
        PixelDepth::Bit8 => {
            let data: Vec<u8> = gray_samples(pix).map(|v| v as u8).collect();
            encoder.write_image::<Gray8>(width, height, &data)
        }
        PixelDepth::Bit16 => {
            let data: Vec<u16> = gray_samples(pix).map(|v| v as u16).collect();
            encoder.write_image::<Gray16>(width, height, &data)
        }
        PixelDepth::Bit32 => {
            let with_alpha = pix.spp() == 4;
            let mut data = Vec::with_capacity(pix.pixel_count() as usize * 4);
            for val in gray_samples(pix) {
                let (r, g, b) = color::extract_rgb(val);
                data.extend_from_slice(&[r, g, b]);
                if with_alpha {
                    data.push(color::alpha(val));
                }
            }
            if with_alpha {
                encoder.write_image::<RGBA8>(width, height, &data)
            } else {
                encoder.write_image::<RGB8>(width, height, &data)
            }
        }
    };

    result.map_err(|e| IoError::EncodeError(format!("TIFF write error: {}", e)))
}

/// Raw pixel values in row-major order.
fn gray_samples(pix: &Pix) -> impl Iterator<Item = u32> + '_ {
    (0..pix.height())
        .flat_map(move |y| (0..pix.width()).map(move |x| pix.get_pixel_unchecked(x, y)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn roundtrip(pix: &Pix) -> Pix {
        let mut buf = Cursor::new(Vec::new());
        write_tiff(pix, &mut buf).unwrap();
        read_tiff(Cursor::new(buf.into_inner())).unwrap()
    }

    #[test]
    fn test_tiff_roundtrip_gray8() {
        let mut pm = Pix::new(7, 5, PixelDepth::Bit8).unwrap().to_mut();
        pm.set_pixel(6, 4, 201).unwrap();
        pm.set_pixel(0, 0, 3).unwrap();
        let pix: Pix = pm.into();

        let back = roundtrip(&pix);
        assert_eq!(back.depth(), PixelDepth::Bit8);
        assert_eq!(back.informat(), ImageFormat::Tiff);
        assert_eq!(back.get_pixel(6, 4), Some(201));
        assert_eq!(back.get_pixel(0, 0), Some(3));
    }

    #[test]
    fn test_tiff_roundtrip_gray16() {
        let mut pm = Pix::new(3, 3, PixelDepth::Bit16).unwrap().to_mut();
        pm.set_pixel(1, 2, 40000).unwrap();
        let pix: Pix = pm.into();

        let back = roundtrip(&pix);
        assert_eq!(back.depth(), PixelDepth::Bit16);
        assert_eq!(back.get_pixel(1, 2), Some(40000));
    }

    #[test]
    fn test_tiff_roundtrip_rgb() {
        let mut pm = Pix::new(2, 2, PixelDepth::Bit32).unwrap().to_mut();
        pm.set_rgb(1, 0, 10, 20, 30).unwrap();
        let pix: Pix = pm.into();

        let back = roundtrip(&pix);
        assert_eq!(back.get_rgb(1, 0), Some((10, 20, 30)));
    }
}
