//! PNG image format support
//!
//! Palette and low-bit gray images are expanded by the decoder, so every
//! PNG lands in one of the three supported depths:
//!
//! | PNG input | Pix |
//! |---|---|
//! | gray 1/2/4/8, gray+alpha 8 | 8 bpp |
//! | gray 16, gray+alpha 16 | 16 bpp |
//! | palette, RGB, RGBA | 32 bpp |
//!
//! Alpha on gray input is dropped.

use crate::{IoError, IoResult};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};
use wiper_core::{ImageFormat, Pix, PixelDepth, color};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;
    let (color_type, bit_depth) = reader.output_color_type();
    let sixteen = bit_depth == BitDepth::Sixteen;

    let (pix_depth, spp) = match color_type {
        ColorType::Grayscale | ColorType::GrayscaleAlpha if sixteen => (PixelDepth::Bit16, 1),
        ColorType::Grayscale | ColorType::GrayscaleAlpha => (PixelDepth::Bit8, 1),
        ColorType::Rgb => (PixelDepth::Bit32, 3),
        ColorType::Rgba => (PixelDepth::Bit32, 4),
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "PNG palette was not expanded".to_string(),
            ));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let mut pix_mut = Pix::new(width, height, pix_depth)?.into_mut();
    pix_mut.set_spp(spp);
    pix_mut.set_informat(ImageFormat::Png);

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];
    // Bytes per sample in the decoded buffer
    let bps = if sixteen { 2 } else { 1 };
    let samples = color_type.samples();

    for y in 0..height {
        let row = &data[y as usize * bytes_per_row..];
        for x in 0..width {
            let idx = x as usize * samples * bps;
            let val = match pix_depth {
                PixelDepth::Bit16 => (u32::from(row[idx]) << 8) | u32::from(row[idx + 1]),
                PixelDepth::Bit8 => u32::from(row[idx]),
                PixelDepth::Bit32 => {
                    let r = row[idx];
                    let g = row[idx + bps];
                    let b = row[idx + 2 * bps];
                    let a = if samples == 4 { row[idx + 3 * bps] } else { 255 };
                    color::compose_rgba(r, g, b, a)
                }
            };
            pix_mut.set_pixel_unchecked(x, y, val);
        }
    }

    Ok(pix_mut.into())
}

/// Write a PNG image
///
/// 8 and 16 bpp images are written as gray; 32 bpp images as RGB, or
/// RGBA when `spp == 4`.
pub fn write_png<W: Write>(pix: &Pix, writer: W) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();

    let (color_type, bit_depth, bytes_per_pixel) = match pix.depth() {
        PixelDepth::Bit8 => (ColorType::Grayscale, BitDepth::Eight, 1),
        PixelDepth::Bit16 => (ColorType::Grayscale, BitDepth::Sixteen, 2),
        PixelDepth::Bit32 if pix.spp() == 4 => (ColorType::Rgba, BitDepth::Eight, 4),
        PixelDepth::Bit32 => (ColorType::Rgb, BitDepth::Eight, 3),
    };

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(bit_depth);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let bytes_per_row = width as usize * bytes_per_pixel;
    let mut data = vec![0u8; bytes_per_row * height as usize];

    for y in 0..height {
        let row = &mut data[y as usize * bytes_per_row..(y as usize + 1) * bytes_per_row];
        for x in 0..width {
            let val = pix.get_pixel_unchecked(x, y);
            let idx = x as usize * bytes_per_pixel;
            match bytes_per_pixel {
                1 => row[idx] = val as u8,
                2 => {
                    row[idx] = (val >> 8) as u8;
                    row[idx + 1] = val as u8;
                }
                _ => {
                    let (r, g, b) = color::extract_rgb(val);
                    row[idx] = r;
                    row[idx + 1] = g;
                    row[idx + 2] = b;
                    if bytes_per_pixel == 4 {
                        row[idx + 3] = color::alpha(val);
                    }
                }
            }
        }
    }

    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_png_roundtrip_grayscale() {
        let mut pix_mut = Pix::new(10, 10, PixelDepth::Bit8).unwrap().to_mut();
        for y in 0..10 {
            for x in 0..10 {
                pix_mut.set_pixel(x, y, (x + y) * 10).unwrap();
            }
        }
        let pix: Pix = pix_mut.into();

        let mut buffer = Vec::new();
        write_png(&pix, &mut buffer).unwrap();
        let pix2 = read_png(Cursor::new(buffer)).unwrap();

        assert_eq!(pix2.width(), 10);
        assert_eq!(pix2.height(), 10);
        assert_eq!(pix2.depth(), PixelDepth::Bit8);
        assert_eq!(pix2.informat(), ImageFormat::Png);
        for y in 0..10 {
            for x in 0..10 {
                assert_eq!(pix2.get_pixel(x, y), pix.get_pixel(x, y));
            }
        }
    }

    #[test]
    fn test_png_16bit_keeps_depth() {
        let mut pix_mut = Pix::new(3, 2, PixelDepth::Bit16).unwrap().to_mut();
        pix_mut.set_pixel(0, 0, 0x1234).unwrap();
        pix_mut.set_pixel(2, 1, 0xfedc).unwrap();
        let pix: Pix = pix_mut.into();

        let mut buffer = Vec::new();
        write_png(&pix, &mut buffer).unwrap();
        let pix2 = read_png(Cursor::new(buffer)).unwrap();

        assert_eq!(pix2.depth(), PixelDepth::Bit16);
        assert_eq!(pix2.get_pixel(0, 0), Some(0x1234));
        assert_eq!(pix2.get_pixel(2, 1), Some(0xfedc));
    }

    #[test]
    fn test_png_roundtrip_rgb() {
        let mut pix_mut = Pix::new(5, 5, PixelDepth::Bit32).unwrap().to_mut();
        pix_mut.set_rgb(0, 0, 255, 0, 0).unwrap();
        pix_mut.set_rgb(1, 1, 0, 255, 0).unwrap();
        pix_mut.set_rgb(2, 2, 0, 0, 255).unwrap();
        let pix: Pix = pix_mut.into();

        let mut buffer = Vec::new();
        write_png(&pix, &mut buffer).unwrap();
        let pix2 = read_png(Cursor::new(buffer)).unwrap();

        assert_eq!(pix2.get_rgb(0, 0), Some((255, 0, 0)));
        assert_eq!(pix2.get_rgb(1, 1), Some((0, 255, 0)));
        assert_eq!(pix2.get_rgb(2, 2), Some((0, 0, 255)));
    }
}
