//! PNM (Portable Any Map) format support
//!
//! Reads PGM (P2 ASCII, P5 binary) and PPM (P3 ASCII, P6 binary), and
//! writes P5 or P6. PGM with `maxval > 255` is read as 16 bpp; PPM with
//! `maxval > 255` keeps the most significant byte of each sample.
//! Bitmap (P1/P4) and PAM (P7) files are not supported.

use crate::{IoError, IoResult};
use std::io::{BufRead, Write};
use wiper_core::{ImageFormat, Pix, PixelDepth, color};

struct Header {
    magic: u8,
    width: u32,
    height: u32,
    maxval: u32,
}

/// Byte-level reader that understands PNM whitespace and comments.
struct Tokens<R> {
    reader: R,
}

impl<R: BufRead> Tokens<R> {
    fn peek(&mut self) -> IoResult<Option<u8>> {
        Ok(self.reader.fill_buf()?.first().copied())
    }

    fn next_byte(&mut self) -> IoResult<u8> {
        let b = self
            .peek()?
            .ok_or_else(|| IoError::InvalidData("unexpected end of PNM data".to_string()))?;
        self.reader.consume(1);
        Ok(b)
    }

    fn skip_whitespace(&mut self) -> IoResult<()> {
        while let Some(b) = self.peek()? {
            if b == b'#' {
                while let Some(c) = self.peek()? {
                    self.reader.consume(1);
                    if c == b'\n' {
                        break;
                    }
                }
            } else if b.is_ascii_whitespace() {
                self.reader.consume(1);
            } else {
                break;
            }
        }
        Ok(())
    }

    fn number(&mut self) -> IoResult<u32> {
        self.skip_whitespace()?;
        let mut val: u32 = 0;
        let mut digits = 0;
        while let Some(b) = self.peek()? {
            if !b.is_ascii_digit() {
                break;
            }
            val = val
                .checked_mul(10)
                .and_then(|v| v.checked_add(u32::from(b - b'0')))
                .ok_or_else(|| IoError::InvalidData("PNM number overflow".to_string()))?;
            digits += 1;
            self.reader.consume(1);
        }
        if digits == 0 {
            return Err(IoError::InvalidData("expected a number in PNM data".to_string()));
        }
        Ok(val)
    }

    fn header(&mut self) -> IoResult<Header> {
        let p = self.next_byte()?;
        let magic = self.next_byte()?;
        if p != b'P' || !matches!(magic, b'2' | b'3' | b'5' | b'6') {
            return Err(IoError::UnsupportedFormat(format!(
                "PNM type P{}",
                magic as char
            )));
        }
        let width = self.number()?;
        let height = self.number()?;
        let maxval = self.number()?;
        if maxval == 0 || maxval > 65535 {
            return Err(IoError::InvalidData(format!("PNM maxval {}", maxval)));
        }
        // Exactly one whitespace byte separates the header from binary data
        if matches!(magic, b'5' | b'6') {
            self.next_byte()?;
        }
        Ok(Header {
            magic,
            width,
            height,
            maxval,
        })
    }

    fn binary_sample(&mut self, wide: bool) -> IoResult<u32> {
        let hi = u32::from(self.next_byte()?);
        if wide {
            let lo = u32::from(self.next_byte()?);
            Ok((hi << 8) | lo)
        } else {
            Ok(hi)
        }
    }

    fn sample(&mut self, header: &Header) -> IoResult<u32> {
        let val = match header.magic {
            b'2' | b'3' => self.number()?,
            _ => self.binary_sample(header.maxval > 255)?,
        };
        Ok(val.min(header.maxval))
    }
}

/// Read a PNM image (P2/P3/P5/P6) from a reader.
///
/// # Returns
/// A `Pix` at 8 or 16 bpp (PGM) or 32 bpp (PPM).
pub fn read_pnm<R: BufRead>(reader: R) -> IoResult<Pix> {
    let mut tokens = Tokens { reader };
    let header = tokens.header()?;
    let color = matches!(header.magic, b'3' | b'6');
    let wide = header.maxval > 255;

    let depth = match (color, wide) {
        (true, _) => PixelDepth::Bit32,
        (false, true) => PixelDepth::Bit16,
        (false, false) => PixelDepth::Bit8,
    };

    let mut pix_mut = Pix::new(header.width, header.height, depth)?.into_mut();
    pix_mut.set_informat(ImageFormat::Pnm);

    let to_byte = |v: u32| if wide { (v >> 8) as u8 } else { v as u8 };

    for y in 0..header.height {
        for x in 0..header.width {
            let val = if color {
                let r = tokens.sample(&header)?;
                let g = tokens.sample(&header)?;
                let b = tokens.sample(&header)?;
                color::compose_rgb(to_byte(r), to_byte(g), to_byte(b))
            } else {
                tokens.sample(&header)?
            };
            pix_mut.set_pixel_unchecked(x, y, val);
        }
    }

    Ok(pix_mut.into())
}

/// Write a `Pix` as binary PNM to a writer.
///
/// Chooses P5 (8 or 16 bpp gray) or P6 (32 bpp RGB) based on the pixel
/// depth.
pub fn write_pnm<W: Write>(pix: &Pix, mut writer: W) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();

    let (magic, maxval) = match pix.depth() {
        PixelDepth::Bit8 => ("P5", 255),
        PixelDepth::Bit16 => ("P5", 65535),
        PixelDepth::Bit32 => ("P6", 255),
    };
    write!(writer, "{}\n{} {}\n{}\n", magic, width, height, maxval)?;

    let mut row = Vec::new();
    for y in 0..height {
        row.clear();
        for x in 0..width {
            let val = pix.get_pixel_unchecked(x, y);
            match pix.depth() {
                PixelDepth::Bit8 => row.push(val as u8),
                PixelDepth::Bit16 => row.extend_from_slice(&(val as u16).to_be_bytes()),
                PixelDepth::Bit32 => {
                    let (r, g, b) = color::extract_rgb(val);
                    row.extend_from_slice(&[r, g, b]);
                }
            }
        }
        writer.write_all(&row)?;
    }
    writer.flush()?;
    Ok(())
}
