//! wiper-io - Image I/O for the wiper detection workspace
//!
//! Decodes camera frames into [`Pix`] and writes results back out.
//!
//! Supported formats (each behind a cargo feature, all enabled by default):
//!
//! - PNG (`png-format`)
//! - JPEG (`jpeg`)
//! - PNM (`pnm`)
//! - TIFF (`tiff-format`)
//!
//! The format of an input file is sniffed from its magic bytes, never from
//! its extension.

mod error;
pub mod format;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;
#[cfg(feature = "tiff-format")]
pub mod tiff;

pub use error::{IoError, IoResult};
pub use format::{detect_format, detect_format_from_bytes, has_image_extension};
pub use wiper_core::ImageFormat;

use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;
use tracing::debug;
use wiper_core::{Pix, PixelDepth};

/// Read an image from a file path.
///
/// The returned image keeps the depth of the file: 8 or 16 bpp for gray
/// input, 32 bpp for color input.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    let pix = read_image_mem(&data)?;
    debug!(
        path = %path.display(),
        width = pix.width(),
        height = pix.height(),
        depth = pix.depth().bits(),
        "decoded image"
    );
    Ok(pix)
}

/// Read an image from an in-memory buffer.
pub fn read_image_mem(data: &[u8]) -> IoResult<Pix> {
    let format = detect_format_from_bytes(data)?;
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(Cursor::new(data)),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(Cursor::new(data)),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::read_pnm(Cursor::new(data)),
        #[cfg(feature = "tiff-format")]
        ImageFormat::Tiff => tiff::read_tiff(Cursor::new(data)),
        other => Err(IoError::UnsupportedFormat(format!(
            "{:?} support is not enabled",
            other
        ))),
    }
}

/// Read an image from a file and reduce it to a single gray channel.
///
/// 8 and 16 bpp gray images are returned unchanged. Color images are
/// converted to 8 bpp with the unweighted channel average `(r + g + b) / 3`.
pub fn read_image_gray<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let pix = read_image(path)?;
    to_gray(pix)
}

/// In-memory variant of [`read_image_gray`].
pub fn read_image_gray_mem(data: &[u8]) -> IoResult<Pix> {
    to_gray(read_image_mem(data)?)
}

fn to_gray(pix: Pix) -> IoResult<Pix> {
    match pix.depth() {
        PixelDepth::Bit8 | PixelDepth::Bit16 => Ok(pix),
        PixelDepth::Bit32 => Ok(pix.convert_rgb_to_gray_average()?),
    }
}

/// Write an image to a file path.
pub fn write_image<P: AsRef<Path>>(pix: &Pix, path: P, format: ImageFormat) -> IoResult<()> {
    let path = path.as_ref();
    let data = write_image_mem(pix, format)?;
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&data)?;
    writer.flush()?;
    debug!(path = %path.display(), ?format, "wrote image");
    Ok(())
}

/// Encode an image into an in-memory buffer.
pub fn write_image_mem(pix: &Pix, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(pix, &mut buf)?,
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::write_jpeg(pix, &mut buf, jpeg::DEFAULT_JPEG_QUALITY)?,
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::write_pnm(pix, &mut buf)?,
        #[cfg(feature = "tiff-format")]
        ImageFormat::Tiff => tiff::write_tiff(pix, &mut buf)?,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "cannot write {:?}",
                other
            )));
        }
    }
    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiper_core::PixelDepth;

    #[test]
    fn test_read_image_gray_mem_averages_rgb() {
        let mut pm = Pix::new(2, 1, PixelDepth::Bit32).unwrap().to_mut();
        pm.set_rgb(0, 0, 90, 30, 0).unwrap();
        let pix: Pix = pm.into();

        let data = write_image_mem(&pix, ImageFormat::Pnm).unwrap();
        let gray = read_image_gray_mem(&data).unwrap();
        assert_eq!(gray.depth(), PixelDepth::Bit8);
        assert_eq!(gray.get_pixel(0, 0), Some(40));
    }

    #[test]
    fn test_read_image_gray_keeps_16bit() {
        let pix = Pix::new(2, 2, PixelDepth::Bit16).unwrap();
        let data = write_image_mem(&pix, ImageFormat::Png).unwrap();
        let gray = read_image_gray_mem(&data).unwrap();
        assert_eq!(gray.depth(), PixelDepth::Bit16);
    }

    #[test]
    fn test_unknown_format_rejected() {
        let pix = Pix::new(2, 2, PixelDepth::Bit8).unwrap();
        assert!(write_image_mem(&pix, ImageFormat::Unknown).is_err());
        assert!(read_image_mem(b"not an image").is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_image("/nonexistent/dir/frame.png").unwrap_err();
        assert!(matches!(err, IoError::Io(_)));
    }
}
