//! Container sniffing

use crate::{IoError, IoResult};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use wiper_core::ImageFormat;

/// Leading bytes of each readable container, in probe order.
const SIGNATURES: &[(&[u8], ImageFormat)] = &[
    (b"\x89PNG\r\n\x1a\n", ImageFormat::Png),
    (b"\xff\xd8\xff", ImageFormat::Jpeg),
    (b"II*\x00", ImageFormat::Tiff),
    (b"MM\x00*", ImageFormat::Tiff),
    // Plain and raw PGM / PPM
    (b"P2", ImageFormat::Pnm),
    (b"P3", ImageFormat::Pnm),
    (b"P5", ImageFormat::Pnm),
    (b"P6", ImageFormat::Pnm),
];

/// Sniff the container format of a file from its first bytes.
pub fn detect_format<P: AsRef<Path>>(path: P) -> IoResult<ImageFormat> {
    let mut header = Vec::with_capacity(8);
    File::open(path)?.take(8).read_to_end(&mut header)?;
    detect_format_from_bytes(&header)
}

/// Sniff the container format of an in-memory image.
///
/// # Errors
///
/// Returns [`IoError::InvalidData`] for fewer than two bytes and
/// [`IoError::UnsupportedFormat`] when no signature matches.
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<ImageFormat> {
    if data.len() < 2 {
        return Err(IoError::InvalidData(
            "not enough data to detect format".to_string(),
        ));
    }
    SIGNATURES
        .iter()
        .find(|(sig, _)| data.starts_with(sig))
        .map(|&(_, format)| format)
        .ok_or_else(|| IoError::UnsupportedFormat("unknown image format".to_string()))
}

/// Check whether a path has the extension of a readable image format.
pub fn has_image_extension<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(ImageFormat::from_extension)
        .is_some_and(|f| f != ImageFormat::Unknown)
}
