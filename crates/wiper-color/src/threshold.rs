//! Fixed-threshold binarization
//!
//! Produces the two-level 8 bpp image shared by the morphology and region
//! stages: [`FOREGROUND`] (0) for dark pixels and [`BACKGROUND`] (255)
//! for light ones.

use crate::{ColorError, ColorResult};
use tracing::trace;
use wiper_core::{BACKGROUND, FOREGROUND, Pix, PixMut, PixelDepth};

fn check_depth(depth: PixelDepth) -> ColorResult<()> {
    if depth != PixelDepth::Bit8 {
        return Err(ColorError::UnsupportedDepth {
            expected: "8 bpp",
            actual: depth.bits(),
        });
    }
    Ok(())
}

/// Binarize an 8 bpp gray image in place.
///
/// Pixels with value `<= threshold` become [`FOREGROUND`]; all others
/// become [`BACKGROUND`].
pub fn threshold_in_place(pm: &mut PixMut, threshold: u8) -> ColorResult<()> {
    check_depth(pm.depth())?;

    let t = u32::from(threshold);
    let mut dark = 0u64;
    for y in 0..pm.height() {
        for x in 0..pm.width() {
            let val = if pm.get_pixel_unchecked(x, y) <= t {
                dark += 1;
                FOREGROUND
            } else {
                BACKGROUND
            };
            pm.set_pixel_unchecked(x, y, val);
        }
    }
    trace!(threshold, dark, "binarized");
    Ok(())
}

/// Convert an 8 bpp gray image to binary using a fixed threshold.
///
/// Pixels `<= threshold` become [`FOREGROUND`] (0), pixels `> threshold`
/// become [`BACKGROUND`] (255). The source is not modified.
///
/// # Errors
///
/// Returns [`ColorError::UnsupportedDepth`] unless the input is 8 bpp.
pub fn threshold_to_binary(pix: &Pix, threshold: u8) -> ColorResult<Pix> {
    check_depth(pix.depth())?;
    let mut pm = pix.to_mut();
    threshold_in_place(&mut pm, threshold)?;
    Ok(pm.into())
}
