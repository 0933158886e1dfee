//! Square-root weighted histogram equalization
//!
//! Each histogram bin contributes `w(h) = h` for `h < 2` and `sqrt(h)`
//! otherwise, so that large flat areas (sky, road, a blade filling the
//! frame) do not dominate the mapping the way they do in plain
//! cumulative equalization.
//!
//! With `max` the top level (255 or 65535):
//!
//! ```text
//! sum    = w(h[0]) + 2 * (w(h[1]) + .. + w(h[max-1])) + w(h[max])
//! scale  = max / sum
//! lut[0] = 0,  lut[max] = max
//! lut[i] = round((w(h[0]) + 2*w(h[1]) + .. + 2*w(h[i-1]) + w(h[i])) * scale)
//! ```

use crate::{FilterError, FilterResult};
use tracing::debug;
use wiper_core::{Pix, PixMut, PixelDepth};

/// Why equalization left an image unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The weighted histogram sums to zero
    EmptyHistogram,
    /// Every pixel has the same value
    SingleLevel,
}

/// Outcome of a successful equalization call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EqualizeStatus {
    /// The lookup table was built and applied
    Applied,
    /// The image was left unchanged
    Skipped(SkipReason),
}

#[inline]
fn weight(count: u32) -> f64 {
    if count < 2 {
        f64::from(count)
    } else {
        f64::from(count).sqrt()
    }
}

/// Build the equalization lookup table for a histogram.
///
/// `hist` must have one entry per level (256 or 65536 entries).
///
/// # Errors
///
/// Returns the [`SkipReason`] when the histogram is degenerate; callers
/// should leave the image unchanged in that case.
pub fn equalize_lut(hist: &[u32]) -> Result<Vec<u32>, SkipReason> {
    if hist.len() < 2 {
        return Err(SkipReason::SingleLevel);
    }
    let max = hist.len() - 1;

    let populated = hist.iter().filter(|&&c| c > 0).count();
    if populated == 0 {
        return Err(SkipReason::EmptyHistogram);
    }
    if populated == 1 {
        return Err(SkipReason::SingleLevel);
    }

    let mut sum = weight(hist[0]) + weight(hist[max]);
    for &count in &hist[1..max] {
        sum += 2.0 * weight(count);
    }
    if sum == 0.0 {
        return Err(SkipReason::EmptyHistogram);
    }
    let scale = max as f64 / sum;

    let mut lut = vec![0u32; hist.len()];
    let mut running = weight(hist[0]);
    for i in 1..max {
        let delta = weight(hist[i]);
        running += delta;
        // Round half up
        lut[i] = ((running * scale + 0.5).floor() as u32).min(max as u32);
        running += delta;
    }
    lut[max] = max as u32;

    Ok(lut)
}

/// Remap every pixel of a gray image through `lut`, in place.
///
/// # Errors
///
/// Returns [`FilterError::UnsupportedDepth`] for 32 bpp images and
/// [`FilterError::InvalidParameters`] if the table does not have one entry
/// per level.
pub fn lut_map(pm: &mut PixMut, lut: &[u32]) -> FilterResult<()> {
    let depth = pm.depth();
    if !depth.is_gray() {
        return Err(FilterError::UnsupportedDepth {
            expected: "8 or 16 bpp",
            actual: depth.bits(),
        });
    }
    let levels = 1usize << depth.bits();
    if lut.len() != levels {
        return Err(FilterError::InvalidParameters(format!(
            "lookup table has {} entries, image has {} levels",
            lut.len(),
            levels
        )));
    }

    for y in 0..pm.height() {
        for x in 0..pm.width() {
            let v = pm.get_pixel_unchecked(x, y);
            pm.set_pixel_unchecked(x, y, lut[v as usize]);
        }
    }
    Ok(())
}

/// Equalize an 8 or 16 bpp image in place.
///
/// The histogram always covers the whole image.
///
/// # Errors
///
/// Returns [`FilterError::UnsupportedDepth`] for 32 bpp images, which are
/// left unmodified.
pub fn equalize_in_place(pm: &mut PixMut) -> FilterResult<EqualizeStatus> {
    if pm.depth() == PixelDepth::Bit32 {
        return Err(FilterError::UnsupportedDepth {
            expected: "8 or 16 bpp",
            actual: 32,
        });
    }

    let hist = pm.gray_histogram()?;
    match equalize_lut(&hist) {
        Ok(lut) => {
            lut_map(pm, &lut)?;
            Ok(EqualizeStatus::Applied)
        }
        Err(reason) => {
            debug!(?reason, "equalization skipped");
            Ok(EqualizeStatus::Skipped(reason))
        }
    }
}

/// Equalize a copy of `pix`.
///
/// See [`equalize_in_place`].
pub fn equalize(pix: &Pix) -> FilterResult<(Pix, EqualizeStatus)> {
    let mut pm = pix.to_mut();
    let status = equalize_in_place(&mut pm)?;
    Ok((pm.into(), status))
}
