//! Binary morphological operations
//!
//! Erosion and dilation on two-level 8 bpp images. Foreground is
//! [`FOREGROUND`] (0) and background is [`BACKGROUND`] (255).
//!
//! Boundary conditions are asymmetric: for erosion, neighbors outside the
//! image count as background, so foreground touching the edge is eroded;
//! for dilation, they are simply ignored.
//!
//! Repeated passes are double-buffered: every pass reads the complete
//! output of the previous one.

use crate::{MorphError, MorphResult, Sel};
use tracing::trace;
use wiper_core::{BACKGROUND, FOREGROUND, Pix, PixMut, PixelDepth};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Erode,
    Dilate,
}

/// Verify that `pix` is 8 bpp with only foreground and background values.
fn check_binary(pix: &Pix) -> MorphResult<()> {
    if pix.depth() != PixelDepth::Bit8 {
        return Err(MorphError::UnsupportedDepth {
            expected: "8 bpp binary",
            actual: pix.depth().bits(),
        });
    }
    for y in 0..pix.height() {
        for x in 0..pix.width() {
            let v = pix.get_pixel_unchecked(x, y);
            if v != FOREGROUND && v != BACKGROUND {
                return Err(MorphError::NotBinary(v));
            }
        }
    }
    Ok(())
}

/// Run one pass of `op` from `src` into `dst`.
fn apply_pass(src: &PixMut, dst: &mut PixMut, offsets: &[(i32, i32)], op: Op) {
    let w = src.width() as i32;
    let h = src.height() as i32;
    let is_fg = |x: i32, y: i32| -> bool {
        x >= 0
            && y >= 0
            && x < w
            && y < h
            && src.get_pixel_unchecked(x as u32, y as u32) == FOREGROUND
    };

    for y in 0..h {
        for x in 0..w {
            let fg = match op {
                // Every hit must land on in-image foreground
                Op::Erode => offsets.iter().all(|&(dx, dy)| is_fg(x + dx, y + dy)),
                // Any reflected hit on in-image foreground
                Op::Dilate => offsets.iter().any(|&(dx, dy)| is_fg(x - dx, y - dy)),
            };
            let val = if fg { FOREGROUND } else { BACKGROUND };
            dst.set_pixel_unchecked(x as u32, y as u32, val);
        }
    }
}

fn run_passes(pix: &Pix, sel: &Sel, passes: u32, op: Op) -> MorphResult<Pix> {
    check_binary(pix)?;
    let offsets: Vec<(i32, i32)> = sel.hit_offsets().collect();

    let mut src = pix.to_mut();
    if offsets.is_empty() || passes == 0 {
        return Ok(src.into());
    }
    let mut dst = pix.to_mut();
    for _ in 0..passes {
        apply_pass(&src, &mut dst, &offsets, op);
        std::mem::swap(&mut src, &mut dst);
    }
    trace!(?op, passes, "morphology done");
    Ok(src.into())
}

/// Erode a binary image once with `sel`.
///
/// A pixel stays foreground only if every hit of `sel`, placed at that
/// pixel, covers in-image foreground.
///
/// # Errors
///
/// Returns [`MorphError::UnsupportedDepth`] for non-8 bpp input and
/// [`MorphError::NotBinary`] if any value other than 0 or 255 is present.
pub fn erode(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    run_passes(pix, sel, 1, Op::Erode)
}

/// Dilate a binary image once with `sel`.
///
/// A pixel becomes foreground if any hit of the reflected `sel`, placed at
/// that pixel, covers in-image foreground.
pub fn dilate(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    run_passes(pix, sel, 1, Op::Dilate)
}

/// Apply `passes` 8-connected erosions.
///
/// Each pass turns a foreground pixel into background if any of its 8
/// neighbors is background or lies outside the image. Zero passes return
/// an unchanged copy.
pub fn erode_passes(pix: &Pix, passes: u32) -> MorphResult<Pix> {
    run_passes(pix, &Sel::neighborhood_8(), passes, Op::Erode)
}

/// Apply `passes` 8-connected dilations.
///
/// Each pass turns a background pixel into foreground if any of its 8
/// in-image neighbors is foreground.
pub fn dilate_passes(pix: &Pix, passes: u32) -> MorphResult<Pix> {
    run_passes(pix, &Sel::neighborhood_8(), passes, Op::Dilate)
}

/// Erode `erosions` times, then dilate `dilations` times.
///
/// With equal counts this is a morphological opening; the detector uses
/// more erosions than dilations to drop thin structures.
pub fn open_passes(pix: &Pix, erosions: u32, dilations: u32) -> MorphResult<Pix> {
    let eroded = erode_passes(pix, erosions)?;
    dilate_passes(&eroded, dilations)
}
