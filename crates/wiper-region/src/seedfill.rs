//! Seed fill operations
//!
//! Flood fill and hole filling for 8 bpp images. All fills run on an
//! explicit stack owned by the call, so region size is bounded only by
//! memory.

use crate::conncomp::{ConnectivityType, check_binary};
use crate::error::{RegionError, RegionResult};
use tracing::debug;
use wiper_core::{BACKGROUND, Box, FOREGROUND, Pix, PixMut};

/// Visited marker for border-reachable background inside [`fill_holes`].
const SENTINEL: u32 = 127;

/// Pixel count and bounding box of one fill.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FillExtent {
    pub count: u64,
    pub bounds: Box,
}

/// Recolor every pixel equal to `old` that is reachable from the seed
/// through `offsets` steps.
///
/// The seed must hold `old`, and `old != new`.
pub(crate) fn flood(
    pm: &mut PixMut,
    seed_x: u32,
    seed_y: u32,
    old: u32,
    new: u32,
    offsets: &[(i32, i32)],
) -> FillExtent {
    let w = pm.width() as i64;
    let h = pm.height() as i64;
    let (mut xmin, mut ymin, mut xmax, mut ymax) = (seed_x, seed_y, seed_x, seed_y);
    let mut count = 0u64;

    let mut stack = vec![(seed_x, seed_y)];
    pm.set_pixel_unchecked(seed_x, seed_y, new);

    while let Some((x, y)) = stack.pop() {
        count += 1;
        xmin = xmin.min(x);
        xmax = xmax.max(x);
        ymin = ymin.min(y);
        ymax = ymax.max(y);

        for &(dx, dy) in offsets {
            let nx = x as i64 + dx as i64;
            let ny = y as i64 + dy as i64;
            if nx < 0 || ny < 0 || nx >= w || ny >= h {
                continue;
            }
            let (nx, ny) = (nx as u32, ny as u32);
            if pm.get_pixel_unchecked(nx, ny) == old {
                pm.set_pixel_unchecked(nx, ny, new);
                stack.push((nx, ny));
            }
        }
    }

    FillExtent {
        count,
        bounds: Box::from_extent(xmin, ymin, xmax, ymax),
    }
}

/// Flood fill starting from a seed point
///
/// Recolors the connected region of pixels sharing the seed's value.
/// This modifies the image in place and returns the number of pixels filled.
///
/// # Arguments
///
/// * `pix` - Mutable 8 or 16 bpp gray image
/// * `seed_x` - X coordinate of the seed point
/// * `seed_y` - Y coordinate of the seed point
/// * `new_value` - Value to fill with
/// * `connectivity` - Connectivity type
///
/// # Returns
///
/// The number of pixels that were filled; 0 if the seed already holds
/// `new_value`.
///
/// # Errors
///
/// Returns an error if the seed position is out of bounds, the image has
/// an unsupported depth or `new_value` does not fit the depth.
pub fn floodfill(
    pix: &mut PixMut,
    seed_x: u32,
    seed_y: u32,
    new_value: u32,
    connectivity: ConnectivityType,
) -> RegionResult<u64> {
    let depth = pix.depth();
    if !depth.is_gray() {
        return Err(RegionError::UnsupportedDepth {
            expected: "8 or 16 bpp",
            actual: depth.bits(),
        });
    }
    if new_value > depth.max_value() {
        return Err(RegionError::InvalidParameters(format!(
            "fill value {} exceeds {} bpp range",
            new_value,
            depth.bits()
        )));
    }
    if seed_x >= pix.width() || seed_y >= pix.height() {
        return Err(RegionError::InvalidSeed {
            x: seed_x,
            y: seed_y,
        });
    }

    let old_value = pix.get_pixel_unchecked(seed_x, seed_y);
    if old_value == new_value {
        return Ok(0);
    }

    let extent = flood(
        pix,
        seed_x,
        seed_y,
        old_value,
        new_value,
        connectivity.offsets(),
    );
    Ok(extent.count)
}

/// Fill enclosed background holes of a binary image, in place.
///
/// Background reachable from the image border (4-connected) stays
/// background; every other pixel becomes foreground. Seeds are taken from
/// the left and right columns, then the top and bottom rows.
///
/// # Errors
///
/// Returns [`RegionError::UnsupportedDepth`] for non-8 bpp images and
/// [`RegionError::NotBinary`] if the image holds values other than 0
/// and 255.
pub fn fill_holes_in_place(pm: &mut PixMut) -> RegionResult<()> {
    check_binary(pm)?;

    let w = pm.width();
    let h = pm.height();
    let offsets = ConnectivityType::FourWay.offsets();
    let seed_at = |pm: &mut PixMut, x: u32, y: u32| {
        if pm.get_pixel_unchecked(x, y) == BACKGROUND {
            flood(pm, x, y, BACKGROUND, SENTINEL, offsets);
        }
    };

    for y in 0..h {
        seed_at(pm, 0, y);
        seed_at(pm, w - 1, y);
    }
    for x in 0..w {
        seed_at(pm, x, 0);
        seed_at(pm, x, h - 1);
    }

    let mut holes = 0u64;
    for y in 0..h {
        for x in 0..w {
            let v = pm.get_pixel_unchecked(x, y);
            let out = if v == SENTINEL {
                BACKGROUND
            } else {
                if v == BACKGROUND {
                    holes += 1;
                }
                FOREGROUND
            };
            pm.set_pixel_unchecked(x, y, out);
        }
    }
    debug!(holes, "filled enclosed background");
    Ok(())
}

/// Fill enclosed background holes of a binary image.
///
/// See [`fill_holes_in_place`]. The source is not modified.
pub fn fill_holes(pix: &Pix) -> RegionResult<Pix> {
    let mut pm = pix.to_mut();
    fill_holes_in_place(&mut pm)?;
    Ok(pm.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiper_core::PixelDepth;
    use wiper_test::{binary_from_ascii, binary_to_ascii};

    #[test]
    fn test_floodfill_four_way() {
        let pix = binary_from_ascii(
            "
            ##...
            ##...
            ..#..
            ...##
            ",
        )
        .unwrap();
        let mut pm = pix.to_mut();
        let n = floodfill(&mut pm, 0, 0, 100, ConnectivityType::FourWay).unwrap();
        assert_eq!(n, 4);
        assert_eq!(pm.get_pixel(2, 2), Some(FOREGROUND));

        let mut pm = pix.to_mut();
        let n = floodfill(&mut pm, 0, 0, 100, ConnectivityType::EightWay).unwrap();
        assert_eq!(n, 7);
    }

    #[test]
    fn test_floodfill_same_value_is_noop() {
        let mut pm = Pix::new(4, 4, PixelDepth::Bit8).unwrap().to_mut();
        assert_eq!(floodfill(&mut pm, 1, 1, 0, ConnectivityType::FourWay).unwrap(), 0);
    }

    #[test]
    fn test_floodfill_errors() {
        let mut pm = Pix::new(4, 4, PixelDepth::Bit8).unwrap().to_mut();
        assert!(matches!(
            floodfill(&mut pm, 4, 0, 1, ConnectivityType::FourWay),
            Err(RegionError::InvalidSeed { x: 4, y: 0 })
        ));
        assert!(matches!(
            floodfill(&mut pm, 0, 0, 256, ConnectivityType::FourWay),
            Err(RegionError::InvalidParameters(_))
        ));
        let mut pm32 = Pix::new(4, 4, PixelDepth::Bit32).unwrap().to_mut();
        assert!(floodfill(&mut pm32, 0, 0, 1, ConnectivityType::FourWay).is_err());
    }

    #[test]
    fn test_fill_holes_ring() {
        let pix = binary_from_ascii(
            "
            .......
            .#####.
            .#...#.
            .#...#.
            .#####.
            .......
            ",
        )
        .unwrap();
        let out = fill_holes(&pix).unwrap();
        assert_eq!(
            binary_to_ascii(&out),
            ".......\n.#####.\n.#####.\n.#####.\n.#####.\n.......\n"
        );
    }

    #[test]
    fn test_fill_holes_keeps_open_channel() {
        // The gap in the left wall connects the inside to the border
        let pix = binary_from_ascii(
            "
            #####
            ....#
            #...#
            #####
            ",
        )
        .unwrap();
        let out = fill_holes(&pix).unwrap();
        assert_eq!(binary_to_ascii(&out), binary_to_ascii(&pix));
    }

    #[test]
    fn test_fill_holes_diagonal_leak_is_closed() {
        // Only 4-connected paths reach the border, so the center is a hole
        let pix = binary_from_ascii(
            "
            .#.
            #.#
            .#.
            ",
        )
        .unwrap();
        let out = fill_holes(&pix).unwrap();
        assert_eq!(binary_to_ascii(&out), ".#.\n###\n.#.\n");
    }

    #[test]
    fn test_fill_holes_rejects_gray() {
        let mut pm = Pix::new(3, 3, PixelDepth::Bit8).unwrap().to_mut();
        pm.set_pixel(1, 1, 127).unwrap();
        assert!(matches!(fill_holes(&pm.into()), Err(RegionError::NotBinary)));
    }
}
