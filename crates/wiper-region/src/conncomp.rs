//! Dark-region area scanning
//!
//! Finds foreground components of a binary image and measures their area
//! relative to the image. The scan walks columns left to right and each
//! column top to bottom; every foreground pixel still unvisited seeds a
//! fill over [`DIRECTED_OFFSETS`]. Absorbed pixels are recolored to
//! background, so each pixel is counted at most once.
//!
//! The directed neighbor set never steps left, and steps up only on a
//! diagonal to the right. Parts of a component that can only be reached
//! by such steps are measured as separate pieces.

use crate::error::{RegionError, RegionResult};
use crate::seedfill::flood;
use tracing::debug;
use wiper_core::{BACKGROUND, Box, FOREGROUND, Pix, PixMut, PixelDepth};

/// Connectivity type for fills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    #[default]
    FourWay,
    /// 8-way connectivity (includes diagonals)
    EightWay,
}

const FOUR_WAY: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const EIGHT_WAY: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

impl ConnectivityType {
    /// Neighbor offsets `(dx, dy)` for this connectivity.
    pub fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            ConnectivityType::FourWay => &FOUR_WAY,
            ConnectivityType::EightWay => &EIGHT_WAY,
        }
    }
}

/// Neighbor steps used by the region scanner: right, right-down,
/// right-up and down.
pub const DIRECTED_OFFSETS: [(i32, i32); 4] = [(1, 0), (1, 1), (1, -1), (0, 1)];

/// Open interval of accepted relative areas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaWindow {
    min: f32,
    max: f32,
}

impl AreaWindow {
    /// Create a window accepting `min < relative < max`.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidParameters`] if either bound is not
    /// finite or `min > max`.
    pub fn new(min: f32, max: f32) -> RegionResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(RegionError::InvalidParameters(format!(
                "area bounds must be finite: {}..{}",
                min, max
            )));
        }
        if min > max {
            return Err(RegionError::InvalidParameters(format!(
                "minimum area {} exceeds maximum {}",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Strict test; a relative area equal to either bound is rejected.
    #[inline]
    pub fn contains(&self, relative: f32) -> bool {
        self.min < relative && relative < self.max
    }
}

/// The first component whose relative area fell inside the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionMatch {
    /// Number of pixels in the component
    pub area: u64,
    /// `area / (width * height)`
    pub relative_area: f32,
    /// Pixel that started the fill
    pub seed: (u32, u32),
    /// Bounding box of the component
    pub bounds: Box,
}

/// One measured component, as reported by [`measure_dark_regions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DarkRegion {
    /// Number of pixels in the component
    pub area: u64,
    /// Pixel that started the fill
    pub seed: (u32, u32),
    /// Bounding box of the component
    pub bounds: Box,
}

/// Verify that `pm` is 8 bpp holding only foreground and background.
pub(crate) fn check_binary(pm: &PixMut) -> RegionResult<()> {
    if pm.depth() != PixelDepth::Bit8 {
        return Err(RegionError::UnsupportedDepth {
            expected: "8 bpp binary",
            actual: pm.depth().bits(),
        });
    }
    let hist = pm.gray_histogram()?;
    let other: u64 = hist
        .iter()
        .enumerate()
        .filter(|&(v, _)| v as u32 != FOREGROUND && v as u32 != BACKGROUND)
        .map(|(_, &c)| u64::from(c))
        .sum();
    if other > 0 {
        return Err(RegionError::NotBinary);
    }
    Ok(())
}

/// Walk the image in scan order, filling each new component and handing
/// it to `visit`. Stops early when `visit` returns `true`.
fn scan_components(pm: &mut PixMut, mut visit: impl FnMut(DarkRegion) -> bool) {
    for x in 0..pm.width() {
        for y in 0..pm.height() {
            if pm.get_pixel_unchecked(x, y) != FOREGROUND {
                continue;
            }
            let extent = flood(pm, x, y, FOREGROUND, BACKGROUND, &DIRECTED_OFFSETS);
            let region = DarkRegion {
                area: extent.count,
                seed: (x, y),
                bounds: extent.bounds,
            };
            if visit(region) {
                return;
            }
        }
    }
}

/// Scan a binary image in place for the first component whose relative
/// area lies strictly inside `window`.
///
/// Every component visited before the match, and the match itself, is
/// recolored to background. Returns `None` if the scan is exhausted.
///
/// # Errors
///
/// Returns [`RegionError::UnsupportedDepth`] for non-8 bpp images and
/// [`RegionError::NotBinary`] for images with values other than 0 and 255.
pub fn scan_for_region_in_place(
    pm: &mut PixMut,
    window: AreaWindow,
) -> RegionResult<Option<RegionMatch>> {
    check_binary(pm)?;
    let total = pm.width() as f32 * pm.height() as f32;

    let mut found = None;
    let mut visited = 0u32;
    scan_components(pm, |region| {
        visited += 1;
        let relative = region.area as f32 / total;
        if window.contains(relative) {
            found = Some(RegionMatch {
                area: region.area,
                relative_area: relative,
                seed: region.seed,
                bounds: region.bounds,
            });
            true
        } else {
            false
        }
    });

    match &found {
        Some(m) => debug!(
            area = m.area,
            relative = m.relative_area,
            seed_x = m.seed.0,
            seed_y = m.seed.1,
            visited,
            "region in window"
        ),
        None => debug!(visited, "no region in window"),
    }
    Ok(found)
}

/// Scan a copy of `pix` for the first component inside `window`.
///
/// See [`scan_for_region_in_place`].
pub fn scan_for_region(pix: &Pix, window: AreaWindow) -> RegionResult<Option<RegionMatch>> {
    let mut pm = pix.to_mut();
    scan_for_region_in_place(&mut pm, window)
}

/// Measure every foreground component in scan order.
///
/// Uses the same scan order and neighbor set as [`scan_for_region`], but
/// without an acceptance window. The areas sum to the foreground count.
pub fn measure_dark_regions(pix: &Pix) -> RegionResult<Vec<DarkRegion>> {
    let mut pm = pix.to_mut();
    check_binary(&pm)?;
    let mut regions = Vec::new();
    scan_components(&mut pm, |region| {
        regions.push(region);
        false
    });
    Ok(regions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiper_test::{binary_from_ascii, gray_image, paint_rect};

    fn blob_image(w: u32, h: u32, bw: u32, bh: u32) -> Pix {
        let bg = gray_image(w, h, PixelDepth::Bit8, BACKGROUND).unwrap();
        paint_rect(bg, 5, 5, bw, bh, FOREGROUND)
    }

    #[test]
    fn test_window_validation() {
        assert!(AreaWindow::new(0.1, 0.05).is_err());
        assert!(AreaWindow::new(f32::NAN, 0.5).is_err());
        let w = AreaWindow::new(0.2, 0.2).unwrap();
        assert!(!w.contains(0.2));
    }

    #[test]
    fn test_directed_fill_splits_left_branch() {
        // The lower-left pixel joins only by a left step
        let pix = binary_from_ascii(
            "
            ##
            .#
            ##
            ",
        )
        .unwrap();
        let regions = measure_dark_regions(&pix).unwrap();
        let areas: Vec<u64> = regions.iter().map(|r| r.area).collect();
        assert_eq!(areas, vec![4, 1]);
        assert_eq!(regions[0].seed, (0, 0));
        assert_eq!(regions[0].bounds, Box::new_unchecked(0, 0, 2, 3));
        assert_eq!(regions[1].seed, (0, 2));
    }

    #[test]
    fn test_right_up_step_is_followed() {
        let pix = binary_from_ascii(
            "
            ...#
            ..#.
            .#..
            #...
            ",
        )
        .unwrap();
        let regions = measure_dark_regions(&pix).unwrap();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].area, 4);
        assert_eq!(regions[0].seed, (0, 3));
    }

    #[test]
    fn test_detects_300_pixel_blob() {
        let pix = blob_image(100, 100, 20, 15);
        let window = AreaWindow::new(0.02, 0.17).unwrap();
        let m = scan_for_region(&pix, window).unwrap().unwrap();
        assert_eq!(m.area, 300);
        assert!((m.relative_area - 0.03).abs() < 1e-6);
        assert_eq!(m.seed, (5, 5));
        assert_eq!(m.bounds, Box::new_unchecked(5, 5, 20, 15));
    }

    #[test]
    fn test_rejects_oversized_blob() {
        let pix = blob_image(100, 100, 50, 100);
        let window = AreaWindow::new(0.02, 0.17).unwrap();
        assert_eq!(scan_for_region(&pix, window).unwrap(), None);
    }

    #[test]
    fn test_all_background() {
        let pix = gray_image(100, 100, PixelDepth::Bit8, BACKGROUND).unwrap();
        let window = AreaWindow::new(0.0, 1.0).unwrap();
        assert_eq!(scan_for_region(&pix, window).unwrap(), None);
        assert!(measure_dark_regions(&pix).unwrap().is_empty());
    }

    #[test]
    fn test_in_place_consumes_scanned_pixels() {
        let pix = blob_image(20, 20, 4, 4);
        let mut pm = pix.to_mut();
        let window = AreaWindow::new(0.0, 1.0).unwrap();
        assert!(scan_for_region_in_place(&mut pm, window).unwrap().is_some());
        assert_eq!(Pix::from(pm).count_value(FOREGROUND), 0);
        // The copying variant leaves the source alone
        assert!(scan_for_region(&pix, window).unwrap().is_some());
        assert_eq!(pix.count_value(FOREGROUND), 16);
    }
}
