//! wiper-test - Regression test framework for the wiper workspace
//!
//! Every crate's `tests/*_reg.rs` drives its checks through [`RegParams`]:
//!
//! - **Compare** (default): check values and images, collecting failures
//! - **Display**: also write the checked images to `tests/regout`
//!
//! # Usage
//!
//! ```ignore
//! use wiper_test::RegParams;
//!
//! let mut rp = RegParams::new("conncomp");
//! rp.compare_values(300.0, area as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"
//!
//! The crate also provides synthetic image builders, since the detector's
//! behavior is easiest to pin down on small hand-made pictures.

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use wiper_core::{BACKGROUND, FOREGROUND, Pix, PixelDepth};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // wiper-test is at crates/wiper-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

/// Create a gray image with every pixel set to `val`.
pub fn gray_image(width: u32, height: u32, depth: PixelDepth, val: u32) -> TestResult<Pix> {
    let mut pm = Pix::new(width, height, depth)?.into_mut();
    pm.set_all(val);
    Ok(pm.into())
}

/// Paint the rectangle `[x, x + w) x [y, y + h)` with `val`.
///
/// Parts of the rectangle outside the image are ignored.
pub fn paint_rect(pix: Pix, x: u32, y: u32, w: u32, h: u32, val: u32) -> Pix {
    let mut pm = pix.into_mut();
    let x_end = (x + w).min(pm.width());
    let y_end = (y + h).min(pm.height());
    for py in y..y_end {
        for px in x..x_end {
            pm.set_pixel_unchecked(px, py, val);
        }
    }
    pm.into()
}

/// Build an 8 bpp binary image from rows of text.
///
/// `#` marks a foreground pixel (0) and `.` a background pixel (255).
/// Leading and trailing whitespace on each row is ignored, as are blank
/// rows, so patterns can be written as indented raw strings.
///
/// # Errors
///
/// Returns [`TestError::Pattern`] for ragged rows, unknown characters or
/// an empty pattern.
pub fn binary_from_ascii(pattern: &str) -> TestResult<Pix> {
    let rows: Vec<&str> = pattern
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    let height = rows.len() as u32;
    let width = rows.first().map_or(0, |r| r.chars().count()) as u32;
    if width == 0 || height == 0 {
        return Err(TestError::Pattern("empty pattern".to_string()));
    }

    let mut pm = Pix::new(width, height, PixelDepth::Bit8)?.into_mut();
    for (y, row) in rows.iter().enumerate() {
        if row.chars().count() as u32 != width {
            return Err(TestError::Pattern(format!("row {} has a different width", y)));
        }
        for (x, c) in row.chars().enumerate() {
            let val = match c {
                '#' => FOREGROUND,
                '.' => BACKGROUND,
                other => {
                    return Err(TestError::Pattern(format!("unexpected character {:?}", other)));
                }
            };
            pm.set_pixel_unchecked(x as u32, y as u32, val);
        }
    }
    Ok(pm.into())
}

/// Render an 8 bpp binary image back to the `#`/`.` text form.
pub fn binary_to_ascii(pix: &Pix) -> String {
    let mut out = String::with_capacity(((pix.width() + 1) * pix.height()) as usize);
    for y in 0..pix.height() {
        for x in 0..pix.width() {
            out.push(if pix.get_pixel_unchecked(x, y) == FOREGROUND {
                '#'
            } else {
                '.'
            });
        }
        out.push('\n');
    }
    out
}

/// Simple linear congruential generator for reproducible test data
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed as u64 }
    }

    pub fn next_u64(&mut self) -> u64 {
        // LCG parameters from Numerical Recipes
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.state
    }

    /// Uniform value in `0..bound`.
    pub fn below(&mut self, bound: u32) -> u32 {
        ((self.next_u64() >> 33) % u64::from(bound.max(1))) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_ascii_roundtrip() {
        let text = "\
            ..#
            ###
        ";
        let pix = binary_from_ascii(text).unwrap();
        assert_eq!((pix.width(), pix.height()), (3, 2));
        assert_eq!(pix.get_pixel(2, 0), Some(0));
        assert_eq!(pix.get_pixel(0, 0), Some(255));
        assert_eq!(binary_to_ascii(&pix), "..#\n###\n");
    }

    #[test]
    fn test_binary_from_ascii_errors() {
        assert!(binary_from_ascii("").is_err());
        assert!(binary_from_ascii("..\n...").is_err());
        assert!(binary_from_ascii(".x").is_err());
    }

    #[test]
    fn test_paint_rect_clips() {
        let pix = gray_image(5, 5, PixelDepth::Bit8, 10).unwrap();
        let pix = paint_rect(pix, 3, 3, 10, 10, 200);
        assert_eq!(pix.count_value(200), 4);
        assert_eq!(pix.get_pixel(2, 2), Some(10));
    }

    #[test]
    fn test_rng_is_deterministic() {
        let mut a = SimpleRng::new(7);
        let mut b = SimpleRng::new(7);
        for _ in 0..10 {
            let v = a.below(100);
            assert_eq!(v, b.below(100));
            assert!(v < 100);
        }
    }
}
