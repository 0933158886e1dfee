//! Histogram equalization regression test
//!
//! 平方根重み付きヒストグラム平坦化をテスト。

use wiper_core::{ImageFormat, Pix, PixelDepth};
use wiper_filter::{EqualizeStatus, SkipReason, equalize, equalize_lut};
use wiper_test::{RegParams, SimpleRng, gray_image, paint_rect};

/// Dark frame: mostly near-black with a brighter noisy window region.
fn make_dark_frame(rng: &mut SimpleRng) -> Pix {
    let (w, h) = (80u32, 60u32);
    let mut pm = Pix::new(w, h, PixelDepth::Bit8).unwrap().to_mut();
    for y in 0..h {
        for x in 0..w {
            let base = if y < h / 2 { 60 } else { 8 };
            pm.set_pixel_unchecked(x, y, base + rng.below(20));
        }
    }
    pm.into()
}

#[test]
fn equalize_reg() {
    let mut rp = RegParams::new("equalize");
    let mut rng = SimpleRng::new(1234);

    // Order preservation and full-range stretch on a dark frame
    let pix = make_dark_frame(&mut rng);
    let (out, status) = equalize(&pix).expect("equalize");
    rp.check(true, status == EqualizeStatus::Applied);
    rp.write_pix(&out, ImageFormat::Png).expect("write");

    let mut ordered = true;
    for _ in 0..2000 {
        let (x1, y1) = (rng.below(80), rng.below(60));
        let (x2, y2) = (rng.below(80), rng.below(60));
        let (a, b) = (pix.get_pixel_unchecked(x1, y1), pix.get_pixel_unchecked(x2, y2));
        let (ea, eb) = (out.get_pixel_unchecked(x1, y1), out.get_pixel_unchecked(x2, y2));
        if a < b && ea > eb {
            ordered = false;
        }
    }
    rp.check(true, ordered);

    let (in_min, in_max) = pix.min_max_value().unwrap();
    let (out_min, out_max) = out.min_max_value().unwrap();
    eprintln!("  range {}..{} -> {}..{}", in_min, in_max, out_min, out_max);
    rp.check(true, out_max - out_min > in_max - in_min);

    // Determinism
    let (again, _) = equalize(&pix).expect("equalize");
    rp.compare_pix(&out, &again);

    // Uniform image: unchanged
    let flat = gray_image(30, 20, PixelDepth::Bit8, 90).unwrap();
    let (flat_out, status) = equalize(&flat).expect("equalize flat");
    rp.check(true, status == EqualizeStatus::Skipped(SkipReason::SingleLevel));
    rp.compare_pix(&flat, &flat_out);

    // Two-level image without pixels at 0 or 255
    let base = gray_image(20, 20, PixelDepth::Bit8, 30).unwrap();
    let two = paint_rect(base, 0, 0, 10, 20, 200);
    let (two_out, _) = equalize(&two).expect("equalize two-level");
    let hist = two.gray_histogram().unwrap();
    let lut = equalize_lut(&hist).unwrap();
    rp.compare_values(lut[30] as f64, two_out.get_pixel(15, 0).unwrap() as f64, 0.0);
    rp.compare_values(lut[200] as f64, two_out.get_pixel(0, 0).unwrap() as f64, 0.0);
    // Both levels weigh sqrt(200): lut[30] = 255 / 4 and lut[200] = 3 * 255 / 4, rounded
    rp.compare_values(64.0, lut[30] as f64, 0.0);
    rp.compare_values(191.0, lut[200] as f64, 0.0);

    // 16 bpp frame keeps its depth
    let mut pm = Pix::new(40, 30, PixelDepth::Bit16).unwrap().to_mut();
    for y in 0..30 {
        for x in 0..40 {
            pm.set_pixel_unchecked(x, y, 1000 + rng.below(3000));
        }
    }
    let pix16: Pix = pm.into();
    let (out16, status) = equalize(&pix16).expect("equalize 16");
    rp.compare_values(16.0, out16.depth().bits() as f64, 0.0);
    rp.check(true, status == EqualizeStatus::Applied);

    assert!(rp.cleanup(), "equalize regression test failed");
}
