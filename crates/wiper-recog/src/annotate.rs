//! Result annotation

use crate::{RecogResult, Verdict, WiperReport};
use wiper_core::{Color, Pix};

/// Outline thickness for an image of the given size, at least 1.
fn box_line_width(width: u32, height: u32) -> u32 {
    (width.min(height) / 200).max(1)
}

/// Draw the detection onto a 32 bpp copy of `original`.
///
/// When the report holds a detection, the triggering region's bounding box
/// is outlined in red. Otherwise the copy is returned unmarked. `original`
/// must have the size of the image the report was computed from.
pub fn annotate_detection(original: &Pix, report: &WiperReport) -> RecogResult<Pix> {
    let rgb = original.convert_to_32()?;
    let Verdict::Detected(m) = report.verdict else {
        return Ok(rgb);
    };

    let mut pm = rgb.into_mut();
    let line = box_line_width(pm.width(), pm.height());
    pm.render_box_color(&m.bounds, line, Color::RED)?;
    Ok(pm.into())
}
