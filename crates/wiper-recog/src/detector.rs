//! Wiper detection pipeline
//!
//! A linear sequence of stages, each one call into a sibling crate:
//!
//! 1. **Equalize**: square-root weighted histogram equalization
//!    (16 bpp input is then reduced to 8 bpp over its data range)
//! 2. **Binarize**: fixed threshold, dark pixels become foreground
//! 3. **Erode / Dilate**: 8-connected passes remove thin structures
//! 4. **Fill**: enclosed background holes become foreground
//! 5. **Scan**: the first dark region whose relative area lies strictly
//!    inside the detection window triggers a detection

use crate::{DetectionParams, DetectorOptions, RecogError, RecogResult};
use tracing::{debug, info};
use wiper_color::threshold_to_binary;
use wiper_core::{Convert16To8Type, Pix, PixelDepth};
use wiper_filter::{FilterError, equalize};
use wiper_morph::{dilate_passes, erode_passes};
use wiper_region::{AreaWindow, RegionMatch, fill_holes, scan_for_region};

/// Pipeline position, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PipelineStage {
    Loaded,
    Equalized,
    Binarized,
    Eroded,
    Dilated,
    Filled,
    Scanned,
    Detected,
    NotDetected,
}

/// Outcome of the region scan
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    /// A region inside the detection window was found
    Detected(RegionMatch),
    /// The scan finished without a match
    NotDetected,
}

impl Verdict {
    /// The final pipeline stage for this verdict
    pub fn stage(&self) -> PipelineStage {
        match self {
            Verdict::Detected(_) => PipelineStage::Detected,
            Verdict::NotDetected => PipelineStage::NotDetected,
        }
    }
}

/// Where a "wiper detected" label should be drawn on the original image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelHint {
    /// Left edge of the text
    pub x: u32,
    /// Top edge of the text
    pub y: u32,
    /// Font size in pixels
    pub font_size: u32,
}

impl LabelHint {
    /// Compute the hint for an image of the given size.
    pub fn for_size(width: u32, height: u32) -> Self {
        let font_size = (width / 20) / 2;
        Self {
            x: width / 160,
            y: height / 32 + font_size,
            font_size,
        }
    }
}

/// Result of one detection run
#[derive(Debug, Clone)]
pub struct WiperReport {
    /// Detection outcome
    pub verdict: Verdict,
    /// Hole-filled binary image, as handed to the scanner
    pub processed: Pix,
    /// Suggested label placement
    pub label_hint: LabelHint,
    /// Stage images in pipeline order; empty unless
    /// [`DetectorOptions::keep_intermediates`] is set
    pub intermediates: Vec<(PipelineStage, Pix)>,
}

impl WiperReport {
    /// Whether a wiper was detected
    pub fn detected(&self) -> bool {
        matches!(self.verdict, Verdict::Detected(_))
    }

    /// Relative area of the triggering region, if any
    pub fn relative_area(&self) -> Option<f32> {
        match self.verdict {
            Verdict::Detected(m) => Some(m.relative_area),
            Verdict::NotDetected => None,
        }
    }

    /// Look up a kept stage image
    pub fn intermediate(&self, stage: PipelineStage) -> Option<&Pix> {
        self.intermediates
            .iter()
            .find(|(s, _)| *s == stage)
            .map(|(_, pix)| pix)
    }
}

/// Windshield-wiper detector
///
/// Immutable after construction; one detector can serve any number of
/// images, from any number of threads.
#[derive(Debug, Clone)]
pub struct WiperDetector {
    params: DetectionParams,
    options: DetectorOptions,
    window: AreaWindow,
}

impl WiperDetector {
    /// Create a detector with default options.
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::InvalidParameters`] if `params` fail validation.
    pub fn new(params: DetectionParams) -> RecogResult<Self> {
        Self::with_options(params, DetectorOptions::default())
    }

    /// Create a detector with explicit options.
    pub fn with_options(params: DetectionParams, options: DetectorOptions) -> RecogResult<Self> {
        params.validate()?;
        options.validate()?;
        let window = AreaWindow::new(params.detect_min, params.detect_max)
            .map_err(|e| RecogError::InvalidParameters(e.to_string()))?;
        Ok(Self {
            params,
            options,
            window,
        })
    }

    /// The parameters this detector runs with
    pub fn params(&self) -> &DetectionParams {
        &self.params
    }

    /// The options this detector runs with
    pub fn options(&self) -> &DetectorOptions {
        &self.options
    }

    /// Run the full pipeline on one image.
    ///
    /// The input is never modified.
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::UnsupportedBitDepth`] if the image cannot be
    /// equalized (32 bpp color); callers should decode color input to gray
    /// first. Errors from later stages are wrapped per crate.
    pub fn detect(&self, pix: &Pix) -> RecogResult<WiperReport> {
        let p = &self.params;
        let mut kept = Vec::new();
        let mut keep = |stage: PipelineStage, img: &Pix| {
            if self.options.keep_intermediates {
                kept.push((stage, img.clone()));
            }
        };

        debug!(
            stage = ?PipelineStage::Loaded,
            width = pix.width(),
            height = pix.height(),
            depth = pix.depth().bits()
        );
        keep(PipelineStage::Loaded, pix);

        let (equalized, status) = equalize(pix).map_err(|e| match e {
            FilterError::UnsupportedDepth { actual, .. } => {
                RecogError::UnsupportedBitDepth(actual)
            }
            other => RecogError::Filter(other),
        })?;
        let gray = match equalized.depth() {
            PixelDepth::Bit16 => equalized.convert_16_to_8(Convert16To8Type::DataRange)?,
            _ => equalized,
        };
        debug!(stage = ?PipelineStage::Equalized, ?status);
        keep(PipelineStage::Equalized, &gray);

        let binary = threshold_to_binary(&gray, p.binarize_threshold)?;
        debug!(
            stage = ?PipelineStage::Binarized,
            threshold = p.binarize_threshold
        );
        keep(PipelineStage::Binarized, &binary);

        let eroded = erode_passes(&binary, p.erode_passes)?;
        debug!(stage = ?PipelineStage::Eroded, passes = p.erode_passes);
        keep(PipelineStage::Eroded, &eroded);

        let dilated = dilate_passes(&eroded, p.dilate_passes)?;
        debug!(stage = ?PipelineStage::Dilated, passes = p.dilate_passes);
        keep(PipelineStage::Dilated, &dilated);

        let filled = fill_holes(&dilated)?;
        debug!(stage = ?PipelineStage::Filled);
        keep(PipelineStage::Filled, &filled);

        let found = scan_for_region(&filled, self.window)?;
        debug!(stage = ?PipelineStage::Scanned, found = found.is_some());

        let verdict = match found {
            Some(m) => {
                info!(
                    area = m.area,
                    relative_area = m.relative_area,
                    "wiper detected"
                );
                Verdict::Detected(m)
            }
            None => {
                info!("no wiper detected");
                Verdict::NotDetected
            }
        };

        Ok(WiperReport {
            verdict,
            processed: filled,
            label_hint: LabelHint::for_size(pix.width(), pix.height()),
            intermediates: kept,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiper_core::FOREGROUND;
    use wiper_test::{gray_image, paint_rect};

    fn frame_with_dark_block(bw: u32, bh: u32) -> Pix {
        let bg = gray_image(200, 100, PixelDepth::Bit8, 180).unwrap();
        paint_rect(bg, 60, 30, bw, bh, 0)
    }

    #[test]
    fn test_label_hint() {
        let hint = LabelHint::for_size(640, 480);
        assert_eq!((hint.x, hint.y, hint.font_size), (4, 31, 16));
        let tiny = LabelHint::for_size(10, 10);
        assert_eq!((tiny.x, tiny.y, tiny.font_size), (0, 0, 0));
    }

    #[test]
    fn test_invalid_params_rejected() {
        let params = DetectionParams::new().with_detect_range(0.5, 0.1);
        assert!(matches!(
            WiperDetector::new(params),
            Err(RecogError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_detects_dark_block() {
        // 40x30 of 200x100 is 6% of the frame
        let detector = WiperDetector::new(
            DetectionParams::new()
                .with_erode_passes(2)
                .with_dilate_passes(2),
        )
        .unwrap();
        let report = detector.detect(&frame_with_dark_block(40, 30)).unwrap();
        assert!(report.detected());
        let rel = report.relative_area().unwrap();
        assert!(rel > 0.05 && rel < 0.07, "relative area {}", rel);
        assert!(report.intermediates.is_empty());
    }

    #[test]
    fn test_small_block_not_detected() {
        let detector = WiperDetector::new(
            DetectionParams::new()
                .with_erode_passes(1)
                .with_dilate_passes(1),
        )
        .unwrap();
        let report = detector.detect(&frame_with_dark_block(6, 6)).unwrap();
        assert!(!report.detected());
        assert_eq!(report.verdict.stage(), PipelineStage::NotDetected);
    }

    #[test]
    fn test_keeps_intermediates() {
        let detector = WiperDetector::with_options(
            DetectionParams::new()
                .with_erode_passes(2)
                .with_dilate_passes(2),
            DetectorOptions::new().with_keep_intermediates(true),
        )
        .unwrap();
        let report = detector.detect(&frame_with_dark_block(40, 30)).unwrap();
        let stages: Vec<PipelineStage> = report.intermediates.iter().map(|(s, _)| *s).collect();
        assert_eq!(
            stages,
            vec![
                PipelineStage::Loaded,
                PipelineStage::Equalized,
                PipelineStage::Binarized,
                PipelineStage::Eroded,
                PipelineStage::Dilated,
                PipelineStage::Filled,
            ]
        );
        let filled = report.intermediate(PipelineStage::Filled).unwrap();
        assert_eq!(
            filled.count_value(FOREGROUND),
            report.processed.count_value(FOREGROUND)
        );
    }

    #[test]
    fn test_rgb_rejected_before_binarization() {
        let pix = Pix::new(8, 8, PixelDepth::Bit32).unwrap();
        let detector = WiperDetector::new(DetectionParams::default()).unwrap();
        assert!(matches!(
            detector.detect(&pix),
            Err(RecogError::UnsupportedBitDepth(32))
        ));
    }

    #[test]
    fn test_detector_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<WiperDetector>();
    }
}
