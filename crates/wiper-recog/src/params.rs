//! Detection parameters and detector options

use crate::{RecogError, RecogResult};

/// Tuning for one detection run
///
/// The defaults are tuned for dashboard camera frames where a wiper blade
/// passing the lens shows up as a large, very dark region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionParams {
    /// Gray level at or below which a pixel counts as dark (default: 12)
    pub binarize_threshold: u8,

    /// Number of 8-connected erosion passes (default: 12)
    pub erode_passes: u32,

    /// Number of 8-connected dilation passes (default: 8)
    pub dilate_passes: u32,

    /// Exclusive lower bound of the accepted relative area (default: 0.025)
    pub detect_min: f32,

    /// Exclusive upper bound of the accepted relative area (default: 0.17)
    pub detect_max: f32,
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            binarize_threshold: 12,
            erode_passes: 12,
            dilate_passes: 8,
            detect_min: 0.025,
            detect_max: 0.17,
        }
    }
}

impl DetectionParams {
    /// Create new parameters with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the binarization threshold
    pub fn with_binarize_threshold(mut self, threshold: u8) -> Self {
        self.binarize_threshold = threshold;
        self
    }

    /// Set the erosion pass count
    pub fn with_erode_passes(mut self, passes: u32) -> Self {
        self.erode_passes = passes;
        self
    }

    /// Set the dilation pass count
    pub fn with_dilate_passes(mut self, passes: u32) -> Self {
        self.dilate_passes = passes;
        self
    }

    /// Set the relative area window
    pub fn with_detect_range(mut self, min: f32, max: f32) -> Self {
        self.detect_min = min;
        self.detect_max = max;
        self
    }

    /// Validate parameters
    pub fn validate(&self) -> RecogResult<()> {
        if self.erode_passes == 0 || self.dilate_passes == 0 {
            return Err(RecogError::InvalidParameters(
                "pass counts must be at least 1".to_string(),
            ));
        }
        if !self.detect_min.is_finite() || !self.detect_max.is_finite() {
            return Err(RecogError::InvalidParameters(
                "detection bounds must be finite".to_string(),
            ));
        }
        if self.detect_min > self.detect_max {
            return Err(RecogError::InvalidParameters(format!(
                "detect_min {} exceeds detect_max {}",
                self.detect_min, self.detect_max
            )));
        }
        Ok(())
    }
}

/// Behavior switches for [`WiperDetector`](crate::WiperDetector)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetectorOptions {
    /// Keep a copy of every stage image in the report (default: false)
    pub keep_intermediates: bool,
}

impl DetectorOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep stage images in the report
    pub fn with_keep_intermediates(mut self, keep: bool) -> Self {
        self.keep_intermediates = keep;
        self
    }

    /// Validate options
    pub fn validate(&self) -> RecogResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = DetectionParams::default();
        assert_eq!(p.binarize_threshold, 12);
        assert_eq!(p.erode_passes, 12);
        assert_eq!(p.dilate_passes, 8);
        assert_eq!(p.detect_min, 0.025);
        assert_eq!(p.detect_max, 0.17);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let p = DetectionParams::new()
            .with_binarize_threshold(30)
            .with_erode_passes(2)
            .with_dilate_passes(3)
            .with_detect_range(0.01, 0.5);
        assert_eq!(p.binarize_threshold, 30);
        assert_eq!((p.erode_passes, p.dilate_passes), (2, 3));
        assert_eq!((p.detect_min, p.detect_max), (0.01, 0.5));
    }

    #[test]
    fn test_validation() {
        assert!(DetectionParams::new().with_erode_passes(0).validate().is_err());
        assert!(DetectionParams::new().with_dilate_passes(0).validate().is_err());
        assert!(
            DetectionParams::new()
                .with_detect_range(0.3, 0.2)
                .validate()
                .is_err()
        );
        assert!(
            DetectionParams::new()
                .with_detect_range(f32::NAN, 0.2)
                .validate()
                .is_err()
        );
        assert!(
            DetectionParams::new()
                .with_detect_range(0.2, 0.2)
                .validate()
                .is_ok()
        );
    }
}
