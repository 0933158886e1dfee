//! File and directory entry points
//!
//! Decode images from disk, run the detector and hand back both the report
//! and the decoded original so callers can annotate and save it.

use crate::{RecogError, RecogResult, WiperDetector, WiperReport};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use wiper_core::{Pix, PixelDepth};
use wiper_io::{has_image_extension, read_image};

/// Suffix appended to the input stem for default output names.
pub const OUTPUT_SUFFIX: &str = "_wiper";

/// Detection result for one file
#[derive(Debug, Clone)]
pub struct FileReport {
    /// The file that was analyzed
    pub path: PathBuf,
    /// The decoded image, at its native depth
    pub original: Pix,
    /// The pipeline result
    pub report: WiperReport,
}

/// One entry of a directory run
#[derive(Debug)]
pub struct BatchEntry {
    /// The file that was attempted
    pub path: PathBuf,
    /// Its result; failures do not stop the batch
    pub outcome: RecogResult<FileReport>,
}

/// Default output path for `input`: `<input dir>/<input stem>_wiper.png`.
pub fn default_output_path<P: AsRef<Path>>(input: P) -> PathBuf {
    let input = input.as_ref();
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let name = format!("{}{}.png", stem, OUTPUT_SUFFIX);
    match input.parent() {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

/// Run the detector on an image file.
///
/// Color images are reduced to gray with the unweighted channel average
/// before detection; [`FileReport::original`] keeps the color data.
///
/// # Errors
///
/// Returns [`RecogError::SourceNotFound`] if `path` does not exist, before
/// anything is decoded.
pub fn detect_file<P: AsRef<Path>>(path: P, detector: &WiperDetector) -> RecogResult<FileReport> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(RecogError::SourceNotFound(path.to_path_buf()));
    }

    let original = read_image(path)?;
    let gray = match original.depth() {
        PixelDepth::Bit32 => original.convert_rgb_to_gray_average()?,
        _ => original.clone(),
    };
    debug!(path = %path.display(), "running detector");
    let report = detector.detect(&gray)?;

    Ok(FileReport {
        path: path.to_path_buf(),
        original,
        report,
    })
}

fn is_batch_candidate(path: &Path) -> bool {
    if !path.is_file() || !has_image_extension(path) {
        return false;
    }
    // Skip results of earlier runs
    !path
        .file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|s| s.ends_with(OUTPUT_SUFFIX))
}

/// Run the detector on every image file in `dir`, in sorted path order.
///
/// Files are selected by extension and outputs of earlier runs
/// (`*_wiper.*`) are skipped. Subdirectories are not entered. A file that
/// fails to decode or analyze is logged and reported in its entry.
///
/// # Errors
///
/// Returns [`RecogError::SourceNotFound`] if `dir` does not exist, or an
/// I/O error if it cannot be listed.
pub fn detect_dir<P: AsRef<Path>>(dir: P, detector: &WiperDetector) -> RecogResult<Vec<BatchEntry>> {
    let dir = dir.as_ref();
    if !dir.exists() {
        return Err(RecogError::SourceNotFound(dir.to_path_buf()));
    }

    let listing = std::fs::read_dir(dir).map_err(|e| RecogError::Io(e.into()))?;
    let mut paths = Vec::new();
    for entry in listing {
        let entry = entry.map_err(|e| RecogError::Io(e.into()))?;
        let path = entry.path();
        if is_batch_candidate(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    debug!(dir = %dir.display(), files = paths.len(), "batch start");

    let entries = paths
        .into_iter()
        .map(|path| {
            let outcome = detect_file(&path, detector);
            if let Err(e) = &outcome {
                warn!(path = %path.display(), error = %e, "skipping file");
            }
            BatchEntry { path, outcome }
        })
        .collect();
    Ok(entries)
}
