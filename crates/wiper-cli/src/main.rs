//! wiper-detect - command-line windshield-wiper detector.

use clap::Parser;
use std::path::{Path, PathBuf};
use wiper_core::ImageFormat;
use wiper_io::write_image;
use wiper_recog::{
    DetectionParams, FileReport, WiperDetector, annotate_detection, default_output_path,
    detect_dir, detect_file,
};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser, Debug)]
#[command(name = "wiper-detect")]
#[command(about = "Detect a windshield-wiper blade occluding a camera image")]
#[command(version)]
struct Cli {
    /// Image file, or a directory of images.
    input: PathBuf,

    /// Output image path (file input) or output directory (directory input).
    /// Defaults to `<input dir>/<input stem>_wiper.png`.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Gray level at or below which a pixel counts as dark [default: 12].
    #[arg(short = 'b', long)]
    binarize_threshold: Option<u8>,

    /// Number of erosion passes [default: 12].
    #[arg(long)]
    erode_passes: Option<u32>,

    /// Number of dilation passes [default: 8].
    #[arg(long)]
    dilate_passes: Option<u32>,

    /// Exclusive lower bound of the relative region area [default: 0.025].
    #[arg(long)]
    detect_min: Option<f32>,

    /// Exclusive upper bound of the relative region area [default: 0.17].
    #[arg(long)]
    detect_max: Option<f32>,

    /// Analyze only; do not write an output image.
    #[arg(long)]
    no_output: bool,
}

impl Cli {
    fn params(&self) -> DetectionParams {
        let defaults = DetectionParams::default();
        DetectionParams {
            binarize_threshold: self
                .binarize_threshold
                .unwrap_or(defaults.binarize_threshold),
            erode_passes: self.erode_passes.unwrap_or(defaults.erode_passes),
            dilate_passes: self.dilate_passes.unwrap_or(defaults.dilate_passes),
            detect_min: self.detect_min.unwrap_or(defaults.detect_min),
            detect_max: self.detect_max.unwrap_or(defaults.detect_max),
        }
    }
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let detector = WiperDetector::new(cli.params())?;

    if cli.input.is_dir() {
        run_dir(&cli, &detector)
    } else {
        let result = detect_file(&cli.input, &detector)?;
        print_verdict(&result);
        if !cli.no_output {
            let out = cli
                .output
                .clone()
                .unwrap_or_else(|| default_output_path(&cli.input));
            save_result(&result, &out)?;
        }
        Ok(())
    }
}

fn run_dir(cli: &Cli, detector: &WiperDetector) -> CliResult<()> {
    if let Some(dir) = &cli.output {
        std::fs::create_dir_all(dir)?;
    }

    let entries = detect_dir(&cli.input, detector)?;
    let mut failed = 0usize;
    for entry in &entries {
        match &entry.outcome {
            Ok(result) => {
                print_verdict(result);
                if cli.no_output {
                    continue;
                }
                let default = default_output_path(&entry.path);
                let out = match (&cli.output, default.file_name()) {
                    (Some(dir), Some(name)) => dir.join(name),
                    _ => default,
                };
                save_result(result, &out)?;
            }
            Err(e) => {
                failed += 1;
                println!("{}: skipped ({})", entry.path.display(), e);
            }
        }
    }
    tracing::info!(files = entries.len(), failed, "batch finished");
    Ok(())
}

fn print_verdict(result: &FileReport) {
    match result.report.relative_area() {
        Some(rel) => println!(
            "{}: Wiper found (relative area {:.4})",
            result.path.display(),
            rel
        ),
        None => println!("{}: NO Wiper found", result.path.display()),
    }
}

/// Write the annotated image for a detection, or the unmodified original.
fn save_result(result: &FileReport, out: &Path) -> CliResult<()> {
    let format = out
        .extension()
        .and_then(|e| e.to_str())
        .map(ImageFormat::from_extension)
        .filter(|f| *f != ImageFormat::Unknown)
        .unwrap_or(ImageFormat::Png);

    if result.report.detected() {
        let annotated = annotate_detection(&result.original, &result.report)?;
        write_image(&annotated, out, format)?;
    } else {
        write_image(&result.original, out, format)?;
    }
    tracing::info!(path = %out.display(), "wrote output");
    Ok(())
}
