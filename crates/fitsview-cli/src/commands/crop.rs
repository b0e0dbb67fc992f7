use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use fitsview_core::config::ViewerConfig;
use fitsview_core::crop::{export_roi, CropOptions};
use fitsview_core::io::fits::load_fits;
use fitsview_core::roi::Roi;
use tracing::debug;

use crate::summary::print_crop_summary;

#[derive(Args)]
pub struct CropArgs {
    /// Input FITS file
    pub file: PathBuf,

    /// Region as x1,x2,y1,y2 pixel indices (columns x, rows y)
    #[arg(long, allow_hyphen_values = true)]
    pub roi: Roi,

    /// Output FITS file (defaults to <input>_roi.fits)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Shift CRPIX1/CRPIX2 so the WCS follows the crop
    #[arg(long)]
    pub shift_crpix: bool,
}

pub fn run(args: &CropArgs, config: &ViewerConfig) -> Result<()> {
    let image = load_fits(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output(&args.file));
    let options = CropOptions {
        shift_reference_pixel: args.shift_crpix || config.export.shift_reference_pixel,
    };
    debug!(
        "Cropping {} to {} (shift CRPIX: {})",
        args.roi,
        output.display(),
        options.shift_reference_pixel
    );

    let cropped = export_roi(&output, Some(&image), Some(&args.roi), &options)
        .with_context(|| format!("Failed to save ROI to {}", output.display()))?;

    print_crop_summary(&args.roi, &image, &cropped, &output);
    Ok(())
}

fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "image".to_string());
    input.with_file_name(format!("{stem}_roi.fits"))
}
