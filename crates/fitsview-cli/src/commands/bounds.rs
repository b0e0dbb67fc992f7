use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use fitsview_core::config::ViewerConfig;
use fitsview_core::io::fits::load_fits;
use fitsview_core::normalize::compute_bounds;
use tracing::debug;

use super::NormArgs;
use crate::summary::print_bounds_summary;

#[derive(Args)]
pub struct BoundsArgs {
    /// Input FITS file
    pub file: PathBuf,

    #[command(flatten)]
    pub norm: NormArgs,
}

pub fn run(args: &BoundsArgs, config: &ViewerConfig) -> Result<()> {
    let state = args.norm.resolve(&config.normalization)?;
    debug!(
        "Normalization {} p{}-p{}",
        state.mode, state.vmin_percentile, state.vmax_percentile
    );
    let image = load_fits(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let bounds = compute_bounds(&image.data, &state)?;

    print_bounds_summary(&state, &bounds);
    Ok(())
}
