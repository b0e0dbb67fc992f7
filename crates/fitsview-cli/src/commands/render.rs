use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use fitsview_core::config::ViewerConfig;
use fitsview_core::io::fits::load_fits;
use fitsview_core::normalize::compute_bounds;
use fitsview_core::render::{render_rgb, save_png, Colormap};
use fitsview_core::roi::DisplayOrigin;
use tracing::debug;

use super::NormArgs;

#[derive(Args)]
pub struct RenderArgs {
    /// Input FITS file
    pub file: PathBuf,

    /// Output PNG file (defaults to <input>.png)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub norm: NormArgs,

    /// Colour map (gray or rainbow)
    #[arg(long)]
    pub colormap: Option<Colormap>,

    /// Row 0 at the bottom (lower) or top (upper)
    #[arg(long)]
    pub origin: Option<DisplayOrigin>,
}

pub fn run(args: &RenderArgs, config: &ViewerConfig) -> Result<()> {
    let state = args.norm.resolve(&config.normalization)?;
    let image = load_fits(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let bounds = compute_bounds(&image.data, &state)?;
    debug!("Display bounds {:.6e}..{:.6e}", bounds.low, bounds.high);

    let colormap = args.colormap.unwrap_or(config.colormap);
    let origin = args.origin.unwrap_or(config.origin);
    let rgb = render_rgb(&image.data, &bounds, colormap, origin);

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.file.with_extension("png"));
    save_png(&rgb, &output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "Rendered {}x{} ({}, {}, {}) to {}",
        rgb.width(),
        rgb.height(),
        state.mode,
        colormap,
        origin,
        output.display()
    );
    Ok(())
}
