mod commands;
mod summary;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fitsview_core::config::ViewerConfig;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fitsview", about = "FITS image viewer and ROI cropper")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Viewer config file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show image shape and header metadata
    Info(commands::info::InfoArgs),
    /// Print the header cards
    Header(commands::header::HeaderArgs),
    /// Compute display bounds for a normalization
    Bounds(commands::bounds::BoundsArgs),
    /// Crop a region of interest into a new FITS file
    Crop(commands::crop::CropArgs),
    /// Render the normalized image to PNG
    Render(commands::render::RenderArgs),
    /// Print or save the default viewer config
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::new(log_directive(cli.verbose));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match cli.config {
        Some(ref path) => {
            debug!("Using config {}", path.display());
            ViewerConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?
        }
        None => ViewerConfig::default(),
    };

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Header(args) => commands::header::run(args),
        Commands::Bounds(args) => commands::bounds::run(args, &config),
        Commands::Crop(args) => commands::crop::run(args, &config),
        Commands::Render(args) => commands::render::run(args, &config),
        Commands::Config(args) => commands::config::run(args, &config),
    }
}

/// Log filter for the subscriber; library logs show with `--verbose`.
fn log_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}
