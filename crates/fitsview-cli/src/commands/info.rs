use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use fitsview_core::io::fits::FitsReader;
use fitsview_core::metadata;

use crate::summary::print_info_summary;

#[derive(Args)]
pub struct InfoArgs {
    /// Input FITS file
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let reader = FitsReader::open(&args.file)
        .with_context(|| format!("Failed to open {}", args.file.display()))?;
    let info = reader.source_info(&args.file);
    let header = &reader.header;

    print_info_summary(
        &info,
        header.len(),
        &metadata::frequency(header),
        &metadata::clean_beam(header),
        &metadata::pixel_scale(header),
    );
    Ok(())
}
