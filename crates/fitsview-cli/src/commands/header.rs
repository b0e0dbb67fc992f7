use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use fitsview_core::io::fits::FitsReader;

#[derive(Args)]
pub struct HeaderArgs {
    /// Input FITS file
    pub file: PathBuf,
}

pub fn run(args: &HeaderArgs) -> Result<()> {
    let reader = FitsReader::open(&args.file)
        .with_context(|| format!("Failed to open {}", args.file.display()))?;
    println!("{}", reader.header.to_card_text());
    Ok(())
}
