use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

#[derive(Args)]
pub struct InfoArgs {
    /// Input image
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let image = image::open(&args.file)
        .with_context(|| format!("Failed to open {}", args.file.display()))?;
    let size = std::fs::metadata(&args.file)?.len();

    println!("File:        {}", args.file.display());
    println!("Dimensions:  {}x{}", image.width(), image.height());
    println!("Color type:  {:?}", image.color());
    println!("File size:   {:.1} KB", size as f64 / 1024.0);

    Ok(())
}
