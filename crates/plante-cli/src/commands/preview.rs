use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use plante_core::consts::CALIBRATION_PREVIEW_MAX;
use plante_core::io::image_io::{load_rgb, save_image};
use plante_core::io::preview::{fit_scale, fit_within};

use super::parse_size;

#[derive(Args)]
pub struct PreviewArgs {
    /// Input image
    pub file: PathBuf,

    /// Bounding box of the preview, WIDTHxHEIGHT
    #[arg(long, value_parser = parse_size)]
    pub max: Option<(u32, u32)>,

    /// Output file path
    #[arg(short, long, default_value = "preview.png")]
    pub output: PathBuf,
}

pub fn run(args: &PreviewArgs) -> Result<()> {
    let (max_w, max_h) = args.max.unwrap_or(CALIBRATION_PREVIEW_MAX);
    let image = load_rgb(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let scale = fit_scale(image.width(), image.height(), max_w, max_h);
    let preview = fit_within(&image, max_w, max_h);
    save_image(&preview, &args.output)?;

    println!("Original:  {}x{}", image.width(), image.height());
    println!("Preview:   {}x{}", preview.width(), preview.height());
    println!("Scale:     {:.6}", scale);
    println!("Preview coordinates map back to the original by dividing by the scale.");
    println!("Saved to {}", args.output.display());

    Ok(())
}
