use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use console::{Style, Term};
use plante_core::calibration::{calibrate, parse_real_distance, CalibrationSession, DisplayMapping};
use plante_core::consts::CALIBRATION_PREVIEW_MAX;
use plante_core::io::image_io::load_rgb;
use tracing::info;

use super::{parse_points, parse_size};

#[derive(Args)]
pub struct CalibrateArgs {
    /// Input image
    pub file: PathBuf,

    /// Two reference points picked on the preview: x1,y1,x2,y2
    #[arg(long)]
    pub points: String,

    /// Preview box the points were picked on, WIDTHxHEIGHT
    #[arg(long, value_parser = parse_size)]
    pub display_max: Option<(u32, u32)>,

    /// Real-world distance between the points; prompted for when omitted
    #[arg(long)]
    pub distance: Option<f64>,
}

pub fn run(args: &CalibrateArgs) -> Result<()> {
    let image = load_rgb(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let max = args.display_max.unwrap_or(CALIBRATION_PREVIEW_MAX);
    let mapping = DisplayMapping::for_display(image.width(), image.height(), max);
    let points = parse_points(&args.points)?;

    let mut session = CalibrationSession::new(mapping);
    for &p in &points {
        session.add_point(p)?;
    }
    let pixels = session
        .segment()
        .map(|s| s.pixel_length())
        .context("Two points are required")?;
    println!("Pixel distance:  {:.4}", pixels);

    let distance = match args.distance {
        Some(d) => d,
        None => match prompt_distance()? {
            Some(d) => d,
            None => {
                info!("Calibration cancelled at the distance prompt");
                println!("Calibration cancelled");
                return Ok(());
            }
        },
    };

    let factor = calibrate(mapping, &points, distance)?;
    let value = Style::new().bold().green();
    println!("Conversion factor: {} per pixel", value.apply_to(factor.value()));
    println!("Pass it to `plante run --factor {}`", factor.value());

    Ok(())
}

/// Ask for the real distance; blank input cancels.
fn prompt_distance() -> Result<Option<f64>> {
    let term = Term::stdout();
    term.write_str("Real-world distance between the points (blank to cancel): ")?;
    let line = term.read_line()?;
    Ok(parse_real_distance(&line)?)
}
