use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use plante_core::calibration::ConversionFactor;
use plante_core::color::HsvRange;
use plante_core::consts::{CALIBRATION_PREVIEW_MAX, GRID_DISPLAY_MAX};
use plante_core::detection::ExtractionParams;
use plante_core::io::image_io::save_png;
use plante_core::io::preview::fit_within;
use plante_core::labels::LabelPreset;
use plante_core::pipeline::config::{CalibrationConfig, PipelineConfig};
use plante_core::pipeline::run_pipeline_reported;

use super::{parse_points, parse_size};
use crate::progress::SpinnerReporter;
use crate::summary::{print_pipeline_summary, print_report};

/// Screen-sized copy of the grid written next to the full one.
const GRID_DISPLAY_FILE_NAME: &str = "grid_display.png";

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LabelPresetArg {
    Field,
    Alphabetic,
}

impl From<LabelPresetArg> for LabelPreset {
    fn from(arg: LabelPresetArg) -> Self {
        match arg {
            LabelPresetArg::Field => LabelPreset::Field,
            LabelPresetArg::Alphabetic => LabelPreset::Alphabetic,
        }
    }
}

#[derive(Args)]
pub struct RunArgs {
    /// Input image
    pub file: Option<PathBuf>,

    /// Pipeline config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Real-world length per pixel
    #[arg(long, conflicts_with = "points")]
    pub factor: Option<f64>,

    /// Calibration points picked on the preview: x1,y1,x2,y2
    #[arg(long, requires = "distance")]
    pub points: Option<String>,

    /// Real-world distance between the calibration points
    #[arg(long, requires = "points")]
    pub distance: Option<f64>,

    /// Preview box the calibration points were picked on, WIDTHxHEIGHT
    #[arg(long, value_parser = parse_size)]
    pub display_max: Option<(u32, u32)>,

    /// Lower HSV bound, H,S,V
    #[arg(long)]
    pub lower: Option<String>,

    /// Upper HSV bound, H,S,V
    #[arg(long)]
    pub upper: Option<String>,

    /// Discard contours enclosing this many pixels or fewer
    #[arg(long)]
    pub min_area: Option<u32>,

    /// Side of the square dilation kernel
    #[arg(long)]
    pub kernel: Option<u32>,

    /// Number of regions to keep
    #[arg(long)]
    pub max_regions: Option<usize>,

    /// Grid visualization rows
    #[arg(long)]
    pub rows: Option<u32>,

    /// Grid visualization columns
    #[arg(long)]
    pub columns: Option<u32>,

    /// Samples per physical tray row
    #[arg(long)]
    pub samples_per_row: Option<usize>,

    /// Label preset
    #[arg(long, value_enum)]
    pub labels: Option<LabelPresetArg>,

    /// Comma-separated custom labels, rank order
    #[arg(long, conflicts_with = "labels")]
    pub custom_labels: Option<String>,

    /// Fail when fewer than max-regions samples are found
    #[arg(long)]
    pub require_full_count: bool,

    /// Output directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Export the report as CSV
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

pub fn run(args: &RunArgs) -> Result<()> {
    let config = build_config(args)?;
    print_pipeline_summary(&config);

    let reporter = SpinnerReporter::new();
    let output = match run_pipeline_reported(&config, &reporter) {
        Ok(output) => output,
        Err(e) => {
            reporter.abandon();
            return Err(e).context("Processing failed");
        }
    };
    reporter.finish("Done");

    let (max_w, max_h) = GRID_DISPLAY_MAX;
    let display = fit_within(&output.grid, max_w, max_h);
    save_png(&display, &config.output_dir.join(GRID_DISPLAY_FILE_NAME))?;

    print_report(&output.report);
    println!("\nOutputs saved to {}", config.output_dir.display());
    if let Some(ref csv) = config.csv {
        println!("Report exported to {}", csv.display());
    }

    Ok(())
}

/// Start from the config file (or defaults) and apply command-line overrides.
fn build_config(args: &RunArgs) -> Result<PipelineConfig> {
    let mut config = if let Some(ref config_path) = args.config {
        PipelineConfig::load(config_path)
            .with_context(|| format!("Invalid pipeline config {}", config_path.display()))?
    } else {
        match args.file {
            Some(ref file) => PipelineConfig {
                input: file.clone(),
                ..PipelineConfig::default()
            },
            None => bail!("An input image or --config is required"),
        }
    };

    if let Some(ref file) = args.file {
        config.input = file.clone();
    }
    if let Some(ref dir) = args.output {
        config.output_dir = dir.clone();
    }
    if let Some(ref csv) = args.csv {
        config.csv = Some(csv.clone());
    }

    if let Some(f) = args.factor {
        config.conversion_factor = Some(ConversionFactor::new(f)?);
        config.calibration = None;
    } else if let (Some(points), Some(distance)) = (&args.points, args.distance) {
        config.conversion_factor = None;
        config.calibration = Some(CalibrationConfig {
            points: parse_points(points)?.iter().map(|p| [p.x, p.y]).collect(),
            real_distance: distance,
            display_max: args.display_max.unwrap_or(CALIBRATION_PREVIEW_MAX),
        });
    }

    apply_extraction_overrides(&mut config.extraction, args)?;
    config.extraction.validate()?;
    Ok(config)
}

fn apply_extraction_overrides(params: &mut ExtractionParams, args: &RunArgs) -> Result<()> {
    if args.lower.is_some() || args.upper.is_some() {
        let lower = match args.lower {
            Some(ref s) => parse_hsv(s)?,
            None => params.color_range.lower,
        };
        let upper = match args.upper {
            Some(ref s) => parse_hsv(s)?,
            None => params.color_range.upper,
        };
        params.color_range = HsvRange::new(lower, upper)?;
    }
    if let Some(v) = args.min_area {
        params.min_area = v;
    }
    if let Some(v) = args.kernel {
        params.dilation_kernel_size = v;
    }
    if let Some(v) = args.max_regions {
        params.max_regions = v;
    }
    if let Some(v) = args.rows {
        params.grid_rows = v;
    }
    if let Some(v) = args.columns {
        params.grid_columns = v;
    }
    if let Some(v) = args.samples_per_row {
        params.samples_per_row = v;
    }
    if let Some(preset) = args.labels {
        params.label_preset = preset.into();
    }
    if let Some(ref labels) = args.custom_labels {
        params.label_preset =
            LabelPreset::Custom(labels.split(',').map(|s| s.trim().to_string()).collect());
    }
    if args.require_full_count {
        params.require_full_count = true;
    }
    Ok(())
}

/// Parse `H,S,V` into an 8-bit triple.
fn parse_hsv(s: &str) -> Result<[u8; 3]> {
    let values: Vec<u8> = s
        .split(',')
        .map(|v| {
            v.trim()
                .parse()
                .with_context(|| format!("Invalid HSV component {v:?}"))
        })
        .collect::<Result<_>>()?;
    match values.as_slice() {
        &[h, s, v] => Ok([h, s, v]),
        _ => bail!("Expected H,S,V, got {s:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hsv_triples_parse() {
        assert_eq!(parse_hsv("35, 52, 72").unwrap(), [35, 52, 72]);
        assert!(parse_hsv("35,52").is_err());
        assert!(parse_hsv("35,52,300").is_err());
    }
}
