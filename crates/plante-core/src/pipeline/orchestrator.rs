use image::RgbImage;
use tracing::{info, warn};

use crate::calibration::ConversionFactor;
use crate::consts::DEFAULT_UNIT;
use crate::detection::contours::find_candidates;
use crate::detection::morphology::dilate_square;
use crate::detection::regions::{label_regions, normalize_squares, order_row_major, rank_by_mass};
use crate::detection::threshold::{coverage, hsv_mask, isolate};
use crate::detection::ExtractionParams;
use crate::error::{PlanteError, Result};
use crate::io::export::export_csv;
use crate::io::image_io::{load_rgb, save_png};
use crate::render::{render_grid, render_overlay};
use crate::report::Report;

use super::config::PipelineConfig;
use super::types::{ExtractionOutput, NoOpReporter, PipelineStage, ProgressReporter};

/// File name of the grid visualization inside the output directory.
pub const GRID_FILE_NAME: &str = "grid.png";
/// File name of the overlay inside the output directory.
pub const OVERLAY_FILE_NAME: &str = "overlay.png";

/// Run one stage between begin/finish notifications.
fn stage<T>(
    reporter: &dyn ProgressReporter,
    which: PipelineStage,
    f: impl FnOnce() -> Result<T>,
) -> Result<T> {
    reporter.begin_stage(which);
    let out = f();
    reporter.finish_stage();
    out
}

/// Segment, rank, label and measure the samples in `image`.
///
/// Parameters are validated before any pixel is touched. Any failure aborts
/// the run; no partial output is returned.
pub fn run_extraction(
    image: &RgbImage,
    params: &ExtractionParams,
    factor: Option<ConversionFactor>,
    reporter: &dyn ProgressReporter,
) -> Result<ExtractionOutput> {
    let mapping = params.validate()?;
    let factor = factor.ok_or(PlanteError::MissingConversionFactor)?;
    let (width, height) = image.dimensions();

    let (mask, isolated) = stage(reporter, PipelineStage::Thresholding, || {
        let mask = hsv_mask(image, &params.color_range);
        let isolated = isolate(image, &mask);
        info!(coverage = coverage(&mask), "Color threshold applied");
        Ok((mask, isolated))
    })?;

    let dilated = stage(reporter, PipelineStage::Dilating, || {
        Ok(dilate_square(&mask, params.dilation_kernel_size as usize))
    })?;

    let candidates = stage(reporter, PipelineStage::FindingContours, || {
        let candidates = find_candidates(&dilated, &isolated, params.min_area as f64);
        info!(candidates = candidates.len(), "Contours above area threshold");
        Ok(candidates)
    })?;

    if candidates.is_empty() {
        return Err(PlanteError::NoRegionsFound);
    }
    if candidates.len() < params.max_regions {
        if params.require_full_count {
            return Err(PlanteError::TooFewRegions {
                found: candidates.len(),
                expected: params.max_regions,
            });
        }
        warn!(
            found = candidates.len(),
            expected = params.max_regions,
            "Fewer regions than expected"
        );
    }

    let mut normalized = stage(reporter, PipelineStage::Ranking, || {
        let ranked = rank_by_mass(candidates, params.max_regions);
        normalize_squares(ranked, width, height)
    })?;
    order_row_major(&mut normalized, params.samples_per_row);

    let regions = stage(reporter, PipelineStage::Labeling, || {
        label_regions(normalized, &isolated, &mapping, factor)
    })?;

    let grid = stage(reporter, PipelineStage::RenderingGrid, || {
        render_grid(
            &isolated,
            &regions,
            params.grid_rows,
            params.grid_columns,
            DEFAULT_UNIT,
        )
    })?;
    let overlay = stage(reporter, PipelineStage::RenderingOverlay, || {
        render_overlay(&isolated, &regions)
    })?;

    let report = Report::from_regions(&regions, DEFAULT_UNIT);
    info!(
        regions = regions.len(),
        total_area = report.total_area(),
        factor = factor.value(),
        "Extraction complete"
    );

    Ok(ExtractionOutput {
        regions,
        isolated,
        grid,
        overlay,
        report,
    })
}

/// Run a configured batch: load, extract, and write outputs.
pub fn run_pipeline_reported(
    config: &PipelineConfig,
    reporter: &dyn ProgressReporter,
) -> Result<ExtractionOutput> {
    config.extraction.validate()?;
    let image = stage(reporter, PipelineStage::Loading, || load_rgb(&config.input))?;
    let (width, height) = image.dimensions();
    info!(width, height, input = %config.input.display(), "Image loaded");

    let factor = config.resolve_factor(width, height)?;
    let output = run_extraction(&image, &config.extraction, Some(factor), reporter)?;

    stage(reporter, PipelineStage::Writing, || {
        std::fs::create_dir_all(&config.output_dir)?;
        save_png(&output.grid, &config.output_dir.join(GRID_FILE_NAME))?;
        save_png(&output.overlay, &config.output_dir.join(OVERLAY_FILE_NAME))?;
        if let Some(csv) = &config.csv {
            export_csv(&output.report.to_lines(), csv)?;
        }
        info!(output_dir = %config.output_dir.display(), "Outputs written");
        Ok(())
    })?;

    Ok(output)
}

/// Run a configured batch without progress feedback.
pub fn run_pipeline(config: &PipelineConfig) -> Result<ExtractionOutput> {
    run_pipeline_reported(config, &NoOpReporter)
}
