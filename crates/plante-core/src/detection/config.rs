use serde::{Deserialize, Serialize};

use crate::color::HsvRange;
use crate::consts::{
    DEFAULT_DILATION_KERNEL_SIZE, DEFAULT_GRID_COLUMNS, DEFAULT_GRID_ROWS, DEFAULT_MAX_REGIONS,
    DEFAULT_MIN_AREA, DEFAULT_SAMPLES_PER_ROW, DILATION_KERNEL_RANGE, GRID_COLUMNS_RANGE,
    GRID_ROWS_RANGE, MAX_MIN_AREA, MAX_REGIONS_RANGE,
};
use crate::error::{PlanteError, Result};
use crate::labels::{LabelMapping, LabelPreset};

/// Parameters of one region extraction run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtractionParams {
    /// Contours enclosing this many pixels or fewer are discarded.
    #[serde(default = "default_min_area")]
    pub min_area: u32,
    /// Side length of the square kernel merging nearby fragments.
    #[serde(default = "default_dilation_kernel_size")]
    pub dilation_kernel_size: u32,
    /// Number of regions kept after ranking by foreground mass.
    #[serde(default = "default_max_regions")]
    pub max_regions: usize,
    /// Rows of the grid visualization.
    #[serde(default = "default_grid_rows")]
    pub grid_rows: u32,
    /// Columns of the grid visualization.
    #[serde(default = "default_grid_columns")]
    pub grid_columns: u32,
    /// Samples in each physical row band of the tray.
    #[serde(default = "default_samples_per_row")]
    pub samples_per_row: usize,
    /// Fail instead of warning when fewer than `max_regions` regions are found.
    #[serde(default)]
    pub require_full_count: bool,
    /// Rank-to-tag mapping.
    #[serde(default)]
    pub label_preset: LabelPreset,
    /// HSV bounds selecting sample pixels.
    #[serde(default)]
    pub color_range: HsvRange,
}

fn default_min_area() -> u32 {
    DEFAULT_MIN_AREA
}
fn default_dilation_kernel_size() -> u32 {
    DEFAULT_DILATION_KERNEL_SIZE
}
fn default_max_regions() -> usize {
    DEFAULT_MAX_REGIONS
}
fn default_grid_rows() -> u32 {
    DEFAULT_GRID_ROWS
}
fn default_grid_columns() -> u32 {
    DEFAULT_GRID_COLUMNS
}
fn default_samples_per_row() -> usize {
    DEFAULT_SAMPLES_PER_ROW
}

impl Default for ExtractionParams {
    fn default() -> Self {
        Self {
            color_range: HsvRange::default(),
            min_area: DEFAULT_MIN_AREA,
            dilation_kernel_size: DEFAULT_DILATION_KERNEL_SIZE,
            max_regions: DEFAULT_MAX_REGIONS,
            grid_rows: DEFAULT_GRID_ROWS,
            grid_columns: DEFAULT_GRID_COLUMNS,
            samples_per_row: DEFAULT_SAMPLES_PER_ROW,
            label_preset: LabelPreset::default(),
            require_full_count: false,
        }
    }
}

fn check_range<T: PartialOrd + std::fmt::Display>(
    name: &'static str,
    value: T,
    (min, max): (T, T),
) -> Result<()> {
    if value < min || value > max {
        return Err(PlanteError::InvalidParameter {
            name,
            reason: format!("{value} is outside {min}..={max}"),
        });
    }
    Ok(())
}

impl ExtractionParams {
    /// Check every parameter and build the label mapping.
    ///
    /// All configuration errors surface here, before any pixel is touched.
    pub fn validate(&self) -> Result<LabelMapping> {
        self.color_range.validate()?;
        check_range("min_area", self.min_area, (0, MAX_MIN_AREA))?;
        check_range(
            "dilation_kernel_size",
            self.dilation_kernel_size,
            DILATION_KERNEL_RANGE,
        )?;
        check_range("max_regions", self.max_regions, MAX_REGIONS_RANGE)?;
        check_range("grid_rows", self.grid_rows, GRID_ROWS_RANGE)?;
        check_range("grid_columns", self.grid_columns, GRID_COLUMNS_RANGE)?;
        if self.samples_per_row == 0 {
            return Err(PlanteError::InvalidParameter {
                name: "samples_per_row",
                reason: "must be at least 1".into(),
            });
        }

        let cells = self.grid_rows as usize * self.grid_columns as usize;
        if cells < self.max_regions {
            return Err(PlanteError::GridTooSmall {
                rows: self.grid_rows,
                columns: self.grid_columns,
                regions: self.max_regions,
            });
        }

        self.label_preset.mapping_for(self.max_regions)
    }
}
