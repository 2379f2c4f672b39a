use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::calibration::{calibrate, CalibrationPoint, ConversionFactor, DisplayMapping};
use crate::consts::CALIBRATION_PREVIEW_MAX;
use crate::detection::ExtractionParams;
use crate::error::{PlanteError, Result};

fn default_output_dir() -> PathBuf {
    PathBuf::from("plante-output")
}

fn default_display_max() -> (u32, u32) {
    CALIBRATION_PREVIEW_MAX
}

/// A batch run described in TOML.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub input: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Known real-world length per pixel. Takes precedence over `calibration`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion_factor: Option<ConversionFactor>,
    /// Optional CSV export of the report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csv: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calibration: Option<CalibrationConfig>,
    #[serde(default)]
    pub extraction: ExtractionParams,
}

/// Two reference points picked on a preview and the distance between them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalibrationConfig {
    /// Points in preview coordinates, `[[x1, y1], [x2, y2]]`.
    pub points: Vec<[f64; 2]>,
    pub real_distance: f64,
    /// Preview box the points were picked on.
    #[serde(default = "default_display_max")]
    pub display_max: (u32, u32),
}

impl CalibrationConfig {
    pub fn calibration_points(&self) -> Vec<CalibrationPoint> {
        self.points
            .iter()
            .map(|&[x, y]| CalibrationPoint::new(x, y))
            .collect()
    }

    /// Map the points back to `width` x `height` original pixels and derive
    /// the factor.
    pub fn resolve(&self, width: u32, height: u32) -> Result<ConversionFactor> {
        if self.display_max.0 == 0 || self.display_max.1 == 0 {
            return Err(PlanteError::InvalidParameter {
                name: "display_max",
                reason: format!(
                    "{}x{} must be non-zero in both dimensions",
                    self.display_max.0, self.display_max.1
                ),
            });
        }
        let mapping = DisplayMapping::for_display(width, height, self.display_max);
        calibrate(mapping, &self.calibration_points(), self.real_distance)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("tray.jpg"),
            output_dir: default_output_dir(),
            conversion_factor: None,
            csv: None,
            calibration: None,
            extraction: ExtractionParams::default(),
        }
    }
}

impl PipelineConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| PlanteError::InvalidConfig(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| PlanteError::InvalidConfig(e.to_string()))
    }

    /// Conversion factor for an image of `width` x `height` pixels.
    pub fn resolve_factor(&self, width: u32, height: u32) -> Result<ConversionFactor> {
        match (&self.conversion_factor, &self.calibration) {
            (Some(factor), _) => Ok(*factor),
            (None, Some(cal)) => cal.resolve(width, height),
            (None, None) => Err(PlanteError::MissingConversionFactor),
        }
    }
}
