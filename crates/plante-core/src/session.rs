//! Explicit working state of one measuring session.

use std::path::{Path, PathBuf};

use image::RgbImage;
use tracing::info;

use crate::calibration::{calibrate, CalibrationPoint, ConversionFactor, DisplayMapping};
use crate::detection::ExtractionParams;
use crate::error::{PlanteError, Result};
use crate::io::image_io::load_rgb;
use crate::pipeline::{run_extraction, ExtractionOutput, ProgressReporter};

/// Selected image, calibrated scale and extraction parameters.
///
/// Every change returns a new value; a failed change leaves the caller's
/// session as it was.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    image_path: Option<PathBuf>,
    conversion_factor: Option<ConversionFactor>,
    params: ExtractionParams,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn image_path(&self) -> Option<&Path> {
        self.image_path.as_deref()
    }

    pub fn conversion_factor(&self) -> Option<ConversionFactor> {
        self.conversion_factor
    }

    pub fn params(&self) -> &ExtractionParams {
        &self.params
    }

    pub fn with_image(self, path: impl Into<PathBuf>) -> Self {
        Self {
            image_path: Some(path.into()),
            ..self
        }
    }

    pub fn with_conversion_factor(self, factor: ConversionFactor) -> Self {
        Self {
            conversion_factor: Some(factor),
            ..self
        }
    }

    /// Replace the parameters after validating them.
    pub fn with_params(self, params: ExtractionParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params, ..self })
    }

    /// Derive the conversion factor from two points picked on a display
    /// described by `mapping`.
    pub fn calibrate(
        &self,
        mapping: DisplayMapping,
        points: &[CalibrationPoint],
        real_distance: f64,
    ) -> Result<Self> {
        let factor = calibrate(mapping, points, real_distance)?;
        info!(factor = factor.value(), "Session calibrated");
        Ok(self.clone().with_conversion_factor(factor))
    }

    /// Load the selected image.
    pub fn load_image(&self) -> Result<RgbImage> {
        let path = self.image_path().ok_or(PlanteError::NoImageSelected)?;
        load_rgb(path)
    }

    /// Recompute every region of the selected image from scratch.
    pub fn process(&self, reporter: &dyn ProgressReporter) -> Result<ExtractionOutput> {
        let image = self.load_image()?;
        run_extraction(&image, &self.params, self.conversion_factor, reporter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::NoOpReporter;

    #[test]
    fn failed_calibration_keeps_previous_factor() {
        let factor = ConversionFactor::new(0.5).unwrap();
        let session = Session::new().with_conversion_factor(factor);
        let same = CalibrationPoint::new(3.0, 4.0);
        let result = session.calibrate(DisplayMapping::identity(), &[same, same], 10.0);
        assert!(result.is_err());
        assert_eq!(session.conversion_factor(), Some(factor));
    }

    #[test]
    fn calibration_sets_factor() {
        let session = Session::new()
            .calibrate(
                DisplayMapping::identity(),
                &[CalibrationPoint::new(0.0, 0.0), CalibrationPoint::new(3.0, 4.0)],
                10.0,
            )
            .unwrap();
        assert_eq!(session.conversion_factor().map(|f| f.value()), Some(2.0));
    }

    #[test]
    fn processing_needs_an_image() {
        let err = Session::new().process(&NoOpReporter).unwrap_err();
        assert!(matches!(err, PlanteError::NoImageSelected));
    }

    #[test]
    fn invalid_params_are_rejected() {
        let params = ExtractionParams {
            max_regions: 0,
            ..ExtractionParams::default()
        };
        assert!(Session::new().with_params(params).is_err());
    }
}
