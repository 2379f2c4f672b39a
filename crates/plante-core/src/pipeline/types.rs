use image::RgbImage;

use crate::detection::Region;
use crate::report::Report;

/// Pipeline processing stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    Loading,
    Thresholding,
    Dilating,
    FindingContours,
    Ranking,
    Labeling,
    RenderingGrid,
    RenderingOverlay,
    Writing,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loading => write!(f, "Loading image"),
            Self::Thresholding => write!(f, "Thresholding colors"),
            Self::Dilating => write!(f, "Dilating mask"),
            Self::FindingContours => write!(f, "Finding contours"),
            Self::Ranking => write!(f, "Ranking regions"),
            Self::Labeling => write!(f, "Labeling regions"),
            Self::RenderingGrid => write!(f, "Rendering grid"),
            Self::RenderingOverlay => write!(f, "Rendering overlay"),
            Self::Writing => write!(f, "Writing output"),
        }
    }
}

/// Everything one extraction run produces.
#[derive(Clone, Debug)]
pub struct ExtractionOutput {
    /// Regions in final rank order.
    pub regions: Vec<Region>,
    /// Input pixels inside the color range, black elsewhere.
    pub isolated: RgbImage,
    pub grid: RgbImage,
    pub overlay: RgbImage,
    pub report: Report,
}

/// Progress reporting for the pipeline.
///
/// Implementors can use this to drive spinners, logging, or any other
/// UI feedback. All methods have default no-op implementations.
pub trait ProgressReporter {
    /// A new pipeline stage has started.
    fn begin_stage(&self, _stage: PipelineStage) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// No-op progress reporter, used when `run_pipeline` delegates.
pub struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
