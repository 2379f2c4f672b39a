pub mod config;
mod orchestrator;
mod types;

pub use orchestrator::{
    run_extraction, run_pipeline, run_pipeline_reported, GRID_FILE_NAME, OVERLAY_FILE_NAME,
};
pub use types::{ExtractionOutput, NoOpReporter, PipelineStage, ProgressReporter};
