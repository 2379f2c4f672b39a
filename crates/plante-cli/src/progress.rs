use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use plante_core::pipeline::{PipelineStage, ProgressReporter};

/// Spinner showing the current pipeline stage.
pub struct SpinnerReporter {
    pb: ProgressBar,
}

impl SpinnerReporter {
    pub fn new() -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg:24} {elapsed:.dim}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        Self { pb }
    }

    pub fn finish(&self, message: &'static str) {
        self.pb.finish_with_message(message);
    }

    pub fn abandon(&self) {
        self.pb.abandon();
    }
}

impl ProgressReporter for SpinnerReporter {
    fn begin_stage(&self, stage: PipelineStage) {
        self.pb.set_message(stage.to_string());
    }
}
