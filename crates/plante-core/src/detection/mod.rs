pub mod config;
pub mod contours;
pub mod morphology;
pub mod regions;
pub mod threshold;

pub use config::ExtractionParams;
pub use contours::{BoundingBox, Candidate};
pub use regions::{NormalizedRegion, Region};
