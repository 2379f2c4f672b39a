pub mod calibration;
pub mod color;
pub mod consts;
pub mod detection;
pub mod error;
pub mod io;
pub mod labels;
pub mod pipeline;
pub mod render;
pub mod report;
pub mod session;
