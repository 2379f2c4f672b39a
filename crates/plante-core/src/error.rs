use thiserror::Error;

/// Why a calibration attempt was rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalibrationError {
    #[error("Calibration points are identical (pixel distance is zero)")]
    ZeroPixelDistance,

    #[error("Real-world distance must be a positive number, got {0}")]
    InvalidRealDistance(f64),

    #[error("Real-world distance is not a number: {0:?}")]
    NotANumber(String),

    #[error("Calibration needs exactly two points, got {0}")]
    IncompletePoints(usize),

    #[error("Calibration already has two points; reset before picking again")]
    TooManyPoints,

    #[error("Conversion factor must be positive and finite, got {0}")]
    InvalidFactor(f64),
}

#[derive(Error, Debug)]
pub enum PlanteError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("No image selected")]
    NoImageSelected,

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Calibration error: {0}")]
    Calibration(#[from] CalibrationError),

    #[error("No conversion factor set; calibrate the image scale first")]
    MissingConversionFactor,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Invalid color range: lower {lower:?} exceeds upper {upper:?}")]
    InvalidColorRange { lower: [u8; 3], upper: [u8; 3] },

    #[error("Label mapping covers ranks 1..={covered} but {required} regions were requested")]
    IncompleteLabelMapping { covered: usize, required: usize },

    #[error("Label mapping contains duplicate label {0:?}")]
    DuplicateLabel(String),

    #[error("Label mapping contains an empty label at rank {0}")]
    EmptyLabel(usize),

    #[error("No label for rank {rank}")]
    MissingLabel { rank: usize },

    #[error("Grid of {rows}x{columns} cells cannot hold {regions} regions")]
    GridTooSmall {
        rows: u32,
        columns: u32,
        regions: usize,
    },

    #[error("No regions passed the area threshold")]
    NoRegionsFound,

    #[error("Found {found} regions, expected {expected}")]
    TooFewRegions { found: usize, expected: usize },

    #[error("Font error: {0}")]
    Font(String),

    #[error("Export failed: {0}")]
    Export(String),
}

pub type Result<T> = std::result::Result<T, PlanteError>;
