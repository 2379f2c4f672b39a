//! Pixel-to-real-world scale calibration.
//!
//! The user picks two points on a scaled-down preview and enters the real
//! distance between them. Points are mapped back to original-image pixels
//! before measuring, so the preview scale never affects the result.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{CalibrationError, Result};
use crate::io::preview::fit_scale;

/// Real-world length per pixel. Always positive and finite.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ConversionFactor(f64);

impl ConversionFactor {
    pub fn new(value: f64) -> std::result::Result<Self, CalibrationError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(CalibrationError::InvalidFactor(value))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for ConversionFactor {
    type Error = CalibrationError;

    fn try_from(value: f64) -> std::result::Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ConversionFactor> for f64 {
    fn from(factor: ConversionFactor) -> Self {
        factor.0
    }
}

/// A point in pixel coordinates (fractional, since clicks may be rescaled).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalibrationPoint {
    pub x: f64,
    pub y: f64,
}

impl CalibrationPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Maps points picked on a scaled preview back to original-image pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayMapping {
    /// Preview size / original size, at most 1.0.
    pub scale: f64,
}

impl DisplayMapping {
    /// Mapping for an image of `width` x `height` shown inside `max_size`.
    pub fn for_display(width: u32, height: u32, max_size: (u32, u32)) -> Self {
        Self {
            scale: fit_scale(width, height, max_size.0, max_size.1),
        }
    }

    /// Points already in original coordinates.
    pub fn identity() -> Self {
        Self { scale: 1.0 }
    }

    pub fn to_original(&self, point: CalibrationPoint) -> CalibrationPoint {
        CalibrationPoint::new(point.x / self.scale, point.y / self.scale)
    }
}

/// Two points in original-image pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: CalibrationPoint,
    pub end: CalibrationPoint,
}

impl Segment {
    pub fn pixel_length(&self) -> f64 {
        pixel_distance(self.start, self.end)
    }

    /// Factor for a known real-world length of this segment.
    pub fn conversion_factor(
        &self,
        real_distance: f64,
    ) -> std::result::Result<ConversionFactor, CalibrationError> {
        compute_conversion_factor(real_distance, self.pixel_length())
    }
}

/// Result of feeding one click into a [`CalibrationSession`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CalibrationProgress {
    /// One point picked; waiting for the second.
    NeedsSecondPoint,
    /// Both points picked; the segment is in original-image pixels.
    Ready(Segment),
}

/// Collects the two clicks of a calibration.
#[derive(Clone, Debug)]
pub struct CalibrationSession {
    mapping: DisplayMapping,
    points: Vec<CalibrationPoint>,
}

impl CalibrationSession {
    pub fn new(mapping: DisplayMapping) -> Self {
        Self {
            mapping,
            points: Vec::with_capacity(2),
        }
    }

    pub fn mapping(&self) -> DisplayMapping {
        self.mapping
    }

    /// Points picked so far, in display coordinates.
    pub fn points(&self) -> &[CalibrationPoint] {
        &self.points
    }

    /// Record a click in display coordinates.
    pub fn add_point(
        &mut self,
        display_point: CalibrationPoint,
    ) -> std::result::Result<CalibrationProgress, CalibrationError> {
        if self.points.len() >= 2 {
            return Err(CalibrationError::TooManyPoints);
        }
        self.points.push(display_point);
        match self.segment() {
            Some(segment) => Ok(CalibrationProgress::Ready(segment)),
            None => Ok(CalibrationProgress::NeedsSecondPoint),
        }
    }

    /// The picked segment in original-image pixels, once both points exist.
    pub fn segment(&self) -> Option<Segment> {
        match self.points.as_slice() {
            [a, b] => Some(Segment {
                start: self.mapping.to_original(*a),
                end: self.mapping.to_original(*b),
            }),
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        self.points.clear();
    }
}

/// Euclidean distance between two points.
pub fn pixel_distance(a: CalibrationPoint, b: CalibrationPoint) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// `real_distance / pixel_distance`, rejecting degenerate inputs instead of
/// producing infinity or NaN.
pub fn compute_conversion_factor(
    real_distance: f64,
    pixel_distance: f64,
) -> std::result::Result<ConversionFactor, CalibrationError> {
    if !pixel_distance.is_finite() || pixel_distance <= 0.0 {
        return Err(CalibrationError::ZeroPixelDistance);
    }
    if !real_distance.is_finite() || real_distance <= 0.0 {
        return Err(CalibrationError::InvalidRealDistance(real_distance));
    }
    let factor = ConversionFactor::new(real_distance / pixel_distance)?;
    info!(
        real_distance,
        pixel_distance,
        factor = factor.value(),
        "Conversion factor computed"
    );
    Ok(factor)
}

/// Parse a user-entered real-world distance.
///
/// Blank input means the prompt was cancelled and yields `Ok(None)`.
pub fn parse_real_distance(input: &str) -> std::result::Result<Option<f64>, CalibrationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| CalibrationError::NotANumber(trimmed.to_string()))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(CalibrationError::InvalidRealDistance(value));
    }
    Ok(Some(value))
}

/// Calibrate from two points given in display coordinates.
pub fn calibrate(
    mapping: DisplayMapping,
    points: &[CalibrationPoint],
    real_distance: f64,
) -> Result<ConversionFactor> {
    let mut session = CalibrationSession::new(mapping);
    for &p in points {
        session.add_point(p)?;
    }
    let segment = session
        .segment()
        .ok_or(CalibrationError::IncompletePoints(points.len()))?;
    Ok(segment.conversion_factor(real_distance)?)
}
