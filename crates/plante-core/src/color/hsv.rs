use image::Rgb;
use palette::{FromColor, Hsv, Srgb};
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_LOWER_HSV, DEFAULT_UPPER_HSV, HUE_MAX};
use crate::error::{PlanteError, Result};

/// Convert an 8-bit RGB pixel to 8-bit HSV.
///
/// Hue is stored as degrees / 2 (0..=179) so it fits a byte; saturation and
/// value are scaled to 0..=255.
pub fn rgb_to_hsv(pixel: Rgb<u8>) -> [u8; 3] {
    let [r, g, b] = pixel.0;
    let srgb: Srgb<f32> = Srgb::new(r, g, b).into_format();
    let hsv: Hsv = Hsv::from_color(srgb);

    let hue = (hsv.hue.into_positive_degrees() / 2.0).round() as u32 % (HUE_MAX as u32 + 1);
    let saturation = (hsv.saturation * 255.0).round().clamp(0.0, 255.0) as u8;
    let value = (hsv.value * 255.0).round().clamp(0.0, 255.0) as u8;

    [hue as u8, saturation, value]
}

/// Inclusive lower/upper bound pair in 8-bit HSV.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvRange {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl Default for HsvRange {
    fn default() -> Self {
        Self {
            lower: DEFAULT_LOWER_HSV,
            upper: DEFAULT_UPPER_HSV,
        }
    }
}

impl HsvRange {
    pub fn new(lower: [u8; 3], upper: [u8; 3]) -> Result<Self> {
        let range = Self { lower, upper };
        range.validate()?;
        Ok(range)
    }

    /// Every lower component must not exceed its upper component.
    pub fn validate(&self) -> Result<()> {
        if self.lower.iter().zip(&self.upper).any(|(lo, hi)| lo > hi) {
            return Err(PlanteError::InvalidColorRange {
                lower: self.lower,
                upper: self.upper,
            });
        }
        Ok(())
    }

    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        (0..3).all(|i| hsv[i] >= self.lower[i] && hsv[i] <= self.upper[i])
    }

    /// Test an RGB pixel against the range.
    pub fn matches(&self, pixel: Rgb<u8>) -> bool {
        self.contains(rgb_to_hsv(pixel))
    }
}
