use image::RgbImage;
use tracing::debug;

use crate::calibration::ConversionFactor;
use crate::consts::AREA_DECIMALS;
use crate::error::{PlanteError, Result};
use crate::labels::LabelMapping;

use super::contours::{BoundingBox, Candidate};
use super::threshold::is_foreground;

/// A detected region re-centered into the shared square crop size.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedRegion {
    pub candidate: Candidate,
    /// Integer center of the detection box.
    pub center: (u32, u32),
    /// Square crop around `center`, clipped to the image.
    pub crop: BoundingBox,
}

/// A fully processed region, in final reading order.
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    /// 1-based position in row-major reading order.
    pub rank: usize,
    pub label: String,
    pub bbox: BoundingBox,
    pub crop: BoundingBox,
    pub center: (u32, u32),
    pub mass: u64,
    /// Pixels inside `crop` with any non-zero channel in the isolated image.
    pub pixel_count: u64,
    /// Real-world surface area, rounded to four decimals.
    pub area: f64,
}

/// Sort candidates by foreground mass, largest first, and keep `max_regions`.
///
/// Equal masses fall back to top-to-bottom, then left-to-right.
pub fn rank_by_mass(mut candidates: Vec<Candidate>, max_regions: usize) -> Vec<Candidate> {
    candidates.sort_by(|a, b| {
        b.mass
            .cmp(&a.mass)
            .then(a.bbox.y.cmp(&b.bbox.y))
            .then(a.bbox.x.cmp(&b.bbox.x))
    });
    candidates.truncate(max_regions);
    candidates
}

/// Re-center every candidate into a square whose side is the longest box
/// side among all candidates.
pub fn normalize_squares(
    candidates: Vec<Candidate>,
    image_width: u32,
    image_height: u32,
) -> Result<Vec<NormalizedRegion>> {
    let side = candidates
        .iter()
        .map(|c| c.bbox.longest_side())
        .max()
        .ok_or(PlanteError::NoRegionsFound)?;
    let half = (side / 2) as i64;
    debug!(side, "Normalizing regions to a common square");

    Ok(candidates
        .into_iter()
        .map(|candidate| {
            let center = candidate.bbox.center();
            let crop = clipped_square(center, half, image_width, image_height);
            NormalizedRegion {
                candidate,
                center,
                crop,
            }
        })
        .collect())
}

/// Square `[c - half, c + half)` on both axes, clipped to the image.
fn clipped_square(center: (u32, u32), half: i64, width: u32, height: u32) -> BoundingBox {
    let clip = |c: u32, limit: u32| -> (u32, u32) {
        let lo = (c as i64 - half).clamp(0, limit as i64) as u32;
        let hi = (c as i64 + half).clamp(0, limit as i64) as u32;
        (lo, hi - lo)
    };
    let (x, w) = clip(center.0, width);
    let (y, h) = clip(center.1, height);
    BoundingBox {
        x,
        y,
        width: w,
        height: h,
    }
}

/// Order regions row-major for a tray with `samples_per_row` samples per row.
///
/// Regions are sorted by vertical center; each consecutive run of
/// `samples_per_row` is one row band and is re-sorted left to right. This
/// relies on every row band holding exactly `samples_per_row` samples.
pub fn order_row_major(regions: &mut [NormalizedRegion], samples_per_row: usize) {
    regions.sort_by_key(|r| r.center.1);
    for row in regions.chunks_mut(samples_per_row.max(1)) {
        row.sort_by_key(|r| r.center.0);
    }
}

/// Count pixels in `crop` with any non-zero channel.
pub fn count_foreground(isolated: &RgbImage, crop: &BoundingBox) -> u64 {
    let x_end = (crop.x + crop.width).min(isolated.width());
    let y_end = (crop.y + crop.height).min(isolated.height());

    let mut count = 0u64;
    for y in crop.y..y_end {
        for x in crop.x..x_end {
            if is_foreground(isolated.get_pixel(x, y)) {
                count += 1;
            }
        }
    }
    count
}

/// Round to the reported number of decimals.
pub fn round_area(value: f64) -> f64 {
    let scale = 10f64.powi(AREA_DECIMALS);
    (value * scale).round() / scale
}

/// Real-world area of `pixel_count` pixels: area scales with the square of
/// the linear conversion factor.
pub fn pixel_area(pixel_count: u64, factor: ConversionFactor) -> f64 {
    round_area(pixel_count as f64 * factor.value().powi(2))
}

/// Assign ranks and labels in the given order and compute each area.
pub fn label_regions(
    ordered: Vec<NormalizedRegion>,
    isolated: &RgbImage,
    mapping: &LabelMapping,
    factor: ConversionFactor,
) -> Result<Vec<Region>> {
    ordered
        .into_iter()
        .enumerate()
        .map(|(i, region)| {
            let rank = i + 1;
            let label = mapping.label(rank)?.to_string();
            let pixel_count = count_foreground(isolated, &region.crop);
            let area = pixel_area(pixel_count, factor);
            debug!(rank, %label, pixel_count, area, "Region labeled");
            Ok(Region {
                rank,
                label,
                bbox: region.candidate.bbox,
                crop: region.crop,
                center: region.center,
                mass: region.candidate.mass,
                pixel_count,
                area,
            })
        })
        .collect()
}
