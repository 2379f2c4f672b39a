use image::imageops;
use image::{GrayImage, RgbImage};
use imageproc::contours::{find_contours, BorderType, Contour};
use imageproc::geometry::contour_area;
use imageproc::point::Point;
use ndarray::Array2;
use tracing::debug;

use super::threshold::mask_to_gray;

/// Axis-aligned bounding box in image pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    /// Integer center, `(x + w / 2, y + h / 2)`.
    pub fn center(&self) -> (u32, u32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    pub fn longest_side(&self) -> u32 {
        self.width.max(self.height)
    }

    /// Smallest box containing all contour points.
    pub fn of_contour(contour: &Contour<i32>) -> Option<Self> {
        let first = contour.points.first()?;
        let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.x, first.x, first.y, first.y);
        for p in &contour.points[1..] {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }
        Some(Self {
            x: min_x.max(0) as u32,
            y: min_y.max(0) as u32,
            width: (max_x - min_x + 1) as u32,
            height: (max_y - min_y + 1) as u32,
        })
    }
}

/// A connected foreground blob that survived the area filter.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate {
    pub bbox: BoundingBox,
    /// Polygon area enclosed by the outer contour.
    pub contour_area: f64,
    /// Sum of all channel values of the isolated image inside `bbox`.
    pub mass: u64,
}

/// Outer contours of top-level foreground components.
///
/// Islands nested inside holes are skipped, matching an "external only"
/// retrieval mode. The mask is traced with a one pixel background border so
/// blobs touching the image edge are still classified as outer borders.
pub fn external_contours(mask: &Array2<bool>) -> Vec<Contour<i32>> {
    let gray = mask_to_gray(mask);
    let mut padded = GrayImage::new(gray.width() + 2, gray.height() + 2);
    imageops::replace(&mut padded, &gray, 1, 1);

    find_contours::<i32>(&padded)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .map(|c| {
            let points = c.points.iter().map(|p| Point::new(p.x - 1, p.y - 1)).collect();
            Contour::new(points, c.border_type, c.parent)
        })
        .collect()
}

/// Find foreground blobs in `dilated` whose contour area exceeds `min_area`,
/// and weigh each one by the foreground mass of `isolated` inside its box.
pub fn find_candidates(dilated: &Array2<bool>, isolated: &RgbImage, min_area: f64) -> Vec<Candidate> {
    let contours = external_contours(dilated);
    let total = contours.len();

    let candidates: Vec<Candidate> = contours
        .iter()
        .filter_map(|contour| {
            let area = contour_area(&contour.points);
            if area <= min_area {
                return None;
            }
            let bbox = BoundingBox::of_contour(contour)?;
            Some(Candidate {
                bbox,
                contour_area: area,
                mass: box_mass(isolated, &bbox),
            })
        })
        .collect();

    debug!(
        contours = total,
        kept = candidates.len(),
        min_area,
        "Contour area filter applied"
    );
    candidates
}

/// Sum of every channel value inside the box, clipped to the image.
pub fn box_mass(image: &RgbImage, bbox: &BoundingBox) -> u64 {
    let x_end = (bbox.x + bbox.width).min(image.width());
    let y_end = (bbox.y + bbox.height).min(image.height());

    let mut sum = 0u64;
    for y in bbox.y..y_end {
        for x in bbox.x..x_end {
            sum += image.get_pixel(x, y).0.iter().map(|&c| c as u64).sum::<u64>();
        }
    }
    sum
}
