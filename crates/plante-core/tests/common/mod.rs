use image::{Rgb, RgbImage};
use plante_core::calibration::ConversionFactor;
use plante_core::detection::ExtractionParams;
use plante_core::labels::LabelPreset;

/// Soil-brown background, outside the default HSV range.
pub const SOIL: Rgb<u8> = Rgb([120, 80, 40]);

/// Side of every synthetic sample square.
pub const SQUARE: u32 = 30;

/// Pure green of the given brightness, inside the default HSV range for
/// `value >= 72`.
pub fn green(value: u8) -> Rgb<u8> {
    Rgb([0, value, 0])
}

/// Canvas of `width` x `height` filled with soil.
pub fn soil(width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, SOIL)
}

/// Paint a `SQUARE` x `SQUARE` block with its top-left corner at (x, y).
pub fn paint_square(image: &mut RgbImage, x: u32, y: u32, color: Rgb<u8>) {
    for yy in y..y + SQUARE {
        for xx in x..x + SQUARE {
            image.put_pixel(xx, yy, color);
        }
    }
}

/// Four equally bright squares in one row, left to right.
pub fn four_in_a_row() -> RgbImage {
    let mut image = soil(400, 120);
    for x in [20, 110, 200, 290] {
        paint_square(&mut image, x, 40, green(200));
    }
    image
}

/// Parameters sized for the synthetic images: a small kernel so squares
/// stay separate and a low area threshold.
pub fn small_params(max_regions: usize, rows: u32, columns: u32) -> ExtractionParams {
    ExtractionParams {
        min_area: 100,
        dilation_kernel_size: 5,
        max_regions,
        grid_rows: rows,
        grid_columns: columns,
        samples_per_row: 4,
        label_preset: LabelPreset::Alphabetic,
        ..ExtractionParams::default()
    }
}

pub fn factor(value: f64) -> ConversionFactor {
    ConversionFactor::new(value).unwrap()
}
