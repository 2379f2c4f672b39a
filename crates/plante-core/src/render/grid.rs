use ab_glyph::PxScale;
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};

use crate::consts::{GRID_CAPTION_HEIGHT, GRID_CELL_SIZE, GRID_FONT_PX, GRID_PADDING};
use crate::detection::Region;
use crate::error::Result;
use crate::report::area_with_unit;

use super::{draw_centered_text, font};

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const CAPTION: Rgb<u8> = Rgb([0, 0, 0]);

/// Pixel size of a `rows` x `columns` grid canvas.
pub fn grid_dimensions(rows: u32, columns: u32) -> (u32, u32) {
    let width = columns * (GRID_CELL_SIZE + GRID_PADDING) + GRID_PADDING;
    let height = rows * (GRID_CAPTION_HEIGHT + GRID_CELL_SIZE + GRID_PADDING) + GRID_PADDING;
    (width, height)
}

/// Top-left corner of cell `index` (row-major), caption band included.
fn cell_origin(index: usize, columns: u32) -> (u32, u32) {
    let row = index as u32 / columns;
    let col = index as u32 % columns;
    (
        GRID_PADDING + col * (GRID_CELL_SIZE + GRID_PADDING),
        GRID_PADDING + row * (GRID_CAPTION_HEIGHT + GRID_CELL_SIZE + GRID_PADDING),
    )
}

/// Lay out every region's crop in a `rows` x `columns` grid, row-major, each
/// under a caption with its label and area. Unused cells stay blank.
pub fn render_grid(
    isolated: &RgbImage,
    regions: &[Region],
    rows: u32,
    columns: u32,
    unit: &str,
) -> Result<RgbImage> {
    let font = font()?;
    let scale = PxScale::from(GRID_FONT_PX);
    let (width, height) = grid_dimensions(rows, columns);
    let mut canvas = RgbImage::from_pixel(width, height, BACKGROUND);
    let capacity = rows as usize * columns as usize;

    for (index, region) in regions.iter().take(capacity).enumerate() {
        let (x0, y0) = cell_origin(index, columns);
        let center_x = (x0 + GRID_CELL_SIZE / 2) as i32;

        draw_centered_text(&mut canvas, CAPTION, center_x, y0 as i32, scale, &font, &region.label);
        let area_text = format!("Area: {}", area_with_unit(region.area, unit));
        let second_line = y0 as i32 + (GRID_CAPTION_HEIGHT / 2) as i32;
        draw_centered_text(&mut canvas, CAPTION, center_x, second_line, scale, &font, &area_text);

        if let Some(thumb) = thumbnail(isolated, region) {
            let x = x0 + (GRID_CELL_SIZE - thumb.width()) / 2;
            let y = y0 + GRID_CAPTION_HEIGHT + (GRID_CELL_SIZE - thumb.height()) / 2;
            imageops::replace(&mut canvas, &thumb, x as i64, y as i64);
        }
    }

    Ok(canvas)
}

/// The region's crop scaled to fill a grid cell, keeping its aspect ratio.
fn thumbnail(isolated: &RgbImage, region: &Region) -> Option<RgbImage> {
    let crop = region.crop;
    if crop.width == 0 || crop.height == 0 {
        return None;
    }
    let sub = imageops::crop_imm(isolated, crop.x, crop.y, crop.width, crop.height).to_image();
    let scale = (GRID_CELL_SIZE as f64 / crop.width as f64).min(GRID_CELL_SIZE as f64 / crop.height as f64);
    let w = ((crop.width as f64 * scale) as u32).clamp(1, GRID_CELL_SIZE);
    let h = ((crop.height as f64 * scale) as u32).clamp(1, GRID_CELL_SIZE);
    Some(imageops::resize(&sub, w, h, FilterType::CatmullRom))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_are_laid_out_row_major() {
        assert_eq!(cell_origin(0, 4), (GRID_PADDING, GRID_PADDING));
        let (x1, y1) = cell_origin(1, 4);
        assert!(x1 > GRID_PADDING);
        assert_eq!(y1, GRID_PADDING);
        let (x4, y4) = cell_origin(4, 4);
        assert_eq!(x4, GRID_PADDING);
        assert!(y4 > GRID_PADDING);
    }

    #[test]
    fn canvas_grows_with_grid_shape() {
        let (w1, h1) = grid_dimensions(1, 1);
        let (w2, h2) = grid_dimensions(6, 4);
        assert!(w2 > w1 && h2 > h1);
    }
}
