use ab_glyph::PxScale;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;

use crate::consts::{OVERLAY_FONT_PX, OVERLAY_LABEL_OFFSET, OVERLAY_LINE_THICKNESS};
use crate::detection::{BoundingBox, Region};
use crate::error::Result;

use super::font;

const MARKER: Rgb<u8> = Rgb([255, 0, 0]);

/// Outline `bbox` with a stroke `thickness` pixels wide, centered on its edge.
fn draw_thick_square(canvas: &mut RgbImage, bbox: &BoundingBox, thickness: u32, color: Rgb<u8>) {
    let half = thickness as i32 / 2;
    for i in 0..thickness as i32 {
        let offset = i - half;
        let w = bbox.width as i32 + 2 * offset;
        let h = bbox.height as i32 + 2 * offset;
        if w <= 0 || h <= 0 {
            continue;
        }
        let rect = Rect::at(bbox.x as i32 - offset, bbox.y as i32 - offset).of_size(w as u32, h as u32);
        draw_hollow_rect_mut(canvas, rect, color);
    }
}

/// Draw each region's normalized square and label on a copy of the
/// isolated-color image.
pub fn render_overlay(isolated: &RgbImage, regions: &[Region]) -> Result<RgbImage> {
    let font = font()?;
    let scale = PxScale::from(OVERLAY_FONT_PX);
    let mut canvas = isolated.clone();

    for region in regions {
        draw_thick_square(&mut canvas, &region.crop, OVERLAY_LINE_THICKNESS, MARKER);

        let (_, text_h) = text_size(scale, &font, &region.label);
        let y = region.crop.y as i32 - OVERLAY_LABEL_OFFSET - text_h as i32;
        draw_text_mut(&mut canvas, MARKER, region.crop.x as i32, y, scale, &font, &region.label);
    }

    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thick_square_paints_edges_only() {
        let mut canvas = RgbImage::new(30, 30);
        let bbox = BoundingBox {
            x: 10,
            y: 10,
            width: 10,
            height: 10,
        };
        draw_thick_square(&mut canvas, &bbox, 3, MARKER);
        assert_eq!(canvas.get_pixel(10, 15), &MARKER);
        assert_eq!(canvas.get_pixel(9, 15), &MARKER);
        assert_eq!(canvas.get_pixel(15, 15), &Rgb([0, 0, 0]));
    }
}
