//! Visualizations of the extracted regions.

pub mod grid;
pub mod overlay;

use ab_glyph::{FontRef, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};

use crate::error::{PlanteError, Result};

pub use grid::render_grid;
pub use overlay::render_overlay;

static FONT_DATA: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

/// The embedded caption font.
pub fn font() -> Result<FontRef<'static>> {
    FontRef::try_from_slice(FONT_DATA).map_err(|e| PlanteError::Font(e.to_string()))
}

/// Draw `text` horizontally centered on `center_x`, top edge at `y`.
pub(crate) fn draw_centered_text(
    canvas: &mut RgbImage,
    color: Rgb<u8>,
    center_x: i32,
    y: i32,
    scale: PxScale,
    font: &FontRef<'_>,
    text: &str,
) {
    let (w, _) = text_size(scale, font, text);
    draw_text_mut(canvas, color, center_x - w as i32 / 2, y, scale, font, text);
}
