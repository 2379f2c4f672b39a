use image::{GrayImage, Luma, Rgb, RgbImage};
use ndarray::Array2;

use crate::color::HsvRange;

/// Threshold an RGB image by an HSV range.
///
/// Returns a mask of shape (height, width); `true` marks foreground pixels.
pub fn hsv_mask(image: &RgbImage, range: &HsvRange) -> Array2<bool> {
    let (w, h) = image.dimensions();
    let mut mask = Array2::from_elem((h as usize, w as usize), false);

    for (x, y, pixel) in image.enumerate_pixels() {
        if range.matches(*pixel) {
            mask[[y as usize, x as usize]] = true;
        }
    }

    mask
}

/// Keep the pixels selected by `mask`; everything else becomes black.
pub fn isolate(image: &RgbImage, mask: &Array2<bool>) -> RgbImage {
    let (w, h) = image.dimensions();
    let mut out = RgbImage::new(w, h);

    for (x, y, pixel) in image.enumerate_pixels() {
        if mask[[y as usize, x as usize]] {
            out.put_pixel(x, y, *pixel);
        }
    }

    out
}

/// Fraction of pixels set in the mask.
pub fn coverage(mask: &Array2<bool>) -> f64 {
    if mask.is_empty() {
        return 0.0;
    }
    mask.iter().filter(|&&v| v).count() as f64 / mask.len() as f64
}

/// Render a boolean mask as a 0/255 grayscale image.
pub fn mask_to_gray(mask: &Array2<bool>) -> GrayImage {
    let (h, w) = mask.dim();
    GrayImage::from_fn(w as u32, h as u32, |x, y| {
        if mask[[y as usize, x as usize]] {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

/// True if any channel of the pixel is non-zero.
pub fn is_foreground(pixel: &Rgb<u8>) -> bool {
    pixel.0.iter().any(|&c| c != 0)
}
