use image::imageops::{self, FilterType};
use image::RgbImage;

/// Scale that fits `width` x `height` inside `max_width` x `max_height`,
/// capped at 1.0 (never upscale).
pub fn fit_scale(width: u32, height: u32, max_width: u32, max_height: u32) -> f64 {
    if width == 0 || height == 0 {
        return 1.0;
    }
    let scale = (max_width as f64 / width as f64).min(max_height as f64 / height as f64);
    scale.min(1.0)
}

/// Dimensions after applying [`fit_scale`], truncated and at least 1 pixel.
///
/// The limiting axis lands exactly on the box edge.
pub fn fitted_dimensions(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if fit_scale(width, height, max_width, max_height) >= 1.0 {
        return (width, height);
    }
    let scale_w = max_width as f64 / width as f64;
    let scale_h = max_height as f64 / height as f64;
    let shrink = |len: u32, scale: f64| (((len as f64 * scale) + 1e-9) as u32).max(1);

    if scale_w <= scale_h {
        (max_width.max(1), shrink(height, scale_w))
    } else {
        (shrink(width, scale_h), max_height.max(1))
    }
}

/// Copy of `image` scaled down to fit inside the box, preserving aspect ratio.
///
/// Images that already fit are returned unchanged.
pub fn fit_within(image: &RgbImage, max_width: u32, max_height: u32) -> RgbImage {
    let (w, h) = image.dimensions();
    let (new_w, new_h) = fitted_dimensions(w, h, max_width, max_height);
    if (new_w, new_h) == (w, h) {
        return image.clone();
    }
    imageops::resize(image, new_w, new_h, FilterType::CatmullRom)
}
