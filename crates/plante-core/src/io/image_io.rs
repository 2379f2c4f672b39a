use std::path::Path;

use image::{ImageFormat, RgbImage};
use tracing::debug;

use crate::error::{PlanteError, Result};

/// Load any supported raster file as 8-bit RGB.
pub fn load_rgb(path: &Path) -> Result<RgbImage> {
    let img = image::open(path)?.to_rgb8();
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return Err(PlanteError::InvalidDimensions {
            width: w,
            height: h,
        });
    }
    debug!(path = %path.display(), width = w, height = h, "Image loaded");
    Ok(img)
}

/// Save an RGB image as PNG.
pub fn save_png(image: &RgbImage, path: &Path) -> Result<()> {
    image.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Save an RGB image, choosing the format from the file extension (PNG if unknown).
pub fn save_image(image: &RgbImage, path: &Path) -> Result<()> {
    match ImageFormat::from_path(path) {
        Ok(format) => image.save_with_format(path, format)?,
        Err(_) => save_png(image, path)?,
    }
    Ok(())
}

