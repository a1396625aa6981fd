use crate::errors::{CropError, Result};
use crate::geometry::PreviewTransform;
use image::imageops::FilterType;
use image::DynamicImage;
use std::path::Path;

pub const SUPPORTED_EXTENSIONS: &[&str] =
    &["jpg", "jpeg", "png", "gif", "bmp", "tiff", "tif", "webp"];

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SUPPORTED_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Decode a source image, failing fast so the editor never opens on a
/// path it cannot crop.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    if !path.exists() {
        return Err(CropError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    if !is_supported_image(path) {
        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("unknown")
            .to_string();
        return Err(CropError::UnsupportedFormat { format });
    }

    image::open(path).map_err(|e| CropError::ImageLoadError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Produce the downscaled preview raster for on-screen interaction.
/// At unit scale the source is shown as-is.
pub fn build_preview(image: &DynamicImage, transform: &PreviewTransform) -> DynamicImage {
    if transform.scale >= 1.0 {
        return image.clone();
    }
    image.resize_exact(
        transform.display_size.x as u32,
        transform.display_size.y as u32,
        FilterType::Triangle,
    )
}
