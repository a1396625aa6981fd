use crate::errors::{CropError, Result};
use crate::geometry::PreviewTransform;
use directories::ProjectDirs;
use image::imageops::FilterType;
use image::DynamicImage;
use std::path::{Path, PathBuf};

/// Application-owned scratch directory for finished crops.
pub fn default_crop_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "covercrop").ok_or_else(|| CropError::CacheDirError {
        path: PathBuf::from("covercrop"),
        message: "no home directory available".to_string(),
    })?;
    Ok(dirs.cache_dir().join("crops"))
}

/// Extract the crop region at full resolution, resample it to exactly
/// `target_width x target_height` and write it as a PNG at a fresh,
/// collision-free path under `out_dir`.
///
/// This is the only place full-resolution pixels are touched; everything
/// up to here worked on the preview.
pub fn export_crop(
    source: &DynamicImage,
    transform: &PreviewTransform,
    crop: egui::Rect,
    target_width: u32,
    target_height: u32,
    out_dir: &Path,
) -> Result<PathBuf> {
    let (x, y, w, h) = transform.to_source_bounds(crop, source.width(), source.height());
    log::debug!(
        "exporting crop: display {:?} -> source {}x{}+{}+{}",
        crop,
        w,
        h,
        x,
        y
    );

    let cropped = source
        .crop_imm(x, y, w, h)
        .resize_exact(target_width, target_height, FilterType::Lanczos3);

    std::fs::create_dir_all(out_dir).map_err(|e| CropError::CacheDirError {
        path: out_dir.to_path_buf(),
        message: e.to_string(),
    })?;

    let path = reserve_output_path(out_dir)?;
    if let Err(e) = cropped.save(&path) {
        // Never leave a half-written file behind
        let _ = std::fs::remove_file(&path);
        return Err(CropError::ExportError {
            path,
            message: e.to_string(),
        });
    }

    log::info!(
        "wrote {}x{} crop to {}",
        target_width,
        target_height,
        path.display()
    );
    Ok(path)
}

/// Reserve a unique `crop-*.png` path inside `out_dir`.
fn reserve_output_path(out_dir: &Path) -> Result<PathBuf> {
    let file = tempfile::Builder::new()
        .prefix("crop-")
        .suffix(".png")
        .tempfile_in(out_dir)
        .map_err(|e| CropError::CacheDirError {
            path: out_dir.to_path_buf(),
            message: e.to_string(),
        })?;
    let (handle, path) = file.keep().map_err(|e| CropError::ExportError {
        path: out_dir.to_path_buf(),
        message: e.to_string(),
    })?;
    drop(handle);
    Ok(path)
}
