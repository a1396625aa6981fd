use crate::errors::Result;
use crate::export;
use crate::geometry::{self, Corner, PreviewTransform};
use crate::image_loader;
use crate::interaction::CropInteraction;
use egui::{Pos2, Rect};
use image::DynamicImage;
use std::path::{Path, PathBuf};

/// One crop session over a single source image.
///
/// Owns the decoded source for its lifetime and never mutates it; all
/// interaction happens on the downscaled preview, and only `export`
/// touches full-resolution pixels again. Construction fails fast when
/// the source cannot be read, so an editor in hand is always croppable.
#[derive(Debug)]
pub struct CropEditor {
    source: DynamicImage,
    source_path: PathBuf,
    target_width: u32,
    target_height: u32,
    transform: PreviewTransform,
    preview: DynamicImage,
    crop: Rect,
    interaction: CropInteraction,
}

impl CropEditor {
    pub fn open(path: &Path, target_width: u32, target_height: u32) -> Result<Self> {
        Self::open_with_max_display(path, target_width, target_height, geometry::MAX_DISPLAY)
    }

    pub fn open_with_max_display(
        path: &Path,
        target_width: u32,
        target_height: u32,
        max_display: f32,
    ) -> Result<Self> {
        let source = image_loader::load_image(path)?;
        let transform = PreviewTransform::fit(source.width(), source.height(), max_display);
        let preview = image_loader::build_preview(&source, &transform);

        let ratio = target_width as f32 / target_height as f32;
        let crop = geometry::initial_crop(transform.display_size, ratio);
        let interaction = CropInteraction::new(ratio, transform.display_rect());

        log::debug!(
            "crop editor opened: {} ({}x{}), preview scale {}",
            path.display(),
            source.width(),
            source.height(),
            transform.scale
        );

        Ok(Self {
            source,
            source_path: path.to_path_buf(),
            target_width,
            target_height,
            transform,
            preview,
            crop,
            interaction,
        })
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn target_size(&self) -> (u32, u32) {
        (self.target_width, self.target_height)
    }

    pub fn transform(&self) -> &PreviewTransform {
        &self.transform
    }

    pub fn preview(&self) -> &DynamicImage {
        &self.preview
    }

    pub fn crop_rect(&self) -> Rect {
        self.crop
    }

    pub fn is_dragging(&self) -> bool {
        self.interaction.is_active()
    }

    pub fn is_moving(&self) -> bool {
        self.interaction.is_moving()
    }

    pub fn active_corner(&self) -> Option<Corner> {
        self.interaction.active_corner()
    }

    // Pointer entry points, in display coordinates.

    pub fn pointer_down(&mut self, pos: Pos2) {
        self.interaction.pointer_down(pos, self.crop);
    }

    pub fn pointer_move(&mut self, pos: Pos2) {
        self.crop = self.interaction.pointer_move(pos, self.crop);
    }

    pub fn pointer_up(&mut self) {
        self.interaction.pointer_up();
    }

    /// Confirm the crop: write the selected region, resampled to the target
    /// size, into the application cache and return the new file's path.
    pub fn export(&self) -> Result<PathBuf> {
        let dir = export::default_crop_dir()?;
        self.export_to(&dir)
    }

    pub fn export_to(&self, out_dir: &Path) -> Result<PathBuf> {
        export::export_crop(
            &self.source,
            &self.transform,
            self.crop,
            self.target_width,
            self.target_height,
            out_dir,
        )
    }
}
