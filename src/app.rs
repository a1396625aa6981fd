use crate::canvas::{CanvasStyle, CropCanvas};
use crate::editor::CropEditor;
use crate::image_loader::{is_supported_image, SUPPORTED_EXTENSIONS};
use eframe::egui::{self, Color32, RichText, TextureHandle};
use std::path::PathBuf;
use std::time::{Duration, Instant};

const STATUS_TIMEOUT: Duration = Duration::from_secs(4);

pub struct CoverCropApp {
    // Target output size; the crop's aspect ratio follows from it
    target_width: u32,
    target_height: u32,

    // Active session
    editor: Option<CropEditor>,
    preview_texture: Option<TextureHandle>,
    heading: String,

    canvas: CropCanvas,

    // Last confirmed crop
    result: Option<PathBuf>,

    status_message: Option<(String, Instant)>,
}

impl CoverCropApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        configure_style(&cc.egui_ctx);

        let mut app = Self {
            target_width: 185,
            target_height: 275,
            editor: None,
            preview_texture: None,
            heading: String::new(),
            canvas: CropCanvas::new(CanvasStyle::default()),
            result: None,
            status_message: None,
        };

        // A path on the command line opens straight into a session
        let args: Vec<String> = std::env::args().collect();
        if args.len() > 1 {
            let path = PathBuf::from(&args[1]);
            if path.is_file() && is_supported_image(&path) {
                app.open_editor(&cc.egui_ctx, path);
            }
        }

        app
    }

    fn open_editor(&mut self, ctx: &egui::Context, path: PathBuf) {
        match CropEditor::open(&path, self.target_width, self.target_height) {
            Ok(editor) => {
                self.heading = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "Adjust image".to_string());
                self.preview_texture = Some(load_preview_texture(ctx, &editor));
                self.editor = Some(editor);
                self.result = None;
            }
            Err(e) => {
                log::error!("failed to open {}: {}", path.display(), e);
                self.show_status(&e.user_message());
            }
        }
    }

    fn apply(&mut self) {
        let Some(editor) = &self.editor else { return };
        match editor.export() {
            Ok(path) => {
                self.show_status(&format!("Saved crop to {}", path.display()));
                self.result = Some(path);
                self.close_editor();
            }
            Err(e) => {
                log::error!("export failed: {}", e);
                self.show_status(&e.user_message());
            }
        }
    }

    fn cancel(&mut self) {
        self.close_editor();
        self.show_status("Crop cancelled");
    }

    fn close_editor(&mut self) {
        self.editor = None;
        self.preview_texture = None;
        self.heading.clear();
    }

    fn show_status(&mut self, message: &str) {
        self.status_message = Some((message.to_string(), Instant::now()));
    }

    fn pick_source(&mut self, ctx: &egui::Context) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Image", SUPPORTED_EXTENSIONS)
            .pick_file()
        {
            self.open_editor(ctx, path);
        }
    }
}

impl eframe::App for CoverCropApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Dropped files open a new session
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if let Some(path) = dropped.into_iter().find_map(|f| f.path) {
            self.open_editor(ctx, path);
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Open image…").clicked() {
                    self.pick_source(ctx);
                }
                ui.separator();
                ui.label("Output size:");
                // Changing the target mid-session would break the ratio lock,
                // so the controls freeze while an editor is open
                let editing = self.editor.is_some();
                ui.add_enabled(
                    !editing,
                    egui::DragValue::new(&mut self.target_width).range(16..=4096),
                );
                ui.label("x");
                ui.add_enabled(
                    !editing,
                    egui::DragValue::new(&mut self.target_height).range(16..=4096),
                );
                ui.label("px");
            });
        });

        let expired = self
            .status_message
            .as_ref()
            .is_some_and(|(_, shown_at)| shown_at.elapsed() >= STATUS_TIMEOUT);
        if expired {
            self.status_message = None;
        }

        egui::TopBottomPanel::bottom("statusbar").show(ctx, |ui| {
            if let Some((message, _)) = &self.status_message {
                ui.label(message);
                ctx.request_repaint_after(Duration::from_millis(250));
            } else {
                ui.label(
                    RichText::new("Drop an image here or use Open image…")
                        .color(Color32::from_gray(110)),
                );
            }
        });

        #[derive(Clone, Copy)]
        enum EditorAction {
            Apply,
            Cancel,
        }
        let mut action: Option<EditorAction> = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            if let (Some(editor), Some(texture)) = (&mut self.editor, &self.preview_texture) {
                let canvas = &self.canvas;
                let heading = &self.heading;
                ui.vertical_centered(|ui| {
                    ui.heading(heading.as_str());
                    ui.label(
                        RichText::new("Drag to move · corners to resize")
                            .color(Color32::from_gray(140)),
                    );
                    ui.add_space(8.0);
                    canvas.show(ui, texture, editor);
                    ui.add_space(10.0);

                    ui.horizontal(|ui| {
                        let buttons_width = 180.0;
                        ui.add_space((ui.available_width() - buttons_width).max(0.0) / 2.0);
                        if ui.button("Cancel").clicked() {
                            action = Some(EditorAction::Cancel);
                        }
                        if ui.button(RichText::new("Apply").strong()).clicked() {
                            action = Some(EditorAction::Apply);
                        }
                    });
                });
            } else {
                ui.vertical_centered(|ui| {
                    ui.add_space(ui.available_height() * 0.35);
                    ui.heading("CoverCrop");
                    ui.label("Crop cover art to an exact pixel size.");
                    if let Some(result) = &self.result {
                        ui.add_space(12.0);
                        ui.label(format!("Last crop: {}", result.display()));
                    }
                });
            }
        });

        match action {
            Some(EditorAction::Apply) => self.apply(),
            Some(EditorAction::Cancel) => self.cancel(),
            None => {}
        }
    }
}

fn load_preview_texture(ctx: &egui::Context, editor: &CropEditor) -> TextureHandle {
    let preview = editor.preview().to_rgba8();
    let size = [preview.width() as usize, preview.height() as usize];
    let pixels = preview.as_flat_samples();
    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_slice());
    ctx.load_texture("crop-preview", color_image, egui::TextureOptions::LINEAR)
}

fn configure_style(ctx: &egui::Context) {
    ctx.set_visuals(egui::Visuals::dark());
    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(10.0, 8.0);
    style.spacing.button_padding = egui::vec2(16.0, 7.0);
    ctx.set_style(style);
}
