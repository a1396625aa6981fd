#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod canvas;
mod editor;
mod errors;
mod export;
mod geometry;
mod image_loader;
mod interaction;
mod logging;
#[cfg(test)]
mod tests;

use app::CoverCropApp;
use eframe::egui;

fn main() -> eframe::Result<()> {
    let verbose = std::env::args().any(|a| a == "--verbose");
    logging::init(verbose);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([760.0, 820.0])
            .with_min_inner_size([680.0, 720.0])
            .with_icon(load_icon())
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "CoverCrop",
        native_options,
        Box::new(|cc| Ok(Box::new(CoverCropApp::new(cc)))),
    )
}

/// Programmatic window icon: a crop frame with bright corner handles.
fn load_icon() -> egui::IconData {
    let size = 64usize;
    let mut rgba = vec![0u8; size * size * 4];

    let frame = (10, 53); // inset frame bounds
    let accent = (99u8, 179u8, 237u8);

    for y in 0..size {
        for x in 0..size {
            let idx = (y * size + x) * 4;
            let on_frame_x = (x == frame.0 || x == frame.1) && (frame.0..=frame.1).contains(&y);
            let on_frame_y = (y == frame.0 || y == frame.1) && (frame.0..=frame.1).contains(&x);
            let near_corner = {
                let dx = (x as i32 - frame.0 as i32).abs().min((x as i32 - frame.1 as i32).abs());
                let dy = (y as i32 - frame.0 as i32).abs().min((y as i32 - frame.1 as i32).abs());
                dx <= 4 && dy <= 4
            };

            if near_corner {
                rgba[idx] = accent.0;
                rgba[idx + 1] = accent.1;
                rgba[idx + 2] = accent.2;
                rgba[idx + 3] = 255;
            } else if on_frame_x || on_frame_y {
                rgba[idx] = accent.0;
                rgba[idx + 1] = accent.1;
                rgba[idx + 2] = accent.2;
                rgba[idx + 3] = 200;
            }
        }
    }

    egui::IconData {
        rgba,
        width: size as u32,
        height: size as u32,
    }
}
