use crate::editor::CropEditor;
use crate::geometry::{self, PreviewTransform};
use egui::{pos2, vec2};
use image::{DynamicImage, Rgba, RgbaImage};
use std::path::{Path, PathBuf};

/// Left half red, right half blue, so exports reveal which source region
/// they actually came from.
fn write_split_image(dir: &Path, w: u32, h: u32) -> PathBuf {
    let path = dir.join("split.png");
    let img = RgbaImage::from_fn(w, h, |x, _| {
        if x < w / 2 {
            Rgba([220, 30, 30, 255])
        } else {
            Rgba([30, 30, 220, 255])
        }
    });
    DynamicImage::ImageRgba8(img).save(&path).unwrap();
    path
}

#[test]
fn preview_scale_matches_the_spec_scenario() {
    // 4000x3000 source at max display 600 previews at 0.15 scale
    let t = PreviewTransform::fit(4000, 3000, 600.0);
    assert_eq!(t.scale, 0.15);
    assert_eq!(t.display_size, vec2(600.0, 450.0));

    let crop = geometry::initial_crop(t.display_size, 185.0 / 275.0);
    assert!((crop.height() - 450.0).abs() < 1e-3);
    assert!(t.display_rect().contains_rect(crop));
}

#[test]
fn confirmed_crop_maps_back_to_the_selected_source_region() {
    let dir = tempfile::tempdir().unwrap();
    let source_path = write_split_image(dir.path(), 800, 600);
    let out = dir.path().join("crops");

    let mut editor = CropEditor::open(&source_path, 100, 100).unwrap();
    // Preview is 600x450; push the square crop against the left edge
    editor.pointer_down(editor.crop_rect().center());
    editor.pointer_move(pos2(-1000.0, 225.0));
    editor.pointer_up();
    assert_eq!(editor.crop_rect().left(), 0.0);

    let path = editor.export_to(&out).unwrap();
    let written = image::open(&path).unwrap().to_rgba8();
    assert_eq!(written.dimensions(), (100, 100));

    // The crop spans source x 0..600 on an 800-wide image whose color flips
    // at x=400: two thirds red, one third blue
    assert_eq!(written.get_pixel(10, 50), &Rgba([220, 30, 30, 255]));
    assert_eq!(written.get_pixel(90, 50), &Rgba([30, 30, 220, 255]));
}

#[test]
fn mixed_gesture_sequence_never_breaks_the_invariants() {
    let dir = tempfile::tempdir().unwrap();
    let source_path = write_split_image(dir.path(), 1600, 1200);

    let ratio = 185.0 / 275.0;
    let mut editor = CropEditor::open(&source_path, 185, 275).unwrap();
    let bounds = editor.transform().display_rect();

    // Shrink from the bottom-right, drag around, grow from the top-left,
    // shove into a corner
    let gestures: &[(egui::Pos2, egui::Pos2)] = &[
        (
            editor.crop_rect().right_bottom(),
            editor.crop_rect().right_bottom() + vec2(-120.0, 10.0),
        ),
        (pos2(300.0, 225.0), pos2(80.0, 60.0)),
        // After the move the crop sits in the top-left corner; grab that
        // handle and try to grow past the border
        (pos2(0.0, 0.0), pos2(-50.0, 500.0)),
    ];

    for &(down, up) in gestures {
        editor.pointer_down(down);
        editor.pointer_move(up);
        editor.pointer_up();

        let crop = editor.crop_rect();
        assert!(
            (crop.width() / crop.height() - ratio).abs() < 1e-3,
            "ratio broke after gesture at {:?}",
            down
        );
        assert!(crop.width() >= geometry::MIN_CROP_EDGE - 1e-3);
        assert!(bounds.contains_rect(crop.shrink(0.01)), "escaped bounds: {:?}", crop);
    }
}

#[test]
fn exports_of_an_untouched_editor_are_content_identical() {
    let dir = tempfile::tempdir().unwrap();
    let source_path = write_split_image(dir.path(), 640, 480);
    let out = dir.path().join("crops");

    let editor = CropEditor::open(&source_path, 120, 90).unwrap();
    let first = editor.export_to(&out).unwrap();
    let second = editor.export_to(&out).unwrap();

    assert_ne!(first, second);
    assert_eq!(
        image::open(&first).unwrap().to_rgba8(),
        image::open(&second).unwrap().to_rgba8()
    );
    assert_eq!(std::fs::read_dir(&out).unwrap().count(), 2);
}
