use crate::editor::CropEditor;
use crate::geometry::Corner;
use egui::{
    pos2, Color32, CornerRadius, CursorIcon, Rect, Response, Sense, Stroke, StrokeKind,
    TextureHandle, Ui,
};

/// Explicit render context for the crop canvas. Everything the painter
/// needs comes in here; drawing code never reaches into shared settings.
#[derive(Debug, Clone)]
pub struct CanvasStyle {
    pub mask: Color32,
    pub outline: Stroke,
    pub handle_fill: Color32,
    pub guide: Stroke,
}

impl Default for CanvasStyle {
    fn default() -> Self {
        Self {
            mask: Color32::from_black_alpha(140),
            outline: Stroke::new(2.0, Color32::from_rgb(99, 179, 237)),
            handle_fill: Color32::from_rgb(99, 179, 237),
            guide: Stroke::new(1.0, Color32::from_rgba_unmultiplied(255, 255, 255, 60)),
        }
    }
}

/// Draws the preview with the crop overlay and routes pointer input into
/// the editor's state machine. Presentation only: nothing here mutates
/// the crop rect directly.
pub struct CropCanvas {
    style: CanvasStyle,
}

impl CropCanvas {
    pub fn new(style: CanvasStyle) -> Self {
        Self { style }
    }

    pub fn show(&self, ui: &mut Ui, texture: &TextureHandle, editor: &mut CropEditor) -> Response {
        let size = editor.transform().display_size;
        let (canvas_rect, response) = ui.allocate_exact_size(size, Sense::click_and_drag());
        let origin = canvas_rect.min.to_vec2();

        // Pointer events, translated into display coordinates
        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                editor.pointer_down(pos - origin);
            }
        }
        if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                editor.pointer_move(pos - origin);
            }
        }
        if response.drag_stopped() {
            editor.pointer_up();
        }

        let painter = ui.painter_at(canvas_rect);
        painter.image(
            texture.id(),
            canvas_rect,
            Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
            Color32::WHITE,
        );

        let crop = editor.crop_rect().translate(origin);

        // Dim the four strips outside the crop
        for strip in [
            Rect::from_min_max(canvas_rect.min, pos2(canvas_rect.max.x, crop.top())),
            Rect::from_min_max(pos2(canvas_rect.min.x, crop.bottom()), canvas_rect.max),
            Rect::from_min_max(pos2(canvas_rect.min.x, crop.top()), pos2(crop.left(), crop.bottom())),
            Rect::from_min_max(pos2(crop.right(), crop.top()), pos2(canvas_rect.max.x, crop.bottom())),
        ] {
            painter.rect_filled(strip, CornerRadius::ZERO, self.style.mask);
        }

        // Rule-of-thirds guides
        for i in [1.0, 2.0] {
            let x = crop.left() + crop.width() * i / 3.0;
            let y = crop.top() + crop.height() * i / 3.0;
            painter.line_segment([pos2(x, crop.top()), pos2(x, crop.bottom())], self.style.guide);
            painter.line_segment([pos2(crop.left(), y), pos2(crop.right(), y)], self.style.guide);
        }

        painter.rect_stroke(crop, CornerRadius::ZERO, self.style.outline, StrokeKind::Middle);

        // Corner handles, grown slightly while hovered or grabbed
        let hover_pos = response.hover_pos();
        let mut hovered_corner = None;
        for corner in Corner::ALL {
            let handle = corner.handle_rect(editor.crop_rect()).translate(origin);
            let highlighted = editor.active_corner() == Some(corner)
                || (!editor.is_dragging() && hover_pos.is_some_and(|p| handle.contains(p)));
            if highlighted {
                hovered_corner = Some(corner);
            }
            let grow = ui
                .ctx()
                .animate_bool_with_time(response.id.with(("handle", corner)), highlighted, 0.12);
            painter.rect_filled(
                handle.expand(2.0 * grow),
                CornerRadius::same(2),
                self.style.handle_fill,
            );
        }

        // Cursor feedback mirrors the gesture
        let cursor = if editor.is_moving() {
            Some(CursorIcon::Grabbing)
        } else if let Some(corner) = editor.active_corner().or(hovered_corner) {
            Some(match corner {
                Corner::TopLeft | Corner::BottomRight => CursorIcon::ResizeNwSe,
                Corner::TopRight | Corner::BottomLeft => CursorIcon::ResizeNeSw,
            })
        } else if hover_pos.is_some_and(|p| crop.contains(p)) {
            Some(CursorIcon::Grab)
        } else {
            None
        };
        if let Some(cursor) = cursor {
            ui.ctx().set_cursor_icon(cursor);
        }

        response
    }
}
