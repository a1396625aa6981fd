use egui::{Pos2, Rect};

use crate::geometry::{self, Corner};

/// Per-gesture state. Only exists between pointer-down and pointer-up;
/// `grabbed` is the crop rect snapshot taken at gesture start, so each
/// pointer-move recomputes from the snapshot instead of accumulating deltas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Idle,
    Moving { start: Pos2, grabbed: Rect },
    Resizing { corner: Corner, start: Pos2, grabbed: Rect },
}

/// Pointer state machine for the crop rectangle.
///
/// Callable from any event loop: feed it `pointer_down`, `pointer_move` and
/// `pointer_up` in display coordinates and it hands back the updated rect.
/// Every rect it returns satisfies the ratio lock and stays inside `bounds`.
#[derive(Debug)]
pub struct CropInteraction {
    gesture: Gesture,
    ratio: f32,
    bounds: Rect,
}

impl CropInteraction {
    pub fn new(ratio: f32, bounds: Rect) -> Self {
        Self {
            gesture: Gesture::Idle,
            ratio,
            bounds,
        }
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.gesture, Gesture::Idle)
    }

    pub fn is_moving(&self) -> bool {
        matches!(self.gesture, Gesture::Moving { .. })
    }

    /// The corner currently being dragged, if any.
    pub fn active_corner(&self) -> Option<Corner> {
        match self.gesture {
            Gesture::Resizing { corner, .. } => Some(corner),
            _ => None,
        }
    }

    /// Corner handles are checked before the interior, so a grab near a
    /// corner always resizes even though the hit-region overlaps the rect.
    pub fn pointer_down(&mut self, pos: Pos2, crop: Rect) {
        for corner in Corner::ALL {
            if corner.handle_rect(crop).contains(pos) {
                self.gesture = Gesture::Resizing {
                    corner,
                    start: pos,
                    grabbed: crop,
                };
                return;
            }
        }

        if crop.contains(pos) {
            self.gesture = Gesture::Moving {
                start: pos,
                grabbed: crop,
            };
        }
    }

    /// Returns the rect for the current pointer position, or `crop`
    /// unchanged when no gesture is active.
    pub fn pointer_move(&self, pos: Pos2, crop: Rect) -> Rect {
        match self.gesture {
            Gesture::Idle => crop,
            Gesture::Moving { start, grabbed } => {
                geometry::clamp_to_bounds(grabbed.translate(pos - start), self.bounds)
            }
            Gesture::Resizing {
                corner,
                start,
                grabbed,
            } => {
                let resized =
                    geometry::resize_from_corner(grabbed, corner, pos.x - start.x, self.ratio, self.bounds);
                // Bounded by construction; the clamp is a postcondition check
                geometry::clamp_to_bounds(resized, self.bounds)
            }
        }
    }

    pub fn pointer_up(&mut self) {
        self.gesture = Gesture::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    fn bounds() -> Rect {
        Rect::from_min_size(Pos2::ZERO, vec2(600.0, 450.0))
    }

    fn crop() -> Rect {
        Rect::from_min_max(pos2(100.0, 100.0), pos2(285.0, 385.0))
    }

    #[test]
    fn press_inside_starts_a_move() {
        let mut ix = CropInteraction::new(185.0 / 275.0, bounds());
        ix.pointer_down(pos2(200.0, 200.0), crop());
        assert!(ix.is_moving());
    }

    #[test]
    fn press_on_a_corner_starts_a_resize() {
        let mut ix = CropInteraction::new(185.0 / 275.0, bounds());
        // 4 px off the exact corner, still inside the 12 px hit-region
        ix.pointer_down(pos2(289.0, 381.0), crop());
        assert_eq!(ix.active_corner(), Some(Corner::BottomRight));
    }

    #[test]
    fn press_outside_everything_stays_idle() {
        let mut ix = CropInteraction::new(185.0 / 275.0, bounds());
        ix.pointer_down(pos2(10.0, 10.0), crop());
        assert!(!ix.is_active());
    }

    #[test]
    fn release_always_returns_to_idle() {
        let mut ix = CropInteraction::new(185.0 / 275.0, bounds());
        ix.pointer_down(pos2(200.0, 200.0), crop());
        ix.pointer_up();
        assert!(!ix.is_active());
        // pointer_move after release leaves the rect alone
        assert_eq!(ix.pointer_move(pos2(400.0, 400.0), crop()), crop());
    }

    #[test]
    fn move_gesture_preserves_size() {
        let mut ix = CropInteraction::new(185.0 / 275.0, bounds());
        ix.pointer_down(pos2(200.0, 200.0), crop());

        for target in [
            pos2(230.0, 180.0),
            pos2(500.0, 440.0),
            pos2(-100.0, -100.0),
            pos2(310.0, 260.0),
        ] {
            let moved = ix.pointer_move(target, crop());
            assert_eq!(moved.size(), crop().size());
            assert!(bounds().contains_rect(moved.shrink(0.01)));
        }
    }

    #[test]
    fn move_recomputes_from_snapshot_not_increments() {
        let mut ix = CropInteraction::new(185.0 / 275.0, bounds());
        ix.pointer_down(pos2(200.0, 200.0), crop());

        // Wander away and come back: the rect returns to its origin
        let mut r = ix.pointer_move(pos2(260.0, 230.0), crop());
        r = ix.pointer_move(pos2(150.0, 170.0), r);
        r = ix.pointer_move(pos2(200.0, 200.0), r);
        assert_eq!(r, crop());
    }

    #[test]
    fn resize_drag_matches_horizontal_delta_only() {
        let ratio = 185.0 / 275.0;
        let mut ix = CropInteraction::new(ratio, bounds());
        ix.pointer_down(pos2(100.0, 100.0), crop());
        assert_eq!(ix.active_corner(), Some(Corner::TopLeft));

        // Right-and-down by (30, 30): width shrinks by dx, dy is ignored
        let resized = ix.pointer_move(pos2(130.0, 130.0), crop());
        assert!((resized.width() - 155.0).abs() < 1e-3);
        assert!((resized.height() - 155.0 / ratio).abs() < 1e-3);
        assert_eq!(resized.right_bottom(), pos2(285.0, 385.0));
    }

    #[test]
    fn resize_holds_invariants_across_a_gesture() {
        let ratio = 185.0 / 275.0;
        let mut ix = CropInteraction::new(ratio, bounds());
        let mut r = crop();
        ix.pointer_down(pos2(285.0, 385.0), r);

        for target in [
            pos2(350.0, 385.0),
            pos2(700.0, 500.0),
            pos2(120.0, 90.0),
            pos2(260.0, 385.0),
        ] {
            r = ix.pointer_move(target, r);
            assert!((r.width() / r.height() - ratio).abs() < 1e-3);
            assert!(r.width() >= geometry::MIN_CROP_EDGE - 1e-3 || !bounds().contains_rect(r));
            assert!(bounds().contains_rect(r.shrink(0.01)));
            // Anchor never moves
            assert_eq!(r.left_top(), pos2(100.0, 100.0));
        }
    }
}
