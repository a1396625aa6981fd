use egui::{pos2, vec2, Pos2, Rect, Vec2};

/// Longest edge of the on-screen preview, in display pixels.
pub const MAX_DISPLAY: f32 = 600.0;

/// Smallest allowed crop width. Height follows from the aspect ratio, so the
/// floor only needs to bind the driven axis.
pub const MIN_CROP_EDGE: f32 = 60.0;

/// Side length of the square hit-region centered on each crop corner.
pub const HANDLE_SIZE: f32 = 12.0;

/// Uniform downscale from source pixels to display (preview) pixels.
///
/// Computed once per source image. The preview never upscales, so
/// `scale <= 1.0` always holds and small images are shown 1:1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewTransform {
    pub scale: f32,
    pub display_size: Vec2,
}

impl PreviewTransform {
    pub fn fit(source_width: u32, source_height: u32, max_display: f32) -> Self {
        let w = source_width as f32;
        let h = source_height as f32;
        let scale = (max_display / w).min(max_display / h).min(1.0);
        Self {
            scale,
            display_size: vec2((w * scale).floor(), (h * scale).floor()),
        }
    }

    /// The preview area in display coordinates, anchored at the origin.
    pub fn display_rect(&self) -> Rect {
        Rect::from_min_size(Pos2::ZERO, self.display_size)
    }

    /// Map a display-space rectangle back to integer source pixel bounds
    /// `(x, y, width, height)`, clamped into the source image.
    ///
    /// The origin floors and the extent rounds; clamping the extent rather
    /// than each edge avoids a one-pixel overrun on the far edges when the
    /// scale is not an exact reciprocal.
    pub fn to_source_bounds(
        &self,
        rect: Rect,
        source_width: u32,
        source_height: u32,
    ) -> (u32, u32, u32, u32) {
        let inv = 1.0 / self.scale;
        let x = ((rect.left() * inv).floor().max(0.0) as u32).min(source_width.saturating_sub(1));
        let y = ((rect.top() * inv).floor().max(0.0) as u32).min(source_height.saturating_sub(1));
        let w = ((rect.width() * inv).round() as u32).clamp(1, source_width - x);
        let h = ((rect.height() * inv).round() as u32).clamp(1, source_height - y);
        (x, y, w, h)
    }
}

/// One of the four draggable crop corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    pub fn is_left(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::BottomLeft)
    }

    pub fn is_top(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::TopRight)
    }

    /// The corner that stays fixed while this one is dragged.
    pub fn opposite(self) -> Corner {
        match self {
            Corner::TopLeft => Corner::BottomRight,
            Corner::TopRight => Corner::BottomLeft,
            Corner::BottomLeft => Corner::TopRight,
            Corner::BottomRight => Corner::TopLeft,
        }
    }

    pub fn pos(self, rect: Rect) -> Pos2 {
        match self {
            Corner::TopLeft => rect.left_top(),
            Corner::TopRight => rect.right_top(),
            Corner::BottomLeft => rect.left_bottom(),
            Corner::BottomRight => rect.right_bottom(),
        }
    }

    /// Square hit-region centered on this corner of `rect`.
    pub fn handle_rect(self, rect: Rect) -> Rect {
        Rect::from_center_size(self.pos(rect), Vec2::splat(HANDLE_SIZE))
    }
}

/// Largest centered rectangle of the target ratio that fits the preview.
pub fn initial_crop(display_size: Vec2, ratio: f32) -> Rect {
    let crop_h = display_size.y.min(display_size.x / ratio);
    let crop_w = crop_h * ratio;
    Rect::from_center_size((display_size / 2.0).to_pos2(), vec2(crop_w, crop_h))
}

/// Translate `rect` so it lies inside `bounds` without changing its size.
///
/// Assumes `rect` is no larger than `bounds` on either axis; if it were
/// larger it would end up anchored at the top-left edge.
pub fn clamp_to_bounds(rect: Rect, bounds: Rect) -> Rect {
    let dx = if rect.left() < bounds.left() {
        bounds.left() - rect.left()
    } else if rect.right() > bounds.right() {
        bounds.right() - rect.right()
    } else {
        0.0
    };

    let dy = if rect.top() < bounds.top() {
        bounds.top() - rect.top()
    } else if rect.bottom() > bounds.bottom() {
        bounds.bottom() - rect.bottom()
    } else {
        0.0
    };

    rect.translate(vec2(dx, dy))
}

/// Resize `start` by dragging `corner`, anchored at the opposite corner.
///
/// Only the horizontal pointer delta drives the resize; the height is
/// rederived from the ratio on every event so the lock cannot drift over
/// a gesture. The width is capped to the space available from the anchor
/// toward the dragged corner, which keeps the result inside `bounds`
/// without a post-clamp that could distort the ratio. Containment wins
/// over the minimum-size floor when the anchor sits near a border.
pub fn resize_from_corner(start: Rect, corner: Corner, dx: f32, ratio: f32, bounds: Rect) -> Rect {
    let desired = if corner.is_left() {
        start.width() - dx
    } else {
        start.width() + dx
    };

    let anchor = corner.opposite().pos(start);
    let space_x = if corner.is_left() {
        anchor.x - bounds.left()
    } else {
        bounds.right() - anchor.x
    };
    let space_y = if corner.is_top() {
        anchor.y - bounds.top()
    } else {
        bounds.bottom() - anchor.y
    };
    let max_width = space_x.min(space_y * ratio);

    let width = desired.max(MIN_CROP_EDGE).min(max_width);
    let height = width / ratio;

    let min = pos2(
        if corner.is_left() { anchor.x - width } else { anchor.x },
        if corner.is_top() { anchor.y - height } else { anchor.y },
    );
    Rect::from_min_size(min, vec2(width, height))
}
