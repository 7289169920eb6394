// Placement and clamping rules for window rectangles

use serde::{Deserialize, Serialize};

use super::window::Geometry;

/// Size of the host surface the desktop is drawn into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Desktop layout constants the manager needs for geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub viewport: Viewport,
    /// Fixed strip reserved at the bottom for the taskbar
    pub taskbar_height: i32,
    /// Minimum gap kept around newly opened windows
    pub window_margin: i32,
}

impl Layout {
    /// Height available to windows above the taskbar
    pub fn work_height(&self) -> i32 {
        (self.viewport.height - self.taskbar_height).max(0)
    }

    /// Geometry of a maximized window
    pub fn maximized(&self) -> Geometry {
        Geometry::new(0, 0, self.viewport.width, self.work_height())
    }

    /// Centered placement for a new window, kept `window_margin` away from every
    /// edge of the work area. Windows too large for that are shrunk.
    pub fn initial_placement(&self, width: i32, height: i32) -> Geometry {
        let margin = self.window_margin;
        let avail_w = self
            .viewport
            .width
            .saturating_sub(margin.saturating_mul(2))
            .max(1);
        let avail_h = self
            .work_height()
            .saturating_sub(margin.saturating_mul(2))
            .max(1);

        let width = width.min(avail_w);
        let height = height.min(avail_h);

        let max_x = margin.saturating_add(avail_w - width);
        let max_y = margin.saturating_add(avail_h - height);
        let x = center(self.viewport.width, width).clamp(margin, max_x);
        let y = center(self.work_height(), height).clamp(margin, max_y);

        Geometry::new(x, y, width, height)
    }

    /// Clamp a top-left position so the window stays on screen:
    /// `x` in `[0, vw - w]`, `y` in `[0, vh - taskbar - h]`.
    /// A window larger than the work area is pinned to the origin on that axis.
    pub fn clamp_position(&self, x: i32, y: i32, width: i32, height: i32) -> (i32, i32) {
        let max_x = (self.viewport.width - width).max(0);
        let max_y = (self.work_height() - height).max(0);
        (x.clamp(0, max_x), y.clamp(0, max_y))
    }

    /// Position for a drag: origin plus cumulative pointer delta, then clamped
    pub fn drag_position(&self, origin: (i32, i32), delta: (i32, i32), size: (i32, i32)) -> (i32, i32) {
        let x = origin.0.saturating_add(delta.0);
        let y = origin.1.saturating_add(delta.1);
        self.clamp_position(x, y, size.0, size.1)
    }
}

fn center(outer: i32, inner: i32) -> i32 {
    (outer - inner) / 2
}
