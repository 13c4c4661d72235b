#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::consts::VIEW_MARGIN;

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Uniform scale between world meters and canvas pixels.
///
/// World and screen share the same origin and axis directions (y grows
/// downward); only the unit differs. `scale` is always positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    scale: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl Camera {
    /// Fit a `wall_w` x `wall_h` meter wall into a `canvas_w` x `canvas_h`
    /// pixel canvas, leaving a margin along the limiting axis.
    ///
    /// Returns `None` when any dimension is not a positive finite number.
    #[must_use]
    pub fn fit(wall_w: f64, wall_h: f64, canvas_w: f64, canvas_h: f64) -> Option<Self> {
        let dims = [wall_w, wall_h, canvas_w, canvas_h];
        if dims.iter().any(|d| !d.is_finite() || *d <= 0.0) {
            return None;
        }
        let scale = (canvas_w / wall_w).min(canvas_h / wall_h) * VIEW_MARGIN;
        Some(Self { scale })
    }

    /// Pixels per meter.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Convert a screen-space point (CSS pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: screen.x / self.scale,
            y: screen.y / self.scale,
        }
    }

    /// Convert a world-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.scale,
            y: world.y * self.scale,
        }
    }

    /// Convert a world-space distance (meters) to screen pixels.
    #[must_use]
    pub fn world_dist_to_screen(&self, world_dist: f64) -> f64 {
        world_dist * self.scale
    }

    /// Convert a screen-space distance (pixels) to world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.scale
    }
}
