//! Rendering: draws the full floor-plan scene to a [`Surface`].
//!
//! [`draw`] is a pure function of its [`Scene`]; it keeps no state between
//! calls and always clears and repaints everything. Scenes are a few hundred
//! primitives at most, so there is no incremental diffing.
//!
//! Layers, bottom to top:
//! 1. background and meter grid (coarser on walls too large for one-meter lines)
//! 2. obstacle fills and outlines
//! 3. pending drag preview
//! 4. trajectory segments, styled by the destination waypoint's action
//! 5. robot marker (only while a playback index is set)
//!
//! All geometry arrives in world meters and is converted through the
//! [`Camera`] here; surfaces only ever see pixels.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::camera::{Camera, Point};
use crate::consts::{
    BACKGROUND_FILL, GRID_STROKE, GRID_WIDTH_PX, MAX_GRID_LINES_PER_AXIS, MIN_GRID_SPACING_PX, MOVE_DASH_PX, MOVE_STROKE, MOVE_WIDTH_PX, OBSTACLE_FILL,
    OBSTACLE_STROKE, OBSTACLE_WIDTH_PX, PAINT_STROKE, PAINT_WIDTH_PX, PREVIEW_DASH_PX, PREVIEW_STROKE,
    PREVIEW_WIDTH_PX, ROBOT_FILL, ROBOT_OUTLINE, ROBOT_OUTLINE_WIDTH_PX, ROBOT_RADIUS_PX,
};
use crate::doc::{Obstacle, Waypoint, WaypointAction};
use crate::input::Rect;

/// Line styling in screen pixels. An empty `dash` means a solid line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: &'static str,
    pub width: f64,
    pub dash: &'static [f64],
}

impl Stroke {
    #[must_use]
    pub const fn solid(color: &'static str, width: f64) -> Self {
        Self { color, width, dash: &[] }
    }
}

const GRID: Stroke = Stroke::solid(GRID_STROKE, GRID_WIDTH_PX);
const OBSTACLE_OUTLINE: Stroke = Stroke::solid(OBSTACLE_STROKE, OBSTACLE_WIDTH_PX);
const PREVIEW: Stroke = Stroke { color: PREVIEW_STROKE, width: PREVIEW_WIDTH_PX, dash: &PREVIEW_DASH_PX };
const PAINT: Stroke = Stroke::solid(PAINT_STROKE, PAINT_WIDTH_PX);
const MOVE: Stroke = Stroke { color: MOVE_STROKE, width: MOVE_WIDTH_PX, dash: &MOVE_DASH_PX };
const ROBOT_RING: Stroke = Stroke::solid(ROBOT_OUTLINE, ROBOT_OUTLINE_WIDTH_PX);

/// Drawing backend. Coordinates are screen pixels.
pub trait Surface {
    type Error;

    /// Wipe the whole surface and paint `fill` over it.
    fn clear(&mut self, width: f64, height: f64, fill: &str) -> Result<(), Self::Error>;

    fn stroke_line(&mut self, from: Point, to: Point, stroke: &Stroke) -> Result<(), Self::Error>;

    fn fill_box(&mut self, rect: Rect, fill: &str) -> Result<(), Self::Error>;

    fn stroke_box(&mut self, rect: Rect, stroke: &Stroke) -> Result<(), Self::Error>;

    fn fill_circle(&mut self, center: Point, radius: f64, fill: &str, outline: &Stroke) -> Result<(), Self::Error>;
}

/// Everything [`draw`] needs. Borrowed from engine state for one frame.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub wall_width: f64,
    pub wall_height: f64,
    pub camera: Camera,
    pub obstacles: &'a [Obstacle],
    pub pending_rect: Option<Rect>,
    pub waypoints: &'a [Waypoint],
    /// `None` draws the whole path statically; `Some(i)` reveals it up to
    /// waypoint `i` and draws the robot there.
    pub playback_index: Option<usize>,
}

/// Stroke used for the segment ending at a waypoint with `action`.
#[must_use]
pub fn segment_stroke(action: WaypointAction) -> Stroke {
    match action {
        WaypointAction::Paint => PAINT,
        WaypointAction::Move => MOVE,
    }
}

/// Number of segments visible for a path of `len` waypoints.
///
/// Segment `i` joins `waypoints[i-1]` to `waypoints[i]`; with a playback
/// index `p`, only segments with `i < p + 1` are shown.
#[must_use]
pub fn visible_segment_count(len: usize, playback_index: Option<usize>) -> usize {
    let all = len.saturating_sub(1);
    match playback_index {
        None => all,
        Some(p) => p.min(all),
    }
}

/// Draw the full scene.
///
/// # Errors
///
/// Propagates the first error returned by the surface.
pub fn draw<S: Surface>(surface: &mut S, scene: &Scene<'_>) -> Result<(), S::Error> {
    surface.clear(scene.canvas_width, scene.canvas_height, BACKGROUND_FILL)?;
    draw_grid(surface, scene)?;
    draw_obstacles(surface, scene)?;
    if let Some(rect) = scene.pending_rect {
        surface.stroke_box(to_screen_rect(&scene.camera, rect), &PREVIEW)?;
    }
    draw_trajectory(surface, scene)?;
    draw_robot(surface, scene)
}

/// Grid spacing in meters for a camera of `scale` px/m.
///
/// One meter, widened by powers of ten until neighbouring lines are at least
/// [`MIN_GRID_SPACING_PX`] apart. `None` when no spacing is drawable.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn grid_step(scale: f64) -> Option<f64> {
    if !scale.is_finite() || scale <= 0.0 {
        return None;
    }
    let raw = MIN_GRID_SPACING_PX / scale;
    if raw <= 1.0 {
        return Some(1.0);
    }
    let step = 10_f64.powi(raw.log10().ceil() as i32);
    step.is_finite().then_some(step)
}

/// Line offsets `0, step, 2 * step, ..` up to `extent`, capped per axis.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn grid_offsets(extent: f64, step: f64) -> impl Iterator<Item = f64> {
    let last = ((extent / step).floor() as usize).min(MAX_GRID_LINES_PER_AXIS - 1);
    (0..=last).map(move |i| i as f64 * step)
}

fn draw_grid<S: Surface>(surface: &mut S, scene: &Scene<'_>) -> Result<(), S::Error> {
    let (w, h) = (scene.wall_width, scene.wall_height);
    if !w.is_finite() || !h.is_finite() || w < 0.0 || h < 0.0 {
        return Ok(());
    }
    let cam = &scene.camera;
    let Some(step) = grid_step(cam.scale()) else {
        return Ok(());
    };

    for x in grid_offsets(w, step) {
        let from = cam.world_to_screen(Point::new(x, 0.0));
        let to = cam.world_to_screen(Point::new(x, h));
        surface.stroke_line(from, to, &GRID)?;
    }
    for y in grid_offsets(h, step) {
        let from = cam.world_to_screen(Point::new(0.0, y));
        let to = cam.world_to_screen(Point::new(w, y));
        surface.stroke_line(from, to, &GRID)?;
    }
    Ok(())
}

fn draw_obstacles<S: Surface>(surface: &mut S, scene: &Scene<'_>) -> Result<(), S::Error> {
    for obstacle in scene.obstacles {
        let rect = Rect { x: obstacle.x, y: obstacle.y, width: obstacle.width, height: obstacle.height };
        let screen = to_screen_rect(&scene.camera, rect);
        surface.fill_box(screen, OBSTACLE_FILL)?;
        surface.stroke_box(screen, &OBSTACLE_OUTLINE)?;
    }
    Ok(())
}

fn draw_trajectory<S: Surface>(surface: &mut S, scene: &Scene<'_>) -> Result<(), S::Error> {
    let visible = visible_segment_count(scene.waypoints.len(), scene.playback_index);
    let cam = &scene.camera;
    for pair in scene.waypoints.windows(2).take(visible) {
        let (from, to) = (&pair[0], &pair[1]);
        surface.stroke_line(
            cam.world_to_screen(from.point()),
            cam.world_to_screen(to.point()),
            &segment_stroke(to.action),
        )?;
    }
    Ok(())
}

fn draw_robot<S: Surface>(surface: &mut S, scene: &Scene<'_>) -> Result<(), S::Error> {
    let Some(index) = scene.playback_index else {
        return Ok(());
    };
    let Some(waypoint) = scene.waypoints.get(index) else {
        return Ok(());
    };
    let center = scene.camera.world_to_screen(waypoint.point());
    surface.fill_circle(center, ROBOT_RADIUS_PX, ROBOT_FILL, &ROBOT_RING)
}

fn to_screen_rect(camera: &Camera, rect: Rect) -> Rect {
    let origin = camera.world_to_screen(Point::new(rect.x, rect.y));
    Rect {
        x: origin.x,
        y: origin.y,
        width: camera.world_dist_to_screen(rect.width),
        height: camera.world_dist_to_screen(rect.height),
    }
}

// =============================================================
// Browser backend
// =============================================================

impl Surface for CanvasRenderingContext2d {
    type Error = JsValue;

    fn clear(&mut self, width: f64, height: f64, fill: &str) -> Result<(), JsValue> {
        self.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
        self.clear_rect(0.0, 0.0, width, height);
        self.set_fill_style_str(fill);
        self.fill_rect(0.0, 0.0, width, height);
        Ok(())
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: &Stroke) -> Result<(), JsValue> {
        apply_stroke(self, stroke)?;
        self.begin_path();
        self.move_to(from.x, from.y);
        self.line_to(to.x, to.y);
        self.stroke();
        Ok(())
    }

    fn fill_box(&mut self, rect: Rect, fill: &str) -> Result<(), JsValue> {
        self.set_fill_style_str(fill);
        self.fill_rect(rect.x, rect.y, rect.width, rect.height);
        Ok(())
    }

    fn stroke_box(&mut self, rect: Rect, stroke: &Stroke) -> Result<(), JsValue> {
        apply_stroke(self, stroke)?;
        self.stroke_rect(rect.x, rect.y, rect.width, rect.height);
        Ok(())
    }

    fn fill_circle(&mut self, center: Point, radius: f64, fill: &str, outline: &Stroke) -> Result<(), JsValue> {
        self.begin_path();
        self.arc(center.x, center.y, radius, 0.0, std::f64::consts::TAU)?;
        self.set_fill_style_str(fill);
        self.fill();
        apply_stroke(self, outline)?;
        self.stroke();
        Ok(())
    }
}

/// Apply color, width and dash pattern.
fn apply_stroke(ctx: &CanvasRenderingContext2d, stroke: &Stroke) -> Result<(), JsValue> {
    ctx.set_stroke_style_str(stroke.color);
    ctx.set_line_width(stroke.width);
    let dash = js_sys::Array::new();
    for segment in stroke.dash {
        dash.push(&JsValue::from_f64(*segment));
    }
    ctx.set_line_dash(&dash)
}
