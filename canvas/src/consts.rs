//! Shared numeric and style constants for the canvas crate.

// ── Viewport ────────────────────────────────────────────────────

/// Fraction of the canvas the wall may occupy along its limiting axis.
pub const VIEW_MARGIN: f64 = 0.9;

/// Default canvas size in CSS pixels when the host does not supply one.
pub const DEFAULT_CANVAS_WIDTH_PX: f64 = 800.0;
pub const DEFAULT_CANVAS_HEIGHT_PX: f64 = 500.0;

/// Default wall size in meters.
pub const DEFAULT_WALL_WIDTH_M: f64 = 10.0;
pub const DEFAULT_WALL_HEIGHT_M: f64 = 6.0;

// ── Authoring ───────────────────────────────────────────────────

/// A drag must exceed this extent (meters) on both axes to commit an obstacle.
pub const MIN_DRAG_EXTENT_M: f64 = 0.1;

/// Paint swath width in meters used when the host does not override it.
pub const DEFAULT_COVERAGE_WIDTH_M: f64 = 0.15;

// ── Playback ────────────────────────────────────────────────────

pub const MIN_WAYPOINTS_PER_SEC: f64 = 1.0;
pub const MAX_WAYPOINTS_PER_SEC: f64 = 200.0;

/// Upper bound of the user-facing speed slider.
pub const MAX_SPEED_SETTING: f64 = 100.0;

/// Slider position used before the host sets one.
pub const DEFAULT_SPEED_SETTING: f64 = 50.0;

// ── Styling ─────────────────────────────────────────────────────

pub const BACKGROUND_FILL: &str = "#ffffff";
pub const GRID_STROKE: &str = "#e5e7eb";
pub const GRID_WIDTH_PX: f64 = 1.0;

/// Grid lines closer than this are thinned out by powers of ten.
pub const MIN_GRID_SPACING_PX: f64 = 4.0;
pub const MAX_GRID_LINES_PER_AXIS: usize = 1000;

pub const OBSTACLE_FILL: &str = "rgba(239, 68, 68, 0.3)";
pub const OBSTACLE_STROKE: &str = "#dc2626";
pub const OBSTACLE_WIDTH_PX: f64 = 2.0;

pub const PREVIEW_STROKE: &str = "#6b7280";
pub const PREVIEW_WIDTH_PX: f64 = 1.0;
pub const PREVIEW_DASH_PX: [f64; 2] = [4.0, 4.0];

pub const PAINT_STROKE: &str = "#2563eb";
pub const PAINT_WIDTH_PX: f64 = 3.0;

pub const MOVE_STROKE: &str = "#f59e0b";
pub const MOVE_WIDTH_PX: f64 = 2.0;
pub const MOVE_DASH_PX: [f64; 2] = [5.0, 3.0];

pub const ROBOT_FILL: &str = "#10b981";
pub const ROBOT_OUTLINE: &str = "#ffffff";
pub const ROBOT_OUTLINE_WIDTH_PX: f64 = 2.0;
pub const ROBOT_RADIUS_PX: f64 = 6.0;
