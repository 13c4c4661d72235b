//! Document model: obstacles, waypoints, trajectories and the obstacle store.
//!
//! Obstacles are authored locally and sent to the planning service as part of
//! a [`RoomModel`]. Waypoints only ever arrive from the service; a
//! [`Trajectory`] wraps them in a shared immutable slice so replacing the
//! active path is a single pointer swap and readers never observe a partial
//! sequence.
//!
//! All coordinates are in meters with the origin at the wall's top-left corner.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::consts::DEFAULT_COVERAGE_WIDTH_M;
use crate::hit;

/// Why an obstacle could not be constructed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ObstacleError {
    /// A form field did not parse as a number.
    #[error("`{field}` is not a number: {raw:?}")]
    NotANumber { field: &'static str, raw: String },
    /// A value was NaN or infinite.
    #[error("`{field}` must be finite")]
    NotFinite { field: &'static str },
    /// Position fields must be zero or greater.
    #[error("`{field}` must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    /// Width and height must be strictly positive.
    #[error("`{field}` must be greater than zero, got {value}")]
    NonPositive { field: &'static str, value: f64 },
}

/// An axis-aligned rectangle the robot must not paint over.
///
/// Identity is positional: there is no id, and the owning list's order
/// determines numbering and removal tie-breaks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ObstacleRecord")]
pub struct Obstacle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Free-text label (e.g. "Door", "Window"); opaque to the engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Unvalidated wire form of [`Obstacle`].
#[derive(Deserialize)]
struct ObstacleRecord {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    #[serde(default)]
    name: Option<String>,
}

impl TryFrom<ObstacleRecord> for Obstacle {
    type Error = ObstacleError;

    fn try_from(r: ObstacleRecord) -> Result<Self, Self::Error> {
        Ok(Self::new(r.x, r.y, r.width, r.height)?.with_name(r.name))
    }
}

impl Obstacle {
    /// Build an obstacle, rejecting non-finite values and non-positive extents.
    ///
    /// # Errors
    ///
    /// Returns [`ObstacleError::NotFinite`] or [`ObstacleError::NonPositive`].
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Result<Self, ObstacleError> {
        for (field, value) in [("x", x), ("y", y), ("width", width), ("height", height)] {
            if !value.is_finite() {
                return Err(ObstacleError::NotFinite { field });
            }
        }
        if width <= 0.0 {
            return Err(ObstacleError::NonPositive { field: "width", value: width });
        }
        if height <= 0.0 {
            return Err(ObstacleError::NonPositive { field: "height", value: height });
        }
        Ok(Self { x, y, width, height, name: None })
    }

    /// Parse the manual-entry form. Blank names are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns an [`ObstacleError`] for non-numeric, negative-position or
    /// non-positive-dimension input.
    pub fn from_form(x: &str, y: &str, width: &str, height: &str, name: Option<&str>) -> Result<Self, ObstacleError> {
        let x = parse_field("x", x)?;
        let y = parse_field("y", y)?;
        let width = parse_field("width", width)?;
        let height = parse_field("height", height)?;
        for (field, value) in [("x", x), ("y", y)] {
            if value < 0.0 {
                return Err(ObstacleError::Negative { field, value });
            }
        }
        let name = name.map(str::trim).filter(|n| !n.is_empty()).map(ToOwned::to_owned);
        Ok(Self::new(x, y, width, height)?.with_name(name))
    }

    #[must_use]
    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    /// Inclusive containment test on all four edges.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.x <= self.x + self.width && pt.y >= self.y && pt.y <= self.y + self.height
    }

    /// Whether the obstacle lies entirely within a `wall_w` x `wall_h` wall.
    #[must_use]
    pub fn fits_within(&self, wall_w: f64, wall_h: f64) -> bool {
        self.x + self.width <= wall_w && self.y + self.height <= wall_h
    }
}

fn parse_field(field: &'static str, raw: &str) -> Result<f64, ObstacleError> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| ObstacleError::NotANumber { field, raw: raw.to_owned() })?;
    if !value.is_finite() {
        return Err(ObstacleError::NotFinite { field });
    }
    Ok(value)
}

/// Ordered obstacle store. Every entry satisfies `width > 0 && height > 0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObstacleList {
    items: Vec<Obstacle>,
}

impl ObstacleList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole list, e.g. from a loaded room model.
    pub fn load(&mut self, obstacles: Vec<Obstacle>) {
        self.items = obstacles;
    }

    /// Append an obstacle. Returns its index.
    pub fn push(&mut self, obstacle: Obstacle) -> usize {
        self.items.push(obstacle);
        self.items.len() - 1
    }

    /// Remove the obstacle at `index`, if present.
    pub fn remove(&mut self, index: usize) -> Option<Obstacle> {
        if index < self.items.len() { Some(self.items.remove(index)) } else { None }
    }

    /// Remove the first obstacle (in list order) containing `world_pt`.
    pub fn remove_at(&mut self, world_pt: Point) -> Option<(usize, Obstacle)> {
        let index = hit::hit_test(world_pt, &self.items)?;
        Some((index, self.items.remove(index)))
    }

    /// Remove everything. Returns how many obstacles were dropped.
    pub fn clear(&mut self) -> usize {
        let n = self.items.len();
        self.items.clear();
        n
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Obstacle> {
        self.items.get(index)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Obstacle] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.items.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// What the robot does while travelling to a waypoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaypointAction {
    /// Spray while travelling.
    Paint,
    /// Reposition without painting.
    Move,
}

/// A point on the robot's path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub x: f64,
    pub y: f64,
    pub action: WaypointAction,
}

impl Waypoint {
    #[must_use]
    pub fn new(x: f64, y: f64, action: WaypointAction) -> Self {
        Self { x, y, action }
    }

    #[must_use]
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// An immutable, ordered waypoint sequence.
///
/// Cloning is cheap and shares the underlying slice. A trajectory is never
/// edited; the engine swaps in a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    id: Option<String>,
    waypoints: Arc<[Waypoint]>,
}

impl Trajectory {
    /// Wrap a sequence, optionally tagged with the service-assigned id.
    #[must_use]
    pub fn new(id: Option<String>, waypoints: Vec<Waypoint>) -> Self {
        Self { id, waypoints: waypoints.into() }
    }

    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    #[must_use]
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Consecutive waypoint pairs as `(i, waypoints[i-1], waypoints[i])`, `i >= 1`.
    pub fn segments(&self) -> impl Iterator<Item = (usize, &Waypoint, &Waypoint)> {
        self.waypoints
            .windows(2)
            .enumerate()
            .map(|(i, pair)| (i + 1, &pair[0], &pair[1]))
    }

    /// Sum of straight-line segment lengths in meters.
    #[must_use]
    pub fn path_length(&self) -> f64 {
        self.segments().map(|(_, a, b)| a.point().distance(b.point())).sum()
    }

    /// Summary numbers for the status panel.
    #[must_use]
    pub fn stats(&self, wall_w: f64, wall_h: f64, coverage_width: f64) -> TrajectoryStats {
        let path_length = self.path_length();
        let paint_count = self
            .waypoints
            .iter()
            .filter(|w| w.action == WaypointAction::Paint)
            .count();
        TrajectoryStats {
            waypoint_count: self.len(),
            paint_count,
            move_count: self.len() - paint_count,
            path_length,
            coverage_percent: coverage_percent(path_length, coverage_width, wall_w, wall_h),
        }
    }
}

/// Derived trajectory metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryStats {
    pub waypoint_count: usize,
    pub paint_count: usize,
    pub move_count: usize,
    /// Meters.
    pub path_length: f64,
    /// Estimated share of the wall covered, capped at 100.
    pub coverage_percent: f64,
}

/// `min(100, path_length * coverage_width / (wall_w * wall_h) * 100)`.
///
/// A degenerate wall reports zero coverage.
#[must_use]
pub fn coverage_percent(path_length: f64, coverage_width: f64, wall_w: f64, wall_h: f64) -> f64 {
    let area = wall_w * wall_h;
    if area <= 0.0 {
        return 0.0;
    }
    (path_length * coverage_width / area * 100.0).min(100.0)
}

/// Request body for trajectory generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomModel {
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_coverage_width")]
    pub coverage_width: f64,
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,
}

fn default_coverage_width() -> f64 {
    DEFAULT_COVERAGE_WIDTH_M
}

impl RoomModel {
    /// Index of the first obstacle extending past the wall, if any.
    #[must_use]
    pub fn first_out_of_bounds(&self) -> Option<usize> {
        self.obstacles
            .iter()
            .position(|o| !o.fits_within(self.width, self.height))
    }
}
