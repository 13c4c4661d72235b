#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::Point;
use crate::doc::Obstacle;

/// Index of the first obstacle, in list order, whose bounds contain `world_pt`.
///
/// Bounds are inclusive on all four edges. Overlapping obstacles resolve to
/// the lowest index (insertion order), not to whichever is drawn on top.
#[must_use]
pub fn hit_test(world_pt: Point, obstacles: &[Obstacle]) -> Option<usize> {
    obstacles.iter().position(|o| o.contains(world_pt))
}
