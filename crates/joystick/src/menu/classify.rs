use super::{DEAD_ZONE, Direction};
use crate::geometry::Vector;

/// Maps a displacement from the menu center to the direction it points at, or `None` inside
/// the dead zone.
pub fn classify(displacement: Vector) -> Option<Direction> {
    classify_with(displacement, DEAD_ZONE)
}

/// Sectors are 90° wide, centered on the axes, and half-open on the counter-clockwise side
/// so each angle belongs to exactly one of them:
///
/// - `(-45, 45]` right
/// - `(45, 135]` down
/// - `(135, 180] ∪ (-180, -135]` left
/// - `(-135, -45]` up
pub fn classify_with(displacement: Vector, dead_zone: f64) -> Option<Direction> {
    let v = displacement.sanitized();
    let dist = v.length();
    if dist < dead_zone || dist == 0.0 {
        return None;
    }

    let angle = v.y.atan2(v.x).to_degrees();
    let direction = if angle > -45.0 && angle <= 45.0 {
        Direction::Right
    } else if angle > 45.0 && angle <= 135.0 {
        Direction::Down
    } else if angle > -135.0 && angle <= -45.0 {
        Direction::Up
    } else {
        Direction::Left
    };
    Some(direction)
}
