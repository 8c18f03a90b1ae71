//! Narrow-phase overlap predicates.
//!
//! Pure boolean tests, one per shape pair. They are cheaper than the contact
//! generation in [`resolution`](super::resolution) and gate it: a pair that
//! fails its predicate is never resolved. All tests are boundary-inclusive,
//! so touching shapes count as overlapping.

use crate::collider::{BoxCollider, CircleCollider};
use crate::types::Vec2;

/// Closest point on an axis-aligned box to `point`.
///
/// Returns `point` itself when it lies inside the box.
pub fn closest_point_on_box(point: Vec2, box_pos: Vec2, b: &BoxCollider) -> Vec2 {
    let half = Vec2::new(b.half_width, b.half_height);
    point.clamp(&(box_pos - half), &(box_pos + half))
}

/// Circle vs circle: squared center distance against squared radius sum.
pub fn circle_vs_circle(
    pos_a: Vec2,
    a: &CircleCollider,
    pos_b: Vec2,
    b: &CircleCollider,
) -> bool {
    let delta = pos_b - pos_a;
    let radius_sum = a.radius + b.radius;
    delta.magnitude_squared() <= radius_sum * radius_sum
}

/// Circle vs axis-aligned box.
///
/// The circle center is clamped into the box extent; a center inside the box
/// clamps to itself and always overlaps.
pub fn circle_vs_box(
    circle_pos: Vec2,
    circle: &CircleCollider,
    box_pos: Vec2,
    b: &BoxCollider,
) -> bool {
    let closest = closest_point_on_box(circle_pos, box_pos, b);
    let delta = circle_pos - closest;
    delta.magnitude_squared() <= circle.radius * circle.radius
}

/// Axis-aligned box vs box: the projections must overlap on both axes.
pub fn aabb_vs_aabb(pos_a: Vec2, a: &BoxCollider, pos_b: Vec2, b: &BoxCollider) -> bool {
    let delta = pos_b - pos_a;
    delta.x.abs() <= a.half_width + b.half_width && delta.y.abs() <= a.half_height + b.half_height
}

// =============================================================================
// Tests
// =============================================================================
