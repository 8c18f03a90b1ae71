//! Contact generation and impulse-based resolution.
//!
//! Each shape pair has its own contact generator producing a [`Contact`]:
//! a unit normal pointing from body A toward body B, a penetration depth,
//! and (for pairs involving a circle) the lever arms from each center of mass
//! to the contact point. A single resolver then runs, strictly in order:
//!
//! 1. **Normal impulse**: only while the bodies approach along the normal.
//!    Restitution is the smaller of the two, and drops to zero below a
//!    resting speed so settled bodies do not micro-bounce.
//! 2. **Friction impulse**: computed from the post-impulse relative velocity.
//!    Coulomb model with coefficients combined in quadrature; the contact
//!    sticks while the required impulse is inside the static cone, otherwise
//!    it slides with the dynamic coefficient.
//! 3. **Positional correction**: Baumgarte-style direct nudge along the
//!    normal, proportional to inverse mass, ignoring `slop` of overlap.
//!    Positions only; velocities are never touched here.
//!
//! ```text
//!        A            B
//!      (   )  ───n──▶ [   ]
//!         ra ●      ● rb      ra, rb: center → contact point
//! ```
//!
//! Box/box contacts are translation-only: they carry no lever arms, so
//! neither the relative velocity nor the impulses involve rotation.

use crate::body::Body;
use crate::collider::{BoxCollider, CircleCollider, Material};
use crate::collision::detection::closest_point_on_box;
use crate::types::{constants, Vec2};

/// Lever arms from each body's center of mass to the contact point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactOffsets {
    pub a: Vec2,
    pub b: Vec2,
}

/// Geometry of one overlapping pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit normal from A toward B
    pub normal: Vec2,
    /// Overlap depth along the normal (>= 0)
    pub penetration: f64,
    /// `None` for translation-only contacts
    pub offsets: Option<ContactOffsets>,
}

/// Knobs for one resolution, read from the world at step time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolveParams {
    /// Fraction of the penetration beyond `penetration_slop` removed per call
    pub penetration_percent: f64,
    pub penetration_slop: f64,
    /// Approach speed below which restitution is treated as zero
    pub rest_speed: f64,
    /// Velocity gained from one step of gravity. Its component along the
    /// contact normal is added to `rest_speed`.
    pub gravity_dt: Vec2,
}

/// Impulses applied by one resolution, as seen by body B.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactImpulse {
    /// Magnitude of the normal impulse (0 if the bodies were separating)
    pub normal: f64,
    /// Friction impulse vector
    pub friction: Vec2,
}

// =============================================================================
// Contact generation
// =============================================================================

/// Circle A vs circle B.
///
/// Coincident centers fall back to the +X axis.
pub fn circle_circle_contact(
    pos_a: Vec2,
    a: &CircleCollider,
    pos_b: Vec2,
    b: &CircleCollider,
) -> Option<Contact> {
    let delta = pos_b - pos_a;
    let dist = delta.magnitude();
    let penetration = (a.radius + b.radius) - dist;
    if penetration < 0.0 {
        return None;
    }

    let normal = if dist > 0.0 { delta / dist } else { Vec2::X };

    Some(Contact {
        normal,
        penetration,
        offsets: Some(ContactOffsets {
            a: normal * a.radius,
            b: normal * -b.radius,
        }),
    })
}

/// Circle (A) vs axis-aligned box (B).
///
/// The contact point is the closest point on the box. When the circle center
/// sits inside the box (or exactly on its boundary) the closest point is the
/// center itself, so the nearest face decides the normal instead: the axis
/// with the smaller face distance wins, Y on ties.
pub fn circle_box_contact(
    circle_pos: Vec2,
    circle: &CircleCollider,
    box_pos: Vec2,
    b: &BoxCollider,
) -> Option<Contact> {
    let closest = closest_point_on_box(circle_pos, box_pos, b);
    let delta = circle_pos - closest;
    let dist_sq = delta.magnitude_squared();
    if dist_sq > circle.radius * circle.radius {
        return None;
    }

    let (normal, penetration, contact_point) = if dist_sq > 0.0 {
        let dist = dist_sq.sqrt();
        // delta points out of the box toward the circle
        (-(delta / dist), circle.radius - dist, closest)
    } else {
        let (outward, face_dist) = nearest_face(circle_pos, box_pos, b);
        let face_point = match outward {
            o if o.x != 0.0 => Vec2::new(box_pos.x + o.x * b.half_width, circle_pos.y),
            o => Vec2::new(circle_pos.x, box_pos.y + o.y * b.half_height),
        };
        (-outward, circle.radius + face_dist, face_point)
    };

    Some(Contact {
        normal,
        penetration,
        offsets: Some(ContactOffsets {
            a: contact_point - circle_pos,
            b: contact_point - box_pos,
        }),
    })
}

/// Outward direction and distance of the box face closest to an interior point.
fn nearest_face(point: Vec2, box_pos: Vec2, b: &BoxCollider) -> (Vec2, f64) {
    let left = point.x - (box_pos.x - b.half_width);
    let right = (box_pos.x + b.half_width) - point.x;
    let top = point.y - (box_pos.y - b.half_height);
    let bottom = (box_pos.y + b.half_height) - point.y;

    let (x_dir, x_dist) = if left < right {
        (Vec2::new(-1.0, 0.0), left)
    } else {
        (Vec2::new(1.0, 0.0), right)
    };
    let (y_dir, y_dist) = if top <= bottom {
        (Vec2::new(0.0, -1.0), top)
    } else {
        (Vec2::new(0.0, 1.0), bottom)
    };

    if x_dist < y_dist {
        (x_dir, x_dist)
    } else {
        (y_dir, y_dist)
    }
}

/// Axis-aligned box A vs box B, separated along the axis of least overlap.
///
/// Translation-only: the contact carries no offsets.
pub fn box_box_contact(
    pos_a: Vec2,
    a: &BoxCollider,
    pos_b: Vec2,
    b: &BoxCollider,
) -> Option<Contact> {
    let delta = pos_b - pos_a;
    let overlap_x = (a.half_width + b.half_width) - delta.x.abs();
    let overlap_y = (a.half_height + b.half_height) - delta.y.abs();
    if overlap_x < 0.0 || overlap_y < 0.0 {
        return None;
    }

    let sign = |v: f64| if v < 0.0 { -1.0 } else { 1.0 };
    let (normal, penetration) = if overlap_x < overlap_y {
        (Vec2::new(sign(delta.x), 0.0), overlap_x)
    } else {
        (Vec2::new(0.0, sign(delta.y)), overlap_y)
    };

    Some(Contact {
        normal,
        penetration,
        offsets: None,
    })
}

// =============================================================================
// Resolution
// =============================================================================

/// Resolve one contact between two bodies.
///
/// Returns `None` without touching either body when both are immovable.
pub fn resolve_contact(
    body_a: &mut Body,
    mat_a: &Material,
    body_b: &mut Body,
    mat_b: &Material,
    contact: &Contact,
    params: &ResolveParams,
) -> Option<ContactImpulse> {
    let total_inv_mass = body_a.inv_mass() + body_b.inv_mass();
    if total_inv_mass == 0.0 {
        return None;
    }

    // Zero lever arms make every angular term below vanish
    let (ra, rb) = contact
        .offsets
        .map_or((Vec2::ZERO, Vec2::ZERO), |o| (o.a, o.b));
    let normal = contact.normal;

    let mut impulse = ContactImpulse {
        normal: 0.0,
        friction: Vec2::ZERO,
    };

    let rel_vel = body_b.velocity_at(rb) - body_a.velocity_at(ra);
    let vel_along_normal = rel_vel.dot(&normal);

    if vel_along_normal < 0.0 {
        // === Normal impulse ===
        let rest_speed = params.rest_speed + params.gravity_dt.dot(&normal).abs();
        let restitution = if -vel_along_normal < rest_speed {
            0.0
        } else {
            mat_a.combined_restitution(mat_b)
        };

        let k_normal = effective_inv_mass(body_a, body_b, ra, rb, normal);
        let j = -(1.0 + restitution) * vel_along_normal / k_normal;
        apply_pair_impulse(body_a, body_b, normal * j, ra, rb);
        impulse.normal = j;

        // === Friction impulse ===
        let rel_vel = body_b.velocity_at(rb) - body_a.velocity_at(ra);
        let tangent_vel = rel_vel - normal * rel_vel.dot(&normal);
        let tangent_speed = tangent_vel.magnitude();

        if tangent_speed > constants::EPSILON {
            let tangent = tangent_vel / tangent_speed;
            let k_tangent = effective_inv_mass(body_a, body_b, ra, rb, tangent);
            let jt = -rel_vel.dot(&tangent) / k_tangent;

            let static_mu = mat_a.combined_static_friction(mat_b);
            let friction = if jt.abs() < j * static_mu {
                tangent * jt
            } else {
                let dynamic_mu = mat_a.combined_dynamic_friction(mat_b);
                tangent * (-j * dynamic_mu)
            };
            apply_pair_impulse(body_a, body_b, friction, ra, rb);
            impulse.friction = friction;
        }
    }

    // === Positional correction ===
    let depth = (contact.penetration - params.penetration_slop).max(0.0);
    let correction = normal * (depth / total_inv_mass * params.penetration_percent);
    body_a.position -= correction * body_a.inv_mass();
    body_b.position += correction * body_b.inv_mass();

    Some(impulse)
}

/// Inverse of the effective mass along `dir`:
/// `1/mA + 1/mB + (ra × d)²/IA + (rb × d)²/IB`.
fn effective_inv_mass(a: &Body, b: &Body, ra: Vec2, rb: Vec2, dir: Vec2) -> f64 {
    let ra_cross = ra.cross(&dir);
    let rb_cross = rb.cross(&dir);
    a.inv_mass()
        + b.inv_mass()
        + ra_cross * ra_cross * a.inv_inertia()
        + rb_cross * rb_cross * b.inv_inertia()
}

/// Apply `impulse` to B and its opposite to A.
fn apply_pair_impulse(a: &mut Body, b: &mut Body, impulse: Vec2, ra: Vec2, rb: Vec2) {
    a.apply_impulse(-impulse, ra);
    b.apply_impulse(impulse, rb);
}

// =============================================================================
// Tests
// =============================================================================
