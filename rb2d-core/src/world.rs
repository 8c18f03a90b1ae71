//! The simulation world: body registry and fixed-step solver.
//!
//! Bodies are moved into an append-only arena by [`World::add`], which hands
//! back a [`BodyHandle`]. There is no removal; a handle stays valid for the
//! lifetime of the world that issued it.
//!
//! ## Step
//!
//! ```text
//! step(dt):
//!   for each dynamic body: F += gravity * m; integrate(dt)
//!   repeat `iterations` times:
//!     for each unordered pair (i < j):
//!       overlap predicate → contact → resolve
//! ```
//!
//! Repeating the pair scan a few times per step lets stacked and resting
//! contacts settle within one step. Pass count trades cost for stability.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::body::Body;
use crate::collider::{BoxCollider, CircleCollider, Collider};
use crate::collision::{
    aabb_vs_aabb, box_box_contact, circle_box_contact, circle_circle_contact, circle_vs_box,
    circle_vs_circle, resolve_contact, ResolveParams,
};
use crate::types::{constants, Vec2};

/// Opaque reference to a body registered in a [`World`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(usize);

impl BodyHandle {
    /// Position in registration order.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Approach speeds below which restitution is ignored, per pair kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestThresholds {
    pub circle_circle: f64,
    pub circle_box: f64,
    pub box_box: f64,
}

impl From<(f64, f64, f64)> for RestThresholds {
    /// `(circle_circle, circle_box, box_box)`
    fn from((circle_circle, circle_box, box_box): (f64, f64, f64)) -> Self {
        Self {
            circle_circle,
            circle_box,
            box_box,
        }
    }
}

impl Default for RestThresholds {
    fn default() -> Self {
        Self {
            circle_circle: 0.5,
            circle_box: 0.3,
            box_box: 0.5,
        }
    }
}

/// Serializable solver settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub gravity: Vec2,
    pub penetration_percent: f64,
    pub penetration_slop: f64,
    pub iterations: usize,
    pub rest_thresholds: RestThresholds,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, constants::GRAVITY),
            penetration_percent: constants::PENETRATION_PERCENT,
            penetration_slop: constants::PENETRATION_SLOP,
            iterations: constants::SOLVER_ITERATIONS,
            rest_thresholds: RestThresholds::default(),
        }
    }
}

struct Entry {
    body: Body,
    collider: Collider,
}

/// Per-pass resolution parameters for each pair kind.
struct PassParams {
    circle_circle: ResolveParams,
    circle_box: ResolveParams,
    box_box: ResolveParams,
}

pub struct World {
    /// Acceleration applied to every dynamic body
    pub gravity: Vec2,
    /// Fraction of penetration (beyond slop) corrected per solve pass
    pub penetration_percent: f64,
    /// Overlap tolerated without positional correction
    pub penetration_slop: f64,
    /// Solve passes per step
    pub iterations: usize,
    pub rest_thresholds: RestThresholds,

    entries: Vec<Entry>,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    pub fn new() -> Self {
        Self::with_config(&WorldConfig::default())
    }

    pub fn with_config(config: &WorldConfig) -> Self {
        Self {
            gravity: config.gravity,
            penetration_percent: config.penetration_percent,
            penetration_slop: config.penetration_slop,
            iterations: config.iterations,
            rest_thresholds: config.rest_thresholds,
            entries: Vec::new(),
        }
    }

    /// Current tunables as a serializable config.
    pub fn config(&self) -> WorldConfig {
        WorldConfig {
            gravity: self.gravity,
            penetration_percent: self.penetration_percent,
            penetration_slop: self.penetration_slop,
            iterations: self.iterations,
            rest_thresholds: self.rest_thresholds,
        }
    }

    /// Register a body with its shape.
    ///
    /// The moment of inertia is derived here from the collider, so the body
    /// must be paired with its final shape.
    pub fn add(&mut self, mut body: Body, collider: impl Into<Collider>) -> BodyHandle {
        let collider = collider.into();
        body.derive_inertia(&collider);

        let handle = BodyHandle(self.entries.len());
        debug!(
            "registered body {} ({:?}, mass={}, inertia={})",
            handle.0,
            collider.kind(),
            body.mass(),
            body.inertia()
        );
        self.entries.push(Entry { body, collider });
        handle
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.entries.get(handle.0).map(|e| &e.body)
    }

    /// Mutable access for applying forces or impulses between steps.
    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        self.entries.get_mut(handle.0).map(|e| &mut e.body)
    }

    /// Colliders are read-only once registered.
    pub fn collider(&self, handle: BodyHandle) -> Option<&Collider> {
        self.entries.get(handle.0).map(|e| &e.collider)
    }

    /// Look up the handle registered at `index`, if there is one.
    pub fn handle(&self, index: usize) -> Option<BodyHandle> {
        (index < self.entries.len()).then_some(BodyHandle(index))
    }

    pub fn handles(&self) -> impl Iterator<Item = BodyHandle> {
        (0..self.entries.len()).map(BodyHandle)
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyHandle, &Body, &Collider)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| (BodyHandle(i), &e.body, &e.collider))
    }

    /// Advance the simulation by exactly `dt` seconds.
    pub fn step(&mut self, dt: f64) {
        trace!(
            "step dt={} bodies={} iterations={}",
            dt,
            self.entries.len(),
            self.iterations
        );

        self.integrate(dt);

        let params = self.pass_params(dt);
        for _ in 0..self.iterations {
            self.solve_pass(&params);
        }
    }

    fn integrate(&mut self, dt: f64) {
        let gravity = self.gravity;
        for entry in &mut self.entries {
            let body = &mut entry.body;
            if body.is_static() {
                continue;
            }
            body.apply_force(gravity * body.mass());
            body.integrate(dt);
        }
    }

    /// A body resting under gravity re-enters its support at `g * dt` every
    /// step; the resolver treats that much approach along the normal as
    /// resting on top of the per-kind threshold.
    fn pass_params(&self, dt: f64) -> PassParams {
        let gravity_dt = self.gravity * dt.abs();
        let params = |threshold: f64| ResolveParams {
            penetration_percent: self.penetration_percent,
            penetration_slop: self.penetration_slop,
            rest_speed: threshold,
            gravity_dt,
        };
        PassParams {
            circle_circle: params(self.rest_thresholds.circle_circle),
            circle_box: params(self.rest_thresholds.circle_box),
            box_box: params(self.rest_thresholds.box_box),
        }
    }

    /// One scan over every unordered pair.
    fn solve_pass(&mut self, params: &PassParams) {
        let n = self.entries.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let (head, tail) = self.entries.split_at_mut(j);
                resolve_pair(&mut head[i], &mut tail[0], params);
            }
        }
    }
}

/// Dispatch on the shape pair. Each arm re-runs its overlap predicate since
/// earlier pairs in the pass may have moved either body.
fn resolve_pair(a: &mut Entry, b: &mut Entry, params: &PassParams) {
    match (a.collider, b.collider) {
        (Collider::Circle(ca), Collider::Circle(cb)) => {
            if !circle_vs_circle(a.body.position, &ca, b.body.position, &cb) {
                return;
            }
            if let Some(contact) = circle_circle_contact(a.body.position, &ca, b.body.position, &cb)
            {
                resolve_contact(
                    &mut a.body,
                    &ca.material,
                    &mut b.body,
                    &cb.material,
                    &contact,
                    &params.circle_circle,
                );
            }
        }
        (Collider::Circle(circle), Collider::Box(bx)) => {
            resolve_circle_box(&mut a.body, &circle, &mut b.body, &bx, &params.circle_box);
        }
        (Collider::Box(bx), Collider::Circle(circle)) => {
            resolve_circle_box(&mut b.body, &circle, &mut a.body, &bx, &params.circle_box);
        }
        (Collider::Box(ba), Collider::Box(bb)) => {
            if !aabb_vs_aabb(a.body.position, &ba, b.body.position, &bb) {
                return;
            }
            if let Some(contact) = box_box_contact(a.body.position, &ba, b.body.position, &bb) {
                resolve_contact(
                    &mut a.body,
                    &ba.material,
                    &mut b.body,
                    &bb.material,
                    &contact,
                    &params.box_box,
                );
            }
        }
    }
}

fn resolve_circle_box(
    circle_body: &mut Body,
    circle: &CircleCollider,
    box_body: &mut Body,
    bx: &BoxCollider,
    params: &ResolveParams,
) {
    if !circle_vs_box(circle_body.position, circle, box_body.position, bx) {
        return;
    }
    if let Some(contact) = circle_box_contact(circle_body.position, circle, box_body.position, bx) {
        resolve_contact(
            circle_body,
            &circle.material,
            box_body,
            &bx.material,
            &contact,
            params,
        );
    }
}

// =============================================================================
// Tests
// =============================================================================
