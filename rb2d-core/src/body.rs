//! Rigid body state.
//!
//! A body carries the kinematic state (position, velocity, rotation, angular
//! velocity), the force accumulator, and its mass properties. Inverse mass and
//! inverse inertia are exactly zero for immovable bodies; that single fact
//! gates every integration and impulse.

use crate::collider::Collider;
use crate::integrator::SemiImplicitEuler;
use crate::types::Vec2;

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Accumulated force, cleared by every integration step
    pub force: Vec2,
    /// Rotation in radians
    pub rotation: f64,
    pub angular_velocity: f64,

    mass: f64,
    inv_mass: f64,
    inertia: f64,
    inv_inertia: f64,
}

impl Body {
    /// Create a body at rest. A mass of zero or less makes it static.
    ///
    /// Inertia stays zero until the body is registered with a collider,
    /// since it depends on the shape.
    pub fn new(position: Vec2, mass: f64) -> Self {
        let (mass, inv_mass) = if mass > 0.0 {
            (mass, 1.0 / mass)
        } else {
            (0.0, 0.0)
        };
        Self {
            position,
            velocity: Vec2::ZERO,
            force: Vec2::ZERO,
            rotation: 0.0,
            angular_velocity: 0.0,
            mass,
            inv_mass,
            inertia: 0.0,
            inv_inertia: 0.0,
        }
    }

    /// Shorthand for `Body::new(position, 0.0)`.
    pub fn new_static(position: Vec2) -> Self {
        Self::new(position, 0.0)
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn inv_mass(&self) -> f64 {
        self.inv_mass
    }

    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    pub fn inv_inertia(&self) -> f64 {
        self.inv_inertia
    }

    /// True when the body has infinite mass and is never moved by the solver.
    pub fn is_static(&self) -> bool {
        self.inv_mass == 0.0
    }

    /// Derive the moment of inertia from the shape the body is paired with.
    /// Static bodies keep zero inertia and zero inverse inertia.
    pub(crate) fn derive_inertia(&mut self, collider: &Collider) {
        if self.is_static() {
            self.inertia = 0.0;
            self.inv_inertia = 0.0;
            return;
        }
        let inertia = collider.inertia(self.mass);
        self.inertia = inertia;
        self.inv_inertia = if inertia > 0.0 { 1.0 / inertia } else { 0.0 };
    }

    /// Accumulate a force for the next integration step.
    pub fn apply_force(&mut self, force: Vec2) {
        self.force += force;
    }

    /// Apply an impulse at `contact_offset` from the center of mass.
    ///
    /// Changes linear velocity by `impulse / m` and angular velocity by
    /// `cross(offset, impulse) / I`. Static bodies are unaffected.
    pub fn apply_impulse(&mut self, impulse: Vec2, contact_offset: Vec2) {
        if self.is_static() {
            return;
        }
        self.velocity += impulse * self.inv_mass;
        self.angular_velocity += contact_offset.cross(&impulse) * self.inv_inertia;
    }

    /// Velocity of the material point at `offset` from the center of mass.
    pub fn velocity_at(&self, offset: Vec2) -> Vec2 {
        self.velocity + offset.perp() * self.angular_velocity
    }

    /// Advance by `dt` seconds. Static bodies never move.
    pub fn integrate(&mut self, dt: f64) {
        if self.is_static() {
            return;
        }
        SemiImplicitEuler::step(self, dt);
    }
}

// =============================================================================
// Tests
// =============================================================================
