//! Collision shapes and their surface materials.
//!
//! A collider is a per-body descriptor: geometry plus a material triple
//! (restitution, static friction, dynamic friction). Colliders are plain
//! values; tune them freely before handing them to
//! [`World::add`](crate::world::World::add). Once registered the world only
//! exposes them read-only.

use serde::{Deserialize, Serialize};

/// Surface response coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Bounciness: 0 = no rebound, 1 = perfectly elastic.
    pub restitution: f64,
    /// Coulomb coefficient below which a contact sticks.
    pub static_friction: f64,
    /// Coulomb coefficient applied while sliding.
    pub dynamic_friction: f64,
}

impl Material {
    pub const fn new(restitution: f64, static_friction: f64, dynamic_friction: f64) -> Self {
        Self {
            restitution,
            static_friction,
            dynamic_friction,
        }
    }

    /// Restitution for a pair is the less bouncy of the two.
    pub fn combined_restitution(&self, other: &Self) -> f64 {
        self.restitution.min(other.restitution)
    }

    /// Static friction combined in quadrature: `sqrt(a² + b²)`.
    pub fn combined_static_friction(&self, other: &Self) -> f64 {
        self.static_friction.hypot(other.static_friction)
    }

    /// Dynamic friction combined in quadrature: `sqrt(a² + b²)`.
    pub fn combined_dynamic_friction(&self, other: &Self) -> f64 {
        self.dynamic_friction.hypot(other.dynamic_friction)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new(0.5, 0.4, 0.2)
    }
}

/// Circle geometry centered on the body position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleCollider {
    pub radius: f64,
    #[serde(default)]
    pub material: Material,
}

impl CircleCollider {
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            material: Material::default(),
        }
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }
}

/// Axis-aligned box centered on the body position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxCollider {
    pub half_width: f64,
    pub half_height: f64,
    #[serde(default)]
    pub material: Material,
}

impl BoxCollider {
    pub fn new(half_width: f64, half_height: f64) -> Self {
        Self {
            half_width,
            half_height,
            material: Material::default(),
        }
    }

    /// Build from full width and height.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(width * 0.5, height * 0.5)
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }
}

/// Discriminant of a [`Collider`], used for dispatch and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Circle,
    Box,
}

/// The closed set of supported shapes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Collider {
    Circle(CircleCollider),
    Box(BoxCollider),
}

impl Collider {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Collider::Circle(_) => ShapeKind::Circle,
            Collider::Box(_) => ShapeKind::Box,
        }
    }

    pub fn material(&self) -> &Material {
        match self {
            Collider::Circle(c) => &c.material,
            Collider::Box(b) => &b.material,
        }
    }

    /// Moment of inertia of this shape for a body of the given mass.
    ///
    /// - Circle (solid disc): `I = 0.5 * m * r²`
    /// - Box: `I = m * (w² + h²) / 12` with full width and height
    pub fn inertia(&self, mass: f64) -> f64 {
        match self {
            Collider::Circle(c) => 0.5 * mass * c.radius * c.radius,
            Collider::Box(b) => {
                let width = 2.0 * b.half_width;
                let height = 2.0 * b.half_height;
                mass * (width * width + height * height) / 12.0
            }
        }
    }
}

impl From<CircleCollider> for Collider {
    fn from(circle: CircleCollider) -> Self {
        Collider::Circle(circle)
    }
}

impl From<BoxCollider> for Collider {
    fn from(b: BoxCollider) -> Self {
        Collider::Box(b)
    }
}

// =============================================================================
// Tests
// =============================================================================
