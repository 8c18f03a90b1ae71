//! # rb2d core
//!
//! A small 2D rigid-body physics engine for real-time interactive loops.
//!
//! ## Architecture
//!
//! - `types`: Core value types (Vec2, constants)
//! - `body`: Rigid body state, forces and impulses
//! - `integrator`: Numerical integration (semi-implicit Euler)
//! - `collider`: Circle and box shapes with surface materials
//! - `collision`: Narrow-phase predicates and impulse-based resolution
//! - `world`: Body registry and fixed-step solver
//! - `timestep`: Fixed-timestep accumulator for driving a world
//! - `materials`: YAML-based material and world configuration loader

pub mod body;
pub mod collider;
pub mod collision;
pub mod integrator;
pub mod materials;
pub mod timestep;
pub mod types;
pub mod world;

pub use body::Body;
pub use collider::{BoxCollider, CircleCollider, Collider, Material, ShapeKind};
pub use timestep::FixedTimestep;
pub use types::Vec2;
pub use world::{BodyHandle, RestThresholds, World, WorldConfig};
