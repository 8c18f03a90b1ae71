//! Python bindings for the rb2d-core rigid-body engine.
//!
//! Provides a simple Python API:
//!
//! ```python
//! from rb2d_physics import World, FixedTimestep
//!
//! world = World()
//! world.add_box(400.0, 550.0, 0.0, 400.0, 20.0)   # static floor
//! ball = world.add_circle(400.0, 100.0, 1.0, 20.0)
//!
//! clock = FixedTimestep(1.0 / 60.0)
//! while running:
//!     clock.advance(world, frame_seconds)
//!     pos = world.position(ball)
//!     print(f"Ball at ({pos.x}, {pos.y})")
//! ```

use pyo3::exceptions::PyIndexError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use rb2d_core::{
    Body, BodyHandle, BoxCollider, CircleCollider, Collider, FixedTimestep as CoreTimestep,
    Material, Vec2 as CoreVec2, World as CoreWorld,
};

/// 2D vector for positions, velocities, etc.
#[pyclass]
#[derive(Clone, Copy)]
pub struct Vec2 {
    #[pyo3(get, set)]
    pub x: f64,
    #[pyo3(get, set)]
    pub y: f64,
}

#[pymethods]
impl Vec2 {
    #[new]
    fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn __repr__(&self) -> String {
        format!("Vec2({:.4}, {:.4})", self.x, self.y)
    }

    fn magnitude(&self) -> f64 {
        CoreVec2::from(*self).magnitude()
    }

    fn to_tuple(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

impl From<CoreVec2> for Vec2 {
    fn from(v: CoreVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Vec2> for CoreVec2 {
    fn from(v: Vec2) -> Self {
        CoreVec2::new(v.x, v.y)
    }
}

/// A world of circles and boxes.
///
/// Bodies are referred to by the integer returned from `add_circle` /
/// `add_box`. A mass of zero or less makes a static body.
#[pyclass]
pub struct World {
    inner: CoreWorld,
}

fn no_body(index: usize) -> PyErr {
    PyIndexError::new_err(format!("no body with handle {}", index))
}

impl World {
    fn handle(&self, index: usize) -> PyResult<BodyHandle> {
        self.inner.handle(index).ok_or_else(|| no_body(index))
    }

    fn body(&self, index: usize) -> PyResult<&Body> {
        let handle = self.handle(index)?;
        self.inner.body(handle).ok_or_else(|| no_body(index))
    }

    fn body_mut(&mut self, index: usize) -> PyResult<&mut Body> {
        let handle = self.handle(index)?;
        self.inner.body_mut(handle).ok_or_else(|| no_body(index))
    }

    fn insert(&mut self, x: f64, y: f64, mass: f64, collider: Collider) -> usize {
        self.inner
            .add(Body::new(CoreVec2::new(x, y), mass), collider)
            .index()
    }
}

#[pymethods]
impl World {
    /// Create an empty world with default gravity and solver settings.
    #[new]
    fn new() -> Self {
        Self {
            inner: CoreWorld::new(),
        }
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    /// Add a circle centred at (x, y).
    ///
    /// Returns the body handle.
    #[pyo3(signature = (x, y, mass, radius, restitution=None, static_friction=None, dynamic_friction=None))]
    fn add_circle(
        &mut self,
        x: f64,
        y: f64,
        mass: f64,
        radius: f64,
        restitution: Option<f64>,
        static_friction: Option<f64>,
        dynamic_friction: Option<f64>,
    ) -> usize {
        let material = material_or_default(restitution, static_friction, dynamic_friction);
        let collider = CircleCollider::new(radius).with_material(material);
        self.insert(x, y, mass, collider.into())
    }

    /// Add an axis-aligned box centred at (x, y) with the given half extents.
    ///
    /// Returns the body handle.
    #[pyo3(signature = (x, y, mass, half_width, half_height, restitution=None, static_friction=None, dynamic_friction=None))]
    fn add_box(
        &mut self,
        x: f64,
        y: f64,
        mass: f64,
        half_width: f64,
        half_height: f64,
        restitution: Option<f64>,
        static_friction: Option<f64>,
        dynamic_friction: Option<f64>,
    ) -> usize {
        let material = material_or_default(restitution, static_friction, dynamic_friction);
        let collider = BoxCollider::new(half_width, half_height).with_material(material);
        self.insert(x, y, mass, collider.into())
    }

    /// Advance the world by one step of dt seconds.
    fn step(&mut self, dt: f64) {
        self.inner.step(dt);
    }

    /// Run multiple steps at once (more efficient).
    fn step_n(&mut self, dt: f64, steps: usize) {
        for _ in 0..steps {
            self.inner.step(dt);
        }
    }

    fn position(&self, handle: usize) -> PyResult<Vec2> {
        Ok(self.body(handle)?.position.into())
    }

    fn set_position(&mut self, handle: usize, x: f64, y: f64) -> PyResult<()> {
        self.body_mut(handle)?.position = CoreVec2::new(x, y);
        Ok(())
    }

    fn velocity(&self, handle: usize) -> PyResult<Vec2> {
        Ok(self.body(handle)?.velocity.into())
    }

    fn set_velocity(&mut self, handle: usize, vx: f64, vy: f64) -> PyResult<()> {
        self.body_mut(handle)?.velocity = CoreVec2::new(vx, vy);
        Ok(())
    }

    /// Rotation in radians.
    fn rotation(&self, handle: usize) -> PyResult<f64> {
        Ok(self.body(handle)?.rotation)
    }

    /// Angular velocity in rad/s.
    fn angular_velocity(&self, handle: usize) -> PyResult<f64> {
        Ok(self.body(handle)?.angular_velocity)
    }

    fn is_static(&self, handle: usize) -> PyResult<bool> {
        Ok(self.body(handle)?.is_static())
    }

    /// Apply an impulse at an offset from the body centre (defaults to the centre).
    #[pyo3(signature = (handle, jx, jy, offset_x=0.0, offset_y=0.0))]
    fn apply_impulse(
        &mut self,
        handle: usize,
        jx: f64,
        jy: f64,
        offset_x: f64,
        offset_y: f64,
    ) -> PyResult<()> {
        self.body_mut(handle)?
            .apply_impulse(CoreVec2::new(jx, jy), CoreVec2::new(offset_x, offset_y));
        Ok(())
    }

    /// Add a force for the next step only.
    fn apply_force(&mut self, handle: usize, fx: f64, fy: f64) -> PyResult<()> {
        self.body_mut(handle)?.apply_force(CoreVec2::new(fx, fy));
        Ok(())
    }

    #[getter]
    fn gravity(&self) -> Vec2 {
        self.inner.gravity.into()
    }

    #[setter]
    fn set_gravity(&mut self, gravity: Vec2) {
        self.inner.gravity = gravity.into();
    }

    #[getter]
    fn penetration_percent(&self) -> f64 {
        self.inner.penetration_percent
    }

    #[setter]
    fn set_penetration_percent(&mut self, percent: f64) {
        self.inner.penetration_percent = percent;
    }

    #[getter]
    fn penetration_slop(&self) -> f64 {
        self.inner.penetration_slop
    }

    #[setter]
    fn set_penetration_slop(&mut self, slop: f64) {
        self.inner.penetration_slop = slop;
    }

    #[getter]
    fn iterations(&self) -> usize {
        self.inner.iterations
    }

    #[setter]
    fn set_iterations(&mut self, iterations: usize) {
        self.inner.iterations = iterations;
    }

    /// Per-kind rest speeds as (circle_circle, circle_box, box_box).
    #[getter]
    fn rest_thresholds(&self) -> (f64, f64, f64) {
        let t = self.inner.rest_thresholds;
        (t.circle_circle, t.circle_box, t.box_box)
    }

    #[setter]
    fn set_rest_thresholds(&mut self, thresholds: (f64, f64, f64)) {
        self.inner.rest_thresholds = thresholds.into();
    }

    /// Get one body's state as dict for easy inspection.
    fn state_dict(&self, handle: usize) -> PyResult<PyObject> {
        let body = self.body(handle)?;
        Python::with_gil(|py| {
            let dict = PyDict::new(py);
            dict.set_item("x", body.position.x)?;
            dict.set_item("y", body.position.y)?;
            dict.set_item("vx", body.velocity.x)?;
            dict.set_item("vy", body.velocity.y)?;
            dict.set_item("rotation", body.rotation)?;
            dict.set_item("angular_velocity", body.angular_velocity)?;
            dict.set_item("mass", body.mass())?;
            dict.set_item("speed", body.velocity.magnitude())?;
            Ok(dict.into())
        })
    }
}

fn material_or_default(
    restitution: Option<f64>,
    static_friction: Option<f64>,
    dynamic_friction: Option<f64>,
) -> Material {
    let default = Material::default();
    Material::new(
        restitution.unwrap_or(default.restitution),
        static_friction.unwrap_or(default.static_friction),
        dynamic_friction.unwrap_or(default.dynamic_friction),
    )
}

/// Fixed-step clock that drives a `World` from real frame time.
#[pyclass]
pub struct FixedTimestep {
    inner: CoreTimestep,
}

#[pymethods]
impl FixedTimestep {
    #[new]
    #[pyo3(signature = (dt, max_steps=None))]
    fn new(dt: f64, max_steps: Option<usize>) -> Self {
        let mut inner = CoreTimestep::new(dt);
        if let Some(max_steps) = max_steps {
            inner.max_steps = max_steps;
        }
        Self { inner }
    }

    #[getter]
    fn dt(&self) -> f64 {
        self.inner.dt()
    }

    /// Feed `elapsed` seconds of frame time; returns the number of steps taken.
    fn advance(&mut self, world: &mut World, elapsed: f64) -> usize {
        self.inner.advance(&mut world.inner, elapsed)
    }

    /// Fraction of a step left over, for render interpolation.
    fn alpha(&self) -> f64 {
        self.inner.alpha()
    }

    fn reset(&mut self) {
        self.inner.reset();
    }
}

/// Python module definition.
#[pymodule]
fn rb2d_physics(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Vec2>()?;
    m.add_class::<World>()?;
    m.add_class::<FixedTimestep>()?;
    Ok(())
}
