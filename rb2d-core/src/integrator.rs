//! Numerical integration for advancing bodies in time.
//!
//! The integrator is semi-implicit (symplectic) Euler: velocity is updated
//! from the accumulated force first, then position from the new velocity.
//!
//! ## Why semi-implicit Euler?
//!
//! - **Symplectic**: bounded energy error in a gravity field, where explicit
//!   Euler gains energy every step
//! - **First-order, one force evaluation**: forces are accumulated once per
//!   step, so there is nothing to re-evaluate mid-step
//! - **Plays well with impulses**: the solver edits velocity after
//!   integration, and the next step moves the body with that edited velocity
//!
//! ## Algorithm
//!
//! ```text
//! 1. a     = F * inv_mass
//! 2. v    += a * dt
//! 3. x    += v * dt        // uses the velocity from step 2
//! 4. θ    += ω * dt
//! 5. F     = 0
//! ```

use crate::body::Body;
use crate::types::Vec2;

/// Semi-implicit Euler integrator.
pub struct SemiImplicitEuler;

impl SemiImplicitEuler {
    /// Advance `body` by `dt` seconds and clear its force accumulator.
    ///
    /// Callers are expected to skip static bodies; see [`Body::integrate`].
    pub fn step(body: &mut Body, dt: f64) {
        let acceleration = body.force * body.inv_mass();

        body.velocity += acceleration * dt;
        body.position += body.velocity * dt;
        body.rotation += body.angular_velocity * dt;

        body.force = Vec2::ZERO;
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Explicit Euler, only for comparing energy behavior.
    fn explicit_euler_step(pos: &mut Vec2, vel: &mut Vec2, acc: Vec2, dt: f64) {
        *pos += *vel * dt;
        *vel += acc * dt;
    }

    #[test]
    fn test_constant_force_closed_form() {
        let mass = 2.0;
        let force = Vec2::new(6.0, -4.0);
        let dt = 1.0 / 60.0;
        let n = 120;

        let mut body = Body::new(Vec2::ZERO, mass);
        for _ in 0..n {
            body.apply_force(force);
            body.integrate(dt);
        }

        // v_n = a * n * dt
        let a = force / mass;
        let expected_vel = a * (n as f64 * dt);
        // x_n = sum_{k=1..n} v_k * dt = a * dt² * n(n+1)/2
        let expected_pos = a * (dt * dt * (n * (n + 1)) as f64 / 2.0);

        assert!(
            (body.velocity - expected_vel).magnitude() < 1e-9,
            "velocity {:?} != {:?}",
            body.velocity,
            expected_vel
        );
        assert!(
            (body.position - expected_pos).magnitude() < 1e-9,
            "position {:?} != {:?}",
            body.position,
            expected_pos
        );
    }

    #[test]
    fn test_velocity_updates_before_position() {
        let mut body = Body::new(Vec2::ZERO, 1.0);
        body.apply_force(Vec2::new(0.0, 10.0));
        SemiImplicitEuler::step(&mut body, 1.0);

        // Explicit Euler would leave position at 0 after the first step
        assert_eq!(body.velocity, Vec2::new(0.0, 10.0));
        assert_eq!(body.position, Vec2::new(0.0, 10.0));
    }

    #[test]
    fn test_force_is_cleared_each_step() {
        let mut body = Body::new(Vec2::ZERO, 1.0);
        body.apply_force(Vec2::new(5.0, 0.0));
        body.integrate(0.1);
        assert_eq!(body.force, Vec2::ZERO);

        let v = body.velocity;
        body.integrate(0.1);
        assert_eq!(body.velocity, v, "force must not persist across steps");
    }

    #[test]
    fn test_rotation_follows_angular_velocity() {
        let mut body = Body::new(Vec2::ZERO, 1.0);
        body.angular_velocity = 3.0;
        for _ in 0..10 {
            body.integrate(0.1);
        }
        assert!((body.rotation - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_symplectic_vs_explicit_energy() {
        // Spring oscillator: explicit Euler spirals outward, semi-implicit
        // keeps the orbit bounded.
        let k = 4.0;
        let dt = 0.05;
        let steps = 2000;

        let mut body = Body::new(Vec2::new(1.0, 0.0), 1.0);
        let mut pos = Vec2::new(1.0, 0.0);
        let mut vel = Vec2::ZERO;

        for _ in 0..steps {
            let spring = body.position * -k;
            body.apply_force(spring);
            body.integrate(dt);
            let acc = pos * -k;
            explicit_euler_step(&mut pos, &mut vel, acc, dt);
        }

        let energy = |x: Vec2, v: Vec2| 0.5 * v.magnitude_squared() + 0.5 * k * x.magnitude_squared();
        let initial = energy(Vec2::new(1.0, 0.0), Vec2::ZERO);
        let symplectic_drift = (energy(body.position, body.velocity) - initial).abs();
        let explicit_drift = (energy(pos, vel) - initial).abs();

        assert!(symplectic_drift < 0.2 * initial, "drift {}", symplectic_drift);
        assert!(
            explicit_drift > 10.0 * symplectic_drift,
            "explicit {} vs symplectic {}",
            explicit_drift,
            symplectic_drift
        );
    }
}
