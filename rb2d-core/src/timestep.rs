//! Fixed-timestep driver.
//!
//! Real frame time is accumulated and consumed in whole `dt` slices, one
//! [`World::step`] per slice, so the simulation advances identically no
//! matter how irregular the frame rate is. The leftover fraction is exposed
//! as [`FixedTimestep::alpha`] for render interpolation:
//!
//! ```rust,ignore
//! let mut clock = FixedTimestep::new(1.0 / 60.0);
//! loop {
//!     clock.advance(&mut world, frame_seconds);
//!     let alpha = clock.alpha(); // 0.0..1.0
//!     // draw at prev.lerp(&current, alpha)
//! }
//! ```

use log::warn;

use crate::world::World;

/// Default cap on slices consumed by one [`FixedTimestep::advance`] call.
pub const DEFAULT_MAX_STEPS: usize = 8;

#[derive(Debug, Clone, PartialEq)]
pub struct FixedTimestep {
    dt: f64,
    accumulator: f64,
    /// Pending slices beyond this are dropped instead of simulated
    pub max_steps: usize,
}

impl FixedTimestep {
    pub fn new(dt: f64) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Accumulate `elapsed` seconds and step `world` once per whole slice.
    ///
    /// Returns the number of steps taken. Negative or non-finite input is
    /// ignored. A backlog larger than `max_steps` slices is discarded so a
    /// long stall cannot snowball into ever longer frames.
    pub fn advance(&mut self, world: &mut World, elapsed: f64) -> usize {
        if !elapsed.is_finite() || elapsed < 0.0 || self.dt <= 0.0 {
            return 0;
        }
        self.accumulator += elapsed;

        let mut steps = 0;
        while self.accumulator >= self.dt {
            if steps == self.max_steps {
                let dropped = (self.accumulator / self.dt).floor();
                warn!(
                    "fixed timestep fell behind, dropping {} pending steps",
                    dropped
                );
                self.accumulator %= self.dt;
                break;
            }
            world.step(self.dt);
            self.accumulator -= self.dt;
            steps += 1;
        }
        steps
    }

    /// Fraction of a step left in the accumulator, in `[0, 1)`.
    pub fn alpha(&self) -> f64 {
        if self.dt <= 0.0 {
            return 0.0;
        }
        self.accumulator / self.dt
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

// =============================================================================
// Tests
// =============================================================================
