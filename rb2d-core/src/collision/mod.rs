//! Collision detection and resolution.
//!
//! This module handles:
//! - **Detection**: cheap boolean overlap predicates per shape pair
//! - **Resolution**: contact generation plus impulse, friction and
//!   positional correction
//!
//! ## Supported pairs
//!
//! ```text
//!             circle        box
//! circle   rotational   rotational
//! box      rotational   translation-only
//! ```
//!
//! There is no continuous detection: a body moving more than its own size
//! in one step can tunnel through thin geometry.

pub mod detection;
pub mod resolution;

pub use detection::*;
pub use resolution::*;
