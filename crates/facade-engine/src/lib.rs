//! Facade engine crate.
//!
//! Primitives shared by the layout compiler and its front ends: design-space
//! geometry, colors, and logger setup.

pub mod coords;
pub mod logging;
pub mod paint;
