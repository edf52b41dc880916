//! Color model for image tints and text colors.
//!
//! Geometry types remain in `coords`.

pub mod color;

pub use color::{Color, ColorParseError};
