//! Geometry types shared by the element model and the produced node tree.
//!
//! Canonical design space:
//! - Canvas units as exported by the design tool
//! - Origin top-left
//! - +X right, +Y down
//!
//! Conversion into the display space of a backend is the job of a
//! `Renderer` in `facade-ui`.

mod area;
mod vec2;

pub use area::Area;
pub use vec2::Vec2;
