//! Viewpoint engine crate.
//!
//! Renderer-agnostic pieces shared by the widget layer: geometry, paint,
//! the z-ordered draw list widgets paint into, font measurement, and logger
//! setup. Rasterizing the draw list is left to the host.

pub mod coords;
pub mod logging;
pub mod paint;
pub mod scene;
pub mod text;
