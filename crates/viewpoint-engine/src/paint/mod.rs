//! Paint model shared between widgets and the draw list.
//!
//! Colors are stored as linear premultiplied RGBA.

mod color;

pub use color::Color;
