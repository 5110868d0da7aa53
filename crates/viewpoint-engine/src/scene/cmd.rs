use crate::coords::{Rect, Vec2};
use crate::paint::Color;
use crate::text::FontId;

/// Stroke drawn along the outer edge of a shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Border {
    pub width: f32,
    pub color: Color,
}

impl Border {
    #[inline]
    pub fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }
}

/// Filled rectangle, optionally rounded and stroked.
#[derive(Debug, Clone, PartialEq)]
pub struct RectCmd {
    pub rect: Rect,
    /// Uniform corner radius; `0.0` for sharp corners.
    pub radius: f32,
    pub color: Color,
    pub border: Option<Border>,
}

/// Filled circle.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleCmd {
    pub center: Vec2,
    pub radius: f32,
    pub color: Color,
    pub border: Option<Border>,
}

/// Single run of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub text: String,
    pub font: FontId,
    /// Font size in logical pixels.
    pub size: f32,
    pub color: Color,
    /// Top-left of the text block in logical pixels.
    pub origin: Vec2,
    /// Wrapping width in logical pixels. `None` = no wrapping.
    pub max_width: Option<f32>,
}

/// Renderer-agnostic draw command.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect(RectCmd),
    Circle(CircleCmd),
    Text(TextCmd),
}

impl DrawCmd {
    /// Text content, for text commands.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            DrawCmd::Text(t) => Some(&t.text),
            _ => None,
        }
    }
}
