use std::fmt;

use crate::coords::Vec2;

/// Error returned by [`FontSystem::load_font`].
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// Opaque handle to a font loaded into a [`FontSystem`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

impl FontId {
    /// The first loaded font. With no font loaded, measurement falls back
    /// to fixed per-character metrics.
    #[inline]
    pub const fn fallback() -> Self {
        FontId(0)
    }
}

/// Line height as a multiple of font size.
const LINE_HEIGHT: f32 = 1.2;
/// Advance per character, as a multiple of font size, when no font is loaded.
const FALLBACK_ADVANCE: f32 = 0.55;

/// Owns a collection of loaded fonts and measures text with them.
///
/// Headless hosts may run without any font: measurement then uses fixed
/// per-character metrics so layout stays deterministic.
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self { fonts: Vec::new() }
    }

    /// Parses and stores a TrueType or OpenType font from raw bytes.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        log::debug!("loaded font #{}", id.0);
        Ok(id)
    }

    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }

    /// Bounding box of `text` laid out at `size`, in logical pixels.
    #[must_use]
    pub fn measure_text(&self, text: &str, id: FontId, size: f32, max_width: Option<f32>) -> Vec2 {
        let Some(font) = self.fonts.get(id.0) else {
            return measure_fallback(text, size, max_width);
        };
        if text.is_empty() {
            return Vec2::new(0.0, size * LINE_HEIGHT);
        }

        use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings { max_width, ..LayoutSettings::default() });
        layout.append(&[font], &TextStyle::new(text, size, 0));

        // Pen position after each glyph, not the bitmap edge, so the width
        // is never narrower than the wrap check the layout itself uses.
        let glyphs = layout.glyphs();
        let w = glyphs
            .iter()
            .map(|g| {
                let m = font.metrics_indexed(g.key.glyph_index, size);
                (g.x - m.xmin as f32 + m.advance_width).max(0.0)
            })
            .fold(0.0f32, f32::max);
        let h = glyphs
            .iter()
            .map(|g| g.y + g.height as f32)
            .fold(size * LINE_HEIGHT, f32::max);
        Vec2::new(w, h)
    }
}

impl Default for FontSystem {
    fn default() -> Self {
        Self::new()
    }
}

fn measure_fallback(text: &str, size: f32, max_width: Option<f32>) -> Vec2 {
    let advance = size * FALLBACK_ADVANCE;
    let natural = text.chars().count() as f32 * advance;
    let line_h = size * LINE_HEIGHT;
    match max_width {
        Some(max) if max > 0.0 && natural > max => {
            let lines = (natural / max).ceil();
            Vec2::new(max, lines * line_h)
        }
        _ => Vec2::new(natural, line_h),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_scales_with_length() {
        let fs = FontSystem::new();
        let a = fs.measure_text("abcd", FontId::fallback(), 10.0, None);
        assert!((a.x - 22.0).abs() < 1e-4);
        assert!((a.y - 12.0).abs() < 1e-4);
    }

    #[test]
    fn fallback_wraps_at_max_width() {
        let fs = FontSystem::new();
        let s = fs.measure_text("abcdefghij", FontId::fallback(), 10.0, Some(20.0));
        assert_eq!(s.x, 20.0);
        assert!((s.y - 36.0).abs() < 1e-4);
    }

    #[test]
    fn garbage_bytes_fail_to_load() {
        let mut fs = FontSystem::new();
        assert!(fs.load_font(b"not a font").is_err());
        assert_eq!(fs.font_count(), 0);
    }
}
