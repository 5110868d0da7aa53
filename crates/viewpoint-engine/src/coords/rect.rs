use super::Vec2;

/// Axis-aligned rectangle in logical pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { origin: Vec2::new(x, y), size: Vec2::new(w, h) }
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new(self.origin.x + self.size.x * 0.5, self.origin.y + self.size.y * 0.5)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Half-open containment: [min, max). Empty rects contain nothing.
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        let max = self.max();
        p.x >= self.origin.x && p.y >= self.origin.y && p.x < max.x && p.y < max.y
    }

    /// Horizontal position of `x` across the rect, clamped to [0, 1].
    ///
    /// Zero-width rects map everything to 0. Used to turn a pointer position
    /// into a slider fraction.
    #[inline]
    pub fn fraction_x(self, x: f32) -> f32 {
        if self.size.x <= 0.0 {
            0.0
        } else {
            ((x - self.origin.x) / self.size.x).clamp(0.0, 1.0)
        }
    }

    /// Inverse of [`fraction_x`](Self::fraction_x): the x coordinate at fraction `t`.
    #[inline]
    pub fn x_at(self, t: f32) -> f32 {
        self.origin.x + t.clamp(0.0, 1.0) * self.size.x
    }
}
