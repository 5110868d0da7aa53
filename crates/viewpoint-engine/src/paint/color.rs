/// Premultiplied RGBA color.
///
/// Invariant: `r`, `g`, `b` are already multiplied by `a`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn transparent() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 }
    }

    #[inline]
    pub const fn white() -> Self {
        Self { r: 1.0, g: 1.0, b: 1.0, a: 1.0 }
    }

    /// Premultiplied color from straight-alpha components in `[0, 1]`.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: r.clamp(0.0, 1.0) * a,
            g: g.clamp(0.0, 1.0) * a,
            b: b.clamp(0.0, 1.0) * a,
            a,
        }
    }

    /// Premultiplied color from a `0xRRGGBBAA` literal (straight alpha).
    #[inline]
    pub fn from_hex(rgba: u32) -> Self {
        let [r, g, b, a] = rgba.to_be_bytes();
        Self::from_straight(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Straight-alpha components. For `a == 0`, RGB is returned as 0.
    #[inline]
    pub fn to_straight(self) -> (f32, f32, f32, f32) {
        if self.a <= 0.0 {
            (0.0, 0.0, 0.0, 0.0)
        } else {
            let inv = 1.0 / self.a;
            (self.r * inv, self.g * inv, self.b * inv, self.a)
        }
    }

    #[inline]
    pub fn is_opaque(self) -> bool {
        self.a >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_premultiplied() {
        let c = Color::from_hex(0xff000080);
        assert!((c.a - 128.0 / 255.0).abs() < 1e-6);
        assert!((c.r - c.a).abs() < 1e-6);
        assert_eq!(c.g, 0.0);
    }

    #[test]
    fn straight_round_trip_for_opaque() {
        let c = Color::from_straight(0.2, 0.4, 0.6, 1.0);
        assert_eq!(c.to_straight(), (0.2, 0.4, 0.6, 1.0));
        assert!(c.is_opaque());
    }

    #[test]
    fn transparent_to_straight_is_zero() {
        assert_eq!(Color::transparent().to_straight(), (0.0, 0.0, 0.0, 0.0));
    }
}
