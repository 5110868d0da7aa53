use viewpoint_engine::coords::{Rect, Vec2};
use viewpoint_engine::paint::Color;
use viewpoint_engine::scene::{Border, DrawList, ZIndex};
use viewpoint_engine::text::{FontId, FontSystem};

use crate::constraints::LayoutCtx;

/// Drawing surface passed to [`Widget::paint`](crate::widget::Widget::paint).
///
/// Wraps the engine's `DrawList` and exposes the frame's pointer state so
/// widgets can express hover / pressed visuals while painting.
pub struct Painter<'a> {
    draw_list: &'a mut DrawList,
    fonts: &'a FontSystem,
    z: i32,
    regions: Vec<(String, Rect)>,
    /// Pointer position in logical pixels.
    pub mouse_pos: Vec2,
    /// True while the primary button is held down.
    pub mouse_pressed: bool,
}

impl<'a> Painter<'a> {
    pub fn new(
        draw_list: &'a mut DrawList,
        fonts: &'a FontSystem,
        mouse_pos: Vec2,
        mouse_pressed: bool,
    ) -> Self {
        Self { draw_list, fonts, z: 0, regions: Vec::new(), mouse_pos, mouse_pressed }
    }

    // ── input queries ─────────────────────────────────────────────────────

    #[inline]
    pub fn is_hovered(&self, rect: Rect) -> bool {
        rect.contains(self.mouse_pos)
    }

    #[inline]
    pub fn is_pressed(&self, rect: Rect) -> bool {
        self.mouse_pressed && rect.contains(self.mouse_pos)
    }

    // ── layout ────────────────────────────────────────────────────────────

    /// Layout context for re-measuring children while painting.
    ///
    /// Borrows the font system for `'a`, not the painter, so the painter can
    /// still be passed mutably to children.
    #[inline]
    pub fn layout_ctx(&self) -> LayoutCtx<'a> {
        LayoutCtx { fonts: self.fonts }
    }

    pub fn measure_text(&self, text: &str, font: FontId, size: f32, max_width: Option<f32>) -> Vec2 {
        self.fonts.measure_text(text, font, size, max_width)
    }

    // ── drawing ───────────────────────────────────────────────────────────

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let z = self.next_z();
        self.draw_list.push_rect(z, rect, 0.0, color, None);
    }

    /// Rounded rectangle. `radius = 0.0` for sharp corners, `border = None` for no stroke.
    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color, border: Option<Border>) {
        let z = self.next_z();
        self.draw_list.push_rect(z, rect, radius, color, border);
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, border: Option<Border>) {
        let z = self.next_z();
        self.draw_list.push_circle(z, center, radius, color, border);
    }

    /// Text at `origin` (top-left of the first line), wrapped at `max_width`.
    pub fn text(
        &mut self,
        text: impl Into<String>,
        font: FontId,
        size: f32,
        color: Color,
        origin: Vec2,
        max_width: Option<f32>,
    ) {
        let z = self.next_z();
        self.draw_list.push_text(z, text, font, size, color, origin, max_width);
    }

    // ── regions ───────────────────────────────────────────────────────────

    /// Record where a named interactive part was laid out this frame.
    pub fn mark_region(&mut self, id: impl Into<String>, rect: Rect) {
        self.regions.push((id.into(), rect));
    }

    /// Regions marked during this paint pass.
    pub fn into_regions(self) -> Vec<(String, Rect)> {
        self.regions
    }

    #[inline]
    fn next_z(&mut self) -> ZIndex {
        let z = ZIndex::new(self.z);
        self.z += 1;
        z
    }
}
