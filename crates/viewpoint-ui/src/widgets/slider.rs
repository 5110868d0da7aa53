use viewpoint_engine::coords::{Rect, Vec2};
use viewpoint_engine::paint::Color;
use viewpoint_engine::scene::Border;

use crate::constraints::{Constraints, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::Widget;

/// A horizontal range input.
///
/// Behaves like an HTML `<input type="range">`: the value snaps to
/// `min + k * step` inside `[min, max]`, `on_input` fires on every value
/// change while the pointer drags or clicks, and `on_change` fires once when
/// the pointer is released.
///
/// # Example
/// ```rust,ignore
/// Slider::new()
///     .min(-180.0).max(180.0).value(0.0)
///     .id("hpr.heading")
///     .on_input(|v| println!("heading: {v}"))
/// ```
pub struct Slider {
    value: f32,
    min: f32,
    max: f32,
    /// `0.0` = continuous.
    step: f32,
    width: f32,
    track_height: f32,
    thumb_radius: f32,
    track_color: Color,
    fill_color: Color,
    thumb_color: Color,
    thumb_border_color: Color,
    id: Option<String>,
    on_input: Option<Box<dyn FnMut(f32)>>,
    on_change: Option<Box<dyn FnMut(f32)>>,
}

impl Slider {
    pub fn new() -> Self {
        Self {
            value: 0.0,
            min: 0.0,
            max: 100.0,
            step: 1.0,
            width: 200.0,
            track_height: 4.0,
            thumb_radius: 8.0,
            track_color: Color::from_straight(0.15, 0.2, 0.3, 1.0),
            fill_color: Color::from_straight(0.2, 0.6, 1.0, 1.0),
            thumb_color: Color::white(),
            thumb_border_color: Color::from_straight(0.4, 0.6, 0.9, 1.0),
            id: None,
            on_input: None,
            on_change: None,
        }
    }

    pub fn value(mut self, v: f32) -> Self { self.value = v; self }
    pub fn min(mut self, v: f32) -> Self { self.min = v; self }
    pub fn max(mut self, v: f32) -> Self { self.max = v; self }
    pub fn step(mut self, v: f32) -> Self { self.step = v.max(0.0); self }
    pub fn width(mut self, v: f32) -> Self { self.width = v; self }
    pub fn track_color(mut self, v: Color) -> Self { self.track_color = v; self }
    pub fn fill_color(mut self, v: Color) -> Self { self.fill_color = v; self }
    pub fn thumb_color(mut self, v: Color) -> Self { self.thumb_color = v; self }

    /// Name under which the value track is registered each frame, so hosts
    /// can locate it with [`UiScene::region`](crate::scene::UiScene::region).
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn on_input(mut self, f: impl FnMut(f32) + 'static) -> Self {
        self.on_input = Some(Box::new(f));
        self
    }

    pub fn on_change(mut self, f: impl FnMut(f32) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    /// Current value after clamping and step snapping.
    pub fn current(&self) -> f32 {
        self.snap(self.value)
    }

    fn snap(&self, v: f32) -> f32 {
        // An inverted range collapses to `min`.
        let (lo, hi) = (self.min, self.max.max(self.min));
        let v = if v.is_nan() { lo } else { v.max(lo).min(hi) };
        if self.step > 0.0 {
            (lo + ((v - lo) / self.step).round() * self.step).min(hi)
        } else {
            v
        }
    }

    fn fraction(&self) -> f32 {
        let span = self.max - self.min;
        if span.abs() < f32::EPSILON { 0.0 } else { ((self.current() - self.min) / span).clamp(0.0, 1.0) }
    }

    /// Span the thumb center travels along; inset so the thumb stays inside `rect`.
    fn track(&self, rect: Rect) -> Rect {
        let r = self.thumb_radius.min(rect.size.x * 0.5);
        Rect::new(
            rect.origin.x + r,
            rect.center().y - self.track_height * 0.5,
            rect.size.x - 2.0 * r,
            self.track_height,
        )
    }

    fn value_at(&self, rect: Rect, x: f32) -> f32 {
        let t = self.track(rect).fraction_x(x);
        self.snap(self.min + t * (self.max - self.min))
    }

    /// Move to `v`; fires `on_input` if the value changed.
    fn input(&mut self, v: f32) {
        if v == self.current() {
            return;
        }
        self.value = v;
        if let Some(f) = &mut self.on_input { f(v); }
    }

    fn commit(&mut self) {
        let v = self.current();
        if let Some(f) = &mut self.on_change { f(v); }
    }
}

impl Default for Slider { fn default() -> Self { Self::new() } }

impl Widget for Slider {
    fn measure(&self, constraints: Constraints, _ctx: &LayoutCtx) -> Vec2 {
        constraints.constrain(Vec2::new(self.width, self.thumb_radius * 2.0))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let track = self.track(rect);
        if let Some(id) = &self.id {
            painter.mark_region(id.as_str(), track);
        }

        // Track, then the filled part left of the thumb.
        painter.fill_rounded_rect(track, self.track_height * 0.5, self.track_color, None);
        let thumb_x = track.x_at(self.fraction());
        let fill_w = thumb_x - track.origin.x;
        if fill_w > 0.0 {
            let fill = Rect::new(track.origin.x, track.origin.y, fill_w, track.size.y);
            painter.fill_rounded_rect(fill, self.track_height * 0.5, self.fill_color, None);
        }

        let r = if painter.is_hovered(rect) { self.thumb_radius + 1.5 } else { self.thumb_radius };
        let border = Some(Border::new(2.0, self.thumb_border_color));
        painter.fill_circle(Vec2::new(thumb_x, rect.center().y), r, self.thumb_color, border);
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, _ctx: &LayoutCtx<'_>) -> EventResult {
        match event {
            UiEvent::Click { pos } if rect.contains(*pos) => {
                let v = self.value_at(rect, pos.x);
                self.input(v);
                self.commit();
                EventResult::Consumed
            }
            UiEvent::Drag { pos, start } if rect.contains(*start) => {
                let v = self.value_at(rect, pos.x);
                self.input(v);
                EventResult::Consumed
            }
            // Guarded on `start` so only the slider that owns the drag commits.
            UiEvent::DragEnd { pos, start } if rect.contains(*start) => {
                let v = self.value_at(rect, pos.x);
                self.input(v);
                self.commit();
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use viewpoint_engine::text::FontSystem;

    use super::*;

    fn rect() -> Rect {
        // Track spans x = 8 ..= 208 with the default 8 px thumb.
        Rect::new(0.0, 0.0, 216.0, 16.0)
    }

    fn recorded(slider: Slider) -> (Slider, Rc<RefCell<Vec<f32>>>, Rc<RefCell<Vec<f32>>>) {
        let inputs = Rc::new(RefCell::new(Vec::new()));
        let changes = Rc::new(RefCell::new(Vec::new()));
        let (i, c) = (inputs.clone(), changes.clone());
        let slider = slider
            .on_input(move |v| i.borrow_mut().push(v))
            .on_change(move |v| c.borrow_mut().push(v));
        (slider, inputs, changes)
    }

    #[test]
    fn value_snaps_to_step_and_clamps() {
        let s = Slider::new().min(-180.0).max(180.0).value(12.4);
        assert_eq!(s.current(), 12.0);
        assert_eq!(Slider::new().min(-180.0).max(180.0).value(999.0).current(), 180.0);
        assert_eq!(Slider::new().min(0.0).max(1.0).step(0.0).value(0.25).current(), 0.25);
    }

    #[test]
    fn drag_fires_input_then_release_fires_change() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let (mut s, inputs, changes) = recorded(Slider::new().min(-180.0).max(180.0));
        let start = Vec2::new(108.0, 8.0);

        // Three quarters along the track: -180 + 0.75 * 360 = 90.
        let pos = Vec2::new(158.0, 8.0);
        assert!(s.on_event(&UiEvent::Drag { pos, start }, rect(), &ctx).is_consumed());
        assert_eq!(*inputs.borrow(), vec![90.0]);
        assert!(changes.borrow().is_empty());

        s.on_event(&UiEvent::DragEnd { pos, start }, rect(), &ctx);
        assert_eq!(*inputs.borrow(), vec![90.0]);
        assert_eq!(*changes.borrow(), vec![90.0]);
    }

    #[test]
    fn drag_started_elsewhere_is_ignored() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let (mut s, inputs, _) = recorded(Slider::new());
        let ev = UiEvent::Drag { pos: Vec2::new(50.0, 8.0), start: Vec2::new(50.0, 100.0) };
        assert_eq!(s.on_event(&ev, rect(), &ctx), EventResult::Ignored);
        assert!(inputs.borrow().is_empty());
    }

    #[test]
    fn click_at_current_value_commits_without_input() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let (mut s, inputs, changes) = recorded(Slider::new().min(0.0).max(200.0).value(100.0));
        s.on_event(&UiEvent::Click { pos: Vec2::new(108.0, 8.0) }, rect(), &ctx);
        assert!(inputs.borrow().is_empty());
        assert_eq!(*changes.borrow(), vec![100.0]);
    }
}
