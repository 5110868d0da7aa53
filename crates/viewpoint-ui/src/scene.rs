use std::collections::HashMap;

use viewpoint_engine::coords::{Rect, Vec2};
use viewpoint_engine::scene::DrawList;
use viewpoint_engine::text::{FontId, FontLoadError, FontSystem};

use crate::constraints::{Constraints, LayoutCtx};
use crate::event::UiEvent;
use crate::painter::Painter;
use crate::widget::{Element, Widget};

// ── UiInput ───────────────────────────────────────────────────────────────

/// Snapshot of pointer state for one UI frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UiInput {
    /// Current cursor position in logical pixels.
    pub mouse_pos: Vec2,
    /// `true` while the primary button is held down.
    pub mouse_pressed: bool,
}

impl UiInput {
    pub fn hover(pos: Vec2) -> Self {
        Self { mouse_pos: pos, mouse_pressed: false }
    }

    pub fn pressed(pos: Vec2) -> Self {
        Self { mouse_pos: pos, mouse_pressed: true }
    }
}

/// Press in progress, tracked across frames.
#[derive(Debug, Clone, Copy)]
struct Press {
    origin: Vec2,
    moved: bool,
}

// ── UiScene ───────────────────────────────────────────────────────────────

/// Top-level coordinator that owns shared resources across frames.
///
/// Owns the `FontSystem` and the `DrawList` populated by each [`frame`](Self::frame).
/// Button edges are derived from consecutive [`UiInput`] snapshots: a press
/// that moves becomes `Drag` events and a `DragEnd` on release; a press
/// released in place becomes a `Click`.
///
/// # Example
///
/// ```rust,ignore
/// let mut ui = UiScene::new();
/// let mut root: Element = panel.into();
///
/// ui.frame(&mut root, viewport, &UiInput::pressed(down));
/// ui.frame(&mut root, viewport, &UiInput::pressed(moved_to));
/// let list = ui.frame(&mut root, viewport, &UiInput::hover(moved_to));
/// ```
pub struct UiScene {
    pub font_system: FontSystem,
    /// Draw list populated by the most recent [`frame`](Self::frame) call.
    pub draw_list: DrawList,
    regions: HashMap<String, Rect>,
    press: Option<Press>,
}

impl UiScene {
    pub fn new() -> Self {
        Self {
            font_system: FontSystem::new(),
            draw_list: DrawList::new(),
            regions: HashMap::new(),
            press: None,
        }
    }

    /// Load a TrueType / OpenType font from raw bytes.
    pub fn load_font(&mut self, data: &[u8]) -> Result<FontId, FontLoadError> {
        self.font_system.load_font(data)
    }

    /// Where the widget registered under `id` was laid out in the last frame.
    pub fn region(&self, id: &str) -> Option<Rect> {
        self.regions.get(id).copied()
    }

    /// Route this frame's input through `root`, then lay it out and paint it.
    ///
    /// Events run before paint so the returned list reflects any state the
    /// input changed. The root always occupies the full viewport.
    pub fn frame(&mut self, root: &mut Element, viewport: Vec2, input: &UiInput) -> &mut DrawList {
        let rect = Rect::new(0.0, 0.0, viewport.x, viewport.y);

        // ── events ────────────────────────────────────────────────────────
        let events = self.pointer_events(input);
        {
            let ctx = LayoutCtx { fonts: &self.font_system };
            let _ = root.measure(Constraints::loose(viewport), &ctx);
            for event in &events {
                log::trace!("ui event {event:?}");
                root.on_event(event, rect, &ctx);
            }
        }

        // ── paint ─────────────────────────────────────────────────────────
        self.draw_list.clear();
        let regions = {
            let mut painter = Painter::new(
                &mut self.draw_list,
                &self.font_system,
                input.mouse_pos,
                input.mouse_pressed,
            );
            root.paint(&mut painter, rect);
            painter.into_regions()
        };
        self.regions = regions.into_iter().collect();

        &mut self.draw_list
    }

    /// Convenience for trees rebuilt every frame.
    pub fn frame_widget<W: Widget>(&mut self, root: W, viewport: Vec2, input: &UiInput) -> &mut DrawList {
        let mut root = Element::new(root);
        self.frame(&mut root, viewport, input)
    }

    fn pointer_events(&mut self, input: &UiInput) -> Vec<UiEvent> {
        let pos = input.mouse_pos;
        let mut events = vec![UiEvent::Hover { pos }];
        match (self.press, input.mouse_pressed) {
            (None, true) => self.press = Some(Press { origin: pos, moved: false }),
            (Some(mut press), true) => {
                if pos != press.origin || press.moved {
                    press.moved = true;
                    events.push(UiEvent::Drag { pos, start: press.origin });
                }
                self.press = Some(press);
            }
            (Some(press), false) => {
                self.press = None;
                if press.moved || pos != press.origin {
                    events.push(UiEvent::DragEnd { pos, start: press.origin });
                } else {
                    events.push(UiEvent::Click { pos });
                }
            }
            (None, false) => {}
        }
        events
    }
}

impl Default for UiScene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use viewpoint_engine::paint::Color;

    use super::*;
    use crate::event::EventResult;
    use crate::widgets::flex::Column;
    use crate::widgets::slider::Slider;
    use crate::widgets::text::Text;

    /// Records every event routed to it.
    struct Recorder(Rc<RefCell<Vec<UiEvent>>>);

    impl Widget for Recorder {
        fn measure(&self, c: Constraints, _: &LayoutCtx) -> Vec2 {
            c.max
        }
        fn paint(&self, _: &mut Painter, _: Rect) {}
        fn on_event(&mut self, e: &UiEvent, _: Rect, _: &LayoutCtx<'_>) -> EventResult {
            self.0.borrow_mut().push(e.clone());
            EventResult::Ignored
        }
    }

    fn recorder() -> (Element, Rc<RefCell<Vec<UiEvent>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        (Element::new(Recorder(seen.clone())), seen)
    }

    const VIEW: Vec2 = Vec2::new(400.0, 300.0);

    #[test]
    fn press_and_release_in_place_is_a_click() {
        let (mut root, seen) = recorder();
        let mut ui = UiScene::new();
        let p = Vec2::new(10.0, 10.0);
        ui.frame(&mut root, VIEW, &UiInput::pressed(p));
        ui.frame(&mut root, VIEW, &UiInput::hover(p));
        let seen = seen.borrow();
        assert_eq!(seen.last(), Some(&UiEvent::Click { pos: p }));
        assert!(!seen.iter().any(|e| matches!(e, UiEvent::Drag { .. })));
    }

    #[test]
    fn moving_press_drags_then_ends() {
        let (mut root, seen) = recorder();
        let mut ui = UiScene::new();
        let (a, b) = (Vec2::new(10.0, 10.0), Vec2::new(40.0, 10.0));
        ui.frame(&mut root, VIEW, &UiInput::pressed(a));
        ui.frame(&mut root, VIEW, &UiInput::pressed(b));
        ui.frame(&mut root, VIEW, &UiInput::pressed(b));
        ui.frame(&mut root, VIEW, &UiInput::hover(b));

        let drags: Vec<_> = seen.borrow().iter().filter(|e| !matches!(e, UiEvent::Hover { .. })).cloned().collect();
        assert_eq!(
            drags,
            vec![
                UiEvent::Drag { pos: b, start: a },
                UiEvent::Drag { pos: b, start: a },
                UiEvent::DragEnd { pos: b, start: a },
            ]
        );
    }

    #[test]
    fn frame_records_regions_and_paints_after_input() {
        let hits = Rc::new(RefCell::new(Vec::new()));
        let h = hits.clone();
        let slider = Slider::new().min(-180.0).max(180.0).width(216.0).id("s").on_input(move |v| h.borrow_mut().push(v));
        let mut root = Element::new(Column::new().child(slider));
        let mut ui = UiScene::new();
        ui.frame(&mut root, VIEW, &UiInput::default());
        let track = ui.region("s").expect("slider region");
        assert_eq!(track.origin.x, 8.0);
        assert_eq!(track.size.x, 200.0);
        assert!(ui.region("missing").is_none());

        let y = track.center().y;
        ui.frame(&mut root, VIEW, &UiInput::pressed(Vec2::new(108.0, y)));
        ui.frame(&mut root, VIEW, &UiInput::pressed(Vec2::new(8.0, y)));
        ui.frame(&mut root, VIEW, &UiInput::pressed(Vec2::new(208.0, y)));
        ui.frame(&mut root, VIEW, &UiInput::hover(Vec2::new(208.0, y)));
        assert_eq!(*hits.borrow(), vec![-180.0, 180.0]);
    }

    #[test]
    fn frame_widget_paints_text() {
        let mut ui = UiScene::new();
        let font = FontId::fallback();
        let list = ui.frame_widget(Text::new("Scene", font, 14.0, Color::white()), VIEW, &UiInput::default());
        assert_eq!(list.text_runs().collect::<Vec<_>>(), vec!["Scene"]);
    }
}
