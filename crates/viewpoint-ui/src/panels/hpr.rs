use std::cell::RefCell;
use std::rc::Rc;

use viewpoint_engine::coords::{Rect, Vec2};
use viewpoint_engine::text::FontId;
use viewpoint_model::{CameraControlHpr, Hpr, Slot, TripleKind};

use super::{layout, readout, signal_line, Field};
use crate::constraints::{Constraints, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::Widget;
use crate::widgets::flex::Column;

const LABELS: [&str; 3] = ["Heading", "Pitch", "Roll"];

/// Heading / pitch / roll editor bound to a shared [`CameraControlHpr`].
///
/// Shows the title, the attached signal's value, the current angles and one
/// slider per angle. Slider input goes through `set_heading`, `set_pitch`
/// and `set_roll`, so clamping and change events follow the control's rules.
///
/// # Example
/// ```rust,ignore
/// let hpr = Rc::new(RefCell::new(CameraControlHpr::new()));
/// let panel = HprPanel::new(hpr.clone(), font);
/// ui.frame(&mut Element::new(panel), viewport, &input);
/// ```
pub struct HprPanel {
    control: Rc<RefCell<CameraControlHpr>>,
    font: FontId,
    id: String,
}

impl HprPanel {
    pub fn new(control: Rc<RefCell<CameraControlHpr>>, font: FontId) -> Self {
        Self { control, font, id: "hpr".to_string() }
    }

    /// Prefix of the slider region ids (`"hpr"` gives `"hpr.heading"`, …).
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    fn build(&self) -> Column {
        let (angles, signal) = {
            let c = self.control.borrow();
            (c.angles(), signal_line(c.signal()))
        };
        let fields = Slot::ALL
            .iter()
            .map(|&slot| {
                let control = self.control.clone();
                Field {
                    name: Hpr::FIELDS[slot.index()],
                    label: LABELS[slot.index()],
                    value: angles[slot.index()],
                    bounds: Hpr::BOUNDS[slot.index()],
                    write: Box::new(move |v| {
                        let mut c = control.borrow_mut();
                        match slot {
                            Slot::First => c.set_heading(v),
                            Slot::Second => c.set_pitch(v),
                            Slot::Third => c.set_roll(v),
                        };
                    }),
                }
            })
            .collect();
        let lines = [signal, format!("Angles: {}", readout(&angles, ["°", "°", "°"]))];
        layout(self.font, &self.id, Hpr::NAME, lines, fields)
    }
}

impl Widget for HprPanel {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        self.build().measure(constraints, ctx)
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        self.build().paint(painter, rect)
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx<'_>) -> EventResult {
        self.build().on_event(event, rect, ctx)
    }
}
