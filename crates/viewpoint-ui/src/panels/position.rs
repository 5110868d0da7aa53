use std::cell::RefCell;
use std::rc::Rc;

use viewpoint_engine::coords::{Rect, Vec2};
use viewpoint_engine::text::FontId;
use viewpoint_model::{CameraControlPosition, Geodetic, Slot, TripleKind};

use super::{layout, readout, signal_line, Field};
use crate::constraints::{Constraints, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::Widget;
use crate::widgets::flex::Column;

const LABELS: [&str; 3] = ["Latitude", "Longitude", "Altitude"];

/// Latitude / longitude / altitude editor bound to a shared
/// [`CameraControlPosition`]. Slider ids default to `"position.lat"`, `…lng`, `…alt`.
pub struct PositionPanel {
    control: Rc<RefCell<CameraControlPosition>>,
    font: FontId,
    id: String,
}

impl PositionPanel {
    pub fn new(control: Rc<RefCell<CameraControlPosition>>, font: FontId) -> Self {
        Self { control, font, id: "position".to_string() }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    fn build(&self) -> Column {
        let (coord, srs, signal) = {
            let c = self.control.borrow();
            (c.coord(), c.srs(), signal_line(c.signal()))
        };
        let fields = Slot::ALL
            .iter()
            .map(|&slot| {
                let control = self.control.clone();
                Field {
                    name: Geodetic::FIELDS[slot.index()],
                    label: LABELS[slot.index()],
                    value: coord[slot.index()],
                    bounds: Geodetic::BOUNDS[slot.index()],
                    write: Box::new(move |v| {
                        let mut c = control.borrow_mut();
                        match slot {
                            Slot::First => c.set_lat(v),
                            Slot::Second => c.set_lng(v),
                            Slot::Third => c.set_alt(v),
                        };
                    }),
                }
            })
            .collect();
        let lines = [signal, format!("Coordinates: {} {srs}", readout(&coord, ["°", "°", "m"]))];
        layout(self.font, &self.id, Geodetic::NAME, lines, fields)
    }
}

impl Widget for PositionPanel {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{UiInput, UiScene};
    use crate::widget::Element;

    const VIEW: Vec2 = Vec2::new(480.0, 360.0);

    #[test]
    fn shows_coordinates_with_units_and_srs() {
        let control = Rc::new(RefCell::new(CameraControlPosition::new()));
        control.borrow_mut().set_lat("91");
        let mut ui = UiScene::new();
        let list = ui.frame_widget(PositionPanel::new(control, FontId::fallback()), VIEW, &UiInput::default());
        let t: Vec<_> = list.text_runs().collect();
        assert_eq!(&t[..3], ["Position", "Signal: -", "Coordinates: [ 90°, 0°, 0m ] WGS84"]);
        assert_eq!(&t[3..], ["Latitude", "Longitude", "Altitude"]);
    }

    #[test]
    fn altitude_slider_spans_bounds() {
        let control = Rc::new(RefCell::new(CameraControlPosition::new()));
        let mut root = Element::new(PositionPanel::new(control.clone(), FontId::fallback()));
        let mut ui = UiScene::new();
        ui.frame(&mut root, VIEW, &UiInput::default());
        let track = ui.region("position.alt").expect("alt track");

        let y = track.center().y;
        let start = Vec2::new(track.x_at(0.5), y);
        let left = Vec2::new(track.x_at(0.0), y);
        ui.frame(&mut root, VIEW, &UiInput::pressed(start));
        ui.frame(&mut root, VIEW, &UiInput::pressed(left));
        ui.frame(&mut root, VIEW, &UiInput::hover(left));
        assert_eq!(control.borrow().coord(), [0.0, 0.0, -1000.0]);
    }

    #[test]
    fn click_on_latitude_track_sets_lat() {
        let control = Rc::new(RefCell::new(CameraControlPosition::new()));
        let mut root = Element::new(PositionPanel::new(control.clone(), FontId::fallback()));
        let mut ui = UiScene::new();
        ui.frame(&mut root, VIEW, &UiInput::default());
        let track = ui.region("position.lat").expect("lat track");

        // Three quarters along [-90, 90] is 45.
        let p = Vec2::new(track.x_at(0.75), track.center().y);
        ui.frame(&mut root, VIEW, &UiInput::pressed(p));
        ui.frame(&mut root, VIEW, &UiInput::hover(p));
        assert_eq!(control.borrow().lat(), 45.0);
    }
}
