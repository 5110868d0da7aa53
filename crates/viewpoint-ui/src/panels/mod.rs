//! Presentation panels for the camera controls.
//!
//! A panel holds a shared handle to its control and nothing else. The
//! widget tree is rebuilt from the control on every measure, paint and
//! event pass, so the sliders always show the model's current triple and
//! a drag writes straight back through the control's setters.

pub mod hpr;
pub mod position;

use viewpoint_engine::paint::Color;
use viewpoint_engine::text::FontId;
use viewpoint_model::triple::format_number;
use viewpoint_model::{format_triple, Bounds, Observable, Triple};

use crate::constraints::Edges;
use crate::widgets::flex::{Align, Column, Row};
use crate::widgets::slider::Slider;
use crate::widgets::text::Text;

pub use hpr::HprPanel;
pub use position::PositionPanel;

const TITLE_SIZE: f32 = 18.0;
const BODY_SIZE: f32 = 14.0;
const SLIDER_WIDTH: f32 = 216.0;

fn text_color() -> Color {
    Color::from_straight(0.92, 0.94, 0.97, 1.0)
}

fn muted_color() -> Color {
    Color::from_straight(0.6, 0.65, 0.72, 1.0)
}

/// `"Signal: [1,2,3]"`, or `"Signal: -"` when no cell is attached.
pub(crate) fn signal_line(signal: Option<&std::rc::Rc<dyn Observable<Triple>>>) -> String {
    match signal {
        Some(cell) => format!("Signal: {}", format_triple(&cell.get())),
        None => "Signal: -".to_string(),
    }
}

/// `"[ 10°, 20°, 30m ]"` with one unit suffix per slot.
pub(crate) fn readout(t: &Triple, units: [&str; 3]) -> String {
    format!(
        "[ {}{}, {}{}, {}{} ]",
        format_number(t[0]),
        units[0],
        format_number(t[1]),
        units[1],
        format_number(t[2]),
        units[2],
    )
}

/// One slider row: label, range input, writer.
///
/// `name` keys the slider's region id; `label` is the text shown beside it.
pub(crate) struct Field {
    pub name: &'static str,
    pub label: &'static str,
    pub value: f64,
    pub bounds: Bounds,
    pub write: Box<dyn FnMut(f64)>,
}

/// Shared panel layout: title, signal line, readout, then one row per field.
///
/// Slider ids are `"{prefix}.{field}"`.
pub(crate) fn layout(font: FontId, prefix: &str, title: &str, lines: [String; 2], fields: Vec<Field>) -> Column {
    let mut col = Column::new()
        .padding(Edges::symmetric(12.0, 16.0))
        .spacing(6.0)
        .child(Text::new(title, font, TITLE_SIZE, text_color()));
    for line in lines {
        col = col.child(Text::new(line, font, BODY_SIZE, muted_color()));
    }
    for field in fields {
        let Field { name, label, value, bounds, mut write } = field;
        let slider = Slider::new()
            .min(bounds.min as f32)
            .max(bounds.max as f32)
            .value(value as f32)
            .width(SLIDER_WIDTH)
            .id(format!("{prefix}.{name}"))
            .on_input(move |v| write(f64::from(v)));
        col = col.child(
            Row::new()
                .spacing(8.0)
                .cross_align(Align::Center)
                .child(Text::new(label, font, BODY_SIZE, text_color()))
                .child(slider),
        );
    }
    col
}
