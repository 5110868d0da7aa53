use std::rc::Rc;

use viewpoint_engine::coords::{Rect, Vec2};
use viewpoint_engine::paint::Color;
use viewpoint_engine::text::FontId;
use viewpoint_model::triple::ORIGIN;
use viewpoint_model::{format_triple, Observable, Signal, Triple};

use crate::constraints::{Constraints, Edges, LayoutCtx};
use crate::painter::Painter;
use crate::widget::Widget;
use crate::widgets::flex::Column;
use crate::widgets::text::Text;

/// Where a [`SceneView`] reads one of its triples from.
///
/// A plain value and an observable cell are both valid bindings; the cell
/// is read on every pass.
#[derive(Clone)]
pub enum SceneSource {
    Value(Triple),
    Signal(Rc<dyn Observable<Triple>>),
}

impl SceneSource {
    pub fn current(&self) -> Triple {
        match self {
            SceneSource::Value(t) => *t,
            SceneSource::Signal(cell) => cell.get(),
        }
    }
}

impl Default for SceneSource {
    fn default() -> Self {
        SceneSource::Value(ORIGIN)
    }
}

impl From<Triple> for SceneSource {
    fn from(t: Triple) -> Self {
        SceneSource::Value(t)
    }
}

impl From<Rc<dyn Observable<Triple>>> for SceneSource {
    fn from(cell: Rc<dyn Observable<Triple>>) -> Self {
        SceneSource::Signal(cell)
    }
}

impl From<Signal<Triple>> for SceneSource {
    fn from(cell: Signal<Triple>) -> Self {
        SceneSource::Signal(Rc::new(cell))
    }
}

/// Read-only camera readout. Validates nothing and emits nothing.
pub struct SceneView {
    font: FontId,
    size: f32,
    color: Color,
    angles: SceneSource,
    coord: SceneSource,
}

impl SceneView {
    pub fn new(font: FontId) -> Self {
        Self {
            font,
            size: 14.0,
            color: Color::from_straight(0.92, 0.94, 0.97, 1.0),
            angles: SceneSource::default(),
            coord: SceneSource::default(),
        }
    }

    pub fn angles(mut self, source: impl Into<SceneSource>) -> Self {
        self.angles = source.into();
        self
    }

    pub fn coord(mut self, source: impl Into<SceneSource>) -> Self {
        self.coord = source.into();
        self
    }

    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn lines(&self) -> [String; 3] {
        [
            "Scene".to_string(),
            format!("Camera HPR: {}", format_triple(&self.angles.current())),
            format!("Camera position: {}", format_triple(&self.coord.current())),
        ]
    }

    fn build(&self) -> Column {
        Column::new()
            .padding(Edges::symmetric(12.0, 16.0))
            .spacing(4.0)
            .children(self.lines().map(|line| Text::new(line, self.font, self.size, self.color)))
    }
}

impl Widget for SceneView {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        self.build().measure(constraints, ctx)
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        self.build().paint(painter, rect)
    }
}
