use viewpoint_engine::coords::{Rect, Vec2};

use crate::constraints::{inset_rect, Constraints, Edges, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::{Element, Widget};

// ── Align ─────────────────────────────────────────────────────────────────

/// Cross-axis alignment inside a flex container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Children are placed at the start of the cross axis (default).
    #[default]
    Start,
    /// Children are centered on the cross axis.
    Center,
    /// Children are placed at the end of the cross axis.
    End,
}

impl Align {
    #[inline]
    fn offset(self, available: f32, used: f32) -> f32 {
        match self {
            Align::Start => 0.0,
            Align::Center => ((available - used) * 0.5).max(0.0),
            Align::End => (available - used).max(0.0),
        }
    }
}

// ── shared layout ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, PartialEq, Eq)]
enum Axis {
    Vertical,
    Horizontal,
}

struct Flex {
    axis: Axis,
    children: Vec<Element>,
    spacing: f32,
    padding: Edges,
    cross_align: Align,
}

impl Flex {
    fn new(axis: Axis) -> Self {
        Self { axis, children: Vec::new(), spacing: 0.0, padding: Edges::default(), cross_align: Align::Start }
    }

    fn child_constraints(&self, inner: Vec2) -> Constraints {
        match self.axis {
            Axis::Vertical => Constraints::loose(Vec2::new(inner.x, f32::INFINITY)),
            Axis::Horizontal => Constraints::loose(Vec2::new(f32::INFINITY, inner.y)),
        }
    }

    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let inner = constraints.shrink(self.padding).max;
        let child_c = self.child_constraints(inner);
        let gaps = self.children.len().saturating_sub(1) as f32 * self.spacing;

        let (mut main, mut cross) = (gaps, 0.0f32);
        for child in &self.children {
            let s = child.measure(child_c, ctx);
            let (m, c) = match self.axis {
                Axis::Vertical => (s.y, s.x),
                Axis::Horizontal => (s.x, s.y),
            };
            main += m;
            cross = cross.max(c);
        }

        let size = match self.axis {
            Axis::Vertical => Vec2::new(cross + self.padding.h(), main + self.padding.v()),
            Axis::Horizontal => Vec2::new(main + self.padding.h(), cross + self.padding.v()),
        };
        constraints.constrain(size)
    }

    /// Child rects in order, laid out inside `rect`.
    fn layout(&self, rect: Rect, ctx: &LayoutCtx) -> Vec<Rect> {
        let inner = inset_rect(rect, self.padding);
        let child_c = self.child_constraints(inner.size);

        let mut cursor = match self.axis {
            Axis::Vertical => inner.origin.y,
            Axis::Horizontal => inner.origin.x,
        };
        let mut rects = Vec::with_capacity(self.children.len());
        for child in &self.children {
            let s = child.measure(child_c, ctx);
            let r = match self.axis {
                Axis::Vertical => {
                    let x = inner.origin.x + self.cross_align.offset(inner.size.x, s.x);
                    Rect::new(x, cursor, s.x, s.y)
                }
                Axis::Horizontal => {
                    let y = inner.origin.y + self.cross_align.offset(inner.size.y, s.y);
                    Rect::new(cursor, y, s.x, s.y)
                }
            };
            cursor += match self.axis {
                Axis::Vertical => s.y,
                Axis::Horizontal => s.x,
            } + self.spacing;
            rects.push(r);
        }
        rects
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let ctx = painter.layout_ctx();
        for (child, r) in self.children.iter().zip(self.layout(rect, &ctx)) {
            child.paint(painter, r);
        }
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx<'_>) -> EventResult {
        let rects = self.layout(rect, ctx);
        for (child, r) in self.children.iter_mut().zip(rects) {
            if child.on_event(event, r, ctx).is_consumed() {
                return EventResult::Consumed;
            }
        }
        EventResult::Ignored
    }
}

macro_rules! flex_container {
    ($(#[$doc:meta])* $name:ident, $axis:expr) => {
        $(#[$doc])*
        pub struct $name(Flex);

        impl $name {
            pub fn new() -> Self {
                Self(Flex::new($axis))
            }

            pub fn spacing(mut self, v: f32) -> Self {
                self.0.spacing = v;
                self
            }

            pub fn padding(mut self, edges: Edges) -> Self {
                self.0.padding = edges;
                self
            }

            pub fn padding_all(mut self, v: f32) -> Self {
                self.0.padding = Edges::all(v);
                self
            }

            pub fn cross_align(mut self, align: Align) -> Self {
                self.0.cross_align = align;
                self
            }

            pub fn child(mut self, child: impl Into<Element>) -> Self {
                self.0.children.push(child.into());
                self
            }

            pub fn children(mut self, iter: impl IntoIterator<Item = impl Into<Element>>) -> Self {
                self.0.children.extend(iter.into_iter().map(Into::into));
                self
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Widget for $name {
            fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
                self.0.measure(constraints, ctx)
            }

            fn paint(&self, painter: &mut Painter, rect: Rect) {
                self.0.paint(painter, rect)
            }

            fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx<'_>) -> EventResult {
                self.0.on_event(event, rect, ctx)
            }
        }
    };
}

flex_container!(
    /// Vertical container. Children are stacked top to bottom at their natural size.
    ///
    /// # Example
    /// ```rust,ignore
    /// Column::new()
    ///     .padding_all(16.0)
    ///     .spacing(8.0)
    ///     .child(Text::new("HPR", font, 20.0, white))
    ///     .child(slider)
    /// ```
    Column,
    Axis::Vertical
);

flex_container!(
    /// Horizontal container. Children are placed left to right at their natural size.
    Row,
    Axis::Horizontal
);
