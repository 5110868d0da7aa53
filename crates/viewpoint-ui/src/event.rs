use viewpoint_engine::coords::Vec2;

/// Pointer events routed through the widget tree.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Pointer position this frame (fired every frame).
    Hover { pos: Vec2 },
    /// Primary button pressed and released without moving.
    Click { pos: Vec2 },
    /// Pointer moved while the primary button is held.
    /// `start` is where the press began.
    Drag { pos: Vec2, start: Vec2 },
    /// Primary button released after a drag.
    ///
    /// Fires even when `pos` is outside the widget; use `rect.contains(start)`
    /// to check ownership of the drag.
    DragEnd { pos: Vec2, start: Vec2 },
}

/// Result returned by [`Widget::on_event`](crate::widget::Widget::on_event).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Handled; stop routing.
    Consumed,
    /// Not handled; keep routing.
    Ignored,
}

impl EventResult {
    #[inline]
    pub fn is_consumed(self) -> bool {
        self == EventResult::Consumed
    }
}
