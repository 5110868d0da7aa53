use core::cmp::Ordering;

use crate::coords::{Rect, Vec2};
use crate::paint::Color;
use crate::text::FontId;

use super::{Border, CircleCmd, DrawCmd, RectCmd, TextCmd, ZIndex};

/// Stable sort key: z-layer first, then insertion order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SortKey {
    pub z: ZIndex,
    pub order: u32,
}

impl Ord for SortKey {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.z.cmp(&other.z).then(self.order.cmp(&other.order))
    }
}

impl PartialOrd for SortKey {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A single draw item: sort key + command.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
}

/// Recorded draw stream for a frame.
///
/// `push` is O(1); paint-order iteration sorts an index buffer that is
/// reused across frames.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,
    sorted_indices: Vec<usize>,
    sorted_dirty: bool,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.sorted_indices.clear();
        self.sorted_dirty = true;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);
        self.items.push(DrawItem { key: SortKey { z, order }, cmd });
        self.sorted_dirty = true;
    }

    // ── shape helpers ─────────────────────────────────────────────────────

    pub fn push_rect(
        &mut self,
        z: ZIndex,
        rect: Rect,
        radius: f32,
        color: Color,
        border: Option<Border>,
    ) {
        self.push(z, DrawCmd::Rect(RectCmd { rect, radius, color, border }));
    }

    pub fn push_circle(
        &mut self,
        z: ZIndex,
        center: Vec2,
        radius: f32,
        color: Color,
        border: Option<Border>,
    ) {
        self.push(z, DrawCmd::Circle(CircleCmd { center, radius, color, border }));
    }

    #[allow(clippy::too_many_arguments)]
    pub fn push_text(
        &mut self,
        z: ZIndex,
        text: impl Into<String>,
        font: FontId,
        size: f32,
        color: Color,
        origin: Vec2,
        max_width: Option<f32>,
    ) {
        self.push(z, DrawCmd::Text(TextCmd {
            text: text.into(),
            font,
            size,
            color,
            origin,
            max_width,
        }));
    }

    // ── iteration ─────────────────────────────────────────────────────────

    /// Iterates items in paint order (back-to-front).
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.sorted_dirty {
            self.sorted_indices.clear();
            self.sorted_indices.extend(0..self.items.len());
            let items = &self.items;
            self.sorted_indices.sort_by(|&a, &b| items[a].key.cmp(&items[b].key));
            self.sorted_dirty = false;
        }
        self.sorted_indices.iter().map(|&i| &self.items[i])
    }

    /// Text runs in insertion order, i.e. reading order of the widget tree.
    pub fn text_runs(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(|item| item.cmd.as_text())
    }
}
