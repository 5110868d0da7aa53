//! Draw stream types.
//!
//! Widgets record renderer-agnostic commands into a [`DrawList`]; a host
//! rasterizes them, or inspects them directly when running headless.

mod cmd;
mod list;
mod z_index;

pub use cmd::{Border, CircleCmd, DrawCmd, RectCmd, TextCmd};
pub use list::{DrawItem, DrawList, SortKey};
pub use z_index::ZIndex;
