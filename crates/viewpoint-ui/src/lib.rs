//! Viewpoint UI: retained widget tree on top of `viewpoint-engine`, plus the
//! camera control panels and scene readout.
//!
//! Panels hold `Rc<RefCell<_>>` handles to the controls in `viewpoint-model`
//! and rebuild their widgets from the control on every pass. The UI never
//! stores a copy of a triple.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use viewpoint_ui::prelude::*;
//!
//! let hpr = Rc::new(RefCell::new(CameraControlHpr::new()));
//! let mut ui = UiScene::new();
//! let font = ui.load_font(include_bytes!("my_font.ttf"))?;
//!
//! let mut root: Element = Row::new()
//!     .child(HprPanel::new(hpr.clone(), font))
//!     .child(SceneView::new(font).angles([0.0; 3]))
//!     .into();
//!
//! // Each frame:
//! let draw_list = ui.frame(&mut root, viewport, &UiInput { mouse_pos, mouse_pressed });
//! ```
//!
//! # Extending with custom widgets
//!
//! Implement [`widget::Widget`] for any type, then use it anywhere an
//! [`widget::Element`] is accepted.

pub mod constraints;
pub mod event;
pub mod painter;
pub mod panels;
pub mod scene;
pub mod scene_view;
pub mod widget;
pub mod widgets;

/// Everything needed to build and extend the UI.
pub mod prelude {
    pub use crate::constraints::{Constraints, Edges, LayoutCtx};
    pub use crate::event::{EventResult, UiEvent};
    pub use crate::painter::Painter;
    pub use crate::panels::{HprPanel, PositionPanel};
    pub use crate::scene::{UiInput, UiScene};
    pub use crate::scene_view::{SceneSource, SceneView};
    pub use crate::widget::{Element, Widget};
    pub use crate::widgets::{
        flex::{Align, Column, Row},
        slider::Slider,
        text::Text,
    };

    pub use viewpoint_engine::coords::{Rect, Vec2};
    pub use viewpoint_engine::paint::Color;
    pub use viewpoint_engine::scene::Border;
    pub use viewpoint_engine::text::FontId;
}
