//! Bounded angle / coordinate triples with change propagation.
//!
//! This crate has no engine or UI dependencies: hosts can drive the
//! controls headlessly, and the widget layer in `viewpoint-ui` is a pure
//! projection of the state kept here.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`bounds`] | `Bounds`, `RawInput`, per-slot `parse`, `parseFloat`-style numeric conversion |
//! | [`triple`] | `Triple`, `TripleKind`, `Slot`, validation, text formatting |
//! | [`control`] | `TripleControl`, the validate-and-propagate model |
//! | [`angles`] | `Hpr`, `CameraControlHpr` |
//! | [`position`] | `Geodetic`, `Srs`, `CameraControlPosition` |
//! | [`signal`] | `Observable`, `Signal`, `Subscription` |
//! | [`event`] | `ChangeEvent`, `EventName`, `ListenerId` |
//!
//! # Quick start
//!
//! ```rust
//! use std::rc::Rc;
//! use viewpoint_model::{CameraControlPosition, Observable, Signal};
//!
//! let cell = Signal::new([0.0; 3]);
//! let mut pos = CameraControlPosition::new();
//! pos.attach_signal(Rc::new(cell.clone()));
//! pos.add_listener(|ev| println!("{}: {:?}", ev.name, ev.detail));
//!
//! pos.set_lat("91");
//! assert_eq!(pos.coord(), [90.0, 0.0, 0.0]);
//! assert_eq!(cell.get(), [90.0, 0.0, 0.0]);
//! ```

pub mod angles;
pub mod bounds;
pub mod control;
pub mod event;
pub mod position;
pub mod signal;
pub mod triple;

pub use angles::{CameraControlHpr, Hpr};
pub use bounds::{Bounds, RawInput};
pub use control::TripleControl;
pub use event::{ChangeEvent, EventName, ListenerId};
pub use position::{CameraControlPosition, Geodetic, Srs};
pub use signal::{Observable, Signal, Subscription};
pub use triple::{format_triple, Slot, Triple, TripleKind};
