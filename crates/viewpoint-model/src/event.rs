use std::fmt;

use serde_json::{json, Value};

use crate::triple::Triple;

/// Name of the change notification a control emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventName {
    /// Emitted by the heading / pitch / roll control.
    AnglesChanged,
    /// Emitted by the geodetic position control.
    CoordChanged,
}

impl EventName {
    pub fn as_str(self) -> &'static str {
        match self {
            EventName::AnglesChanged => "angles-changed",
            EventName::CoordChanged => "coord-changed",
        }
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Change notification carrying the new, validated triple.
///
/// Only emitted when a write actually changed the value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChangeEvent {
    pub name: EventName,
    pub detail: Triple,
}

impl ChangeEvent {
    #[inline]
    pub fn new(name: EventName, detail: Triple) -> Self {
        Self { name, detail }
    }

    /// `{"type": "...", "detail": [a, b, c]}`, the shape a DOM `CustomEvent` carries.
    pub fn to_json(&self) -> Value {
        json!({ "type": self.name.as_str(), "detail": self.detail })
    }
}

/// Handle returned by `add_listener`; pass it back to `remove_listener`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);
