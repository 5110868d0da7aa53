use std::ops::{Deref, DerefMut};

use serde_json::Value;

use crate::bounds::{Bounds, RawInput};
use crate::control::TripleControl;
use crate::event::EventName;
use crate::triple::{Slot, Triple, TripleKind};

/// Range of every heading / pitch / roll slot, in degrees.
pub const HPR_BOUNDS: Bounds = Bounds::new(-180.0, 180.0);

/// Marker for heading / pitch / roll triples.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hpr;

impl TripleKind for Hpr {
    const NAME: &'static str = "HPR";
    const FIELDS: [&'static str; 3] = ["heading", "pitch", "roll"];
    const BOUNDS: [Bounds; 3] = [HPR_BOUNDS, HPR_BOUNDS, HPR_BOUNDS];
    const EVENT: EventName = EventName::AnglesChanged;
}

/// Camera orientation control: heading, pitch and roll in degrees.
///
/// Emits `angles-changed` on every value-changing write. The generic
/// surface (signal attachment, listeners, `set_triple`) is reachable
/// through `Deref` to [`TripleControl`].
///
/// # Example
/// ```
/// use viewpoint_model::CameraControlHpr;
///
/// let mut hpr = CameraControlHpr::new();
/// hpr.set_angle_values([10.0, 20.0, 30.0]);
/// hpr.set_heading(400);
/// assert_eq!(hpr.angles(), [180.0, 20.0, 30.0]);
/// ```
#[derive(Debug, Default)]
pub struct CameraControlHpr {
    inner: TripleControl<Hpr>,
}

impl CameraControlHpr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn angles(&self) -> Triple {
        self.inner.triple()
    }

    /// Whole-triple setter; accepts any value.
    pub fn set_angles(&mut self, raw: &Value) -> bool {
        self.inner.set_triple(raw)
    }

    pub fn set_angle_values(&mut self, angles: Triple) -> bool {
        self.inner.set_values(angles)
    }

    pub fn heading(&self) -> f64 { self.inner.get(Slot::First) }
    pub fn pitch(&self) -> f64 { self.inner.get(Slot::Second) }
    pub fn roll(&self) -> f64 { self.inner.get(Slot::Third) }

    pub fn set_heading(&mut self, raw: impl RawInput) -> bool {
        self.inner.set_slot(Slot::First, raw)
    }

    pub fn set_pitch(&mut self, raw: impl RawInput) -> bool {
        self.inner.set_slot(Slot::Second, raw)
    }

    pub fn set_roll(&mut self, raw: impl RawInput) -> bool {
        self.inner.set_slot(Slot::Third, raw)
    }
}

impl Deref for CameraControlHpr {
    type Target = TripleControl<Hpr>;
    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for CameraControlHpr {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}
