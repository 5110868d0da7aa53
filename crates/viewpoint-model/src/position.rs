use std::fmt;
use std::ops::{Deref, DerefMut};

use serde_json::Value;

use crate::bounds::{Bounds, RawInput};
use crate::control::TripleControl;
use crate::event::EventName;
use crate::triple::{Slot, Triple, TripleKind};

/// Latitude range in degrees (north positive).
pub const LAT_BOUNDS: Bounds = Bounds::new(-90.0, 90.0);
/// Longitude range in degrees (east positive).
pub const LNG_BOUNDS: Bounds = Bounds::new(-180.0, 180.0);
/// Ellipsoidal altitude range in meters.
pub const ALT_BOUNDS: Bounds = Bounds::new(-1000.0, 1000.0);

/// Marker for latitude / longitude / altitude triples.
#[derive(Debug, Clone, Copy, Default)]
pub struct Geodetic;

impl TripleKind for Geodetic {
    const NAME: &'static str = "Position";
    const FIELDS: [&'static str; 3] = ["lat", "lng", "alt"];
    const BOUNDS: [Bounds; 3] = [LAT_BOUNDS, LNG_BOUNDS, ALT_BOUNDS];
    const EVENT: EventName = EventName::CoordChanged;
}

/// Spatial reference system of a coordinate. Only WGS84 exists for now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Srs {
    #[default]
    Wgs84,
}

impl Srs {
    pub fn as_str(self) -> &'static str {
        match self {
            Srs::Wgs84 => "WGS84",
        }
    }
}

impl fmt::Display for Srs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Camera position control: geodetic latitude, longitude (degrees) and
/// altitude (meters).
///
/// Emits `coord-changed` on every value-changing write.
#[derive(Debug, Default)]
pub struct CameraControlPosition {
    inner: TripleControl<Geodetic>,
    srs: Srs,
}

impl CameraControlPosition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn coord(&self) -> Triple {
        self.inner.triple()
    }

    /// Whole-triple setter; accepts any value.
    pub fn set_coord(&mut self, raw: &Value) -> bool {
        self.inner.set_triple(raw)
    }

    pub fn set_coord_values(&mut self, coord: Triple) -> bool {
        self.inner.set_values(coord)
    }

    pub fn srs(&self) -> Srs {
        self.srs
    }

    pub fn lat(&self) -> f64 { self.inner.get(Slot::First) }
    pub fn lng(&self) -> f64 { self.inner.get(Slot::Second) }
    pub fn alt(&self) -> f64 { self.inner.get(Slot::Third) }

    pub fn set_lat(&mut self, raw: impl RawInput) -> bool {
        self.inner.set_slot(Slot::First, raw)
    }

    pub fn set_lng(&mut self, raw: impl RawInput) -> bool {
        self.inner.set_slot(Slot::Second, raw)
    }

    pub fn set_alt(&mut self, raw: impl RawInput) -> bool {
        self.inner.set_slot(Slot::Third, raw)
    }
}

impl Deref for CameraControlPosition {
    type Target = TripleControl<Geodetic>;
    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for CameraControlPosition {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::event::ChangeEvent;
    use crate::signal::{Observable, Signal};
    use serde_json::json;

    #[test]
    fn lat_string_91_clamps_emits_and_writes_signal() {
        let mut pos = CameraControlPosition::new();
        let cell = Signal::new([0.0; 3]);
        pos.attach_signal(Rc::new(cell.clone()));
        let log: Rc<RefCell<Vec<ChangeEvent>>> = Rc::default();
        let sink = log.clone();
        pos.add_listener(move |ev| sink.borrow_mut().push(*ev));

        assert!(pos.set_lat("91"));
        assert_eq!(pos.coord(), [90.0, 0.0, 0.0]);
        assert_eq!(log.borrow().len(), 1);
        assert_eq!(log.borrow()[0].name.as_str(), "coord-changed");
        assert_eq!(cell.get(), [90.0, 0.0, 0.0]);
    }

    #[test]
    fn wrong_length_resets_to_origin() {
        let mut pos = CameraControlPosition::new();
        pos.set_coord_values([45.0, 45.0, 100.0]);
        pos.set_coord(&json!([1, 2]));
        assert_eq!(pos.coord(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn per_slot_bounds() {
        let mut pos = CameraControlPosition::new();
        pos.set_coord(&json!([-100, 200, -5000]));
        assert_eq!(pos.coord(), [-90.0, 180.0, -1000.0]);
        pos.set_alt("1e4");
        assert_eq!(pos.alt(), 1000.0);
        pos.set_lng(-179.5);
        assert_eq!((pos.lat(), pos.lng()), (-90.0, -179.5));
    }

    #[test]
    fn typed_infinities_clamp_per_slot() {
        let mut pos = CameraControlPosition::new();
        pos.set_lat(f64::NEG_INFINITY);
        pos.set_lng(f64::INFINITY);
        pos.set_alt(f32::NEG_INFINITY);
        assert_eq!(pos.coord(), [-90.0, 180.0, -1000.0]);
    }

    #[test]
    fn srs_is_wgs84() {
        let pos = CameraControlPosition::new();
        assert_eq!(pos.srs(), Srs::Wgs84);
        assert_eq!(pos.srs().to_string(), "WGS84");
    }
}
