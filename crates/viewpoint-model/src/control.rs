use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use serde_json::Value;

use crate::bounds::RawInput;
use crate::event::{ChangeEvent, ListenerId};
use crate::signal::Observable;
use crate::triple::{self, Slot, Triple, TripleKind};

type Listener = Box<dyn FnMut(&ChangeEvent)>;

/// Validate-and-propagate model for one bounded triple.
///
/// Every write funnels through [`set_triple`](Self::set_triple):
///
/// 1. the raw value is validated (shape check, per-slot parse and clamp);
/// 2. a result equal to the current triple is dropped silently;
/// 3. otherwise it replaces the current triple, is written to the attached
///    cell (if any), and a [`ChangeEvent`] goes to every listener in
///    registration order.
///
/// Malformed input never errors. Listeners run synchronously inside the
/// write; they receive the new triple in the event and must not re-borrow
/// whatever `RefCell` holds this control.
pub struct TripleControl<K: TripleKind> {
    value: Triple,
    signal: Option<Rc<dyn Observable<Triple>>>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
    _kind: PhantomData<K>,
}

impl<K: TripleKind> TripleControl<K> {
    pub fn new() -> Self {
        Self {
            value: K::DEFAULT,
            signal: None,
            listeners: Vec::new(),
            next_listener: 0,
            _kind: PhantomData,
        }
    }

    // ── reads ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn triple(&self) -> Triple {
        self.value
    }

    #[inline]
    pub fn get(&self, slot: Slot) -> f64 {
        self.value[slot.index()]
    }

    // ── writes ────────────────────────────────────────────────────────────

    /// Whole-triple setter. Accepts any value; returns `true` if the triple changed.
    pub fn set_triple(&mut self, raw: &Value) -> bool {
        self.commit(triple::validate::<K>(raw))
    }

    /// Typed whole-triple setter. Each slot is clamped like a parsed number,
    /// so infinities land on the bounds and NaN becomes `0`.
    pub fn set_values(&mut self, values: Triple) -> bool {
        self.commit(std::array::from_fn(|i| K::BOUNDS[i].clamp(values[i])))
    }

    /// Single-element setter: current triple with `slot` replaced by `raw`,
    /// written back through [`set_triple`](Self::set_triple).
    pub fn set_slot(&mut self, slot: Slot, raw: impl RawInput) -> bool {
        let mut items: Vec<Value> = self.value.iter().map(|&v| v.into_raw()).collect();
        items[slot.index()] = raw.into_raw();
        self.set_triple(&Value::Array(items))
    }

    fn commit(&mut self, next: Triple) -> bool {
        if triple::is_same(&next, &self.value) {
            log::trace!("{}: write {} unchanged", K::NAME, triple::format_triple(&next));
            return false;
        }

        self.value = next;
        log::debug!("{}: {} -> {}", K::NAME, K::EVENT, triple::format_triple(&next));

        if let Some(signal) = &self.signal {
            signal.set(next);
        }
        let event = ChangeEvent::new(K::EVENT, next);
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
        true
    }

    // ── observable cell ───────────────────────────────────────────────────

    /// Attach the cell every accepted change is written to. Replaces any previous one.
    pub fn attach_signal(&mut self, signal: Rc<dyn Observable<Triple>>) {
        self.signal = Some(signal);
    }

    pub fn detach_signal(&mut self) -> Option<Rc<dyn Observable<Triple>>> {
        self.signal.take()
    }

    pub fn signal(&self) -> Option<&Rc<dyn Observable<Triple>>> {
        self.signal.as_ref()
    }

    // ── listeners ─────────────────────────────────────────────────────────

    pub fn add_listener(&mut self, f: impl FnMut(&ChangeEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(f)));
        id
    }

    /// Returns `false` if `id` was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(i, _)| *i != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl<K: TripleKind> Default for TripleControl<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: TripleKind> fmt::Debug for TripleControl<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TripleControl")
            .field("kind", &K::NAME)
            .field("value", &self.value)
            .field("signal", &self.signal.is_some())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::bounds::Bounds;
    use crate::event::EventName;
    use crate::signal::Signal;
    use serde_json::json;

    struct Sample;
    impl TripleKind for Sample {
        const NAME: &'static str = "Sample";
        const FIELDS: [&'static str; 3] = ["x", "y", "z"];
        const BOUNDS: [Bounds; 3] = [
            Bounds::new(-10.0, 10.0),
            Bounds::new(-20.0, 20.0),
            Bounds::new(-30.0, 30.0),
        ];
        const EVENT: EventName = EventName::CoordChanged;
    }

    fn recording() -> (TripleControl<Sample>, Rc<RefCell<Vec<ChangeEvent>>>) {
        let mut c = TripleControl::<Sample>::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        c.add_listener(move |ev| sink.borrow_mut().push(*ev));
        (c, log)
    }

    #[test]
    fn starts_at_default_without_event() {
        let (c, log) = recording();
        assert_eq!(c.triple(), [0.0, 0.0, 0.0]);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn accepted_write_emits_once() {
        let (mut c, log) = recording();
        assert!(c.set_triple(&json!([1, 2, 3])));
        assert_eq!(*log.borrow(), vec![ChangeEvent::new(EventName::CoordChanged, [1.0, 2.0, 3.0])]);
    }

    #[test]
    fn equal_write_is_suppressed() {
        let (mut c, log) = recording();
        c.set_values([1.0, 2.0, 3.0]);
        assert!(!c.set_triple(&json!(["1", "2.0", 3])));
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn clamped_result_equal_to_current_is_suppressed() {
        let (mut c, log) = recording();
        c.set_values([10.0, 0.0, 0.0]);
        assert!(!c.set_slot(Slot::First, 99));
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn slot_setter_clamps_per_slot() {
        let (mut c, _) = recording();
        c.set_slot(Slot::Second, 50);
        c.set_slot(Slot::Third, "-45");
        assert_eq!(c.triple(), [0.0, 20.0, -30.0]);
    }

    #[test]
    fn wrong_shape_resets_to_default() {
        let (mut c, log) = recording();
        c.set_values([1.0, 1.0, 1.0]);
        assert!(c.set_triple(&json!([1, 2])));
        assert_eq!(c.triple(), [0.0, 0.0, 0.0]);
        assert_eq!(log.borrow().last().map(|e| e.detail), Some([0.0, 0.0, 0.0]));
    }

    #[test]
    fn typed_values_clamp_like_parsed_numbers() {
        let (mut c, _) = recording();
        c.set_values([f64::NAN, f64::INFINITY, f64::NEG_INFINITY]);
        assert_eq!(c.triple(), [0.0, 20.0, -30.0]);
    }

    #[test]
    fn infinite_string_clamps_to_bound() {
        let (mut c, _) = recording();
        c.set_slot(Slot::First, "-Infinity");
        assert_eq!(c.triple(), [-10.0, 0.0, 0.0]);
    }

    #[test]
    fn typed_infinity_clamps_to_bound() {
        let (mut c, log) = recording();
        assert!(c.set_slot(Slot::First, f64::INFINITY));
        assert!(c.set_slot(Slot::Third, f64::NEG_INFINITY));
        assert_eq!(c.triple(), [10.0, 0.0, -30.0]);
        assert!(!c.set_slot(Slot::Second, f64::NAN));
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn attached_signal_receives_accepted_writes_only() {
        let (mut c, _) = recording();
        let cell = Signal::new([7.0, 7.0, 7.0]);
        c.attach_signal(Rc::new(cell.clone()));
        // No write yet: the control never pushes on attach.
        assert_eq!(cell.get(), [7.0, 7.0, 7.0]);
        c.set_slot(Slot::First, 4);
        assert_eq!(cell.get(), [4.0, 0.0, 0.0]);
        c.set_slot(Slot::First, "4");
        assert_eq!(cell.get(), [4.0, 0.0, 0.0]);
    }

    #[test]
    fn signal_is_written_before_listeners_run() {
        let mut c = TripleControl::<Sample>::new();
        let cell = Signal::new([0.0; 3]);
        c.attach_signal(Rc::new(cell.clone()));
        let seen = Rc::new(RefCell::new(None));
        let sink = seen.clone();
        let reader = cell.clone();
        c.add_listener(move |_| *sink.borrow_mut() = Some(reader.get()));
        c.set_values([1.0, 1.0, 1.0]);
        assert_eq!(*seen.borrow(), Some([1.0, 1.0, 1.0]));
    }

    #[test]
    fn detach_stops_writes() {
        let mut c = TripleControl::<Sample>::new();
        let cell = Signal::new([0.0; 3]);
        c.attach_signal(Rc::new(cell.clone()));
        assert!(c.detach_signal().is_some());
        c.set_values([1.0, 1.0, 1.0]);
        assert_eq!(cell.get(), [0.0; 3]);
        assert!(c.signal().is_none());
    }

    #[test]
    fn removed_listener_is_not_called() {
        let (mut c, log) = recording();
        let other = Rc::new(RefCell::new(0));
        let count = other.clone();
        let id = c.add_listener(move |_| *count.borrow_mut() += 1);
        assert!(c.remove_listener(id));
        assert!(!c.remove_listener(id));
        c.set_values([1.0, 0.0, 0.0]);
        assert_eq!(*other.borrow(), 0);
        assert_eq!(log.borrow().len(), 1);
        assert_eq!(c.listener_count(), 1);
    }
}
