use serde_json::Value;

use crate::bounds::{self, Bounds};
use crate::event::EventName;

/// Fixed 3-element ordered numeric tuple.
pub type Triple = [f64; 3];

/// The all-zero triple every control starts from.
pub const ORIGIN: Triple = [0.0, 0.0, 0.0];

/// Static description of one kind of bounded triple.
///
/// Implemented by zero-sized marker types ([`Hpr`](crate::angles::Hpr),
/// [`Geodetic`](crate::position::Geodetic)); the generic
/// [`TripleControl`](crate::control::TripleControl) reads everything it needs from here.
pub trait TripleKind: 'static {
    /// Display title of the control.
    const NAME: &'static str;
    /// Field names, in slot order.
    const FIELDS: [&'static str; 3];
    /// Per-slot bounds, in slot order.
    const BOUNDS: [Bounds; 3];
    /// Change notification emitted on accepted writes.
    const EVENT: EventName;
    /// Value at construction and replacement for malformed input.
    const DEFAULT: Triple = ORIGIN;
}

/// One slot of a triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    First,
    Second,
    Third,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::First, Slot::Second, Slot::Third];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Slot::First => 0,
            Slot::Second => 1,
            Slot::Third => 2,
        }
    }
}

/// Shape check: the three raw elements of a 3-element array, or the raw
/// form of `K::DEFAULT` for anything else.
pub fn normalize<K: TripleKind>(raw: &Value) -> [Value; 3] {
    match raw.as_array() {
        Some(items) if items.len() == 3 => std::array::from_fn(|i| items[i].clone()),
        _ => K::DEFAULT.map(Value::from),
    }
}

/// Validate an arbitrary raw value into a triple of kind `K`.
///
/// Anything other than a 3-element array becomes `K::DEFAULT` wholesale;
/// otherwise each element goes through its slot's parser.
pub fn validate<K: TripleKind>(raw: &Value) -> Triple {
    let items = normalize::<K>(raw);
    std::array::from_fn(|i| bounds::parse(&items[i], K::BOUNDS[i]))
}

/// Structural (element-wise) equality. `-0` and `0` compare equal.
#[inline]
pub fn is_same(a: &Triple, b: &Triple) -> bool {
    a.iter().zip(b).all(|(x, y)| x == y)
}

/// Raw array form of a triple, accepted as-is by [`validate`].
pub fn to_raw(t: &Triple) -> Value {
    Value::Array(t.iter().map(|&v| Value::from(v)).collect())
}

/// Compact JSON-array text of a triple: `[90,0,0]`, `[0.5,-1,2]`.
///
/// Integral values print without a fractional part, negative zero prints as `0`,
/// and magnitudes below `1e-6` or from `1e21` up switch to exponent form
/// (`1e-7`, `1.5e+21`), the way a JSON serializer in a browser writes numbers.
pub fn format_triple(t: &Triple) -> String {
    let parts: Vec<String> = t.iter().map(|&v| format_number(v)).collect();
    format!("[{}]", parts.join(","))
}

/// Single value in the same notation as [`format_triple`].
pub fn format_number(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    let magnitude = v.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return v.to_string();
    }
    let text = format!("{v:e}");
    match text.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => text,
    }
}
