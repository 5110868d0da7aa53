use serde_json::Value;

/// Closed numeric interval `[min, max]` for one slot of a triple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    #[inline]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamp `x` into `[min, max]`. NaN maps to `0`.
    #[inline]
    pub fn clamp(self, x: f64) -> f64 {
        if x.is_nan() {
            0.0
        } else if x < self.min {
            self.min
        } else if x > self.max {
            self.max
        } else {
            x
        }
    }

    #[inline]
    pub fn contains(self, x: f64) -> bool {
        x >= self.min && x <= self.max
    }
}

// ── raw input ─────────────────────────────────────────────────────────────

/// Conversion into the dynamic value a setter validates.
///
/// Unlike `Value::from`, floats keep their non-finite values: `±∞` becomes
/// the text `"Infinity"` / `"-Infinity"` (which [`parse_number`] reads back)
/// and NaN becomes `null`.
pub trait RawInput {
    fn into_raw(self) -> Value;
}

impl RawInput for Value {
    fn into_raw(self) -> Value {
        self
    }
}

impl RawInput for &Value {
    fn into_raw(self) -> Value {
        self.clone()
    }
}

impl RawInput for f64 {
    fn into_raw(self) -> Value {
        if self.is_nan() {
            Value::Null
        } else if self.is_infinite() {
            Value::from(if self > 0.0 { "Infinity" } else { "-Infinity" })
        } else {
            Value::from(self)
        }
    }
}

impl RawInput for f32 {
    fn into_raw(self) -> Value {
        f64::from(self).into_raw()
    }
}

macro_rules! raw_input_via_from {
    ($($t:ty),*) => {
        $(impl RawInput for $t {
            fn into_raw(self) -> Value {
                Value::from(self)
            }
        })*
    };
}

raw_input_via_from!(i8, i16, i32, i64, u8, u16, u32, u64, bool, &str, String);

// ── per-slot parser ───────────────────────────────────────────────────────

/// Parse a raw input into a slot value: numeric conversion, then clamp.
///
/// Never fails: unparsable input yields `0`, out-of-range input the nearest bound.
#[inline]
pub fn parse(raw: &Value, bounds: Bounds) -> f64 {
    bounds.clamp(parse_number(raw))
}

/// Numeric conversion with `parseFloat` semantics.
///
/// - numbers pass through
/// - strings: leading whitespace skipped, longest decimal prefix parsed
/// - arrays: parsed through their comma-joined text (`[5]` → 5, `[1, 2]` → 1)
/// - `null`, booleans, objects → NaN
pub fn parse_number(raw: &Value) -> f64 {
    match raw {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => parse_float(s),
        Value::Array(_) => parse_float(&joined_text(raw)),
        Value::Null | Value::Bool(_) | Value::Object(_) => f64::NAN,
    }
}

/// Parse the longest decimal-literal prefix of `s`, or NaN if there is none.
pub fn parse_float(s: &str) -> f64 {
    let s = s.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    let b = s.as_bytes();
    let mut i = 0;

    let negative = match b.first() {
        Some(b'+') => { i = 1; false }
        Some(b'-') => { i = 1; true }
        _ => false,
    };
    if s[i..].starts_with("Infinity") {
        return if negative { f64::NEG_INFINITY } else { f64::INFINITY };
    }

    let int_digits = count_digits(&b[i..]);
    i += int_digits;

    let mut frac_digits = 0;
    if b.get(i) == Some(&b'.') {
        frac_digits = count_digits(&b[i + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            i += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return f64::NAN;
    }

    // Exponent only counts when at least one digit follows.
    if matches!(b.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(b.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_digits = count_digits(&b[j.min(b.len())..]);
        if exp_digits > 0 {
            i = j + exp_digits;
        }
    }

    s[..i].parse::<f64>().unwrap_or(f64::NAN)
}

fn count_digits(b: &[u8]) -> usize {
    b.iter().take_while(|c| c.is_ascii_digit()).count()
}

/// Text form of a value as an array element join sees it.
fn joined_text(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(joined_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const B: Bounds = Bounds::new(-180.0, 180.0);

    // ── parse ─────────────────────────────────────────────────────────────

    #[test]
    fn parse_in_range_is_identity() {
        assert_eq!(parse(&json!(42.5), B), 42.5);
        assert_eq!(parse(&json!(-180), B), -180.0);
        assert_eq!(parse(&json!(180), B), 180.0);
    }

    #[test]
    fn parse_clamps_to_nearest_bound() {
        assert_eq!(parse(&json!(400), B), 180.0);
        assert_eq!(parse(&json!(-1e9), B), -180.0);
    }

    #[test]
    fn parse_non_numeric_is_zero() {
        assert_eq!(parse(&json!("abc"), B), 0.0);
        assert_eq!(parse(&json!(null), B), 0.0);
        assert_eq!(parse(&json!(true), B), 0.0);
        assert_eq!(parse(&json!({"x": 1}), B), 0.0);
        assert_eq!(parse(&json!([]), B), 0.0);
    }

    #[test]
    fn parse_infinity_clamps() {
        assert_eq!(parse(&json!("Infinity"), B), 180.0);
        assert_eq!(parse(&json!("-Infinity"), B), -180.0);
    }

    #[test]
    fn parse_string_with_unit_suffix() {
        assert_eq!(parse(&json!("91°"), Bounds::new(-90.0, 90.0)), 90.0);
    }

    // ── parse_float ───────────────────────────────────────────────────────

    #[test]
    fn float_prefix_rules() {
        assert_eq!(parse_float("12abc"), 12.0);
        assert_eq!(parse_float("  3.5"), 3.5);
        assert_eq!(parse_float(".5"), 0.5);
        assert_eq!(parse_float("5."), 5.0);
        assert_eq!(parse_float("-7"), -7.0);
        assert_eq!(parse_float("+7"), 7.0);
        assert_eq!(parse_float("1e3x"), 1000.0);
        assert_eq!(parse_float("1e"), 1.0);
        assert_eq!(parse_float("2E-1"), 0.2);
        assert_eq!(parse_float("0x10"), 0.0);
    }

    #[test]
    fn float_rejects_non_literals() {
        assert!(parse_float("").is_nan());
        assert!(parse_float(".").is_nan());
        assert!(parse_float("-").is_nan());
        assert!(parse_float("abc").is_nan());
        assert!(parse_float("NaN").is_nan());
    }

    #[test]
    fn array_uses_joined_text() {
        assert_eq!(parse_number(&json!([5])), 5.0);
        assert_eq!(parse_number(&json!([1, 2])), 1.0);
        assert_eq!(parse_number(&json!(["7"])), 7.0);
        assert!(parse_number(&json!([null, 1])).is_nan());
    }

    // ── RawInput ──────────────────────────────────────────────────────────

    #[test]
    fn non_finite_floats_survive_conversion() {
        assert_eq!(parse(&f64::INFINITY.into_raw(), B), 180.0);
        assert_eq!(parse(&f64::NEG_INFINITY.into_raw(), B), -180.0);
        assert_eq!(parse(&f32::INFINITY.into_raw(), B), 180.0);
        assert_eq!(f64::NAN.into_raw(), Value::Null);
        assert_eq!(parse(&f64::NAN.into_raw(), B), 0.0);
    }

    #[test]
    fn finite_inputs_convert_plainly() {
        assert_eq!(12.5f64.into_raw(), json!(12.5));
        assert_eq!(7i32.into_raw(), json!(7));
        assert_eq!("-45".into_raw(), json!("-45"));
        assert_eq!((&json!([1])).into_raw(), json!([1]));
    }

    // ── Bounds ────────────────────────────────────────────────────────────

    #[test]
    fn clamp_nan_is_zero() {
        assert_eq!(Bounds::new(-1000.0, 1000.0).clamp(f64::NAN), 0.0);
    }

    #[test]
    fn contains_is_inclusive() {
        assert!(B.contains(-180.0));
        assert!(B.contains(180.0));
        assert!(!B.contains(180.5));
    }
}
