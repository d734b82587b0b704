//! Canonical JSON encoding.
//!
//! Two structurally equal values always encode to the same string: object
//! keys are written in sorted order at every depth, integral floats are
//! written as integers and no whitespace is emitted. Sets deduplicate on
//! this encoding and entry hashes are taken over it.
//!
//! `serde_json` only sorts keys while its `preserve_order` feature is off, and
//! any crate in the dependency graph can turn that feature on.

use serde_json::{Map, Number, Value};

/// Encodes `value` as compact JSON with recursively sorted object keys.
pub fn to_canonical_string(value: &Value) -> String {
    normalize(value).to_string()
}

/// Rebuilds `value` with sorted object keys and integral floats as integers.
fn normalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut fields: Vec<(&String, &Value)> = map.iter().collect();
            fields.sort_by(|a, b| a.0.cmp(b.0));
            let sorted: Map<String, Value> = fields
                .into_iter()
                .map(|(key, field)| (key.clone(), normalize(field)))
                .collect();
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(normalize).collect()),
        Value::Number(n) => Value::Number(normalize_number(n)),
        other => other.clone(),
    }
}

/// `1.0` and `1` are the same number.
fn normalize_number(n: &Number) -> Number {
    const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;
    const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;

    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 => {
            if (-TWO_POW_63..TWO_POW_63).contains(&f) {
                Number::from(f as i64)
            } else if (0.0..TWO_POW_64).contains(&f) {
                Number::from(f as u64)
            } else {
                n.clone()
            }
        }
        _ => n.clone(),
    }
}
