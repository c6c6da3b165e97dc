//! Deep equality on JSON values
//!
//! The `enum`, `const` and `uniqueItems` keywords compare instances
//! structurally: numbers by mathematical value (`1` equals `1.0`), objects by
//! key set regardless of declaration order. `serde_json`'s derived equality
//! distinguishes integer from float representations, so it cannot be used
//! directly.

use serde_json::{Number, Value};

/// Structural equality with numbers compared by mathematical value
pub(crate) fn deep_equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => number_equals(x, y),
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y.iter()).all(|(u, v)| deep_equals(u, v))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(key, u)| y.get(key).is_some_and(|v| deep_equals(u, v)))
        }
        _ => false,
    }
}

fn number_equals(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}
