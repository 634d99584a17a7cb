//! Best-effort value conversion.
//!
//! Used when a predicate's first parameter does not accept the instance
//! directly. Only scalar conversions are attempted; objects and lists never
//! convert.

use super::types::TypeRef;
use super::value::Value;

/// Convert `value` to `target`, or `None` if no sensible conversion exists.
pub fn coerce(value: &Value, target: &TypeRef) -> Option<Value> {
    match target {
        TypeRef::Object => Some(value.clone()),
        TypeRef::String => to_string(value).map(Value::Str),
        TypeRef::Int => to_int(value).map(Value::Int),
        TypeRef::Float => to_float(value).map(Value::Float),
        TypeRef::Bool => to_bool(value).map(Value::Bool),
        TypeRef::List | TypeRef::Named(_) => None,
    }
}

fn to_string(value: &Value) -> Option<String> {
    match value {
        Value::Str(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Int(i) => Some(i.to_string()),
        Value::Float(f) => Some(f.to_string()),
        _ => None,
    }
}

fn to_int(value: &Value) -> Option<i64> {
    match value {
        Value::Int(i) => Some(*i),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Float(f) if f.fract() == 0.0 && in_i64_range(*f) => Some(*f as i64),
        Value::Str(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Finite and representable without saturating.
fn in_i64_range(f: f64) -> bool {
    f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64
}

fn to_float(value: &Value) -> Option<f64> {
    match value {
        Value::Float(f) => Some(*f),
        Value::Int(i) => Some(*i as f64),
        Value::Str(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn to_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Int(i) => Some(*i != 0),
        Value::Str(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}
