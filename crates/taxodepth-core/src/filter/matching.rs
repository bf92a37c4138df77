//! Condition matching logic and helper functions.

use super::Condition;
use serde_json::Value;

impl Condition {
    /// Evaluates the condition against a payload.
    ///
    /// A field holding an array matches when any of its elements matches,
    /// so content tagged with several terms can be stored as a list.
    #[must_use]
    pub fn matches(&self, payload: &Value) -> bool {
        match self {
            Self::Eq { field, value } => {
                get_field(payload, field).is_some_and(|v| any_element(v, |e| values_equal(e, value)))
            }
            Self::In { field, values } => get_field(payload, field).is_some_and(|v| {
                any_element(v, |e| values.iter().any(|val| values_equal(e, val)))
            }),
            Self::Or { conditions } => conditions.iter().any(|c| c.matches(payload)),
        }
    }
}

/// Gets a field from a JSON payload, supporting dot notation for nested fields.
fn get_field<'a>(payload: &'a Value, field: &str) -> Option<&'a Value> {
    let mut current = payload;
    for part in field.split('.') {
        current = current.get(part)?;
    }
    Some(current)
}

fn any_element(value: &Value, pred: impl Fn(&Value) -> bool) -> bool {
    match value {
        Value::Array(items) => items.iter().any(pred),
        other => pred(other),
    }
}

/// Compares two JSON values for equality.
///
/// Numbers compare by value, so `1` and `1.0` are equal.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => match (a.as_u64(), b.as_u64()) {
            (Some(a), Some(b)) => a == b,
            _ => a
                .as_f64()
                .zip(b.as_f64())
                .is_some_and(|(a, b)| (a - b).abs() < f64::EPSILON),
        },
        (Value::String(a), Value::String(b)) => a == b,
        _ => false,
    }
}
