//! Value comparison used for sorting.

use std::cmp::Ordering;

use crate::value::Value;

/// Compares two values of the same kind.
///
/// Returns `None` (incomparable) when the kinds differ, when either side is
/// NaN, or when the kind has no ordering: booleans, nulls, nested records
/// and unsupported values.
///
/// - Strings compare case-insensitively, by their uppercased characters.
/// - Integers compare only within the same width, as do floats.
/// - Timestamps compare by whole seconds since the epoch.
///
/// # Example
///
/// ```
/// use std::cmp::Ordering;
/// use mempage::{compare_values, Int, Value};
///
/// assert_eq!(
///     compare_values(&Value::String("apple"), &Value::String("BANANA")),
///     Some(Ordering::Less)
/// );
/// assert_eq!(
///     compare_values(&Value::Int(Int::I32(1)), &Value::Int(Int::I64(1))),
///     None
/// );
/// ```
pub fn compare_values(a: &Value<'_>, b: &Value<'_>) -> Option<Ordering> {
    match (a, b) {
        (Value::String(a), Value::String(b)) => Some(compare_uppercase(a, b)),
        (Value::Int(a), Value::Int(b)) => a.compare(*b),
        (Value::Float(a), Value::Float(b)) => a.compare(*b),
        (Value::Timestamp(a), Value::Timestamp(b)) => Some(a.as_secs().cmp(&b.as_secs())),
        _ => None,
    }
}

fn compare_uppercase(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_uppercase)
        .cmp(b.chars().flat_map(char::to_uppercase))
}
