//! Small predicates and helpers over `serde_json::Value`.

use std::ops::ControlFlow;

use serde_json::{Map, Value};

/// Returns `true` for `null`, and for a missing value.
pub fn is_nil(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

/// Plain-object check: borrows the map if `value` is a JSON object.
pub fn as_row(value: &Value) -> Option<&Map<String, Value>> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

/// Name of the JSON type, used in error messages.
pub fn type_name(value: Option<&Value>) -> &'static str {
    match value {
        None => "undefined",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}

/// Copy of `map` without `key`. The input is left untouched.
pub fn omit(map: &Map<String, Value>, key: &str) -> Map<String, Value> {
    let mut copy = map.clone();
    copy.shift_remove(key);
    copy
}

/// Iterates `items` until the callback breaks; returns the break, if any.
pub fn for_each_until<'a, T, B, F>(items: &'a [T], mut callback: F) -> ControlFlow<B>
where
    F: FnMut(usize, &'a T) -> ControlFlow<B>,
{
    for (index, item) in items.iter().enumerate() {
        callback(index, item)?;
    }
    ControlFlow::Continue(())
}
