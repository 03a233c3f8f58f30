use serde_json::{Map, Value};

use crate::value::{LayerMap, LayerValue};

/// Copies a tree out as plain JSON, the way a serialize/parse round trip would.
///
/// The copy is lossy on purpose:
/// - an `Undefined` object member is omitted,
/// - an `Undefined` array element becomes `null`,
/// - an `Undefined` root has no JSON form and yields `None`.
///
/// The result never shares structure with `value`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use data_layer_util::{json_clone::to_json, LayerMap, LayerValue};
///
/// let mut map = LayerMap::new();
/// map.insert("kept".into(), LayerValue::from(json!([1, 2])));
/// map.insert("dropped".into(), LayerValue::Undefined);
///
/// assert_eq!(to_json(&LayerValue::Object(map)), Some(json!({"kept": [1, 2]})));
/// assert_eq!(to_json(&LayerValue::Undefined), None);
/// ```
pub fn to_json(value: &LayerValue) -> Option<Value> {
    match value {
        LayerValue::Undefined => None,
        LayerValue::Null => Some(Value::Null),
        LayerValue::Bool(b) => Some(Value::Bool(*b)),
        LayerValue::Number(n) => Some(Value::Number(n.clone())),
        LayerValue::String(s) => Some(Value::String(s.clone())),
        LayerValue::Array(arr) => Some(Value::Array(
            arr.iter()
                .map(|v| to_json(v).unwrap_or(Value::Null))
                .collect(),
        )),
        LayerValue::Object(obj) => Some(Value::Object(to_json_map(obj))),
    }
}

/// Object form of [`to_json`].
pub fn to_json_map(map: &LayerMap) -> Map<String, Value> {
    let mut out = Map::new();
    for (key, val) in map {
        if let Some(val) = to_json(val) {
            out.insert(key.clone(), val);
        }
    }
    out
}

/// Round-trips a tree through its JSON form, so the result holds no
/// `Undefined` members anywhere.
pub fn clone_lossy(value: &LayerValue) -> LayerValue {
    to_json(value).map(LayerValue::from).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(entries: Vec<(&str, LayerValue)>) -> LayerValue {
        LayerValue::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    #[test]
    fn test_to_json_plain_values() {
        let value = json!({"a": [1, {"b": null}], "c": "s", "d": true, "e": 1.5});
        assert_eq!(to_json(&LayerValue::from(&value)), Some(value));
    }

    #[test]
    fn test_to_json_drops_nested_undefined_members() {
        let tree = obj(vec![
            ("outer", obj(vec![("gone", LayerValue::Undefined), ("x", LayerValue::from(json!(1)))])),
        ]);
        assert_eq!(to_json(&tree), Some(json!({"outer": {"x": 1}})));
    }

    #[test]
    fn test_to_json_undefined_array_element_becomes_null() {
        let tree = LayerValue::Array(vec![LayerValue::from(json!(1)), LayerValue::Undefined]);
        assert_eq!(to_json(&tree), Some(json!([1, null])));
    }

    #[test]
    fn test_clone_lossy_normalizes() {
        let tree = obj(vec![("gone", LayerValue::Undefined), ("k", LayerValue::from("v"))]);
        assert_eq!(clone_lossy(&tree), LayerValue::from(json!({"k": "v"})));
        assert_eq!(clone_lossy(&LayerValue::Undefined), LayerValue::Undefined);
    }
}
