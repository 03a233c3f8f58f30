use crate::value::LayerValue;

/// Splits a dotted path such as `"page.items.0.id"` into its segments.
///
/// Empty segments are skipped, so `""` and `"."` address the root.
pub fn parse_path(path: &str) -> Vec<&str> {
    path.split('.').filter(|s| !s.is_empty()).collect()
}

/// Looks up the node at a dotted path.
///
/// Object members are addressed by key and array elements by decimal index.
/// `Undefined` members count as missing.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use data_layer_util::{path::value_at_path, LayerValue};
///
/// let state = LayerValue::from(json!({"page": {"items": [{"id": 7}]}}));
/// assert_eq!(
///     value_at_path(&state, "page.items.0.id"),
///     Some(&LayerValue::from(json!(7)))
/// );
/// assert_eq!(value_at_path(&state, "page.missing"), None);
/// ```
pub fn value_at_path<'a>(value: &'a LayerValue, path: &str) -> Option<&'a LayerValue> {
    let mut cur = value;
    for step in parse_path(path) {
        cur = match cur {
            LayerValue::Object(map) => map.get(step)?,
            LayerValue::Array(arr) => arr.get(step.parse::<usize>().ok()?)?,
            _ => return None,
        };
        if cur.is_undefined() {
            return None;
        }
    }
    Some(cur)
}
