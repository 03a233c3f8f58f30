use crate::value::{LayerMap, LayerValue};

/// Recursively merges `source` into `target` in place.
///
/// Only object nodes are merged. If either side is not an object the call
/// does nothing.
///
/// For each member of `source`:
/// - an object value is merged into the target member, which is created as an
///   empty object when missing, `Undefined`, or `null`;
/// - `Undefined` removes the member from `target`;
/// - anything else, arrays included, replaces the target member wholesale.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use data_layer_util::{merge::deep_merge, LayerValue};
///
/// let mut state = LayerValue::from(json!({"a": {"b": 1}, "list": [1, 2]}));
/// deep_merge(&mut state, &LayerValue::from(json!({"a": {"c": 2}, "list": [3]})));
///
/// assert_eq!(state, LayerValue::from(json!({"a": {"b": 1, "c": 2}, "list": [3]})));
/// ```
pub fn deep_merge(target: &mut LayerValue, source: &LayerValue) {
    if let (LayerValue::Object(target), LayerValue::Object(source)) = (target, source) {
        merge_maps(target, source);
    }
}

/// Object form of [`deep_merge`].
pub fn merge_maps(target: &mut LayerMap, source: &LayerMap) {
    for (key, src) in source {
        match src {
            LayerValue::Object(_) => {
                let slot = target.entry(key.clone()).or_insert_with(LayerValue::object);
                if matches!(slot, LayerValue::Undefined | LayerValue::Null) {
                    *slot = LayerValue::object();
                }
                // A non-object member facing an object source is left as is.
                deep_merge(slot, src);
            }
            LayerValue::Undefined => {
                target.shift_remove(key);
            }
            _ => {
                target.insert(key.clone(), src.clone());
            }
        }
    }
}
