use indexmap::IndexMap;
use serde_json::{Number, Value};

/// Insertion-ordered object node of a [`LayerValue`] tree.
pub type LayerMap = IndexMap<String, LayerValue>;

/// A tree value as held by the data layer.
///
/// This is a JSON value extended with an explicit [`LayerValue::Undefined`]
/// variant. `Undefined` is the "absent" sentinel: merging it into an object
/// removes the key, and copying it out through [`crate::json_clone::to_json`]
/// drops it.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use data_layer_util::LayerValue;
///
/// let tree = LayerValue::from(json!({"page": {"id": 1}}));
/// assert!(tree.is_object());
/// assert!(tree.is_truthy());
/// assert!(!LayerValue::Undefined.is_truthy());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LayerValue {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<LayerValue>),
    Object(LayerMap),
}

impl LayerValue {
    /// Creates an empty object node.
    pub fn object() -> Self {
        LayerValue::Object(LayerMap::new())
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, LayerValue::Undefined)
    }

    pub fn is_object(&self) -> bool {
        matches!(self, LayerValue::Object(_))
    }

    pub fn as_object(&self) -> Option<&LayerMap> {
        match self {
            LayerValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut LayerMap> {
        match self {
            LayerValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            LayerValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Host truthiness: `undefined`, `null`, `false`, zero, and the empty
    /// string are falsy. Empty objects and arrays are truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            LayerValue::Undefined | LayerValue::Null => false,
            LayerValue::Bool(b) => *b,
            LayerValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            LayerValue::String(s) => !s.is_empty(),
            LayerValue::Array(_) | LayerValue::Object(_) => true,
        }
    }

    /// Returns the member at `key` when this is an object and the member is
    /// not `Undefined`.
    pub fn get(&self, key: &str) -> Option<&LayerValue> {
        self.as_object()?.get(key).filter(|v| !v.is_undefined())
    }
}

impl From<&Value> for LayerValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => LayerValue::Null,
            Value::Bool(b) => LayerValue::Bool(*b),
            Value::Number(n) => LayerValue::Number(n.clone()),
            Value::String(s) => LayerValue::String(s.clone()),
            Value::Array(arr) => LayerValue::Array(arr.iter().map(LayerValue::from).collect()),
            Value::Object(obj) => LayerValue::Object(
                obj.iter()
                    .map(|(k, v)| (k.clone(), LayerValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for LayerValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => LayerValue::Null,
            Value::Bool(b) => LayerValue::Bool(b),
            Value::Number(n) => LayerValue::Number(n),
            Value::String(s) => LayerValue::String(s),
            Value::Array(arr) => LayerValue::Array(arr.into_iter().map(LayerValue::from).collect()),
            Value::Object(obj) => LayerValue::Object(
                obj.into_iter()
                    .map(|(k, v)| (k, LayerValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<LayerMap> for LayerValue {
    fn from(map: LayerMap) -> Self {
        LayerValue::Object(map)
    }
}

impl From<&str> for LayerValue {
    fn from(s: &str) -> Self {
        LayerValue::String(s.to_string())
    }
}

impl From<String> for LayerValue {
    fn from(s: String) -> Self {
        LayerValue::String(s)
    }
}

impl From<bool> for LayerValue {
    fn from(b: bool) -> Self {
        LayerValue::Bool(b)
    }
}
