use data_layer_util::{deep_merge, to_json, value_at_path, LayerValue};
use serde_json::{Map, Value};

/// Owns the live state tree. The root is always an object.
#[derive(Debug)]
pub struct StateStore {
    state: LayerValue,
}

impl Default for StateStore {
    fn default() -> Self {
        Self {
            state: LayerValue::object(),
        }
    }
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deep-merges `data` into the live state. Non-object updates are ignored.
    pub fn apply_update(&mut self, data: &LayerValue) {
        deep_merge(&mut self.state, data);
    }

    /// An independent JSON copy of the whole state. `Undefined` leaves are
    /// not part of it.
    pub fn snapshot(&self) -> Value {
        to_json(&self.state).unwrap_or_else(|| Value::Object(Map::new()))
    }

    /// An independent JSON copy of the subtree at a dotted path.
    pub fn snapshot_at(&self, path: &str) -> Option<Value> {
        value_at_path(&self.state, path).and_then(to_json)
    }
}
