use data_layer_util::{to_json_map, LayerMap};
use serde_json::Value;
use tracing::debug;

use crate::error::DataLayerError;
use crate::listener::Listener;

/// Delivers one payload to a set of listeners.
///
/// Each listener gets a fresh copy of `fields`, so a handler mutating its
/// payload cannot affect what the next one sees. When `item_event` is set the
/// copy's `name` member is overwritten with it.
///
/// Handlers run in slice order. The first error stops the dispatch.
pub fn dispatch(
    listeners: &[Listener],
    fields: &LayerMap,
    item_event: Option<&str>,
    dispatch_event: &str,
) -> Result<(), DataLayerError> {
    debug!(event = dispatch_event, item_event, listeners = listeners.len(), "dispatch");
    for listener in listeners {
        let mut payload = to_json_map(fields);
        if let Some(name) = item_event {
            payload.insert("name".to_string(), Value::String(name.to_string()));
        }
        listener
            .handler
            .call(Value::Object(payload))
            .map_err(|source| DataLayerError::Handler {
                event: dispatch_event.to_string(),
                listener: listener.on.clone(),
                source,
            })?;
    }
    Ok(())
}
