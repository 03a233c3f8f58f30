use std::sync::Mutex;

use data_layer_util::{LayerMap, LayerValue};
use tracing::trace;

use crate::config::IntakeMode;
use crate::dispatch::dispatch;
use crate::error::DataLayerError;
use crate::events::{CHANGE, EVENT, READY};
use crate::item::{Item, RawItem};
use crate::listener::ListenerRegistry;
use crate::lock;
use crate::store::StateStore;

/// State and listeners shared by every handle of one data layer.
#[derive(Debug, Default)]
pub(crate) struct Core {
    pub store: StateStore,
    pub registry: ListenerRegistry,
}

/// What the queue should do with an item after it was processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Disposition {
    /// Listener configuration, stripped from the queue.
    Listener,
    /// Data, event, or inert item, kept in the queue.
    Retained,
}

/// Routes classified items to the store, the registry, and the dispatcher.
///
/// The core lock is only held while touching the store or the registry, never
/// while a handler runs, so handlers may push back into the same data layer.
pub(crate) struct ItemProcessor<'a> {
    core: &'a Mutex<Core>,
    intake: IntakeMode,
}

impl<'a> ItemProcessor<'a> {
    pub fn new(core: &'a Mutex<Core>, intake: IntakeMode) -> Self {
        Self { core, intake }
    }

    pub fn process(&self, raw: &RawItem) -> Result<Disposition, DataLayerError> {
        let Some(item) = Item::classify(raw) else {
            if self.intake == IntakeMode::Strict {
                return Err(DataLayerError::MalformedItem(describe_inert(raw)));
            }
            trace!("ignoring inert item");
            return Ok(Disposition::Retained);
        };
        trace!(kind = item.kind(), "processing item");

        match item {
            Item::On(listener) => {
                lock(self.core).registry.register(listener);
                Ok(Disposition::Listener)
            }
            Item::Off(off) => {
                lock(self.core)
                    .registry
                    .unregister(&off.off, off.handler.as_ref());
                Ok(Disposition::Listener)
            }
            Item::Data(item) => {
                self.merge(&item.data);
                self.notify(&item.fields, None, CHANGE)?;
                Ok(Disposition::Retained)
            }
            Item::Event(item) => {
                if let Some(data) = &item.data {
                    self.merge(data);
                    self.notify(&item.fields, Some(&item.name), CHANGE)?;
                }
                self.notify(&item.fields, Some(&item.name), EVENT)?;
                Ok(Disposition::Retained)
            }
        }
    }

    /// Tells listeners registered so far that initial processing is over.
    pub fn ready(&self) -> Result<(), DataLayerError> {
        self.notify(&LayerMap::new(), Some(READY), READY)
    }

    fn merge(&self, data: &LayerValue) {
        lock(self.core).store.apply_update(data);
    }

    fn notify(
        &self,
        fields: &LayerMap,
        item_event: Option<&str>,
        dispatch_event: &str,
    ) -> Result<(), DataLayerError> {
        let listeners = lock(self.core)
            .registry
            .find_matching(dispatch_event, item_event);
        dispatch(&listeners, fields, item_event, dispatch_event)
    }
}

fn describe_inert(raw: &RawItem) -> String {
    match raw.value() {
        v if !v.is_truthy() => "falsy item".to_string(),
        LayerValue::Object(map) if map.contains_key("on") && raw.handler().is_none() => {
            "`on` item without a handler".to_string()
        }
        LayerValue::Object(_) => "item has no `data`, `event`, `on` or `off` member".to_string(),
        _ => "item is not an object".to_string(),
    }
}
