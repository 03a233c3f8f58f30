use std::sync::{Arc, Mutex};

use serde_json::Value;
use tracing::debug;

use crate::config::{DataLayerConfig, IntakeMode};
use crate::error::DataLayerError;
use crate::item::RawItem;
use crate::listener::{Handler, ListenerRegistry};
use crate::lock;
use crate::processor::{Core, Disposition, ItemProcessor};
use crate::store::StateStore;

/// The queue front of the data layer.
///
/// Cloning yields another handle to the same queue, state, and listeners, so
/// a handler may capture a clone and push from inside a dispatch. Everything
/// runs synchronously on the caller's stack.
#[derive(Debug, Clone)]
pub struct DataLayer {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    core: Mutex<Core>,
    queue: Mutex<Vec<RawItem>>,
    intake: IntakeMode,
}

impl DataLayer {
    /// Builds a data layer and replays `config.existing_queue` through it.
    ///
    /// Listener items found there are registered and left out of the queue.
    /// Once the whole queue is processed, `datalayer:ready` is dispatched to
    /// the listeners registered so far.
    pub fn new(config: DataLayerConfig) -> Result<Self, DataLayerError> {
        let layer = Self {
            inner: Arc::new(Inner {
                core: Mutex::new(Core {
                    store: StateStore::new(),
                    registry: ListenerRegistry::new(config.handler_identity),
                }),
                queue: Mutex::new(Vec::new()),
                intake: config.intake,
            }),
        };

        for raw in config.existing_queue.unwrap_or_default() {
            if layer.processor().process(&raw)? == Disposition::Retained {
                lock(&layer.inner.queue).push(raw);
            }
        }
        layer.processor().ready()?;
        debug!(
            queued = layer.len(),
            listeners = layer.listener_count(),
            "data layer ready"
        );
        Ok(layer)
    }

    /// Processes `items` in order and appends the non-listener ones to the
    /// queue.
    ///
    /// Returns the new queue length, or `None` when nothing was appended.
    /// Items are appended only if the first one is a truthy non-listener
    /// item: when it is a listener item, later data and event items are
    /// processed but not queued.
    ///
    /// A failing handler aborts the call. Items processed before the failure
    /// keep their effects, but none of them is queued.
    pub fn push<I>(&self, items: I) -> Result<Option<usize>, DataLayerError>
    where
        I: IntoIterator,
        I::Item: Into<RawItem>,
    {
        let processor = self.processor();
        let mut retained = Vec::new();
        let mut first_kept = false;
        for (idx, raw) in items.into_iter().enumerate() {
            let raw: RawItem = raw.into();
            if processor.process(&raw)? == Disposition::Retained {
                if idx == 0 {
                    first_kept = raw.is_truthy();
                }
                retained.push(raw);
            }
        }
        if !first_kept {
            return Ok(None);
        }
        let mut queue = lock(&self.inner.queue);
        queue.extend(retained);
        Ok(Some(queue.len()))
    }

    /// Single-item form of [`DataLayer::push`].
    pub fn push_item(&self, item: impl Into<RawItem>) -> Result<Option<usize>, DataLayerError> {
        self.push([item.into()])
    }

    /// An independent copy of the current state.
    pub fn get_state(&self) -> Value {
        lock(&self.inner.core).store.snapshot()
    }

    /// An independent copy of the state at a dotted path such as
    /// `"page.items.0"`, or `None` if nothing is there.
    pub fn get_state_at(&self, path: &str) -> Option<Value> {
        lock(&self.inner.core).store.snapshot_at(path)
    }

    /// Same as pushing `{ on: event, handler }`.
    pub fn add_event_listener(
        &self,
        event: impl Into<String>,
        handler: Handler,
    ) -> Result<(), DataLayerError> {
        self.push_item(RawItem::on(event, handler)).map(|_| ())
    }

    /// Same as pushing `{ off: event, handler? }`.
    pub fn remove_event_listener(
        &self,
        event: impl Into<String>,
        handler: Option<Handler>,
    ) -> Result<(), DataLayerError> {
        let mut item = RawItem::off(event);
        if let Some(handler) = handler {
            item = item.with_handler(handler);
        }
        self.push_item(item).map(|_| ())
    }

    /// The items kept in the queue, in order.
    pub fn queue(&self) -> Vec<RawItem> {
        lock(&self.inner.queue).clone()
    }

    pub fn len(&self) -> usize {
        lock(&self.inner.queue).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.inner.queue).is_empty()
    }

    pub fn listener_count(&self) -> usize {
        lock(&self.inner.core).registry.len()
    }

    fn processor(&self) -> ItemProcessor<'_> {
        ItemProcessor::new(&self.inner.core, self.inner.intake)
    }
}
