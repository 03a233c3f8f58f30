//! In-page state container and event bus.
//!
//! Hosts push items onto a [`DataLayer`]. Each item is classified once:
//! - `{ data }` is deep-merged into the shared state and announced as
//!   [`events::CHANGE`],
//! - `{ event, info?, data? }` is announced as [`events::EVENT`] (and as a
//!   change when it carries data),
//! - `{ on, handler }` and `{ off, handler? }` register and remove listeners
//!   and never stay in the queue.
//!
//! Listeners run synchronously, in registration order, each with its own copy
//! of the payload.
//!
//! # Example
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use data_layer_core::{events, DataLayer, DataLayerConfig, Handler, RawItem};
//! use serde_json::json;
//!
//! let layer = DataLayer::new(
//!     DataLayerConfig::new().with_existing_queue([json!({"data": {"page": {"id": 1}}})]),
//! )
//! .unwrap();
//! assert_eq!(layer.get_state(), json!({"page": {"id": 1}}));
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//! layer
//!     .push_item(RawItem::on(events::CHANGE, Handler::infallible(move |p| sink.lock().unwrap().push(p))))
//!     .unwrap();
//! layer.push_item(RawItem::data(json!({"x": 2}))).unwrap();
//!
//! assert_eq!(*seen.lock().unwrap(), vec![json!({"data": {"x": 2}})]);
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError};

pub mod config;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod item;
pub mod listener;
pub mod manager;
mod processor;
pub mod store;

pub use config::{DataLayerConfig, IntakeMode};
pub use error::{DataLayerError, HandlerError};
pub use item::{DataItem, EventItem, Item, ListenerOff, RawItem};
pub use listener::{Handler, HandlerIdentity, Listener, ListenerRegistry, ListenerScope};
pub use manager::DataLayer;
pub use store::StateStore;

pub use data_layer_util::{LayerMap, LayerValue};

/// Handlers never run under these locks, so a poisoned lock still guards
/// consistent data.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
