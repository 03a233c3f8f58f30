//! Queue items and their classification.
//!
//! Hosts push loosely shaped objects. A [`RawItem`] keeps that shape as is,
//! and [`Item::classify`] resolves it once into one of four variants by the
//! keys present:
//!
//! | keys                | variant        |
//! |---------------------|----------------|
//! | `on` + handler      | [`Item::On`]   |
//! | `off`               | [`Item::Off`]  |
//! | `event` / `name`    | [`Item::Event`]|
//! | `data`              | [`Item::Data`] |
//!
//! Anything else is inert.

use data_layer_util::{LayerMap, LayerValue};
use serde_json::Value;

use crate::listener::{Handler, Listener, ListenerScope};

/// An item as pushed by the host: a value tree plus the callback, if any,
/// that travels in its `handler` slot.
#[derive(Debug, Clone, Default)]
pub struct RawItem {
    value: LayerValue,
    handler: Option<Handler>,
}

impl RawItem {
    pub fn new(value: impl Into<LayerValue>) -> Self {
        Self {
            value: value.into(),
            handler: None,
        }
    }

    /// `{ data }`
    pub fn data(data: impl Into<LayerValue>) -> Self {
        Self::new(LayerValue::object()).with_field("data", data)
    }

    /// `{ event }`
    pub fn event(name: impl Into<String>) -> Self {
        Self::new(LayerValue::object()).with_field("event", name.into())
    }

    /// `{ on, handler }`
    pub fn on(event: impl Into<String>, handler: Handler) -> Self {
        Self::new(LayerValue::object())
            .with_field("on", event.into())
            .with_handler(handler)
    }

    /// `{ off }`
    pub fn off(event: impl Into<String>) -> Self {
        Self::new(LayerValue::object()).with_field("off", event.into())
    }

    pub fn with_data(self, data: impl Into<LayerValue>) -> Self {
        self.with_field("data", data)
    }

    pub fn with_info(self, info: impl Into<LayerValue>) -> Self {
        self.with_field("info", info)
    }

    pub fn with_selector(self, selector: impl Into<String>) -> Self {
        self.with_field("selector", selector.into())
    }

    pub fn with_scope(self, scope: ListenerScope) -> Self {
        self.with_field("scope", scope.as_str())
    }

    pub fn with_handler(mut self, handler: Handler) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Sets a member, turning the item into an object first if it is not one.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<LayerValue>) -> Self {
        if !self.value.is_object() {
            self.value = LayerValue::object();
        }
        if let Some(map) = self.value.as_object_mut() {
            map.insert(key.into(), value.into());
        }
        self
    }

    pub fn value(&self) -> &LayerValue {
        &self.value
    }

    pub fn handler(&self) -> Option<&Handler> {
        self.handler.as_ref()
    }

    pub fn is_truthy(&self) -> bool {
        self.value.is_truthy()
    }

    fn fields(&self) -> Option<&LayerMap> {
        self.value.as_object()
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.value.get(key)?.as_str()
    }
}

impl From<Value> for RawItem {
    fn from(value: Value) -> Self {
        RawItem::new(value)
    }
}

impl From<LayerValue> for RawItem {
    fn from(value: LayerValue) -> Self {
        RawItem::new(value)
    }
}

/// `{ data }` with no event name.
#[derive(Debug, Clone)]
pub struct DataItem {
    pub data: LayerValue,
    /// Every member of the original item, used as the dispatch payload.
    pub fields: LayerMap,
}

/// `{ event, info?, data? }`.
#[derive(Debug, Clone)]
pub struct EventItem {
    pub name: String,
    pub info: Option<LayerValue>,
    pub data: Option<LayerValue>,
    pub fields: LayerMap,
}

#[derive(Debug, Clone)]
pub struct ListenerOff {
    pub off: String,
    pub handler: Option<Handler>,
}

#[derive(Debug, Clone)]
pub enum Item {
    Data(DataItem),
    Event(EventItem),
    On(Listener),
    Off(ListenerOff),
}

impl Item {
    /// Resolves a raw item into its variant, or `None` if it is falsy or
    /// carries no discriminant.
    ///
    /// `on` wins over `off` when both are present with a handler. An `on`
    /// without a handler does not make a listener item.
    pub fn classify(raw: &RawItem) -> Option<Item> {
        if !raw.is_truthy() {
            return None;
        }
        let fields = raw.fields()?;

        if let (Some(on), Some(handler)) = (raw.str_field("on"), raw.handler()) {
            return Some(Item::On(Listener {
                on: on.to_string(),
                selector: raw.str_field("selector").map(str::to_string),
                scope: raw.str_field("scope").and_then(|s| s.parse().ok()),
                handler: handler.clone(),
            }));
        }
        if let Some(off) = raw.str_field("off") {
            return Some(Item::Off(ListenerOff {
                off: off.to_string(),
                handler: raw.handler().cloned(),
            }));
        }

        let data = raw.value.get("data").cloned();
        let name = raw.str_field("event").or_else(|| raw.str_field("name"));
        match (name, data) {
            (Some(name), data) => Some(Item::Event(EventItem {
                name: name.to_string(),
                info: raw.value.get("info").cloned(),
                data,
                fields: fields.clone(),
            })),
            (None, Some(data)) => Some(Item::Data(DataItem {
                data,
                fields: fields.clone(),
            })),
            (None, None) => None,
        }
    }

    /// Listener items configure the registry and are never kept in the queue.
    pub fn is_listener(&self) -> bool {
        matches!(self, Item::On(_) | Item::Off(_))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Item::Data(_) => "data",
            Item::Event(_) => "event",
            Item::On(_) => "listener-on",
            Item::Off(_) => "listener-off",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn noop() -> Handler {
        Handler::infallible(|_| {})
    }

    #[test]
    fn test_classify_data() {
        let item = Item::classify(&RawItem::from(json!({"data": {"page": {"id": 1}}}))).unwrap();
        match item {
            Item::Data(d) => assert_eq!(d.data, LayerValue::from(json!({"page": {"id": 1}}))),
            other => panic!("expected data item, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_event_with_data_and_info() {
        let raw = RawItem::event("checkout")
            .with_info(json!({"step": 2}))
            .with_data(json!({"cart": {"total": 10}}));
        match Item::classify(&raw).unwrap() {
            Item::Event(e) => {
                assert_eq!(e.name, "checkout");
                assert_eq!(e.info, Some(LayerValue::from(json!({"step": 2}))));
                assert_eq!(e.data, Some(LayerValue::from(json!({"cart": {"total": 10}}))));
                assert_eq!(e.fields.len(), 3);
            }
            other => panic!("expected event item, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_event_by_name_key() {
        match Item::classify(&RawItem::from(json!({"name": "click"}))).unwrap() {
            Item::Event(e) => assert_eq!(e.name, "click"),
            other => panic!("expected event item, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_listener_on_carries_reserved_fields() {
        let raw = RawItem::on("x", noop())
            .with_selector("page.id")
            .with_scope(ListenerScope::Future);
        match Item::classify(&raw).unwrap() {
            Item::On(l) => {
                assert_eq!(l.on, "x");
                assert_eq!(l.selector.as_deref(), Some("page.id"));
                assert_eq!(l.scope, Some(ListenerScope::Future));
            }
            other => panic!("expected listener-on item, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_unknown_scope_is_dropped() {
        let raw = RawItem::on("x", noop()).with_field("scope", "sometimes");
        match Item::classify(&raw).unwrap() {
            Item::On(l) => assert_eq!(l.scope, None),
            other => panic!("expected listener-on item, got {other:?}"),
        }
    }

    #[test]
    fn test_on_without_handler_is_not_listener() {
        assert!(Item::classify(&RawItem::from(json!({"on": "x"}))).is_none());
        let raw = RawItem::from(json!({"on": "x", "data": {"a": 1}}));
        assert_eq!(Item::classify(&raw).unwrap().kind(), "data");
    }

    #[test]
    fn test_on_takes_precedence_over_off() {
        let raw = RawItem::on("x", noop()).with_field("off", "y");
        assert_eq!(Item::classify(&raw).unwrap().kind(), "listener-on");
    }

    #[test]
    fn test_off_with_and_without_handler() {
        match Item::classify(&RawItem::off("x")).unwrap() {
            Item::Off(o) => {
                assert_eq!(o.off, "x");
                assert!(o.handler.is_none());
            }
            other => panic!("expected listener-off item, got {other:?}"),
        }
        let raw = RawItem::off("x").with_handler(noop());
        match Item::classify(&raw).unwrap() {
            Item::Off(o) => assert!(o.handler.is_some()),
            other => panic!("expected listener-off item, got {other:?}"),
        }
    }

    #[test]
    fn test_inert_items() {
        assert!(Item::classify(&RawItem::default()).is_none());
        assert!(Item::classify(&RawItem::from(json!(null))).is_none());
        assert!(Item::classify(&RawItem::from(json!(0))).is_none());
        assert!(Item::classify(&RawItem::from(json!("text"))).is_none());
        assert!(Item::classify(&RawItem::from(json!({"other": 1}))).is_none());
        assert!(Item::classify(&RawItem::from(json!({"event": 5}))).is_none());
    }

    #[test]
    fn test_is_listener() {
        assert!(Item::classify(&RawItem::on("x", noop())).unwrap().is_listener());
        assert!(Item::classify(&RawItem::off("x")).unwrap().is_listener());
        assert!(!Item::classify(&RawItem::event("x")).unwrap().is_listener());
    }
}
