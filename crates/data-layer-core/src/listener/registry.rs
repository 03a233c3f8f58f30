use tracing::debug;

use super::{Handler, HandlerIdentity, Listener};

/// Registered listeners in registration order.
///
/// No two entries share the same `(on, handler)` key under the registry's
/// [`HandlerIdentity`].
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    listeners: Vec<Listener>,
    identity: HandlerIdentity,
}

impl ListenerRegistry {
    pub fn new(identity: HandlerIdentity) -> Self {
        Self {
            listeners: Vec::new(),
            identity,
        }
    }

    pub fn identity(&self) -> HandlerIdentity {
        self.identity
    }

    /// Appends `listener` unless one with the same key is already present.
    /// Returns whether it was added.
    pub fn register(&mut self, listener: Listener) -> bool {
        if self
            .listeners
            .iter()
            .any(|l| l.same_key(&listener, self.identity))
        {
            debug!(on = %listener.on, "listener already registered");
            return false;
        }
        debug!(on = %listener.on, "listener registered");
        self.listeners.push(listener);
        true
    }

    /// Removes every listener on `off`, or only those whose handler matches
    /// `handler` when one is given. Returns how many were removed.
    pub fn unregister(&mut self, off: &str, handler: Option<&Handler>) -> usize {
        let identity = self.identity;
        let before = self.listeners.len();
        self.listeners.retain(|l| {
            let matches = l.on == off && handler.map_or(true, |h| l.handler.same_as(h, identity));
            !matches
        });
        let removed = before - self.listeners.len();
        debug!(off, removed, "listeners unregistered");
        removed
    }

    /// Listeners whose `on` equals `dispatch_event` or `item_event`, in
    /// registration order.
    ///
    /// The result is a copy: listeners registered or removed while it is
    /// being dispatched do not affect it.
    pub fn find_matching(&self, dispatch_event: &str, item_event: Option<&str>) -> Vec<Listener> {
        self.listeners
            .iter()
            .filter(|l| l.on == dispatch_event || item_event.is_some_and(|name| l.on == name))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Listener> {
        self.listeners.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> Handler {
        Handler::infallible(|_| {})
    }

    fn ons(listeners: &[Listener]) -> Vec<&str> {
        listeners.iter().map(|l| l.on.as_str()).collect()
    }

    #[test]
    fn test_register_dedups_same_pair() {
        let mut registry = ListenerRegistry::default();
        let h = noop();
        assert!(registry.register(Listener::new("x", h.clone())));
        assert!(!registry.register(Listener::new("x", h.clone())));
        assert_eq!(registry.len(), 1);
        assert!(registry.register(Listener::new("y", h)));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_register_dedup_by_source_text() {
        let mut registry = ListenerRegistry::new(HandlerIdentity::SourceText);
        assert!(registry.register(Listener::new("x", noop().with_source("f"))));
        assert!(!registry.register(Listener::new("x", noop().with_source("f"))));
        assert!(registry.register(Listener::new("x", noop().with_source("g"))));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_unregister_with_handler_is_targeted() {
        let mut registry = ListenerRegistry::default();
        let h1 = noop();
        let h2 = noop();
        registry.register(Listener::new("x", h1.clone()));
        registry.register(Listener::new("x", h2.clone()));
        registry.register(Listener::new("y", h1.clone()));

        assert_eq!(registry.unregister("x", Some(&h1)), 1);
        let remaining: Vec<_> = registry.iter().cloned().collect();
        assert_eq!(ons(&remaining), vec!["x", "y"]);
        assert!(remaining[0].handler.same_as(&h2, HandlerIdentity::Reference));
    }

    #[test]
    fn test_unregister_without_handler_removes_all_on_event() {
        let mut registry = ListenerRegistry::default();
        registry.register(Listener::new("x", noop()));
        registry.register(Listener::new("y", noop()));
        registry.register(Listener::new("x", noop()));

        assert_eq!(registry.unregister("x", None), 2);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.unregister("x", None), 0);
    }

    #[test]
    fn test_find_matching_uses_both_names_in_order() {
        let mut registry = ListenerRegistry::default();
        registry.register(Listener::new("checkout", noop()));
        registry.register(Listener::new("datalayer:event", noop()));
        registry.register(Listener::new("other", noop()));
        registry.register(Listener::new("datalayer:change", noop()));

        let found = registry.find_matching("datalayer:event", Some("checkout"));
        assert_eq!(ons(&found), vec!["checkout", "datalayer:event"]);

        let found = registry.find_matching("datalayer:change", None);
        assert_eq!(ons(&found), vec!["datalayer:change"]);
    }

    #[test]
    fn test_selector_and_scope_do_not_filter() {
        let mut registry = ListenerRegistry::default();
        let mut listener = Listener::new("x", noop());
        listener.selector = Some("page.id".into());
        listener.scope = Some(crate::listener::ListenerScope::Past);
        registry.register(listener);
        assert_eq!(registry.find_matching("x", None).len(), 1);
    }
}
