//! Listeners and the registry that holds them.

use std::fmt;
use std::str::FromStr;

mod handler;
mod registry;

pub use handler::{Handler, HandlerIdentity};
pub use registry::ListenerRegistry;

/// Which items a listener is meant to see relative to its registration.
///
/// Reserved: dispatch does not consult it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerScope {
    Past,
    Future,
    All,
}

impl ListenerScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListenerScope::Past => "past",
            ListenerScope::Future => "future",
            ListenerScope::All => "all",
        }
    }
}

impl FromStr for ListenerScope {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "past" => Ok(ListenerScope::Past),
            "future" => Ok(ListenerScope::Future),
            "all" => Ok(ListenerScope::All),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ListenerScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered `(on, handler)` pair.
///
/// `selector` and `scope` are carried along for future filtering but are not
/// used when matching dispatches.
#[derive(Debug, Clone)]
pub struct Listener {
    pub on: String,
    pub selector: Option<String>,
    pub scope: Option<ListenerScope>,
    pub handler: Handler,
}

impl Listener {
    pub fn new(on: impl Into<String>, handler: Handler) -> Self {
        Self {
            on: on.into(),
            selector: None,
            scope: None,
            handler,
        }
    }

    /// True when both listeners share `on` and their handlers are the same
    /// under `identity`.
    pub fn same_key(&self, other: &Listener, identity: HandlerIdentity) -> bool {
        self.on == other.on && self.handler.same_as(&other.handler, identity)
    }
}
