use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::HandlerError;

type Callback = dyn Fn(Value) -> Result<(), HandlerError> + Send + Sync;

/// How two handlers are compared for listener dedup and removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandlerIdentity {
    /// Handlers are equal only if they share the same callback, i.e. one is a
    /// clone of the other.
    #[default]
    Reference,
    /// Compatibility mode: handlers that both carry source text are equal
    /// when their texts are equal, even if the callbacks differ. Handlers
    /// without source text fall back to reference equality.
    SourceText,
}

/// A listener callback.
///
/// Receives its own copy of the dispatched payload. Returning an error aborts
/// the dispatch and surfaces as [`crate::DataLayerError::Handler`].
#[derive(Clone)]
pub struct Handler {
    callback: Arc<Callback>,
    source: Option<Arc<str>>,
}

impl Handler {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(Value) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(callback),
            source: None,
        }
    }

    /// Wraps a callback that cannot fail.
    pub fn infallible<F>(callback: F) -> Self
    where
        F: Fn(Value) + Send + Sync + 'static,
    {
        Self::new(move |payload| {
            callback(payload);
            Ok(())
        })
    }

    /// Attaches the serialized text this handler is known by. Only consulted
    /// under [`HandlerIdentity::SourceText`].
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(Arc::from(source.into()));
        self
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn call(&self, payload: Value) -> Result<(), HandlerError> {
        (self.callback)(payload)
    }

    pub fn same_as(&self, other: &Handler, identity: HandlerIdentity) -> bool {
        if identity == HandlerIdentity::SourceText {
            if let (Some(a), Some(b)) = (&self.source, &other.source) {
                return a == b;
            }
        }
        self.ptr() == other.ptr()
    }

    fn ptr(&self) -> *const () {
        Arc::as_ptr(&self.callback) as *const ()
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("callback", &self.ptr())
            .field("source", &self.source)
            .finish()
    }
}
