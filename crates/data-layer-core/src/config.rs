use serde_json::Value;

use crate::item::RawItem;
use crate::listener::HandlerIdentity;

/// What to do with items that match no variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntakeMode {
    /// Ignore them silently. They still stay in the queue.
    #[default]
    Lenient,
    /// Reject them with [`crate::DataLayerError::MalformedItem`].
    Strict,
}

/// Options for [`crate::DataLayer::new`].
#[derive(Debug, Clone, Default)]
pub struct DataLayerConfig {
    /// Items the host queued before the data layer existed. Processed in
    /// order at construction.
    pub existing_queue: Option<Vec<RawItem>>,
    pub handler_identity: HandlerIdentity,
    pub intake: IntakeMode,
}

impl DataLayerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_existing_queue<I>(mut self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<RawItem>,
    {
        self.existing_queue = Some(items.into_iter().map(Into::<RawItem>::into).collect());
        self
    }

    /// Takes the host queue as JSON. Anything but an array yields an empty
    /// queue.
    pub fn with_existing_queue_json(mut self, queue: Value) -> Self {
        self.existing_queue = match queue {
            Value::Array(items) => Some(items.into_iter().map(RawItem::from).collect()),
            _ => None,
        };
        self
    }

    pub fn with_handler_identity(mut self, identity: HandlerIdentity) -> Self {
        self.handler_identity = identity;
        self
    }

    pub fn with_intake(mut self, intake: IntakeMode) -> Self {
        self.intake = intake;
        self
    }
}
