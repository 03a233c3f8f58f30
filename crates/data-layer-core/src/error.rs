use thiserror::Error;

/// Error a listener handler may return to abort the dispatch it runs in.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum DataLayerError {
    /// A handler failed. Remaining listeners of that dispatch are skipped and
    /// the triggering `push` (or construction) returns this error.
    #[error("listener on `{listener}` failed during `{event}` dispatch: {source}")]
    Handler {
        event: String,
        listener: String,
        #[source]
        source: HandlerError,
    },
    /// Only produced under [`crate::IntakeMode::Strict`].
    #[error("malformed item: {0}")]
    MalformedItem(String),
}
