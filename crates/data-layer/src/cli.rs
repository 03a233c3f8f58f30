//! `data-layer-replay` — replay a queue of items and report the outcome.
//!
//! Provides the logic behind the binary entry point so it can be tested
//! without a process boundary.

use std::sync::{Arc, Mutex};

use data_layer_core::events::{CHANGE, EVENT, READY};
use data_layer_core::{
    DataLayer, DataLayerConfig, DataLayerError, Handler, IntakeMode, RawItem,
};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::info;

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Layer(#[from] DataLayerError),
    #[error("input must be a JSON array of items")]
    NotAQueue,
    #[error("unknown argument: {0}")]
    UnknownArgument(String),
}

// ── Options ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayOptions {
    /// Print every dispatched payload before the final state.
    pub events: bool,
    /// Reject items that match no variant.
    pub strict: bool,
}

impl ReplayOptions {
    /// Parses `--events` and `--strict`. The program name must not be included.
    pub fn from_args<I, S>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        for arg in args {
            match arg.as_ref() {
                "--events" => options.events = true,
                "--strict" => options.strict = true,
                other => return Err(CliError::UnknownArgument(other.to_string())),
            }
        }
        Ok(options)
    }
}

// ── Replay ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ReplayOutput {
    pub state: Value,
    /// `{"dispatch": <event>, "payload": <copy>}` per delivered payload.
    pub dispatched: Vec<Value>,
    pub queued: usize,
}

impl ReplayOutput {
    /// One JSON line per dispatch (when requested), then the state.
    pub fn render(&self, options: &ReplayOptions) -> String {
        let mut out = String::new();
        if options.events {
            for record in &self.dispatched {
                out.push_str(&record.to_string());
                out.push('\n');
            }
        }
        out.push_str(&self.state.to_string());
        out
    }
}

/// Replays `queue_json`, a JSON array of items, through a fresh data layer
/// as its pre-existing queue.
pub fn replay(queue_json: &str, options: &ReplayOptions) -> Result<ReplayOutput, CliError> {
    let items = match serde_json::from_str::<Value>(queue_json)? {
        Value::Array(items) => items,
        _ => return Err(CliError::NotAQueue),
    };

    let dispatched = Arc::new(Mutex::new(Vec::new()));
    let mut queue: Vec<RawItem> = [CHANGE, EVENT, READY]
        .into_iter()
        .map(|event| RawItem::on(event, recorder(event, &dispatched)))
        .collect();
    queue.extend(items.into_iter().map(RawItem::from));

    let intake = if options.strict {
        IntakeMode::Strict
    } else {
        IntakeMode::Lenient
    };
    let layer = DataLayer::new(
        DataLayerConfig::new()
            .with_existing_queue(queue)
            .with_intake(intake),
    )?;
    info!(queued = layer.len(), "queue replayed");

    let dispatched = dispatched
        .lock()
        .map(|records| records.clone())
        .unwrap_or_else(|poisoned| poisoned.into_inner().clone());
    Ok(ReplayOutput {
        state: layer.get_state(),
        dispatched,
        queued: layer.len(),
    })
}

fn recorder(event: &'static str, sink: &Arc<Mutex<Vec<Value>>>) -> Handler {
    let sink = Arc::clone(sink);
    Handler::infallible(move |payload| {
        let record = json!({"dispatch": event, "payload": payload});
        match sink.lock() {
            Ok(mut records) => records.push(record),
            Err(poisoned) => poisoned.into_inner().push(record),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_from_args() {
        assert_eq!(
            ReplayOptions::from_args(["--events", "--strict"]).unwrap(),
            ReplayOptions { events: true, strict: true }
        );
        assert_eq!(ReplayOptions::from_args(Vec::<String>::new()).unwrap(), ReplayOptions::default());
        assert!(matches!(
            ReplayOptions::from_args(["--verbose"]),
            Err(CliError::UnknownArgument(a)) if a == "--verbose"
        ));
    }

    #[test]
    fn test_render_without_events_is_state_only() {
        let output = ReplayOutput {
            state: json!({"a": 1}),
            dispatched: vec![json!({"dispatch": CHANGE})],
            queued: 1,
        };
        assert_eq!(output.render(&ReplayOptions::default()), r#"{"a":1}"#);
        let with_events = ReplayOptions { events: true, strict: false };
        assert_eq!(
            output.render(&with_events),
            format!("{}\n{}", json!({"dispatch": CHANGE}), r#"{"a":1}"#)
        );
    }
}
