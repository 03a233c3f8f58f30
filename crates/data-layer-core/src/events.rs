//! Names of the dispatches the data layer emits on its own.

/// Fired once per data-bearing item, after the state was merged.
pub const CHANGE: &str = "datalayer:change";

/// Fired once per event-bearing item.
pub const EVENT: &str = "datalayer:event";

/// Fired once, after the pre-existing queue was processed at construction.
pub const READY: &str = "datalayer:ready";
