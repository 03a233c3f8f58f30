//! data-layer-util - Value trees and tree operations for the data layer.
//!
//! This crate holds the leaf pieces the engine is built on: the
//! [`LayerValue`] tree with its `Undefined` sentinel, the lossy JSON copy used
//! for snapshots and listener payloads, deep merge, and dotted-path lookup.

pub mod json_clone;
pub mod merge;
pub mod path;
pub mod value;

// Re-exports for convenience
pub use json_clone::{clone_lossy, to_json, to_json_map};
pub use merge::{deep_merge, merge_maps};
pub use path::{parse_path, value_at_path};
pub use value::{LayerMap, LayerValue};
