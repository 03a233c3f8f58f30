//! data-layer - page data layer with queue replay tooling.
//!
//! Re-exports the engine from `data-layer-core` and adds the [`cli`] module
//! used by the `data-layer-replay` binary.

pub mod cli;

pub use data_layer_core::*;
