//! State module
//!
//! Per-stream cursor tracking for incremental reads. State is supplied by
//! the caller and returned as `STATE` messages; this crate never persists it.

mod types;

pub use types::{State, StreamState};
