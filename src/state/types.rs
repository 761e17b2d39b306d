//! State types for tracking sync progress
//!
//! These types are serialized to JSON and handed back to the caller.

use crate::config::parse_timestamp;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Complete state for a connector
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    /// Per-stream state
    #[serde(default)]
    pub streams: HashMap<String, StreamState>,
}

impl State {
    /// Create a new empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse state from a JSON document. An empty document is an empty state.
    pub fn from_json(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(raw).map_err(|e| Error::state(format!("Invalid state JSON: {e}")))
    }

    /// Get state for a stream
    pub fn get_stream(&self, stream: &str) -> Option<&StreamState> {
        self.streams.get(stream)
    }

    /// Get mutable state for a stream, creating if needed
    pub fn get_stream_mut(&mut self, stream: &str) -> &mut StreamState {
        self.streams.entry(stream.to_string()).or_default()
    }

    /// Get cursor for a stream
    pub fn get_cursor(&self, stream: &str) -> Option<&str> {
        self.streams.get(stream)?.cursor.as_deref()
    }

    /// Set cursor for a stream
    pub fn set_cursor(&mut self, stream: &str, cursor: String) {
        self.get_stream_mut(stream).cursor = Some(cursor);
    }
}

/// State for a single stream
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamState {
    /// High-water mark of the stream's cursor field
    #[serde(default)]
    pub cursor: Option<String>,
}

impl StreamState {
    /// State positioned at a cursor
    pub fn with_cursor(cursor: impl Into<String>) -> Self {
        Self {
            cursor: Some(cursor.into()),
        }
    }

    /// Move the cursor forward to `candidate` if it is later.
    ///
    /// Values are compared as timestamps when both parse, otherwise as
    /// strings. Returns true when the cursor changed.
    pub fn advance(&mut self, candidate: &str) -> bool {
        let newer = match self.cursor.as_deref() {
            None => true,
            Some(current) => match (parse_timestamp(current), parse_timestamp(candidate)) {
                (Some(cur), Some(cand)) => cand > cur,
                _ => candidate > current,
            },
        };
        if newer {
            self.cursor = Some(candidate.to_string());
        }
        newer
    }
}
