//! Pagination types and traits
//!
//! Defines the core pagination abstractions used by all strategies.

use crate::error::Result;
use crate::types::Record;
use serde_json::Value;
use std::collections::HashMap;

/// One fetched response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Records in upstream order
    pub records: Vec<Record>,
    /// Cursor for the following page
    pub next_cursor: Option<String>,
}

impl Page {
    /// Create a new page
    pub fn new(records: Vec<Record>, next_cursor: Option<String>) -> Self {
        Self {
            records,
            next_cursor,
        }
    }

    /// A page with no follow-up
    pub fn last(records: Vec<Record>) -> Self {
        Self::new(records, None)
    }

    /// Whether pagination ends after this page
    pub fn is_last(&self) -> bool {
        self.next_cursor.is_none() || self.records.is_empty()
    }
}

/// Result of the next page computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// More pages available with these parameters
    Continue {
        /// Query parameters to add/replace
        query_params: HashMap<String, String>,
    },
    /// No more pages
    Done,
}

impl NextPage {
    /// Create a continuation with a single parameter
    pub fn with_param(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut params = HashMap::new();
        params.insert(key.into(), value.into());
        Self::Continue {
            query_params: params,
        }
    }

    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue { .. })
    }
}

/// Tracks pagination state during iteration
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Pages fetched so far
    pub pages_fetched: u32,
    /// Current cursor value
    pub cursor: Option<String>,
    /// Total records fetched so far
    pub total_fetched: u64,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the next request is for the first page
    pub fn is_first_page(&self) -> bool {
        self.pages_fetched == 0
    }

    /// Record a fetched page
    pub fn add_page(&mut self, records: usize) {
        self.pages_fetched += 1;
        self.total_fetched += records as u64;
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
    }

    /// Set cursor
    pub fn set_cursor(&mut self, cursor: String) {
        self.cursor = Some(cursor);
    }
}

/// Core trait for pagination strategies
pub trait Paginator: Send + Sync {
    /// Query parameters for the next request given the current state
    fn request_params(&self, state: &PaginationState) -> HashMap<String, String>;

    /// Extract the cursor for the following page from a response body
    fn next_cursor(&self, body: &Value) -> Result<Option<String>>;

    /// Advance the state past a fetched page
    fn process_page(&self, page: &Page, state: &mut PaginationState) -> NextPage;
}
