//! Pagination strategy implementations
//!
//! Each strategy handles a specific pagination pattern.

use super::types::{NextPage, Page, PaginationState, Paginator};
use crate::error::{Error, Result};
use crate::types::extract_path;
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;
use url::Url;

// ============================================================================
// Links Cursor Pagination
// ============================================================================

/// Cursor pagination where the response links to the next page.
///
/// Responses look like:
///
/// ```json
/// { "data": [...], "links": { "previous": null, "next": "https://.../objects/types?cursor=abc" } }
/// ```
///
/// The cursor is pulled out of the `next` URL and sent back as a query
/// parameter, so every request is rebuilt from the stream's own path
/// template. A `next` value that is not an http(s) URL is used as the cursor as-is.
#[derive(Debug, Clone)]
pub struct LinksCursorPaginator {
    /// Dot path to the next link in the response
    pub next_path: String,
    /// Query parameter carrying the cursor
    pub cursor_param: String,
    /// Page size parameter name and value
    pub page_size: Option<(String, u32)>,
}

impl Default for LinksCursorPaginator {
    fn default() -> Self {
        Self {
            next_path: "links.next".to_string(),
            cursor_param: "cursor".to_string(),
            page_size: None,
        }
    }
}

impl LinksCursorPaginator {
    /// Set page size parameter
    #[must_use]
    pub fn with_page_size(mut self, param: impl Into<String>, size: u32) -> Self {
        self.page_size = Some((param.into(), size));
        self
    }

    fn cursor_from_link(&self, link: &str) -> Result<String> {
        let url = match Url::parse(link) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => url,
            // Anything else is an opaque cursor token, even if it contains ':'
            _ => return Ok(link.to_string()),
        };

        url.query_pairs()
            .find(|(key, _)| key == self.cursor_param.as_str())
            .map(|(_, value)| value.into_owned())
            .ok_or_else(|| {
                Error::decode(format!(
                    "Next page link '{link}' has no '{}' parameter",
                    self.cursor_param
                ))
            })
    }
}

impl Paginator for LinksCursorPaginator {
    fn request_params(&self, state: &PaginationState) -> HashMap<String, String> {
        let mut params = HashMap::new();
        if let Some((param, size)) = &self.page_size {
            params.insert(param.clone(), size.to_string());
        }
        if let Some(cursor) = &state.cursor {
            params.insert(self.cursor_param.clone(), cursor.clone());
        }
        params
    }

    fn next_cursor(&self, body: &Value) -> Result<Option<String>> {
        match extract_path(body, &self.next_path) {
            Some(Value::String(link)) if !link.trim().is_empty() => {
                self.cursor_from_link(link.trim()).map(Some)
            }
            _ => Ok(None),
        }
    }

    fn process_page(&self, page: &Page, state: &mut PaginationState) -> NextPage {
        state.add_page(page.records.len());

        if page.is_last() {
            state.mark_done();
            return NextPage::Done;
        }

        let Some(cursor) = page.next_cursor.clone() else {
            state.mark_done();
            return NextPage::Done;
        };

        // A repeated cursor would loop forever
        if state.cursor.as_deref() == Some(cursor.as_str()) {
            warn!("Upstream returned the same cursor twice, stopping pagination");
            state.mark_done();
            return NextPage::Done;
        }

        state.set_cursor(cursor.clone());
        NextPage::with_param(&self.cursor_param, cursor)
    }
}

// ============================================================================
// No Pagination
// ============================================================================

/// No pagination - single request
#[derive(Debug, Clone, Default)]
pub struct NoPaginator;

impl Paginator for NoPaginator {
    fn request_params(&self, _state: &PaginationState) -> HashMap<String, String> {
        HashMap::new()
    }

    fn next_cursor(&self, _body: &Value) -> Result<Option<String>> {
        Ok(None)
    }

    fn process_page(&self, page: &Page, state: &mut PaginationState) -> NextPage {
        state.add_page(page.records.len());
        state.mark_done();
        NextPage::Done
    }
}
