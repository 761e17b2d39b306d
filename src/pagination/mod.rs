//! Pagination module
//!
//! Supports: cursor carried in a `links.next` URL, and single-page endpoints
//!
//! # Overview
//!
//! A fetched response body is turned into a [`Page`]: the ordered records
//! plus the cursor for the following page, if any. A [`Paginator`] extracts
//! that cursor, turns it into query parameters for the next request and
//! decides when the sequence ends. A page without a cursor, or a page with
//! no records, is the last one.

mod strategies;
mod types;

pub use strategies::{LinksCursorPaginator, NoPaginator};
pub use types::{NextPage, Page, PaginationState, Paginator};

#[cfg(test)]
mod tests;
