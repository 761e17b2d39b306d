//! Tests for pagination module

use super::*;
use serde_json::json;

// ============================================================================
// Page / NextPage Tests
// ============================================================================

#[test]
fn test_page_is_last() {
    assert!(Page::last(vec![json!({"id": 1})]).is_last());
    assert!(Page::new(vec![], Some("abc".to_string())).is_last());
    assert!(!Page::new(vec![json!({"id": 1})], Some("abc".to_string())).is_last());
}

#[test]
fn test_next_page_with_param() {
    let next = NextPage::with_param("cursor", "abc");
    assert!(next.is_continue());
    assert!(!next.is_done());

    if let NextPage::Continue { query_params } = next {
        assert_eq!(query_params.get("cursor"), Some(&"abc".to_string()));
    } else {
        panic!("Expected Continue");
    }
}

#[test]
fn test_next_page_done() {
    let next = NextPage::Done;
    assert!(next.is_done());
    assert!(!next.is_continue());
}

// ============================================================================
// PaginationState Tests
// ============================================================================

#[test]
fn test_pagination_state_default() {
    let state = PaginationState::new();
    assert!(state.is_first_page());
    assert!(state.cursor.is_none());
    assert_eq!(state.total_fetched, 0);
    assert!(!state.done);
}

#[test]
fn test_pagination_state_mutations() {
    let mut state = PaginationState::new();

    state.add_page(25);
    assert!(!state.is_first_page());
    assert_eq!(state.pages_fetched, 1);
    assert_eq!(state.total_fetched, 25);

    state.set_cursor("cursor123".to_string());
    assert_eq!(state.cursor, Some("cursor123".to_string()));

    state.mark_done();
    assert!(state.done);
}

// ============================================================================
// LinksCursorPaginator Tests
// ============================================================================

#[test]
fn test_links_cursor_initial_params() {
    let paginator = LinksCursorPaginator::default().with_page_size("per_page", 100);
    let params = paginator.request_params(&PaginationState::new());

    assert_eq!(params.get("per_page"), Some(&"100".to_string()));
    assert!(!params.contains_key("cursor"));
}

#[test]
fn test_links_cursor_extracts_cursor_from_url() {
    let paginator = LinksCursorPaginator::default();
    let body = json!({
        "data": [],
        "links": {
            "previous": null,
            "next": "https://acme.zendesk.com/api/sunshine/objects/types?per_page=100&cursor=eyJpZCI6M30%3D"
        }
    });

    let cursor = paginator.next_cursor(&body).unwrap();
    assert_eq!(cursor, Some("eyJpZCI6M30=".to_string()));
}

#[test]
fn test_links_cursor_opaque_token() {
    let paginator = LinksCursorPaginator::default();
    let body = json!({"links": {"next": "opaque-token"}});
    assert_eq!(
        paginator.next_cursor(&body).unwrap(),
        Some("opaque-token".to_string())
    );

    let body = json!({"links": {"next": "page:2"}});
    assert_eq!(
        paginator.next_cursor(&body).unwrap(),
        Some("page:2".to_string())
    );
}

#[test]
fn test_links_cursor_absent_or_null() {
    let paginator = LinksCursorPaginator::default();

    assert_eq!(paginator.next_cursor(&json!({"data": []})).unwrap(), None);
    assert_eq!(
        paginator
            .next_cursor(&json!({"links": {"next": null}}))
            .unwrap(),
        None
    );
    assert_eq!(
        paginator.next_cursor(&json!({"links": {"next": ""}})).unwrap(),
        None
    );
}

#[test]
fn test_links_cursor_url_without_cursor_param_is_error() {
    let paginator = LinksCursorPaginator::default();
    let body = json!({"links": {"next": "https://acme.zendesk.com/api/sunshine/limits?page=2"}});
    assert!(paginator.next_cursor(&body).is_err());
}

#[test]
fn test_links_cursor_process_continue_then_done() {
    let paginator = LinksCursorPaginator::default().with_page_size("per_page", 2);
    let mut state = PaginationState::new();

    let page = Page::new(vec![json!({"id": 1}), json!({"id": 2})], Some("c1".to_string()));
    let next = paginator.process_page(&page, &mut state);
    assert_eq!(next, NextPage::with_param("cursor", "c1"));

    let params = paginator.request_params(&state);
    assert_eq!(params.get("cursor"), Some(&"c1".to_string()));
    assert_eq!(params.get("per_page"), Some(&"2".to_string()));

    let page = Page::last(vec![json!({"id": 3})]);
    assert!(paginator.process_page(&page, &mut state).is_done());
    assert!(state.done);
    assert_eq!(state.total_fetched, 3);
    assert_eq!(state.pages_fetched, 2);
}

#[test]
fn test_links_cursor_stops_on_empty_page() {
    let paginator = LinksCursorPaginator::default();
    let mut state = PaginationState::new();

    let page = Page::new(vec![], Some("c1".to_string()));
    assert!(paginator.process_page(&page, &mut state).is_done());
}

#[test]
fn test_links_cursor_stops_on_repeated_cursor() {
    let paginator = LinksCursorPaginator::default();
    let mut state = PaginationState::new();

    let page = Page::new(vec![json!({"id": 1})], Some("same".to_string()));
    assert!(paginator.process_page(&page, &mut state).is_continue());
    assert!(paginator.process_page(&page, &mut state).is_done());
}

// ============================================================================
// NoPaginator Tests
// ============================================================================

#[test]
fn test_no_paginator() {
    let paginator = NoPaginator;
    let mut state = PaginationState::new();

    assert!(paginator.request_params(&state).is_empty());
    assert_eq!(
        paginator
            .next_cursor(&json!({"links": {"next": "ignored"}}))
            .unwrap(),
        None
    );

    let page = Page::last(vec![json!({"key": "a"}), json!({"key": "b"})]);
    assert!(paginator.process_page(&page, &mut state).is_done());
    assert_eq!(state.total_fetched, 2);
}
