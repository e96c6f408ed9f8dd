//! Tests for pagination module

use super::*;
use crate::error::Error;
use crate::test_support::{dispatcher_for, ScriptedEndpoint};
use crate::types::{params, JsonValue, Params, Subject};
use pretty_assertions::assert_eq;
use serde_json::json;

fn tweets(ids: impl IntoIterator<Item = u64>) -> JsonValue {
    JsonValue::Array(ids.into_iter().map(|id| json!({"id": id})).collect())
}

fn ids_of(items: &[JsonValue]) -> Vec<u64> {
    items.iter().filter_map(tweet_id).collect()
}

// ============================================================================
// NextPage / Page Tests
// ============================================================================

#[test]
fn test_next_page_variants() {
    let next = NextPage::Continue(params([("cursor", 7)]));
    assert!(next.is_continue());
    assert!(!next.is_done());
    assert!(NextPage::Done.is_done());
}

#[test]
fn test_page_constructors() {
    let page = Page::more(vec![json!(1)], params([("max_id", 9)]));
    assert_eq!(page.next, NextPage::Continue(params([("max_id", 9)])));

    let page = Page::last(vec![]);
    assert!(page.next.is_done());
}

#[test]
fn test_lookup_path() {
    let body = json!({"search_metadata": {"next_results": "?max_id=5&q=foo"}});
    assert_eq!(
        lookup_path(&body, "search_metadata.next_results"),
        Some(&json!("?max_id=5&q=foo"))
    );
    assert_eq!(lookup_path(&body, "search_metadata.missing"), None);
    assert_eq!(lookup_path(&json!([1]), "a"), None);
}

// ============================================================================
// Timeline Tests
// ============================================================================

#[test]
fn test_timeline_request_shape() {
    let walker = TimelineWalker::new(Subject::ScreenName("katyperry".into()), None);

    assert_eq!(
        walker.request(None, 0),
        params([("count", "200"), ("screen_name", "katyperry")])
    );
    assert_eq!(
        walker.request(Some(91), 10),
        params([("count", "200"), ("max_id", "90"), ("screen_name", "katyperry")])
    );
}

#[test]
fn test_timeline_request_shrinks_count_near_cap() {
    let walker = TimelineWalker::new(Subject::Authenticated, Some(250));
    assert_eq!(walker.request(None, 0)["count"], "200");
    assert_eq!(walker.request(Some(500), 200)["count"], "50");
}

#[test]
fn test_timeline_page_size_is_clamped() {
    let walker = TimelineWalker::new(Subject::Authenticated, None).page_size(1000);
    assert_eq!(walker.request(None, 0)["count"], "200");
}

#[tokio::test]
async fn test_timeline_walk_overshoots_cap_by_a_page() {
    let endpoint = ScriptedEndpoint::new()
        .ok(tweets((91..=100).rev()))
        .ok(tweets((81..=90).rev()))
        .ok(json!([]));
    let (dispatcher, _) = dispatcher_for("/statuses/user_timeline", &endpoint);

    let walker = TimelineWalker::new(Subject::UserId(42), Some(15));
    let items = walker
        .walk(&dispatcher, "/statuses/user_timeline")
        .await
        .unwrap();

    assert_eq!(items.len(), 20);
    assert_eq!(ids_of(&items), (81..=100).rev().collect::<Vec<_>>());

    let calls = endpoint.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], params([("count", "15"), ("user_id", "42")]));
    assert_eq!(
        calls[1],
        params([("count", "5"), ("max_id", "90"), ("user_id", "42")])
    );
}

#[tokio::test]
async fn test_timeline_walk_stops_on_empty_page() {
    let endpoint = ScriptedEndpoint::new()
        .ok(tweets([30, 10, 20]))
        .ok(tweets([9, 8]))
        .ok(json!([]));
    let (dispatcher, _) = dispatcher_for("/favorites/list", &endpoint);

    let items = TimelineWalker::new(Subject::Authenticated, None)
        .walk(&dispatcher, "/favorites/list")
        .await
        .unwrap();

    assert_eq!(ids_of(&items), vec![30, 10, 20, 9, 8]);
    let calls = endpoint.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[1]["max_id"], "9");
    assert_eq!(calls[2]["max_id"], "7");
}

#[tokio::test]
async fn test_timeline_walk_unavailable_user_is_empty() {
    let endpoint = ScriptedEndpoint::new().status(404);
    let (dispatcher, _) = dispatcher_for("/statuses/user_timeline", &endpoint);

    let items = TimelineWalker::new(Subject::ScreenName("gone".into()), None)
        .walk(&dispatcher, "/statuses/user_timeline")
        .await
        .unwrap();

    assert!(items.is_empty());
    assert_eq!(endpoint.call_count(), 1);
}

#[tokio::test]
async fn test_timeline_walk_keeps_items_before_unavailable_page() {
    let endpoint = ScriptedEndpoint::new().ok(tweets([5, 4])).status(401);
    let (dispatcher, _) = dispatcher_for("/statuses/user_timeline", &endpoint);

    let items = TimelineWalker::new(Subject::Authenticated, None)
        .walk(&dispatcher, "/statuses/user_timeline")
        .await
        .unwrap();

    assert_eq!(ids_of(&items), vec![5, 4]);
}

#[tokio::test]
async fn test_timeline_walk_rejects_non_array() {
    let endpoint = ScriptedEndpoint::new().ok(json!({"errors": []}));
    let (dispatcher, _) = dispatcher_for("/statuses/user_timeline", &endpoint);

    let err = TimelineWalker::new(Subject::Authenticated, None)
        .walk(&dispatcher, "/statuses/user_timeline")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Decode { .. }));
}

#[test]
fn test_tweet_id_falls_back_to_id_str() {
    assert_eq!(tweet_id(&json!({"id": 5})), Some(5));
    assert_eq!(tweet_id(&json!({"id_str": "889189252264853504"})), Some(889_189_252_264_853_504));
    assert_eq!(tweet_id(&json!({"text": "no id"})), None);
}

// ============================================================================
// Cursor Tests
// ============================================================================

#[tokio::test]
async fn test_cursor_walk_follows_cursor_to_end() {
    let endpoint = ScriptedEndpoint::new()
        .ok(json!({"ids": [1, 2, 3], "next_cursor": 7}))
        .ok(json!({"ids": [4, 5], "next_cursor": 0}))
        .ok(json!({"ids": [99], "next_cursor": 0}));
    let (dispatcher, _) = dispatcher_for("/followers/ids", &endpoint);

    let items = CursorWalker::new("ids", Subject::ScreenName("RockyMtnInst".into()))
        .walk(&dispatcher, "/followers/ids")
        .await
        .unwrap();

    assert_eq!(items, vec![json!(1), json!(2), json!(3), json!(4), json!(5)]);

    let calls = endpoint.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(
        calls[0],
        params([("count", "5000"), ("cursor", "-1"), ("screen_name", "RockyMtnInst")])
    );
    assert_eq!(calls[1]["cursor"], "7");
}

#[tokio::test]
async fn test_cursor_walk_respects_max_items() {
    let endpoint = ScriptedEndpoint::new()
        .ok(json!({"ids": [1, 2], "next_cursor": 3}))
        .ok(json!({"ids": [3, 4], "next_cursor": 5}))
        .ok(json!({"ids": [5, 6], "next_cursor": 0}));
    let (dispatcher, _) = dispatcher_for("/friends/ids", &endpoint);

    let items = CursorWalker::new("ids", Subject::Authenticated)
        .count(2)
        .max_items(Some(3))
        .walk(&dispatcher, "/friends/ids")
        .await
        .unwrap();

    assert_eq!(items.len(), 4);
    assert_eq!(endpoint.call_count(), 2);
    assert_eq!(endpoint.calls()[0]["count"], "2");
}

#[tokio::test]
async fn test_cursor_walk_stops_when_call_returns_nothing() {
    let endpoint = ScriptedEndpoint::new()
        .ok(json!({"ids": [1], "next_cursor": 11}))
        .status(403);
    let (dispatcher, _) = dispatcher_for("/friends/ids", &endpoint);

    let items = CursorWalker::new("ids", Subject::Authenticated)
        .walk(&dispatcher, "/friends/ids")
        .await
        .unwrap();

    assert_eq!(items, vec![json!(1)]);
    assert_eq!(endpoint.call_count(), 2);
}

#[tokio::test]
async fn test_cursor_walk_accepts_string_cursor() {
    let endpoint = ScriptedEndpoint::new()
        .ok(json!({"ids": [1], "next_cursor_str": "1374004777531007833"}))
        .ok(json!({"ids": [2], "next_cursor": 0}));
    let (dispatcher, _) = dispatcher_for("/friends/ids", &endpoint);

    let items = CursorWalker::new("ids", Subject::Authenticated)
        .walk(&dispatcher, "/friends/ids")
        .await
        .unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(endpoint.calls()[1]["cursor"], "1374004777531007833");
}

#[tokio::test]
async fn test_cursor_walk_missing_items_key_is_decode_error() {
    let endpoint = ScriptedEndpoint::new().ok(json!({"users": [], "next_cursor": 0}));
    let (dispatcher, _) = dispatcher_for("/friends/ids", &endpoint);

    let err = CursorWalker::new("ids", Subject::Authenticated)
        .walk(&dispatcher, "/friends/ids")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Decode { .. }));
}

// ============================================================================
// Batch Lookup Tests
// ============================================================================

#[test]
fn test_batch_lookup_chunks() {
    let ids: Vec<u64> = (1..=250).collect();
    let lookup = BatchLookup::new("user_id", &ids);
    assert_eq!(lookup.chunk_count(), 3);

    let first = lookup.first_request().unwrap();
    assert!(first["user_id"].starts_with("1,2,3,"));
    assert!(first["user_id"].ends_with(",100"));
}

#[tokio::test]
async fn test_batch_lookup_three_chunks() {
    let endpoint = ScriptedEndpoint::new()
        .ok(JsonValue::Array((0..100).map(|i| json!({"id": i})).collect()))
        .ok(JsonValue::Array((0..98).map(|i| json!({"id": i})).collect()))
        .ok(JsonValue::Array((0..50).map(|i| json!({"id": i})).collect()));
    let (dispatcher, _) = dispatcher_for("/users/lookup", &endpoint);

    let ids: Vec<u64> = (1..=250).collect();
    let items = BatchLookup::new("user_id", &ids)
        .lookup(&dispatcher, "/users/lookup")
        .await
        .unwrap();

    assert_eq!(items.len(), 248);

    let sizes: Vec<usize> = endpoint
        .calls()
        .iter()
        .map(|p| p["user_id"].split(',').count())
        .collect();
    assert_eq!(sizes, vec![100, 100, 50]);
    assert!(endpoint.calls()[2]["user_id"].starts_with("201,"));
}

#[tokio::test]
async fn test_batch_lookup_stops_on_empty_chunk() {
    let endpoint = ScriptedEndpoint::new()
        .ok(json!([{"id": 1}]))
        .ok(json!([]))
        .ok(json!([{"id": 3}]));
    let (dispatcher, _) = dispatcher_for("/statuses/lookup", &endpoint);

    let ids: Vec<u64> = (1..=300).collect();
    let items = BatchLookup::new("id", &ids)
        .lookup(&dispatcher, "/statuses/lookup")
        .await
        .unwrap();

    assert_eq!(items, vec![json!({"id": 1})]);
    assert_eq!(endpoint.call_count(), 2);
}

#[tokio::test]
async fn test_batch_lookup_empty_input_makes_no_calls() {
    let endpoint = ScriptedEndpoint::new();
    let (dispatcher, _) = dispatcher_for("/users/lookup", &endpoint);

    let names: Vec<String> = Vec::new();
    let items = BatchLookup::new("screen_name", &names)
        .lookup(&dispatcher, "/users/lookup")
        .await
        .unwrap();

    assert!(items.is_empty());
    assert_eq!(endpoint.call_count(), 0);
}

// ============================================================================
// Search Tests
// ============================================================================

#[test]
fn test_parse_continuation() {
    let parsed = parse_continuation("?max_id=313519052523986943&q=NCAA&include_entities=1").unwrap();
    assert_eq!(
        parsed,
        params([
            ("include_entities", "1"),
            ("max_id", "313519052523986943"),
            ("q", "NCAA"),
        ])
    );
}

#[test]
fn test_parse_continuation_decodes_and_splits_on_first_equals() {
    let parsed = parse_continuation("?q=%23rust%20lang&filter=a=b").unwrap();
    assert_eq!(parsed["q"], "#rust lang");
    assert_eq!(parsed["filter"], "a=b");
}

#[test]
fn test_parse_continuation_malformed() {
    assert!(parse_continuation("?max_id=5&garbage").is_err());
    assert!(parse_continuation("?").is_err());
    assert!(parse_continuation("").is_err());
}

#[tokio::test]
async fn test_search_walk_follows_fragment_then_stops() {
    let endpoint = ScriptedEndpoint::new()
        .ok(json!({
            "statuses": [{"id": 10}, {"id": 9}],
            "search_metadata": {"next_results": "?max_id=5&q=foo"}
        }))
        .ok(json!({
            "statuses": [{"id": 5}],
            "search_metadata": {}
        }));
    let (dispatcher, _) = dispatcher_for("/search/tweets", &endpoint);

    let items = SearchWalker::new("foo")
        .walk(&dispatcher, "/search/tweets")
        .await
        .unwrap();

    assert_eq!(ids_of(&items), vec![10, 9, 5]);
    let calls = endpoint.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], params([("count", "100"), ("q", "foo")]));
    assert_eq!(calls[1], params([("max_id", "5"), ("q", "foo")]));
}

#[tokio::test]
async fn test_search_walk_malformed_fragment_ends_quietly() {
    let endpoint = ScriptedEndpoint::new().ok(json!({
        "statuses": [{"id": 1}],
        "search_metadata": {"next_results": "?max_id"}
    }));
    let (dispatcher, _) = dispatcher_for("/search/tweets", &endpoint);

    let items = SearchWalker::new("foo")
        .walk(&dispatcher, "/search/tweets")
        .await
        .unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(endpoint.call_count(), 1);
}

#[tokio::test]
async fn test_search_walk_caps_requests() {
    let page = json!({
        "statuses": [{"id": 1}],
        "search_metadata": {"next_results": "?max_id=0&q=foo"}
    });
    let endpoint = ScriptedEndpoint::new();
    for _ in 0..10 {
        endpoint.ok(page.clone());
    }
    let (dispatcher, _) = dispatcher_for("/search/tweets", &endpoint);

    let items = SearchWalker::new("foo")
        .max_requests(3)
        .walk(&dispatcher, "/search/tweets")
        .await
        .unwrap();

    assert_eq!(items.len(), 3);
    assert_eq!(endpoint.call_count(), 3);
}

#[tokio::test]
async fn test_search_walk_stops_on_empty_statuses() {
    let endpoint = ScriptedEndpoint::new().ok(json!({
        "statuses": [],
        "search_metadata": {"next_results": "?max_id=5&q=foo"}
    }));
    let (dispatcher, _) = dispatcher_for("/search/tweets", &endpoint);

    let items = SearchWalker::new("foo")
        .walk(&dispatcher, "/search/tweets")
        .await
        .unwrap();

    assert!(items.is_empty());
    assert_eq!(endpoint.call_count(), 1);
}

// ============================================================================
// Driver Tests
// ============================================================================

struct Endless;

impl Paginator for Endless {
    fn first_request(&self) -> Option<Params> {
        Some(Params::new())
    }

    fn read_page(&self, payload: JsonValue, state: &PaginationState) -> crate::Result<Page> {
        Ok(Page::more(
            vec![payload],
            params([("page", state.requests + 1)]),
        ))
    }

    fn limits(&self) -> Limits {
        Limits {
            max_items: Some(2),
            max_requests: None,
        }
    }
}

#[tokio::test]
async fn test_paginate_applies_item_limit() {
    let endpoint = ScriptedEndpoint::new().ok(json!(1)).ok(json!(2)).ok(json!(3));
    let (dispatcher, _) = dispatcher_for("/x", &endpoint);

    let items = paginate(&dispatcher, "/x", &Endless).await.unwrap();

    assert_eq!(items, vec![json!(1), json!(2)]);
    assert_eq!(endpoint.calls()[1], params([("page", 1)]));
}

#[tokio::test]
async fn test_paginate_propagates_fatal_errors() {
    let endpoint = ScriptedEndpoint::new().ok(json!(1)).status(400);
    let (dispatcher, _) = dispatcher_for("/x", &endpoint);

    let err = paginate(&dispatcher, "/x", &Endless).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn test_paginate_unknown_endpoint() {
    let endpoint = ScriptedEndpoint::new();
    let (dispatcher, _) = dispatcher_for("/x", &endpoint);

    let err = paginate(&dispatcher, "/y", &Endless).await.unwrap_err();
    assert!(matches!(err, Error::UnknownEndpoint { .. }));
    assert_eq!(endpoint.call_count(), 0);
}
