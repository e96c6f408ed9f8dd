//! Pagination strategy implementations
//!
//! Each strategy handles one of the API's pagination conventions.

use super::types::{lookup_path, paginate, positive, Limits, Page, PaginationState, Paginator};
use crate::dispatch::Dispatcher;
use crate::error::{Error, Result};
use crate::types::{JsonValue, Params, Subject, TweetId};
use tracing::{debug, warn};

/// Largest page a timeline endpoint serves
pub const MAX_TIMELINE_PAGE: usize = 200;

/// Default page size for cursored id listings
pub const DEFAULT_CURSOR_COUNT: usize = 5000;

/// Cursor value that starts a cursored listing
pub const START_CURSOR: i64 = -1;

/// Cursor value that ends a cursored listing
pub const END_CURSOR: i64 = 0;

/// Largest batch a lookup endpoint accepts
pub const MAX_LOOKUP_BATCH: usize = 100;

/// Page size requested from the search endpoint
pub const SEARCH_PAGE_SIZE: usize = 100;

/// Default number of search requests
pub const DEFAULT_SEARCH_REQUESTS: usize = 5;

fn into_array(payload: JsonValue, what: &str) -> Result<Vec<JsonValue>> {
    match payload {
        JsonValue::Array(items) => Ok(items),
        other => Err(Error::decode(format!(
            "expected an array of {what}, got {}",
            type_name(&other)
        ))),
    }
}

fn type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

// ============================================================================
// Timeline Pagination
// ============================================================================

/// Id-descending pagination for timelines
///
/// The first request asks for the newest tweets; every later request sets
/// `max_id` one below the smallest id of the previous page, so id ranges
/// never overlap.
#[derive(Debug, Clone)]
pub struct TimelineWalker {
    subject: Subject,
    max_items: Option<usize>,
    page_size: usize,
}

impl TimelineWalker {
    /// Create a walker for `subject`, optionally capped at `max_items`
    pub fn new(subject: Subject, max_items: Option<usize>) -> Self {
        Self {
            subject,
            max_items: positive(max_items),
            page_size: MAX_TIMELINE_PAGE,
        }
    }

    /// Override the page size (clamped to the endpoint maximum)
    #[must_use]
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = size.clamp(1, MAX_TIMELINE_PAGE);
        self
    }

    /// Build the request for the page after `previous_min_id`
    ///
    /// `fetched` is the number of items accumulated so far; it shrinks the
    /// requested count when a cap is near.
    pub fn request(&self, previous_min_id: Option<TweetId>, fetched: usize) -> Params {
        let mut params = Params::new();
        self.subject.apply(&mut params);

        let count = match self.max_items {
            Some(max) => self.page_size.min(max.saturating_sub(fetched)).max(1),
            None => self.page_size,
        };
        params.insert("count".to_string(), count.to_string());

        if let Some(min_id) = previous_min_id {
            params.insert("max_id".to_string(), min_id.saturating_sub(1).to_string());
        }
        params
    }

    /// Collect the timeline from `endpoint`
    pub async fn walk(&self, dispatcher: &Dispatcher, endpoint: &str) -> Result<Vec<JsonValue>> {
        paginate(dispatcher, endpoint, self).await
    }
}

/// Numeric id of a tweet object
pub fn tweet_id(item: &JsonValue) -> Option<TweetId> {
    item.get("id")
        .and_then(JsonValue::as_u64)
        .or_else(|| item.get("id_str")?.as_str()?.parse().ok())
}

impl Paginator for TimelineWalker {
    fn first_request(&self) -> Option<Params> {
        Some(self.request(None, 0))
    }

    fn read_page(&self, payload: JsonValue, state: &PaginationState) -> Result<Page> {
        let items = into_array(payload, "tweets")?;
        if items.is_empty() {
            return Ok(Page::last(items));
        }

        let min_id = items
            .iter()
            .filter_map(tweet_id)
            .min()
            .ok_or_else(|| Error::decode("timeline page contains no tweet ids"))?;

        if min_id == 0 {
            return Ok(Page::last(items));
        }

        let next = self.request(Some(min_id), state.fetched + items.len());
        Ok(Page::more(items, next))
    }

    fn limits(&self) -> Limits {
        Limits {
            max_items: self.max_items,
            max_requests: None,
        }
    }
}

// ============================================================================
// Cursor Pagination
// ============================================================================

/// Opaque-cursor pagination for id listings
///
/// Starts at cursor `-1` and follows `next_cursor` until it is `0`. Pages
/// are concatenated in server order without deduplication.
#[derive(Debug, Clone)]
pub struct CursorWalker {
    items_key: String,
    count: usize,
    max_items: Option<usize>,
    subject: Subject,
}

impl CursorWalker {
    /// Create a walker reading items under `items_key`
    pub fn new(items_key: impl Into<String>, subject: Subject) -> Self {
        Self {
            items_key: items_key.into(),
            count: DEFAULT_CURSOR_COUNT,
            max_items: None,
            subject,
        }
    }

    /// Set the page size
    #[must_use]
    pub fn count(mut self, count: usize) -> Self {
        self.count = count.max(1);
        self
    }

    /// Cap the accumulated item count
    #[must_use]
    pub fn max_items(mut self, max_items: Option<usize>) -> Self {
        self.max_items = positive(max_items);
        self
    }

    /// Build the request for `cursor`
    pub fn request(&self, cursor: i64) -> Params {
        let mut params = Params::new();
        self.subject.apply(&mut params);
        params.insert("count".to_string(), self.count.to_string());
        params.insert("cursor".to_string(), cursor.to_string());
        params
    }

    /// Collect the listing from `endpoint`
    pub async fn walk(&self, dispatcher: &Dispatcher, endpoint: &str) -> Result<Vec<JsonValue>> {
        paginate(dispatcher, endpoint, self).await
    }
}

fn next_cursor(payload: &JsonValue) -> Option<i64> {
    payload
        .get("next_cursor")
        .and_then(JsonValue::as_i64)
        .or_else(|| payload.get("next_cursor_str")?.as_str()?.parse().ok())
}

impl Paginator for CursorWalker {
    fn first_request(&self) -> Option<Params> {
        Some(self.request(START_CURSOR))
    }

    fn read_page(&self, mut payload: JsonValue, _state: &PaginationState) -> Result<Page> {
        let cursor = next_cursor(&payload);

        let items = match payload.get_mut(&self.items_key).map(JsonValue::take) {
            Some(JsonValue::Array(items)) => items,
            _ => {
                return Err(Error::decode(format!(
                    "cursored page has no '{}' array",
                    self.items_key
                )))
            }
        };

        match cursor {
            Some(END_CURSOR) => Ok(Page::last(items)),
            Some(cursor) => Ok(Page::more(items, self.request(cursor))),
            None => {
                debug!("cursored page has no next_cursor, stopping");
                Ok(Page::last(items))
            }
        }
    }

    fn limits(&self) -> Limits {
        Limits {
            max_items: self.max_items,
            max_requests: None,
        }
    }
}

// ============================================================================
// Batch Lookup
// ============================================================================

/// Bulk lookup in comma-joined chunks of at most 100 identifiers
///
/// Results follow chunk order; the order of objects within a chunk is the
/// server's and need not match the request.
#[derive(Debug, Clone)]
pub struct BatchLookup {
    param: String,
    chunks: Vec<String>,
}

impl BatchLookup {
    /// Create a lookup sending `items` under `param`
    pub fn new<T: ToString>(param: impl Into<String>, items: &[T]) -> Self {
        let chunks = items
            .chunks(MAX_LOOKUP_BATCH)
            .map(|chunk| {
                chunk
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .collect();

        Self {
            param: param.into(),
            chunks,
        }
    }

    /// Number of calls the lookup will make at most
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    fn request(&self, index: usize) -> Option<Params> {
        let chunk = self.chunks.get(index)?;
        let mut params = Params::new();
        params.insert(self.param.clone(), chunk.clone());
        Some(params)
    }

    /// Look up every item through `endpoint`
    pub async fn lookup(&self, dispatcher: &Dispatcher, endpoint: &str) -> Result<Vec<JsonValue>> {
        paginate(dispatcher, endpoint, self).await
    }
}

impl Paginator for BatchLookup {
    fn first_request(&self) -> Option<Params> {
        self.request(0)
    }

    fn read_page(&self, payload: JsonValue, state: &PaginationState) -> Result<Page> {
        let items = into_array(payload, "lookup results")?;
        Ok(match self.request(state.requests + 1) {
            Some(next) => Page::more(items, next),
            None => Page::last(items),
        })
    }
}

// ============================================================================
// Search Pagination
// ============================================================================

/// Continuation-fragment pagination for tweet search
///
/// Each response may carry `search_metadata.next_results`, a query string
/// such as `?max_id=123&q=rust`, which becomes the next request verbatim.
#[derive(Debug, Clone)]
pub struct SearchWalker {
    query: String,
    max_requests: usize,
}

impl SearchWalker {
    /// Create a walker for `query`
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            max_requests: DEFAULT_SEARCH_REQUESTS,
        }
    }

    /// Set the maximum number of requests
    #[must_use]
    pub fn max_requests(mut self, max_requests: usize) -> Self {
        self.max_requests = max_requests;
        self
    }

    /// Collect search results from `endpoint`
    pub async fn walk(&self, dispatcher: &Dispatcher, endpoint: &str) -> Result<Vec<JsonValue>> {
        paginate(dispatcher, endpoint, self).await
    }
}

/// Parse a `next_results` fragment into request parameters
///
/// Strips a leading `?`, splits on `&`, then splits each piece on its first
/// `=` and percent-decodes both halves.
pub fn parse_continuation(fragment: &str) -> Result<Params> {
    let query = fragment.strip_prefix('?').unwrap_or(fragment);
    if query.is_empty() {
        return Err(Error::decode("empty continuation fragment"));
    }

    let mut params = Params::new();
    for piece in query.split('&').filter(|p| !p.is_empty()) {
        if !piece.contains('=') {
            return Err(Error::decode(format!(
                "malformed continuation piece '{piece}'"
            )));
        }
        if let Some((key, value)) = url::form_urlencoded::parse(piece.as_bytes()).next() {
            params.insert(key.into_owned(), value.into_owned());
        }
    }
    Ok(params)
}

impl Paginator for SearchWalker {
    fn first_request(&self) -> Option<Params> {
        let mut params = Params::new();
        params.insert("q".to_string(), self.query.clone());
        params.insert("count".to_string(), SEARCH_PAGE_SIZE.to_string());
        Some(params)
    }

    fn read_page(&self, mut payload: JsonValue, _state: &PaginationState) -> Result<Page> {
        let statuses = match payload.get_mut("statuses").map(JsonValue::take) {
            Some(JsonValue::Array(statuses)) => statuses,
            _ => return Err(Error::decode("search response has no 'statuses' array")),
        };
        if statuses.is_empty() {
            return Ok(Page::last(statuses));
        }

        let Some(fragment) =
            lookup_path(&payload, "search_metadata.next_results").and_then(JsonValue::as_str)
        else {
            return Ok(Page::last(statuses));
        };

        match parse_continuation(fragment) {
            Ok(next) => Ok(Page::more(statuses, next)),
            Err(e) => {
                warn!("Ignoring search continuation: {e}");
                Ok(Page::last(statuses))
            }
        }
    }

    fn limits(&self) -> Limits {
        Limits {
            max_items: None,
            max_requests: Some(self.max_requests),
        }
    }
}
