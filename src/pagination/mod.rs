//! Pagination module
//!
//! Supports: Timeline (max_id), Cursor, Batch Lookup, Search continuation
//!
//! # Overview
//!
//! Each strategy implements [`Paginator`]: it builds the first request and
//! turns every payload into a [`Page`] that either continues with explicit
//! parameters or is done. [`paginate`] drives any strategy through the
//! dispatcher, one request at a time.

mod strategies;
mod types;

pub use strategies::{
    parse_continuation, tweet_id, BatchLookup, CursorWalker, SearchWalker, TimelineWalker,
    DEFAULT_CURSOR_COUNT, DEFAULT_SEARCH_REQUESTS, END_CURSOR, MAX_LOOKUP_BATCH,
    MAX_TIMELINE_PAGE, SEARCH_PAGE_SIZE, START_CURSOR,
};
pub use types::{lookup_path, paginate, Limits, NextPage, Page, PaginationState, Paginator};

#[cfg(test)]
mod tests;
