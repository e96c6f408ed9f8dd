//! Pagination types, the `Paginator` trait and the shared driver
//!
//! Every strategy turns one payload into a [`Page`] whose `next` field says
//! explicitly whether and how to continue. The driver owns the request loop
//! and the accumulated results; strategies only shape requests and read
//! payloads.

use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::types::{is_blank, JsonValue, Params};
use tracing::debug;

/// Result of reading one page
#[derive(Debug, Clone, PartialEq)]
pub enum NextPage {
    /// More pages available with these parameters
    Continue(Params),
    /// No more pages
    Done,
}

impl NextPage {
    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue(_))
    }
}

/// Items of one page plus how to continue
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Result objects in server order
    pub items: Vec<JsonValue>,
    /// Continuation
    pub next: NextPage,
}

impl Page {
    /// A page that continues with `params`
    pub fn more(items: Vec<JsonValue>, params: Params) -> Self {
        Self {
            items,
            next: NextPage::Continue(params),
        }
    }

    /// A final page
    pub fn last(items: Vec<JsonValue>) -> Self {
        Self {
            items,
            next: NextPage::Done,
        }
    }
}

/// Progress of one pagination run, as seen before the page being read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginationState {
    /// Requests already answered with data
    pub requests: usize,
    /// Items accumulated so far
    pub fetched: usize,
}

/// Caps applied by the driver
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Limits {
    /// Stop once at least this many items are accumulated
    pub max_items: Option<usize>,
    /// Stop after this many requests
    pub max_requests: Option<usize>,
}

/// Core trait for pagination strategies
pub trait Paginator: Send + Sync {
    /// Parameters for the first request, `None` when there is nothing to ask
    fn first_request(&self) -> Option<Params>;

    /// Turn a non-empty payload into a page
    fn read_page(&self, payload: JsonValue, state: &PaginationState) -> Result<Page>;

    /// Caps for this run
    fn limits(&self) -> Limits {
        Limits::default()
    }
}

/// Drive `paginator` against `endpoint` until it is done
///
/// Pages are requested strictly in order. The run stops when a call returns
/// nothing, when the strategy says `Done`, or when a limit is reached. The
/// item cap is checked after a whole page is accumulated, so the result may
/// exceed `max_items` by up to one page.
pub async fn paginate<P>(
    dispatcher: &Dispatcher,
    endpoint: &str,
    paginator: &P,
) -> Result<Vec<JsonValue>>
where
    P: Paginator + ?Sized,
{
    let limits = paginator.limits();
    let mut state = PaginationState::default();
    let mut items = Vec::new();

    let Some(mut params) = paginator.first_request() else {
        return Ok(items);
    };

    loop {
        if limits.max_requests.is_some_and(|max| state.requests >= max) {
            debug!(endpoint, requests = state.requests, "request limit reached");
            break;
        }

        let payload = match dispatcher.dispatch(endpoint, &params).await? {
            Some(payload) if !is_blank(&payload) => payload,
            _ => {
                debug!(endpoint, "no data returned, stopping");
                break;
            }
        };

        let page = paginator.read_page(payload, &state)?;
        state.requests += 1;
        state.fetched += page.items.len();
        debug!(
            endpoint,
            page = state.requests,
            items = page.items.len(),
            total = state.fetched,
            "page fetched"
        );
        items.extend(page.items);

        if limits.max_items.is_some_and(|max| items.len() >= max) {
            break;
        }

        match page.next {
            NextPage::Continue(next) => params = next,
            NextPage::Done => break,
        }
    }

    Ok(items)
}

/// Follow a dotted path (`a.b.c`) through nested objects
pub fn lookup_path<'a>(value: &'a JsonValue, path: &str) -> Option<&'a JsonValue> {
    let mut current = value;
    for part in path.split('.') {
        match current {
            JsonValue::Object(map) => {
                current = map.get(part)?;
            }
            _ => return None,
        }
    }

    Some(current)
}

/// Treat a zero cap as "no cap"
pub(crate) fn positive(limit: Option<usize>) -> Option<usize> {
    limit.filter(|&n| n > 0)
}
