//! Rate limit status query
//!
//! One call to `/application/rate_limit_status`, narrowed to a category
//! (`statuses`) and optionally one resource (`/statuses/user_timeline`).

use crate::dispatch::Dispatcher;
use crate::endpoint::RATE_LIMIT_STATUS;
use crate::error::{Error, Result};
use crate::types::{is_blank, JsonValue, Params};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Quota state of one resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimit {
    /// Requests allowed per window
    pub limit: u32,
    /// Requests left in the current window
    pub remaining: u32,
    /// Window reset time, seconds since the Unix epoch
    pub reset: i64,
}

impl RateLimit {
    /// Parse one resource entry
    pub fn from_value(value: &JsonValue) -> Result<Self> {
        Ok(serde_json::from_value(value.clone())?)
    }

    /// Window reset time
    pub fn reset_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.reset, 0)
    }

    /// Check whether the window is used up
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

/// Query current rate limits
///
/// Returns the whole resource map when `category` is absent or unknown,
/// the category's map when it is known, and one resource entry when
/// `subcategory` is also given. `None` when the call returned nothing
/// (including an empty body) or the subcategory does not exist.
pub async fn rate_limits(
    dispatcher: &Dispatcher,
    category: Option<&str>,
    subcategory: Option<&str>,
) -> Result<Option<JsonValue>> {
    let mut payload = match dispatcher.dispatch(RATE_LIMIT_STATUS, &Params::new()).await? {
        Some(payload) if !is_blank(&payload) => payload,
        _ => return Ok(None),
    };

    let resources = payload
        .get_mut("resources")
        .map(JsonValue::take)
        .ok_or_else(|| Error::decode("rate limit response has no 'resources'"))?;

    Ok(narrow(resources, category, subcategory))
}

/// Narrow a resource map to a category and resource
pub fn narrow(
    mut resources: JsonValue,
    category: Option<&str>,
    subcategory: Option<&str>,
) -> Option<JsonValue> {
    let Some(category) = category else {
        return Some(resources);
    };
    if resources.get(category).is_none() {
        return Some(resources);
    }

    let mut limits = resources.get_mut(category).map(JsonValue::take)?;
    match subcategory {
        Some(sub) => limits.get_mut(sub).map(JsonValue::take),
        None => Some(limits),
    }
}
