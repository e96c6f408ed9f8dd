//! Endpoint registry
//!
//! Maps endpoint identifiers (REST resource paths) to bound, authenticated
//! callables. The registry is built once and never mutated, so it can be
//! shared freely between dispatchers.

mod http;
mod registry;

pub use http::HttpEndpoint;
pub use registry::{Endpoint, EndpointRegistry, EndpointRegistryBuilder};

/// Current rate limit state for the authenticated user
pub const RATE_LIMIT_STATUS: &str = "/application/rate_limit_status";
/// Tweets liked by a user
pub const FAVORITES_LIST: &str = "/favorites/list";
/// Ids of users following a user
pub const FOLLOWERS_IDS: &str = "/followers/ids";
/// Ids of users a user follows
pub const FRIENDS_IDS: &str = "/friends/ids";
/// Tweet search
pub const SEARCH_TWEETS: &str = "/search/tweets";
/// Authenticated user's home timeline
pub const HOME_TIMELINE: &str = "/statuses/home_timeline";
/// A user's own tweets
pub const USER_TIMELINE: &str = "/statuses/user_timeline";
/// Tweets by id, up to 100 per call
pub const STATUSES_LOOKUP: &str = "/statuses/lookup";
/// Post a tweet
pub const STATUSES_UPDATE: &str = "/statuses/update";
/// Locations with trend data
pub const TRENDS_AVAILABLE: &str = "/trends/available";
/// Trend locations closest to a coordinate
pub const TRENDS_CLOSEST: &str = "/trends/closest";
/// Trends for one WOEID
pub const TRENDS_PLACE: &str = "/trends/place";
/// Users by screen name or id, up to 100 per call
pub const USERS_LOOKUP: &str = "/users/lookup";

/// Read endpoints, all issued as GET
pub const READ_ENDPOINTS: [&str; 12] = [
    RATE_LIMIT_STATUS,
    FAVORITES_LIST,
    FOLLOWERS_IDS,
    FRIENDS_IDS,
    SEARCH_TWEETS,
    HOME_TIMELINE,
    USER_TIMELINE,
    STATUSES_LOOKUP,
    TRENDS_AVAILABLE,
    TRENDS_CLOSEST,
    TRENDS_PLACE,
    USERS_LOOKUP,
];

/// Write endpoints, issued as POST
pub const WRITE_ENDPOINTS: [&str; 1] = [STATUSES_UPDATE];
