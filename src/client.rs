//! High-level client
//!
//! Binds the walkers to concrete endpoints: timelines, favorites, follower
//! and friend ids, user and tweet lookup, trends, search and posting.

use crate::config::ClientConfig;
use crate::dispatch::{Dispatcher, RetryMode};
use crate::endpoint::{self, EndpointRegistry};
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::pagination::{BatchLookup, CursorWalker, SearchWalker, TimelineWalker};
use crate::rate_limit;
use crate::types::{is_blank, params, Connection, JsonValue, Params, Subject, TweetId, Users};
use std::sync::Arc;
use tracing::info;

/// Worldwide WOEID
pub const WORLDWIDE_WOEID: u64 = 1;

/// Retrieval operations over one dispatcher
#[derive(Debug, Clone)]
pub struct Client {
    dispatcher: Dispatcher,
}

impl Client {
    /// Wrap an existing dispatcher
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Build the HTTP stack described by `config`
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let http = HttpClient::with_auth(config.http_config(), config.auth.clone())?;
        let registry = EndpointRegistry::twitter(Arc::new(http));
        let dispatcher = Dispatcher::new(Arc::new(registry)).with_policy(config.retry.clone())?;
        info!(base_url = %config.base_url, "client ready");
        Ok(Self::new(dispatcher))
    }

    /// The underlying dispatcher
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Current rate limits, see [`rate_limit::rate_limits`]
    pub async fn rate_limits(
        &self,
        category: Option<&str>,
        subcategory: Option<&str>,
    ) -> Result<Option<JsonValue>> {
        rate_limit::rate_limits(&self.dispatcher, category, subcategory).await
    }

    /// Recent tweets from the authenticated user and the accounts they follow
    pub async fn home_timeline(&self, max_tweets: Option<usize>) -> Result<Vec<JsonValue>> {
        TimelineWalker::new(Subject::Authenticated, max_tweets)
            .walk(&self.dispatcher, endpoint::HOME_TIMELINE)
            .await
    }

    /// Recent tweets posted by `subject`
    pub async fn user_timeline(
        &self,
        subject: Subject,
        max_tweets: Option<usize>,
    ) -> Result<Vec<JsonValue>> {
        TimelineWalker::new(subject, max_tweets)
            .walk(&self.dispatcher, endpoint::USER_TIMELINE)
            .await
    }

    /// Recent tweets liked by `subject`
    pub async fn user_favorites(
        &self,
        subject: Subject,
        max_tweets: Option<usize>,
    ) -> Result<Vec<JsonValue>> {
        TimelineWalker::new(subject, max_tweets)
            .walk(&self.dispatcher, endpoint::FAVORITES_LIST)
            .await
    }

    /// User objects for the given screen names or ids
    ///
    /// The server does not guarantee request order within a batch.
    pub async fn user_profiles(&self, users: &Users) -> Result<Vec<JsonValue>> {
        BatchLookup::new(users.param_name(), &users.values())
            .lookup(&self.dispatcher, endpoint::USERS_LOOKUP)
            .await
    }

    /// Tweets by id
    pub async fn tweets_by_id(&self, ids: &[TweetId]) -> Result<Vec<JsonValue>> {
        BatchLookup::new("id", ids)
            .lookup(&self.dispatcher, endpoint::STATUSES_LOOKUP)
            .await
    }

    /// Ids of the users `subject` follows, or of its followers
    pub async fn connection_ids(
        &self,
        which: Connection,
        subject: Subject,
        max_ids: Option<usize>,
    ) -> Result<Vec<JsonValue>> {
        CursorWalker::new("ids", subject)
            .max_items(max_ids)
            .walk(&self.dispatcher, which.endpoint())
            .await
    }

    /// Locations with trend data, or those closest to `lat_lon`
    pub async fn trend_locations(&self, lat_lon: Option<(f64, f64)>) -> Result<Vec<JsonValue>> {
        let (endpoint, params) = match lat_lon {
            Some((lat, lon)) => (endpoint::TRENDS_CLOSEST, params([("lat", lat), ("long", lon)])),
            None => (endpoint::TRENDS_AVAILABLE, Params::new()),
        };

        match self.dispatcher.dispatch(endpoint, &params).await? {
            Some(JsonValue::Array(places)) => Ok(places),
            Some(payload) if is_blank(&payload) => Ok(Vec::new()),
            None => Ok(Vec::new()),
            Some(_) => Err(Error::decode("trend locations response is not an array")),
        }
    }

    /// Top trends for one WOEID
    pub async fn trends(&self, woeid: u64) -> Result<Vec<JsonValue>> {
        let mut payload = match self
            .dispatcher
            .dispatch(endpoint::TRENDS_PLACE, &params([("id", woeid)]))
            .await?
        {
            Some(payload) if !is_blank(&payload) => payload,
            _ => return Ok(Vec::new()),
        };

        match payload
            .get_mut(0)
            .and_then(|place| place.get_mut("trends"))
            .map(JsonValue::take)
        {
            Some(JsonValue::Array(trends)) => Ok(trends),
            _ => Err(Error::decode("trends response has no 'trends' array")),
        }
    }

    /// Post a tweet
    ///
    /// Posting is not idempotent, so recoverable failures are not retried:
    /// a quota failure yields `None` and a server error is returned.
    pub async fn post_status_update(
        &self,
        status: &str,
        media_ids: &[u64],
    ) -> Result<Option<JsonValue>> {
        let mut params = params([("status", status)]);
        if !media_ids.is_empty() {
            let joined = media_ids
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            params.insert("media_ids".to_string(), joined);
        }

        self.dispatcher
            .dispatch_with(endpoint::STATUSES_UPDATE, &params, RetryMode::Disabled)
            .await
    }

    /// Tweets matching `query`, at most `max_requests` pages of 100
    pub async fn search_tweets(&self, query: &str, max_requests: usize) -> Result<Vec<JsonValue>> {
        SearchWalker::new(query)
            .max_requests(max_requests)
            .walk(&self.dispatcher, endpoint::SEARCH_TWEETS)
            .await
    }
}
