//! Common types used throughout tweetwalk
//!
//! This module contains shared type definitions, type aliases,
//! and the small selectors that shape request parameters.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// Request parameters for one call, rendered as strings
///
/// Ordered so that logged and matched requests are stable.
pub type Params = BTreeMap<String, String>;

/// Numeric tweet id
pub type TweetId = u64;

/// Build a parameter map from `(name, value)` pairs
pub fn params<K, V, I>(pairs: I) -> Params
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: ToString,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.to_string()))
        .collect()
}

/// Check whether a payload carries no data at all
///
/// `null`, an empty array and an empty object all count as "nothing".
pub fn is_blank(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => true,
        JsonValue::Array(items) => items.is_empty(),
        JsonValue::Object(map) => map.is_empty(),
        _ => false,
    }
}

// ============================================================================
// Subject Selection
// ============================================================================

/// Which user a timeline or connection request is about
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subject {
    /// The authenticating user (no selector parameter sent)
    #[default]
    Authenticated,
    /// A user by screen name
    ScreenName(String),
    /// A user by numeric id
    UserId(u64),
}

impl Subject {
    /// Pick a subject from optional screen name and user id
    ///
    /// The screen name wins when both are given.
    pub fn from_parts(screen_name: Option<String>, user_id: Option<u64>) -> Self {
        match (screen_name, user_id) {
            (Some(name), _) if !name.is_empty() => Self::ScreenName(name),
            (_, Some(id)) => Self::UserId(id),
            _ => Self::Authenticated,
        }
    }

    /// Insert the selector parameter, if any
    pub fn apply(&self, params: &mut Params) {
        match self {
            Self::Authenticated => {}
            Self::ScreenName(name) => {
                params.insert("screen_name".to_string(), name.clone());
            }
            Self::UserId(id) => {
                params.insert("user_id".to_string(), id.to_string());
            }
        }
    }
}

// ============================================================================
// Connection Type
// ============================================================================

/// Connection direction for id listings
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Connection {
    /// Users the subject follows
    #[default]
    #[value(alias = "following")]
    Friends,
    /// Users following the subject
    Followers,
}

impl Connection {
    /// Endpoint listing ids for this connection type
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Friends => crate::endpoint::FRIENDS_IDS,
            Self::Followers => crate::endpoint::FOLLOWERS_IDS,
        }
    }
}

// ============================================================================
// User Lookup Selection
// ============================================================================

/// A list of users to look up in bulk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Users {
    /// Look up by screen names
    ScreenNames(Vec<String>),
    /// Look up by numeric ids
    UserIds(Vec<u64>),
}

impl Users {
    /// Request parameter carrying the comma-joined chunk
    pub fn param_name(&self) -> &'static str {
        match self {
            Self::ScreenNames(_) => "screen_name",
            Self::UserIds(_) => "user_id",
        }
    }

    /// Values rendered for the lookup parameter
    pub fn values(&self) -> Vec<String> {
        match self {
            Self::ScreenNames(names) => names.clone(),
            Self::UserIds(ids) => ids.iter().map(ToString::to_string).collect(),
        }
    }
}
