// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # tweetwalk
//!
//! Rate-limit aware, paginated bulk retrieval from the Twitter v1.1 REST API.
//!
//! ## Features
//!
//! - **Dispatcher**: one logical request per call, with quota cooldowns and
//!   exponential backoff on server errors
//! - **Endpoint Registry**: endpoint paths bound to callables once, at startup
//! - **Pagination**: timeline (`max_id`), cursor (`next_cursor`), batch lookup
//!   and search continuation walkers
//! - **Rate Limits**: current quota state, narrowed by category
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tweetwalk::{Client, ClientConfig, Subject};
//!
//! #[tokio::main]
//! async fn main() -> tweetwalk::Result<()> {
//!     let config = ClientConfig::default().with_env_overrides();
//!     let client = Client::from_config(&config)?;
//!
//!     let tweets = client
//!         .user_timeline(Subject::ScreenName("katyperry".into()), Some(500))
//!         .await?;
//!     println!("{} tweets", tweets.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                            Client                            │
//! ├──────────────┬──────────────┬──────────────┬─────────────────┤
//! │   Timeline   │    Cursor    │ Batch Lookup │     Search      │
//! │   Walker     │    Walker    │   Driver     │     Walker      │
//! └──────────────┴──────────────┴──────┬───────┴─────────────────┘
//!                                      │
//!                  ┌───────────────────┴──────────────────┐
//!                  │ Dispatcher (classify, cooldown, wait) │
//!                  └───────────────────┬──────────────────┘
//!                                      │
//!                  ┌───────────────────┴──────────────────┐
//!                  │ EndpointRegistry → HttpEndpoint/Auth  │
//!                  └──────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Static-credential authentication
pub mod auth;

/// HTTP transport
pub mod http;

/// Endpoint identifiers and registry
pub mod endpoint;

/// Request dispatch with retry and backoff
pub mod dispatch;

/// Pagination walkers
pub mod pagination;

/// Rate limit status query
pub mod rate_limit;

/// Client configuration
pub mod config;

/// High-level client
pub mod client;

/// Command-line interface
pub mod cli;

#[cfg(test)]
mod test_support;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use client::Client;
pub use config::ClientConfig;
pub use dispatch::{Dispatcher, RetryMode, RetryPolicy};
pub use endpoint::{Endpoint, EndpointRegistry};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
