//! CLI module
//!
//! Command-line interface over [`crate::Client`].
//!
//! # Commands
//!
//! - `rate-limits` - Current quota state
//! - `home`, `timeline`, `favorites` - Timeline walks
//! - `profiles`, `tweets` - Batch lookups
//! - `connections` - Friend or follower ids
//! - `trend-locations`, `trends` - Trend data
//! - `search` - Tweet search
//! - `post` - Post a tweet

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat, SubjectArgs};
pub use runner::Runner;
